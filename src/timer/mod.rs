//! Phase timing.
//!
//! A phase is a fixed-length interval (concentration or break) driven by the
//! ticks of a [`TimeSource`]. The time source decides where ticks run; the
//! phase logic itself is thread-agnostic.

mod cancel;
mod source;
mod tracker;

pub use cancel::CancelToken;
pub use source::{
    ManualTimeSource, SystemTimeSource, TickFn, TimeSource, DEFAULT_TICK_INTERVAL,
    MIN_TICK_INTERVAL,
};
pub use tracker::{progress, start_phase, work_item_description};
