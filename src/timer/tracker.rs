use std::time::Duration;

use log::debug;

use super::{CancelToken, TimeSource};
use crate::aggregate::WorkItem;

/// Run a timed phase of `total` length on the given time source.
///
/// `on_progress` receives the elapsed time and the progress in percent on
/// every tick. Once the elapsed time reaches `total`, `on_finished` runs exactly
/// once and the returned token is cancelled, which stops the timer. Cancelling
/// the token earlier suppresses every further callback.
pub fn start_phase<P, F>(
    total: Duration,
    mut on_progress: P,
    on_finished: F,
    time_source: &dyn TimeSource,
) -> CancelToken
where
    P: FnMut(Duration, f64) + Send + 'static,
    F: FnOnce() + Send + 'static,
{
    let token = CancelToken::new();
    let phase_token = token.clone();
    let mut on_finished = Some(on_finished);

    debug!("event=phase_started module=timer total_secs={}", total.as_secs());
    let on_tick = move |elapsed: Duration| {
        if phase_token.is_cancelled() {
            return;
        }
        on_progress(elapsed, progress(elapsed, total));
        if elapsed >= total {
            if let Some(finish) = on_finished.take() {
                debug!("event=phase_finished module=timer total_secs={}", total.as_secs());
                finish();
            }
            phase_token.cancel();
        }
    };
    time_source.start_timer(Box::new(on_tick), token.clone());
    token
}

/// Progress of a phase in percent. A zero-length phase is complete at once.
pub fn progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 100.0;
    }
    100.0 * elapsed.as_secs_f64() / total.as_secs_f64()
}

/// Label pair shown while working on an item: its name and the number of the
/// phase about to start.
pub fn work_item_description(item: &WorkItem) -> (String, String) {
    (
        item.name.clone(),
        format!("Phase {}", item.working_phases.len() + 1),
    )
}
