use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;

use super::CancelToken;

/// Callback invoked on every tick with the time elapsed since the timer started.
pub type TickFn = Box<dyn FnMut(Duration) + Send>;

/// Supplies the current date and time plus a recurring tick primitive.
pub trait TimeSource: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> NaiveDateTime;

    /// Start calling `on_tick` until `token` is cancelled.
    ///
    /// The first tick fires right after the timer is armed, so callers get an
    /// immediate zero-elapsed reading.
    fn start_timer(&self, on_tick: TickFn, token: CancelToken);
}

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Shortest interval a [`SystemTimeSource`] ticks at.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Wall-clock time source ticking on a background thread.
#[derive(Clone, Debug)]
pub struct SystemTimeSource {
    tick_interval: Duration,
}

impl SystemTimeSource {
    /// Intervals below [`MIN_TICK_INTERVAL`] are raised to it.
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval: tick_interval.max(MIN_TICK_INTERVAL),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl TimeSource for SystemTimeSource {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn start_timer(&self, mut on_tick: TickFn, token: CancelToken) {
        let interval = self.tick_interval;
        thread::spawn(move || {
            let started = Instant::now();
            loop {
                if token.is_cancelled() {
                    debug!("event=timer_stopped module=timer elapsed_ms={}", started.elapsed().as_millis());
                    break;
                }
                on_tick(started.elapsed());
                thread::sleep(interval);
            }
        });
    }
}

struct ManualState {
    now: NaiveDateTime,
    timer: Option<(TickFn, CancelToken)>,
}

/// Deterministic time source driven by hand.
///
/// `now` stays where it is set; the running timer only ticks when
/// [`set_elapsed`](Self::set_elapsed) is called. Ticks run on the calling
/// thread.
#[derive(Clone)]
pub struct ManualTimeSource {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTimeSource {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState { now, timer: None })),
        }
    }

    pub fn set_now(&self, now: NaiveDateTime) {
        self.lock().now = now;
    }

    /// Whether a timer is armed and not yet cancelled.
    pub fn is_running(&self) -> bool {
        self.lock()
            .timer
            .as_ref()
            .is_some_and(|(_, token)| !token.is_cancelled())
    }

    /// Fire one tick of the running timer with the given elapsed time.
    ///
    /// A cancelled timer is released instead of ticked.
    pub fn set_elapsed(&self, elapsed: Duration) {
        // The tick may call back into this source (e.g. `now()`), so it must
        // run without the lock held.
        let Some((mut on_tick, token)) = self.lock().timer.take() else {
            return;
        };
        if token.is_cancelled() {
            return;
        }
        on_tick(elapsed);

        let mut state = self.lock();
        if state.timer.is_none() && !token.is_cancelled() {
            state.timer = Some((on_tick, token));
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimeSource for ManualTimeSource {
    fn today(&self) -> NaiveDate {
        self.lock().now.date()
    }

    fn now(&self) -> NaiveDateTime {
        self.lock().now
    }

    fn start_timer(&self, on_tick: TickFn, token: CancelToken) {
        self.lock().timer = Some((on_tick, token));
        self.set_elapsed(Duration::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 28)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn manual_source_ticks_on_demand() {
        let source = ManualTimeSource::new(noon());
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let seen = ticks.clone();
        source.start_timer(
            Box::new(move |elapsed| seen.lock().unwrap().push(elapsed)),
            CancelToken::new(),
        );

        source.set_elapsed(Duration::from_secs(3));
        assert_eq!(
            *ticks.lock().unwrap(),
            vec![Duration::ZERO, Duration::from_secs(3)]
        );
        assert_eq!(source.today(), noon().date());
    }

    #[test]
    fn manual_source_stops_after_cancel() {
        let source = ManualTimeSource::new(noon());
        let token = CancelToken::new();
        let ticks = Arc::new(Mutex::new(0));
        let seen = ticks.clone();
        source.start_timer(Box::new(move |_| *seen.lock().unwrap() += 1), token.clone());

        token.cancel();
        source.set_elapsed(Duration::from_secs(1));

        assert_eq!(*ticks.lock().unwrap(), 1);
        assert!(!source.is_running());
    }

    #[test]
    fn tick_may_read_the_source() {
        let source = ManualTimeSource::new(noon());
        let reader = source.clone();
        let (tx, rx) = mpsc::channel();
        source.start_timer(
            Box::new(move |_| {
                let _ = tx.send(reader.now());
            }),
            CancelToken::new(),
        );
        assert_eq!(rx.recv().unwrap(), noon());
    }

    #[test]
    fn zero_interval_is_raised_to_minimum() {
        assert_eq!(
            SystemTimeSource::new(Duration::ZERO).tick_interval(),
            MIN_TICK_INTERVAL
        );
        assert_eq!(
            SystemTimeSource::default().tick_interval(),
            DEFAULT_TICK_INTERVAL
        );
    }

    #[test]
    fn system_source_ticks_until_cancelled() {
        let source = SystemTimeSource::new(Duration::from_millis(5));
        let token = CancelToken::new();
        let (tx, rx) = mpsc::channel();
        source.start_timer(
            Box::new(move |elapsed| {
                let _ = tx.send(elapsed);
            }),
            token.clone(),
        );

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(first < Duration::from_secs(1));
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        token.cancel();
        thread::sleep(Duration::from_millis(50));
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(50));
        assert!(rx.try_recv().is_err());
    }
}
