use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// Generators read the clock once per mint (more while waiting out an
/// exhausted millisecond). Plug in [`SystemClock`] for production and a mocked
/// source in tests.
///
/// # Example
///
/// ```
/// use icicle::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1_700_000_000_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_700_000_000_000);
/// ```
pub trait TimeSource {
    /// Returns the current Unix time in milliseconds.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

/// The system wall clock, truncated to milliseconds.
///
/// This clock follows any adjustment made to the host's time, including
/// backwards steps. Generators surface those as
/// [`Error::ClockRegression`](crate::Error::ClockRegression) instead of
/// correcting them.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        // A host clock set before 1970 reads as zero.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ORIGIN_EPOCH;

    #[test]
    fn system_clock_is_after_origin() {
        assert!(SystemClock.current_millis() > ORIGIN_EPOCH);
    }

    fn read(time: impl TimeSource) -> i64 {
        time.current_millis()
    }

    #[test]
    fn shared_clock_delegates() {
        let a = read(&SystemClock);
        let b = read(Arc::new(SystemClock));
        assert!(b >= a);
    }
}
