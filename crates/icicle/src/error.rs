/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `icicle` can emit.
///
/// Every error is returned to the immediate caller. The generator never
/// retries internally except for the expected wait when a millisecond's
/// sequence space is exhausted, which is not an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The instance number does not fit in the 10-bit instance field.
    ///
    /// Raised at construction time. Not retryable without correcting the
    /// input.
    #[error("instance number {instance} is outside 0..=1023")]
    InvalidInstance {
        /// The rejected instance number.
        instance: i64,
    },

    /// The clock reported a time earlier than the last successful mint.
    ///
    /// Minting anyway could produce duplicate or non-monotonic IDs, so the
    /// generator refuses and leaves its state untouched.
    #[error("clock moved backwards: last mint at {last} ms, clock now reads {now} ms")]
    ClockRegression {
        /// Unix milliseconds of the last successful mint.
        last: i64,
        /// Unix milliseconds the clock reported.
        now: i64,
    },

    /// The clock reading cannot be encoded in the 41-bit timestamp field.
    ///
    /// This is permanent for the configured [`ORIGIN_EPOCH`].
    ///
    /// [`ORIGIN_EPOCH`]: crate::ORIGIN_EPOCH
    #[error("timestamp {now} ms is outside the range encodable from the origin epoch")]
    TimestampOverflow {
        /// Unix milliseconds the clock reported.
        now: i64,
    },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
