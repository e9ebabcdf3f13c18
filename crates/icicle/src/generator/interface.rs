use crate::{Result, SnowflakeId, TimeSource};

/// A minimal interface for generating Snowflake IDs.
///
/// Implemented by [`LockSnowflakeGenerator`] (shareable across threads) and
/// [`BasicSnowflakeGenerator`] (single-threaded, no lock). Both run the same
/// algorithm and differ only in who guarantees exclusive access to the state.
///
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
/// [`BasicSnowflakeGenerator`]: crate::BasicSnowflakeGenerator
pub trait SnowflakeGenerator<T>: Sized
where
    T: TimeSource,
{
    /// Creates a new generator reading time from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if `instance` is outside
    /// `0..=MAX_INSTANCE`.
    ///
    /// [`Error::InvalidInstance`]: crate::Error::InvalidInstance
    fn with_clock(instance: i64, time: T) -> Result<Self>;

    /// The instance number encoded into every ID.
    fn instance(&self) -> i64;

    /// Mints the next ID.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock is behind the last mint
    /// - [`Error::TimestampOverflow`] if the clock is past the encodable range
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    fn next_id(&self) -> Result<SnowflakeId>;

    /// Mints up to [`MAX_BATCH_SIZE`] IDs in one uninterrupted run.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::next_id`] does. A failure part way through discards
    /// the IDs already minted for the batch.
    ///
    /// [`MAX_BATCH_SIZE`]: crate::MAX_BATCH_SIZE
    fn batch(&self, count: i64) -> Result<Vec<SnowflakeId>>;
}
