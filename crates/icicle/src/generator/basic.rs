use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result, SnowflakeId, SystemClock, TimeSource,
    generator::{
        SnowflakeGenerator,
        state::{State, validate_instance},
    },
};

/// A non-concurrent Snowflake ID generator suitable for single-threaded
/// environments.
///
/// The state lives in a [`Cell`], so the generator is `Send` but not `Sync`:
/// the compiler rejects sharing it between threads, which is exactly the
/// contract the lock-free path needs.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ No lock on any path
///
/// ## Recommended When
/// - Each worker owns its own generator (with its own instance number)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
pub struct BasicSnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    state: Cell<State>,
    instance: i64,
    time: T,
}

impl BasicSnowflakeGenerator<SystemClock> {
    /// Creates a new [`BasicSnowflakeGenerator`] reading the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if `instance` is outside
    /// `0..=MAX_INSTANCE`.
    ///
    /// # Example
    /// ```
    /// use icicle::BasicSnowflakeGenerator;
    ///
    /// let generator = BasicSnowflakeGenerator::new(12)?;
    /// let ids = generator.batch(4)?;
    /// assert!(ids.windows(2).all(|w| w[0] < w[1]));
    /// # Ok::<(), icicle::Error>(())
    /// ```
    ///
    /// [`Error::InvalidInstance`]: crate::Error::InvalidInstance
    pub fn new(instance: i64) -> Result<Self> {
        Self::with_clock(instance, SystemClock)
    }
}

impl<T> BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`BasicSnowflakeGenerator`] that reads time from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if `instance` is outside
    /// `0..=MAX_INSTANCE`.
    ///
    /// [`Error::InvalidInstance`]: crate::Error::InvalidInstance
    pub fn with_clock(instance: i64, time: T) -> Result<Self> {
        let instance = validate_instance(instance)?;
        Ok(Self {
            state: Cell::new(State::new()),
            instance,
            time,
        })
    }

    /// The instance number encoded into every ID.
    pub const fn instance(&self) -> i64 {
        self.instance
    }

    /// Mints the next ID.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock reads earlier than the last
    ///   mint
    /// - [`Error::TimestampOverflow`] if the clock is past the encodable range
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        self.with_state(|state| state.next_id(self.instance, &self.time))
    }

    /// Mints `count` IDs back to back, clamping `count` to
    /// [`MAX_BATCH_SIZE`] when it is negative or too large.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::next_id`] does. No IDs are returned on failure.
    ///
    /// [`MAX_BATCH_SIZE`]: crate::MAX_BATCH_SIZE
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn batch(&self, count: i64) -> Result<Vec<SnowflakeId>> {
        self.with_state(|state| state.batch(self.instance, &self.time, count))
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.get();
        let out = f(&mut state);
        self.state.set(state);
        out
    }
}

impl<T> SnowflakeGenerator<T> for BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn with_clock(instance: i64, time: T) -> Result<Self> {
        Self::with_clock(instance, time)
    }

    fn instance(&self) -> i64 {
        self.instance()
    }

    fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id()
    }

    fn batch(&self, count: i64) -> Result<Vec<SnowflakeId>> {
        self.batch(count)
    }
}
