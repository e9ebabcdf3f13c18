#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result, SnowflakeId, SystemClock, TimeSource,
    generator::{
        Mutex, MutexGuard, SnowflakeGenerator,
        state::{State, validate_instance},
    },
};

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The generator state sits behind a single [`Mutex`] that is held across the
/// whole mint: the clock read, the wait for a fresh millisecond when the
/// sequence is exhausted, and the state update. Two threads can therefore
/// never observe the same `(timestamp, sequence)` pair. Share it by wrapping
/// it in an [`Arc`].
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Atomic batches: no other caller's IDs interleave with a batch
/// - ✅ Lock-free fast path via [`Self::next_id_unsync`] when you hold `&mut`
///
/// ## See Also
/// - [`BasicSnowflakeGenerator`]
///
/// [`Arc`]: std::sync::Arc
/// [`BasicSnowflakeGenerator`]: crate::BasicSnowflakeGenerator
pub struct LockSnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    instance: i64,
    time: T,
}

impl LockSnowflakeGenerator<SystemClock> {
    /// Creates a new [`LockSnowflakeGenerator`] reading the system clock.
    ///
    /// The last timestamp and sequence start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if `instance` is negative or greater
    /// than [`MAX_INSTANCE`].
    ///
    /// # Example
    /// ```
    /// use icicle::LockSnowflakeGenerator;
    ///
    /// let generator = LockSnowflakeGenerator::new(7)?;
    /// let id = generator.next_id()?;
    /// assert_eq!(id.instance(), 7);
    /// # Ok::<(), icicle::Error>(())
    /// ```
    ///
    /// [`Error::InvalidInstance`]: crate::Error::InvalidInstance
    /// [`MAX_INSTANCE`]: crate::MAX_INSTANCE
    pub fn new(instance: i64) -> Result<Self> {
        Self::with_clock(instance, SystemClock)
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockSnowflakeGenerator`] that reads time from `time`.
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
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(State::new())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(State::new()),
            instance,
            time,
        })
    }

    /// The instance number encoded into every ID.
    pub const fn instance(&self) -> i64 {
        self.instance
    }

    /// Mints the next ID, holding the lock for the whole operation.
    ///
    /// If the current millisecond's 4096 sequence values are used up, the call
    /// sleeps in 1 ms steps until the clock advances.
    ///
    /// # Errors
    /// - [`Error::ClockRegression`] if the clock reads earlier than the last
    ///   mint. The generator state is left as it was.
    /// - [`Error::TimestampOverflow`] if the clock is outside the range
    ///   encodable from [`ORIGIN_EPOCH`].
    /// - [`Error::LockPoisoned`] if another thread panicked while minting
    ///   (not available with `parking-lot`).
    ///
    /// # Example
    /// ```
    /// use icicle::{LockSnowflakeGenerator, decompose};
    ///
    /// let generator = LockSnowflakeGenerator::new(317)?;
    /// let a = generator.next_id()?;
    /// let b = generator.next_id()?;
    /// assert!(a < b);
    /// assert_eq!(decompose(b.to_raw()).instance, 317);
    /// # Ok::<(), icicle::Error>(())
    /// ```
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    /// [`ORIGIN_EPOCH`]: crate::ORIGIN_EPOCH
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.lock()?;
        state.next_id(self.instance, &self.time)
    }

    /// Mints `count` IDs under a single lock acquisition.
    ///
    /// A negative `count`, or one above [`MAX_BATCH_SIZE`], is clamped to
    /// [`MAX_BATCH_SIZE`]. The returned IDs are strictly increasing and no
    /// concurrent caller can mint an ID that falls between them.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::next_id`] does. No IDs are returned on failure.
    ///
    /// # Example
    /// ```
    /// use icicle::{LockSnowflakeGenerator, MAX_BATCH_SIZE};
    ///
    /// let generator = LockSnowflakeGenerator::new(0)?;
    /// assert_eq!(generator.batch(32)?.len(), 32);
    /// assert_eq!(generator.batch(-1)?.len(), MAX_BATCH_SIZE);
    /// # Ok::<(), icicle::Error>(())
    /// ```
    ///
    /// [`MAX_BATCH_SIZE`]: crate::MAX_BATCH_SIZE
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn batch(&self, count: i64) -> Result<Vec<SnowflakeId>> {
        let mut state = self.lock()?;
        state.batch(self.instance, &self.time, count)
    }

    /// Mints the next ID without acquiring the lock.
    ///
    /// The exclusive borrow is the proof that no other thread can be minting
    /// from this generator, so the algorithm runs directly on the state. Use
    /// this when the generator is pinned to one worker.
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    ///
    /// # Example
    /// ```
    /// use icicle::LockSnowflakeGenerator;
    ///
    /// let mut generator = LockSnowflakeGenerator::new(1)?;
    /// let a = generator.next_id_unsync()?;
    /// let b = generator.next_id()?;
    /// assert!(a < b);
    /// # Ok::<(), icicle::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_unsync(&mut self) -> Result<SnowflakeId> {
        let state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.get_mut()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state
                    .get_mut()
                    .map_err(|_| crate::Error::LockPoisoned)?
            }
        };
        state.next_id(self.instance, &self.time)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<T> SnowflakeGenerator<T> for LockSnowflakeGenerator<T>
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
