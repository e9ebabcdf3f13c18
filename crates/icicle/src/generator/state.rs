use core::time::Duration;
use std::thread;

use crate::{
    Error, MAX_INSTANCE, MAX_SEQUENCE, MAX_TIMESTAMP, ORIGIN_EPOCH, Result, SnowflakeId,
    TimeSource,
};

/// Upper bound on the number of IDs a single batch call returns.
///
/// Requests for more (or for a negative count) are clamped to this value.
pub const MAX_BATCH_SIZE: usize = 1024;

/// How long to sleep before re-reading the clock when the current
/// millisecond's sequence space is used up.
const EXHAUSTED_WAIT: Duration = Duration::from_millis(1);

/// The mutable part of a generator: the last minted millisecond and the
/// sequence counter for it.
///
/// Every generator owns exactly one `State` and only ever mutates it through
/// [`State::next_id`], which leaves it untouched on error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    pub(crate) last_timestamp: i64,
    pub(crate) last_sequence: i64,
}

impl State {
    pub(crate) const fn new() -> Self {
        Self {
            last_timestamp: 0,
            last_sequence: 0,
        }
    }

    /// Mints one ID for `instance`.
    ///
    /// Blocks in short sleeps while the sequence for the current millisecond
    /// is exhausted, re-reading `time` until it moves past `last_timestamp`.
    pub(crate) fn next_id(&mut self, instance: i64, time: &impl TimeSource) -> Result<SnowflakeId> {
        let now = loop {
            let now = time.current_millis();
            if now < self.last_timestamp {
                return Err(Self::cold_clock_behind(self.last_timestamp, now));
            }
            if now > self.last_timestamp || self.last_sequence < MAX_SEQUENCE {
                break now;
            }
            thread::sleep(EXHAUSTED_WAIT);
        };

        let offset = now.saturating_sub(ORIGIN_EPOCH);
        if !(0..MAX_TIMESTAMP).contains(&offset) {
            return Err(Self::cold_timestamp_overflow(now));
        }

        if now == self.last_timestamp {
            self.last_sequence += 1;
        } else {
            self.last_sequence = 0;
        }
        self.last_timestamp = now;

        Ok(SnowflakeId::from_components(
            offset,
            instance,
            self.last_sequence,
        ))
    }

    /// Mints `count` IDs back to back. Any failure discards the whole batch.
    pub(crate) fn batch(
        &mut self,
        instance: i64,
        time: &impl TimeSource,
        count: i64,
    ) -> Result<Vec<SnowflakeId>> {
        let count = clamp_batch(count);
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.next_id(instance, time)?);
        }
        Ok(ids)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: i64, now: i64) -> Error {
        Error::ClockRegression { last, now }
    }

    #[cold]
    #[inline(never)]
    fn cold_timestamp_overflow(now: i64) -> Error {
        Error::TimestampOverflow { now }
    }
}

/// Checks that `instance` fits in the 10-bit instance field.
pub(crate) fn validate_instance(instance: i64) -> Result<i64> {
    if (0..=MAX_INSTANCE).contains(&instance) {
        Ok(instance)
    } else {
        Err(Error::InvalidInstance { instance })
    }
}

/// Normalizes a requested batch size into `0..=MAX_BATCH_SIZE`.
pub(crate) fn clamp_batch(count: i64) -> usize {
    match usize::try_from(count) {
        Ok(count) if count <= MAX_BATCH_SIZE => count,
        _ => MAX_BATCH_SIZE,
    }
}
