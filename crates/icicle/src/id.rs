use core::fmt;

/// Origin epoch: Monday, January 14, 2019 06:18:12 UTC, in Unix milliseconds.
///
/// Subtracted from the wall clock before encoding so the 41-bit timestamp
/// field lasts roughly 69 years from this instant.
pub const ORIGIN_EPOCH: i64 = 1_547_417_892_000;

/// Width of the sequence field.
pub const SEQUENCE_BITS: u32 = 12;

/// Width of the instance field.
pub const INSTANCE_BITS: u32 = 10;

/// Width of the timestamp field.
pub const TIMESTAMP_BITS: u32 = 41;

/// Largest sequence value within one millisecond.
pub const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;

/// Largest instance number a generator can be created with.
pub const MAX_INSTANCE: i64 = (1 << INSTANCE_BITS) - 1;

/// Largest encodable timestamp offset from [`ORIGIN_EPOCH`].
pub const MAX_TIMESTAMP: i64 = (1 << TIMESTAMP_BITS) - 1;

/// A 64-bit Snowflake ID.
///
/// - 1 bit reserved (always zero, so IDs are never negative)
/// - 41 bits timestamp (ms since [`ORIGIN_EPOCH`])
/// - 10 bits instance number
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21             12 11             0
///              +--------------+----------------+-----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | instance (10)   | sequence (12) |
///              +--------------+----------------+-----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
/// ```
///
/// Ordering follows the raw integer, so IDs minted later by the same
/// generator always compare greater.
///
/// # Example
///
/// ```
/// use icicle::{ORIGIN_EPOCH, SnowflakeId};
///
/// let id = SnowflakeId::from_components(1000, 2, 1);
/// assert_eq!(id.timestamp_offset(), 1000);
/// assert_eq!(id.timestamp(), ORIGIN_EPOCH + 1000);
/// assert_eq!(id.instance(), 2);
/// assert_eq!(id.sequence(), 1);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Bitmask for the 41-bit timestamp field. Occupies bits 22 through 62.
    pub const TIMESTAMP_MASK: i64 = MAX_TIMESTAMP;

    /// Bitmask for the 10-bit instance field. Occupies bits 12 through 21.
    pub const INSTANCE_MASK: i64 = MAX_INSTANCE;

    /// Bitmask for the 12-bit sequence field. Occupies bits 0 through 11.
    pub const SEQUENCE_MASK: i64 = MAX_SEQUENCE;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = INSTANCE_BITS + SEQUENCE_BITS;

    /// Number of bits to shift the instance to its position (bit 12).
    pub const INSTANCE_SHIFT: u32 = SEQUENCE_BITS;

    /// Packs the three fields into an ID. Each field is masked to its width.
    pub const fn from_components(timestamp_offset: i64, instance: i64, sequence: i64) -> Self {
        let timestamp = (timestamp_offset & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let instance = (instance & Self::INSTANCE_MASK) << Self::INSTANCE_SHIFT;
        let sequence = sequence & Self::SEQUENCE_MASK;
        Self {
            id: timestamp | instance | sequence,
        }
    }

    /// Wraps a raw integer without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw integer.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Milliseconds since [`ORIGIN_EPOCH`], as stored in the ID.
    pub const fn timestamp_offset(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Unix milliseconds at which the ID was minted.
    pub const fn timestamp(&self) -> i64 {
        self.timestamp_offset() + ORIGIN_EPOCH
    }

    /// Extracts the instance number.
    pub const fn instance(&self) -> i64 {
        (self.id >> Self::INSTANCE_SHIFT) & Self::INSTANCE_MASK
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> i64 {
        self.id & Self::SEQUENCE_MASK
    }

    /// Splits the ID into its fields. See [`decompose`].
    pub const fn decompose(&self) -> Decomposed {
        decompose(self.id)
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.id
    }
}

impl From<i64> for SnowflakeId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp_offset", &self.timestamp_offset())
            .field("instance", &self.instance())
            .field("sequence", &self.sequence())
            .finish()
    }
}

/// The three fields recovered from an ID by [`decompose`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decomposed {
    /// Unix milliseconds (the stored offset plus [`ORIGIN_EPOCH`]).
    pub timestamp: i64,
    /// Instance number, 0-1023.
    pub instance: i64,
    /// Sequence number, 0-4095.
    pub sequence: i64,
}

impl Decomposed {
    /// Re-encodes the fields with the same bit layout.
    ///
    /// For any ID produced by a generator, `decompose(id).to_id()` is `id`.
    pub const fn to_id(&self) -> SnowflakeId {
        SnowflakeId::from_components(
            self.timestamp.wrapping_sub(ORIGIN_EPOCH),
            self.instance,
            self.sequence,
        )
    }
}

/// Splits a raw ID into `(timestamp, instance, sequence)`.
///
/// This is a mechanical bit-field extraction and accepts every 64-bit input;
/// it does not check that the value was ever minted.
///
/// # Example
///
/// ```
/// use icicle::{ORIGIN_EPOCH, decompose};
///
/// let parts = decompose((5 << 22) | (317 << 12) | 9);
/// assert_eq!(parts.timestamp, ORIGIN_EPOCH + 5);
/// assert_eq!(parts.instance, 317);
/// assert_eq!(parts.sequence, 9);
/// ```
pub const fn decompose(id: i64) -> Decomposed {
    Decomposed {
        timestamp: (id >> SnowflakeId::TIMESTAMP_SHIFT) + ORIGIN_EPOCH,
        instance: (id >> SnowflakeId::INSTANCE_SHIFT) & SnowflakeId::INSTANCE_MASK,
        sequence: id & SnowflakeId::SEQUENCE_MASK,
    }
}
