use thiserror::Error;

/// Errors returned by [`BitSet`](crate::BitSet) operations.
///
/// Every error is reported before any state is touched, so an operation that
/// fails leaves all of its operands exactly as they were.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BitSetError {
    /// The requested bit count is zero or cannot be backed by a buffer on this
    /// platform.
    #[error("bit count must be a positive number that fits in memory, got {bit_count}")]
    InvalidSize {
        /// The rejected bit count.
        bit_count: u64,
    },

    /// Two sets taking part in a union or intersection have different byte
    /// counts.
    #[error("cannot combine bitsets of differing size ({left} bytes vs {right} bytes)")]
    SizeMismatch {
        /// Byte count of the receiver.
        left: u64,
        /// Byte count of the argument.
        right: u64,
    },

    /// A bit index lies past the last bit of the backing buffer.
    #[error("bit index {index} out of range for a buffer of {capacity} bits")]
    IndexOutOfRange {
        /// The rejected index.
        index: u64,
        /// Number of addressable bits, pad bits included.
        capacity: u64,
    },

    /// Raw bytes handed to a constructor do not match the bit count.
    #[error("{bit_count} bits need {expected} bytes, got {actual}")]
    LengthMismatch {
        /// The requested bit count.
        bit_count: u64,
        /// `ceil(bit_count / 8)`.
        expected: u64,
        /// Length of the provided buffer.
        actual: u64,
    },

    /// A hex string could not be decoded.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(hex::FromHexError),
}
