use crate::BitSetError;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter, LowerHex};
use core::iter::FusedIterator;
use tracing::trace;

/// Computes the number of bytes needed to store `bit_count` bits.
///
/// # Examples
/// ```
/// use byte_bitset::byte_count;
///
/// assert_eq!(byte_count(7), 1);
/// assert_eq!(byte_count(8), 1);
/// assert_eq!(byte_count(9), 2);
/// assert_eq!(byte_count(1000), 125);
/// ```
pub const fn byte_count(bit_count: u64) -> u64 {
    bit_count.div_ceil(8)
}

/// Buffer length for `bit_count` bits, or `InvalidSize` if there is none.
fn buffer_len(bit_count: u64) -> Result<usize, BitSetError> {
    if bit_count == 0 {
        return Err(BitSetError::InvalidSize { bit_count });
    }
    usize::try_from(byte_count(bit_count)).map_err(|_| BitSetError::InvalidSize { bit_count })
}

/// A fixed number of boolean flags packed into an owned byte buffer.
///
/// Bit `i` is stored in byte `i / 8` under the mask `1 << (i % 8)`, so the
/// least significant bit of the first byte is bit 0. The buffer always holds
/// exactly [`byte_count(bit_count)`](byte_count) bytes.
///
/// When `bit_count` is not a multiple of 8 the last byte carries up to seven
/// pad bits. Pad bits are addressable through [`set`] and [`test`] and take
/// part in every byte-level operation ([`union`], [`intersect`],
/// [`count_ones`], [`as_bytes`], [`to_hex`]). Only [`iter_ones`] and the
/// `Debug` output stop at `bit_count`.
///
/// [`set`]: BitSet::set
/// [`test`]: BitSet::test
/// [`union`]: BitSet::union
/// [`intersect`]: BitSet::intersect
/// [`count_ones`]: BitSet::count_ones
/// [`as_bytes`]: BitSet::as_bytes
/// [`to_hex`]: BitSet::to_hex
/// [`iter_ones`]: BitSet::iter_ones
#[derive(PartialEq, Eq, Hash, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(into = "crate::repr::BitSetRepr", try_from = "crate::repr::BitSetRepr")
)]
pub struct BitSet {
    bit_count: u64,
    bytes: Box<[u8]>,
}

impl BitSet {
    /// Creates a bitset of `bit_count` bits, all unset.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidSize`] if `bit_count == 0`, if the
    /// buffer length does not fit in `usize` or if the buffer cannot be
    /// allocated.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::{BitSet, BitSetError};
    ///
    /// let bits = BitSet::new(20).unwrap();
    /// assert_eq!(bits.bit_count(), 20);
    /// assert_eq!(bits.byte_count(), 3);
    /// assert_eq!(bits.count_ones(), 0);
    ///
    /// assert_eq!(BitSet::new(0), Err(BitSetError::InvalidSize { bit_count: 0 }));
    /// ```
    pub fn new(bit_count: u64) -> Result<Self, BitSetError> {
        let len = buffer_len(bit_count)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| BitSetError::InvalidSize { bit_count })?;
        bytes.resize(len, 0);
        trace!(bit_count, bytes = len, "new bitset");
        Ok(Self {
            bit_count,
            bytes: bytes.into_boxed_slice(),
        })
    }

    /// Creates a bitset of `bit_count` bits from a copy of `bytes`.
    ///
    /// This is the inverse of [`as_bytes`](BitSet::as_bytes). The slice is
    /// copied, so later changes to it never reach the bitset. Pad bits set in
    /// the last byte are kept as they are.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidSize`] if `bit_count == 0` and
    /// [`BitSetError::LengthMismatch`] if `bytes.len() != byte_count(bit_count)`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut original = BitSet::new(1000).unwrap();
    /// original.set(354).unwrap();
    ///
    /// let restored = BitSet::from_bytes(1000, original.as_bytes()).unwrap();
    /// assert_eq!(restored, original);
    /// assert!(BitSet::from_bytes(1000, &[0u8; 124]).is_err());
    /// ```
    pub fn from_bytes(bit_count: u64, bytes: &[u8]) -> Result<Self, BitSetError> {
        Self::check_len(bit_count, bytes.len())?;
        trace!(bit_count, bytes = bytes.len(), "bitset from bytes");
        Ok(Self {
            bit_count,
            bytes: bytes.into(),
        })
    }

    /// Creates a bitset of `bit_count` bits from the output of
    /// [`to_hex`](BitSet::to_hex).
    ///
    /// Upper and lower case digits are both accepted.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidHex`] if `hex` is not an even-length
    /// string of hex digits, otherwise the same errors as
    /// [`from_bytes`](BitSet::from_bytes).
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let bits = BitSet::from_hex(16, "8101").unwrap();
    /// assert!(bits.test(0).unwrap());
    /// assert!(bits.test(7).unwrap());
    /// assert!(bits.test(8).unwrap());
    /// assert_eq!(bits.to_hex(), "8101");
    /// ```
    pub fn from_hex(bit_count: u64, hex: &str) -> Result<Self, BitSetError> {
        let bytes = hex::decode(hex).map_err(BitSetError::InvalidHex)?;
        Self::check_len(bit_count, bytes.len())?;
        trace!(bit_count, bytes = bytes.len(), "bitset from hex");
        Ok(Self {
            bit_count,
            bytes: bytes.into_boxed_slice(),
        })
    }

    fn check_len(bit_count: u64, actual: usize) -> Result<(), BitSetError> {
        let expected = buffer_len(bit_count)?;
        if actual != expected {
            return Err(BitSetError::LengthMismatch {
                bit_count,
                expected: expected as u64,
                actual: actual as u64,
            });
        }
        Ok(())
    }

    /// Sets the bit at the given index. Setting a bit twice has no further
    /// effect.
    ///
    /// Indices in `bit_count..8 * byte_count` address pad bits and are
    /// accepted.
    ///
    /// # Errors
    /// Returns [`BitSetError::IndexOutOfRange`] if `idx` lies past the end of
    /// the buffer.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut bits = BitSet::new(10).unwrap();
    /// bits.set(3).unwrap();
    /// assert!(bits.test(3).unwrap());
    ///
    /// // bits 10..16 are padding in the second byte
    /// assert!(bits.set(15).is_ok());
    /// assert!(bits.set(16).is_err());
    /// ```
    #[inline]
    pub fn set(&mut self, idx: u64) -> Result<(), BitSetError> {
        let (byte_idx, mask) = self.idxs(idx)?;
        self.bytes[byte_idx] |= mask;
        Ok(())
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// # Errors
    /// Returns [`BitSetError::IndexOutOfRange`] under the same rule as
    /// [`set`](BitSet::set).
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut bits = BitSet::new(8).unwrap();
    /// bits.set(1).unwrap();
    /// assert!(bits.test(1).unwrap());
    /// assert!(!bits.test(0).unwrap());
    /// ```
    #[inline]
    pub fn test(&self, idx: u64) -> Result<bool, BitSetError> {
        let (byte_idx, mask) = self.idxs(idx)?;
        Ok(self.bytes[byte_idx] & mask != 0)
    }

    #[inline]
    fn idxs(&self, idx: u64) -> Result<(usize, u8), BitSetError> {
        match usize::try_from(idx / 8) {
            Ok(byte_idx) if byte_idx < self.bytes.len() => Ok((byte_idx, 1 << (idx % 8))),
            _ => Err(BitSetError::IndexOutOfRange {
                index: idx,
                capacity: self.capacity(),
            }),
        }
    }

    /// Number of addressable bits, pad bits included.
    #[inline]
    fn capacity(&self) -> u64 {
        (self.bytes.len() as u64).saturating_mul(8)
    }

    /// Sets every bit that is set in `other` (bitwise OR, byte by byte).
    ///
    /// Only the byte counts have to agree: two sets with different bit counts
    /// but the same number of bytes can be combined, and their pad bits are
    /// combined along with everything else.
    ///
    /// # Errors
    /// Returns [`BitSetError::SizeMismatch`] if the byte counts differ. Neither
    /// set is modified in that case.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut a = BitSet::new(20).unwrap();
    /// let mut b = BitSet::new(20).unwrap();
    /// a.set(5).unwrap();
    /// b.set(6).unwrap();
    ///
    /// a.union(&b).unwrap();
    /// assert!(a.test(5).unwrap());
    /// assert!(a.test(6).unwrap());
    /// assert_eq!(b.count_ones(), 1);
    /// ```
    pub fn union(&mut self, other: &Self) -> Result<(), BitSetError> {
        self.check_same_size(other)?;
        trace!(bytes = self.bytes.len(), "bitset union");
        for (self_byte, other_byte) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *self_byte |= other_byte
        }
        Ok(())
    }

    /// Keeps only the bits that are also set in `other` (bitwise AND, byte by
    /// byte).
    ///
    /// The size rule is the same as for [`union`](BitSet::union).
    ///
    /// # Errors
    /// Returns [`BitSetError::SizeMismatch`] if the byte counts differ. Neither
    /// set is modified in that case.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut a = BitSet::new(20).unwrap();
    /// let mut b = BitSet::new(20).unwrap();
    /// a.set(5).unwrap();
    /// b.set(5).unwrap();
    /// b.set(6).unwrap();
    ///
    /// a.intersect(&b).unwrap();
    /// assert!(a.test(5).unwrap());
    /// assert!(!a.test(6).unwrap());
    /// ```
    pub fn intersect(&mut self, other: &Self) -> Result<(), BitSetError> {
        self.check_same_size(other)?;
        trace!(bytes = self.bytes.len(), "bitset intersect");
        for (self_byte, other_byte) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *self_byte &= other_byte
        }
        Ok(())
    }

    fn check_same_size(&self, other: &Self) -> Result<(), BitSetError> {
        if self.bytes.len() != other.bytes.len() {
            return Err(BitSetError::SizeMismatch {
                left: self.byte_count(),
                right: other.byte_count(),
            });
        }
        Ok(())
    }

    /// Returns the backing buffer.
    ///
    /// The view is read-only; the only ways to change the bits are the
    /// mutating methods of `BitSet`.
    ///
    /// ```compile_fail
    /// use byte_bitset::BitSet;
    ///
    /// let mut bits = BitSet::new(8).unwrap();
    /// bits.as_bytes()[0] = 0xff;
    /// ```
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut bits = BitSet::new(12).unwrap();
    /// bits.set(0).unwrap();
    /// bits.set(9).unwrap();
    /// assert_eq!(bits.as_bytes(), &[0b0000_0001, 0b0000_0010]);
    /// ```
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the bitset and returns its buffer without copying.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    /// Number of logical bits, as given at construction.
    #[inline]
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Number of bytes in the backing buffer.
    #[inline]
    pub fn byte_count(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns the number of set bits in the whole buffer, pad bits included.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut bits = BitSet::new(1000).unwrap();
    /// bits.set(7).unwrap();
    /// bits.set(27).unwrap();
    /// assert_eq!(bits.count_ones(), 2);
    /// ```
    #[inline]
    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| u64::from(b.count_ones())).sum()
    }

    /// Encodes the buffer as lowercase hex, two digits per byte, first byte
    /// first.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let mut bits = BitSet::new(1).unwrap();
    /// bits.set(0).unwrap();
    /// assert_eq!(bits.to_hex(), "01");
    /// bits.set(7).unwrap();
    /// assert_eq!(bits.to_hex(), "81");
    /// ```
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Returns an iterator over the indices of all set bits below
    /// `bit_count`, in ascending order.
    ///
    /// Pad bits are never yielded. Iterating through the entire iterator runs
    /// in O(max(k, b)) where k is the number of set bits and b is the byte
    /// count.
    ///
    /// # Examples
    /// ```
    /// use byte_bitset::BitSet;
    ///
    /// let bits = BitSet::from_bytes(10, &[0b0010_0101, 0b1111_1110]).unwrap();
    /// let ones: Vec<u64> = bits.iter_ones().collect();
    /// assert_eq!(ones, [0, 2, 5, 9]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            bytes: &self.bytes,
            bit_count: self.bit_count,
            byte_idx: 0,
            current: self.bytes[0],
            base_bit_idx: 0,
        }
    }
}

impl AsRef<[u8]> for BitSet {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LSB -> ")?;
        for i in 0..self.bit_count {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            let bit = self.bytes[(i / 8) as usize] & 1 << (i % 8) != 0;
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % 8 == 7 && i < self.bit_count - 1 {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")
    }
}

/// Same digits as [`BitSet::to_hex`], without allocating. The alternate flag
/// (`{:#x}`) adds a `0x` prefix; width and fill are ignored.
impl LowerHex for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Iterator over the indices of set bits in a [`BitSet`].
///
/// Returned by [`BitSet::iter_ones()`].
#[derive(Clone)]
pub struct IterOnes<'bitset> {
    bytes: &'bitset [u8],
    bit_count: u64,
    byte_idx: usize,
    current: u8,
    base_bit_idx: u64,
}

impl Iterator for IterOnes<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let idx = self.base_bit_idx + u64::from(self.current.trailing_zeros());
                if idx >= self.bit_count {
                    // only pad bits are left
                    self.current = 0;
                    self.byte_idx = self.bytes.len();
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(idx);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = self.bytes.get(self.byte_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}
