//! A fixed-capacity bitset backed by an owned byte buffer.
//! `no_std` + `alloc` capable, no `unsafe`.
//!
//! [`BitSet`] holds a number of boolean flags chosen at construction time and
//! never resized afterwards. It is meant as the storage layer for structures
//! like Bloom filters, visited-sets or feature flags.
//!
//! # Examples
//! ```
//! use byte_bitset::BitSet;
//!
//! let mut seen = BitSet::new(1000)?;
//! seen.set(1)?;
//! seen.set(100)?;
//! seen.set(354)?;
//! assert_eq!(seen.count_ones(), 3);
//!
//! // the raw bytes (or their hex form) are the serialized representation
//! let restored = BitSet::from_bytes(seen.bit_count(), seen.as_bytes())?;
//! assert_eq!(restored.as_bytes(), seen.as_bytes());
//! assert_eq!(BitSet::from_hex(1000, &seen.to_hex())?, seen);
//! # Ok::<(), byte_bitset::BitSetError>(())
//! ```
//!
//! # Layout
//!
//! Bit `i` lives in byte `i / 8`, least significant bit first. A set of `n`
//! bits owns exactly `ceil(n / 8)` bytes; the unused high bits of the last
//! byte are called pad bits. See [`BitSet`] for which operations look at
//! them.
//!
//! # Features
//!
//! - Bit-level operations on a fixed number of bits: `set`, `test`
//! - In-place set algebra: `union`, `intersect`
//! - Counting: `count_ones`, `iter_ones`
//! - Serialization: `as_bytes` / `from_bytes`, `to_hex` / `from_hex`
//! - All fallible operations return [`BitSetError`] instead of panicking
//!
//! # Cargo features
//!
//! - `std` (default): builds against `std`. Without it the crate is
//!   `#![no_std]` and only needs `alloc`.
//! - `serde`: `Serialize` / `Deserialize` for [`BitSet`] as
//!   `{ "bit_count": .., "bytes": "<hex>" }`.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitset;
mod error;
#[cfg(feature = "serde")]
mod repr;

pub use bitset::{BitSet, IterOnes, byte_count};
pub use error::BitSetError;
