//! Serialized form of a [`BitSet`]: the bit count next to the hex-encoded
//! buffer.

use crate::{BitSet, BitSetError};
use alloc::string::String;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub(crate) struct BitSetRepr {
    bit_count: u64,
    bytes: String,
}

impl From<BitSet> for BitSetRepr {
    fn from(bits: BitSet) -> Self {
        Self {
            bit_count: bits.bit_count(),
            bytes: bits.to_hex(),
        }
    }
}

impl TryFrom<BitSetRepr> for BitSet {
    type Error = BitSetError;

    fn try_from(repr: BitSetRepr) -> Result<Self, Self::Error> {
        BitSet::from_hex(repr.bit_count, &repr.bytes)
    }
}
