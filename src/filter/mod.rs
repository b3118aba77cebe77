//! filter — the Bloom filter over a memory-mapped bit array.
//!
//! Composition: a [`BloomSpec`] picked from the probability table, a bit
//! array of `num_elements * buckets_per_element` bits, and the spec's hash
//! count. The number of inserted elements is not tracked; there is no
//! removal and no resizing after creation.
//!
//! Split:
//! - open.rs — sizing from (n, p) and the open paths.
//! - ops.rs  — add/contains and raw bucket listing.
//!
//! False positives are possible at the configured rate; false negatives are
//! not: every bit set by `add` stays set, so `contains` of an added key is
//! always true. Keys are byte-exact; any case folding happens in the layers
//! above.

use crate::bitfield::MmapBitField;
use crate::calculations::BloomSpec;

pub mod open;
pub mod ops;

/// Persistent Bloom filter handle.
#[derive(Debug)]
pub struct BloomFilter {
    spec: BloomSpec,
    bits: MmapBitField,
}

impl BloomFilter {
    /// Logical size: the bit array length.
    #[inline]
    pub fn len(&self) -> u64 {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of hash functions (bits set per key).
    #[inline]
    pub fn hash_count(&self) -> u32 {
        self.spec.k
    }

    /// Buckets per element the filter was sized with.
    #[inline]
    pub fn buckets_per_element(&self) -> u32 {
        self.spec.buckets_per_element
    }

    /// The spec the table selected for this filter.
    #[inline]
    pub fn spec(&self) -> BloomSpec {
        self.spec
    }

    /// The underlying bit field.
    #[inline]
    pub fn bit_field(&self) -> &MmapBitField {
        &self.bits
    }

    /// Flush the bit array to storage.
    pub fn sync(&self) -> crate::error::Result<()> {
        self.bits.sync()
    }

    /// Sync and release the bit array deterministically.
    pub fn close(self) -> crate::error::Result<()> {
        self.bits.close()
    }
}
