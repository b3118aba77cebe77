//! filter/open — sizing a filter from (n, p) and opening its bit array.

use std::path::Path;

use log::debug;

use crate::bitfield::{MmapBitField, Mode};
use crate::calculations::{compute_bloom_spec_2, max_buckets_per_element};
use crate::error::Result;

use super::BloomFilter;

impl BloomFilter {
    /// Open (or create) a filter sized for `num_elements` keys at a target
    /// false-positive probability `max_false_pos_prob`.
    ///
    /// The bit count is `max(num_elements, 1) * bpe` where the table picks
    /// the smallest workable `(bpe, K)`; `Unsupported` surfaces when the
    /// demanded probability is infeasible. `path = None` maps anonymous
    /// memory (read-write only); with a path, the backing file is created
    /// or extended in RW mode and must already cover the bit count in RO
    /// mode. `want_lock` takes the advisory whole-file lock.
    pub fn open(
        num_elements: u64,
        max_false_pos_prob: f64,
        path: Option<&Path>,
        mode: Mode,
        want_lock: bool,
    ) -> Result<Self> {
        let bpe = max_buckets_per_element(num_elements)?;
        let spec = compute_bloom_spec_2(bpe, max_false_pos_prob)?;
        let bits = num_elements.max(1) * u64::from(spec.buckets_per_element);
        debug!(
            "bloom: {} for n={} p={} -> {} bits",
            spec, num_elements, max_false_pos_prob, bits
        );
        let field = MmapBitField::open(path, bits, mode, want_lock)?;
        Ok(Self { spec, bits: field })
    }

    /// Anonymous read-write filter; keys live only as long as the process.
    pub fn in_memory(num_elements: u64, max_false_pos_prob: f64) -> Result<Self> {
        Self::open(
            num_elements,
            max_false_pos_prob,
            None,
            Mode::ReadWrite,
            false,
        )
    }
}
