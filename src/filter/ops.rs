//! filter/ops — membership operations.

use crate::error::Result;
use crate::hash::hash_buckets;

use super::BloomFilter;

impl BloomFilter {
    /// Insert `key`: set its K derived bits. Re-adding a present key leaves
    /// every byte of the mapping unchanged.
    pub fn add(&mut self, key: &[u8]) -> Result<()> {
        for index in hash_buckets(key, self.spec.k, self.bits.len()) {
            self.bits.set(index, true)?;
        }
        Ok(())
    }

    /// Whether `key` may be in the set. `false` is definitive; `true` is a
    /// false positive with at most the configured probability.
    pub fn contains(&self, key: &[u8]) -> Result<bool> {
        for index in hash_buckets(key, self.spec.k, self.bits.len()) {
            if !self.bits.get(index)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The raw `count` bucket indices `key` maps to in `[0, max)` — the same
    /// derivation `add` and `contains` use, for calibration and tests.
    pub fn get_hash_buckets(&self, key: &[u8], count: u32, max: u64) -> Vec<u64> {
        hash_buckets(key, count, max).collect()
    }
}
