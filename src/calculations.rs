//! calculations — table-driven derivation of Bloom filter parameters.
//!
//! PROBS[bpe][k] is the asymptotic false-positive probability of a filter
//! with `bpe` buckets per element and `k` hash functions, tabulated from
//! (1 - e^(-k/bpe))^k for bpe in [2, 20]. Each row lists k from 1 up to the
//! row's tabulated maximum; index 0 is a 1.0 placeholder so PROBS[bpe][k]
//! reads naturally. Rows are non-increasing in k up to the row optimum.
//!
//! The two dummy rows keep bpe usable as a direct index. The table is part
//! of the on-disk contract: filter sizing depends on these exact literals,
//! so they must not be regenerated at higher precision.

use crate::error::{Error, Result};

/// Smallest supported number of buckets per element.
pub const MIN_BUCKETS_PER_ELEMENT: u32 = 2;

/// Smallest supported number of hash functions.
pub const MIN_HASH_COUNT: u32 = 1;

/// Headroom subtracted from the signed 64-bit index ceiling when deciding
/// how many buckets per element a given element count can afford.
const EXCESS: u64 = 20;

/// False-positive probability table, indexed [bucketsPerElement][k].
pub static PROBS: &[&[f64]] = &[
    &[1.0], // placeholder for 0 buckets per element
    &[1.0, 1.0], // placeholder for 1 bucket per element
    &[1.0, 0.393, 0.400],
    &[1.0, 0.283, 0.237, 0.253],
    &[1.0, 0.221, 0.155, 0.147, 0.160],
    &[1.0, 0.181, 0.109, 0.092, 0.092, 0.101],
    &[1.0, 0.154, 0.0804, 0.0609, 0.0561, 0.0578, 0.0638],
    &[1.0, 0.133, 0.0618, 0.0423, 0.0359, 0.0347, 0.0364],
    &[1.0, 0.118, 0.0489, 0.0306, 0.024, 0.0217, 0.0216, 0.0229],
    &[1.0, 0.105, 0.0397, 0.0228, 0.0166, 0.0141, 0.0133, 0.0135, 0.0145],
    &[
        1.0, 0.0952, 0.0329, 0.0174, 0.0118, 0.00943, 0.00844, 0.00819, 0.00846,
    ],
    &[
        1.0, 0.0869, 0.0276, 0.0136, 0.00864, 0.0065, 0.00552, 0.00513, 0.00509,
    ],
    &[
        1.0, 0.08, 0.0236, 0.0108, 0.00646, 0.00459, 0.00371, 0.00329, 0.00314,
    ],
    &[
        1.0, 0.074, 0.0203, 0.00875, 0.00492, 0.00332, 0.00255, 0.00217, 0.00199, 0.00194,
    ],
    &[
        1.0, 0.0689, 0.0177, 0.00718, 0.00381, 0.00244, 0.00179, 0.00146, 0.00129, 0.00121,
        0.0012,
    ],
    &[
        1.0, 0.0645, 0.0156, 0.00596, 0.003, 0.00183, 0.00128, 0.001, 0.000852, 0.000775,
        0.000744,
    ],
    &[
        1.0, 0.0606, 0.0138, 0.005, 0.00239, 0.00139, 0.000935, 0.000702, 0.000574, 0.000505,
        0.00047, 0.000459,
    ],
    &[
        1.0, 0.0571, 0.0123, 0.00423, 0.00193, 0.00107, 0.000692, 0.000499, 0.000394, 0.000335,
        0.000302, 0.000287, 0.000284,
    ],
    &[
        1.0, 0.054, 0.0111, 0.00362, 0.00158, 0.000839, 0.000519, 0.00036, 0.000275, 0.000226,
        0.000198, 0.000183, 0.000176,
    ],
    &[
        1.0, 0.0513, 0.00998, 0.00312, 0.0013, 0.000663, 0.000394, 0.000264, 0.000194, 0.000155,
        0.000132, 0.000118, 0.000111, 0.000109,
    ],
    &[
        1.0, 0.0488, 0.00906, 0.0027, 0.00108, 0.00053, 0.000303, 0.000196, 0.00014, 0.000108,
        8.89e-05, 7.77e-05, 7.12e-05, 6.79e-05, 6.71e-05,
    ],
];

/// Largest supported number of buckets per element.
#[inline]
pub fn max_buckets_per_element_limit() -> u32 {
    (PROBS.len() - 1) as u32
}

/// A (bucketsPerElement, K) pair selected from the table.
///
/// Structural equality; immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomSpec {
    pub buckets_per_element: u32,
    pub k: u32,
}

impl std::fmt::Display for BloomSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BloomSpec(bpe={}, k={})",
            self.buckets_per_element, self.k
        )
    }
}

/// Largest bpe <= 20 such that `num_elements * bpe` stays below the signed
/// 64-bit bit-index ceiling. On 64-bit targets this is 20 for anything but
/// pathological element counts.
pub fn max_buckets_per_element(num_elements: u64) -> Result<u32> {
    let n = num_elements.max(1);
    let v = (i64::MAX as u64 - EXCESS) / n;
    if v < 1 {
        return Err(Error::Unsupported(format!(
            "cannot compute probabilities for {} elements",
            num_elements
        )));
    }
    Ok(v.min(u64::from(max_buckets_per_element_limit())) as u32)
}

/// Optimal K (row argmin, first occurrence) for a given bucket density.
pub fn compute_bloom_spec_1(buckets_per_element: u32) -> Result<BloomSpec> {
    check_bpe(buckets_per_element)?;
    let row = PROBS[buckets_per_element as usize];
    let mut k = MIN_HASH_COUNT as usize;
    for j in k + 1..row.len() {
        if row[j] < row[k] {
            k = j;
        }
    }
    Ok(BloomSpec {
        buckets_per_element,
        k: k as u32,
    })
}

/// Smallest (bpe, K) — lexicographic on (bpe, K) — whose tabulated
/// false-positive rate is at most `max_false_pos_prob`, with
/// bpe <= `max_buckets_per_element`. Fails with `Unsupported` when the
/// demanded probability is below what the allowed rows can reach.
pub fn compute_bloom_spec_2(
    max_buckets_per_element: u32,
    max_false_pos_prob: f64,
) -> Result<BloomSpec> {
    check_bpe(max_buckets_per_element)?;
    for bpe in MIN_BUCKETS_PER_ELEMENT..=max_buckets_per_element {
        let row = PROBS[bpe as usize];
        for k in MIN_HASH_COUNT as usize..row.len() {
            if row[k] <= max_false_pos_prob {
                return Ok(BloomSpec {
                    buckets_per_element: bpe,
                    k: k as u32,
                });
            }
        }
    }
    Err(Error::Unsupported(format!(
        "unable to satisfy false-positive rate {} with at most {} buckets per element",
        max_false_pos_prob, max_buckets_per_element
    )))
}

fn check_bpe(buckets_per_element: u32) -> Result<()> {
    if buckets_per_element < MIN_BUCKETS_PER_ELEMENT
        || buckets_per_element > max_buckets_per_element_limit()
    {
        return Err(Error::Unsupported(format!(
            "buckets per element {} out of range {}..={}",
            buckets_per_element,
            MIN_BUCKETS_PER_ELEMENT,
            max_buckets_per_element_limit()
        )));
    }
    Ok(())
}
