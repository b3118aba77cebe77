use mmbloom::{hash128, hash_buckets};

/// A key and its variants with embedded null bytes must hash apart; a
/// terminator-based implementation would collapse them.
#[test]
fn null_bytes_are_significant() {
    let h0 = hash128(b"foo", 0);
    let h1 = hash128(b"foo\0bar", 0);
    let h2 = hash128(b"foo\0baz", 0);
    assert_ne!(h0, h1, "hash collision for appended null");
    assert_ne!(h0, h2, "hash collision for appended null");
    assert_ne!(h1, h2, "hash collision for bytes after null");
}

/// Double hashing must spread 128 indices over a megabit range with almost
/// no per-key collisions; a degenerate second base would collapse whole
/// progressions.
#[test]
fn bucket_collisions_stay_rare() {
    const MAX_HASH_COUNT: u32 = 128;
    const RANGE: u64 = 1024 * 1024;

    let mut collisions = 0usize;
    let mut seen = std::collections::HashSet::new();
    for i in 0..10_000u32 {
        let key = format!("key-{}", i);
        seen.clear();
        for index in hash_buckets(key.as_bytes(), MAX_HASH_COUNT, RANGE) {
            seen.insert(index);
        }
        collisions += MAX_HASH_COUNT as usize - seen.len();
    }
    assert!(collisions <= 100, "got {} collisions", collisions);
}

/// The two halves must differ between seeds, and the derivation chain used
/// for buckets (re-seed with the low 32 bits of the first value) must be
/// reproducible from the public hash alone.
#[test]
fn seed_changes_the_hash() {
    let (h1a, h2a) = hash128(b"foo", 0);
    let (h1b, h2b) = hash128(b"foo", 1);
    assert!(h1a != h1b || h2a != h2b);

    let reseeded = hash128(b"foo", h2a as u32);
    let first = hash_buckets(b"foo", 2, 1 << 30).collect::<Vec<_>>();
    let m = 1i64 << 30;
    let expect0 = ((h1a % m) + m) % m;
    let expect1 = (((h1a.wrapping_add(reseeded.0)) % m) + m) % m;
    assert_eq!(first, vec![expect0 as u64, expect1 as u64]);
}
