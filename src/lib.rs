// Core modules
pub mod calculations;
pub mod error;
pub mod hash;

// Stateful layers
pub mod bitfield; // src/bitfield/{mod,open,ops}.rs
pub mod filter; // src/filter/{mod,open,ops}.rs
pub mod lock;

// Sidecar descriptor and the store layer on top of it
pub mod descriptor;
pub mod store;

// CLI (used by the mmbloom binary)
pub mod cli;

// Convenience re-exports
pub use bitfield::{MmapBitField, Mode};
pub use calculations::{
    compute_bloom_spec_1, compute_bloom_spec_2, max_buckets_per_element, BloomSpec, PROBS,
};
pub use descriptor::Descriptor;
pub use error::{Error, Result};
pub use filter::BloomFilter;
pub use hash::{hash128, hash_buckets};
pub use store::StoredFilter;
