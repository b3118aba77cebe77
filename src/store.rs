//! store — descriptor-backed filters with optional case folding.
//!
//! A stored filter is a filter file plus its `<path>.desc` sidecar, so it
//! can be reopened without re-supplying (n, p). Three entry points:
//! - `create`  — new read-write filter, writes the descriptor.
//! - `open`    — existing filter, read-write (updating).
//! - `open_ro` — existing filter, read-only (reading).
//!
//! When the descriptor carries `ignore_case`, keys are ASCII-lowercased
//! before hashing; the filter core itself stays byte-exact.

use std::borrow::Cow;
use std::path::Path;

use log::info;

use crate::bitfield::Mode;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::filter::BloomFilter;

/// A filter bound to a file and its descriptor.
#[derive(Debug)]
pub struct StoredFilter {
    filter: BloomFilter,
    desc: Descriptor,
}

impl StoredFilter {
    /// Create a read-write filter at `path` for up to `num_elements` keys at
    /// false-positive rate `max_fp_prob`, and record the descriptor.
    pub fn create(
        path: &Path,
        num_elements: u64,
        max_fp_prob: f64,
        ignore_case: bool,
        want_lock: bool,
    ) -> Result<Self> {
        let desc = Descriptor {
            num_elements,
            max_fp_prob,
            ignore_case,
        };
        desc.write(path)?;
        let filter = BloomFilter::open(
            num_elements,
            max_fp_prob,
            Some(path),
            Mode::ReadWrite,
            want_lock,
        )?;
        info!(
            "store: created {} (n={}, p={:.8}, ignore_case={})",
            path.display(),
            num_elements,
            max_fp_prob,
            ignore_case
        );
        Ok(Self { filter, desc })
    }

    /// Open an existing filter read-write (updating).
    pub fn open(path: &Path, want_lock: bool) -> Result<Self> {
        Self::open_inner(path, Mode::ReadWrite, want_lock)
    }

    /// Open an existing filter read-only (reading).
    pub fn open_ro(path: &Path, want_lock: bool) -> Result<Self> {
        Self::open_inner(path, Mode::ReadOnly, want_lock)
    }

    fn open_inner(path: &Path, mode: Mode, want_lock: bool) -> Result<Self> {
        let desc = Descriptor::read(path)?;
        let filter = BloomFilter::open(
            desc.num_elements,
            desc.max_fp_prob,
            Some(path),
            mode,
            want_lock,
        )?;
        Ok(Self { filter, desc })
    }

    /// Insert `key`, folded when the descriptor says so.
    pub fn add(&mut self, key: &[u8]) -> Result<()> {
        let key = self.fold(key);
        self.filter.add(&key)
    }

    /// Membership test for `key`, folded when the descriptor says so.
    pub fn contains(&self, key: &[u8]) -> Result<bool> {
        self.filter.contains(&self.fold(key))
    }

    #[inline]
    fn fold<'a>(&self, key: &'a [u8]) -> Cow<'a, [u8]> {
        if self.desc.ignore_case {
            Cow::Owned(key.to_ascii_lowercase())
        } else {
            Cow::Borrowed(key)
        }
    }

    /// The recorded descriptor.
    #[inline]
    pub fn descriptor(&self) -> Descriptor {
        self.desc
    }

    /// The wrapped filter.
    #[inline]
    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    pub fn sync(&self) -> Result<()> {
        self.filter.sync()
    }

    pub fn close(self) -> Result<()> {
        self.filter.close()
    }
}
