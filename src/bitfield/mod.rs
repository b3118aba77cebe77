//! bitfield — memory-mapped bit vector shared between processes.
//!
//! Layout on disk: raw bytes, no header or trailer. Bit `i` lives in byte
//! `i >> 3` at position `i & 7` (LSB-first). Trailing bits of the last byte
//! past `bit_length - 1` are padding and stay 0.
//!
//! Split:
//! - open.rs — open/create logic (RW/RO/anonymous, extension, locking).
//! - ops.rs  — get/set/sync/close and the bit iterator.
//! - mod.rs  — the type, the mapping view and low-level helpers.
//!
//! Invariants while a field is open:
//! - the backing file is at least `byte_length = ceil(bit_length / 8)` bytes;
//! - a read-only field never writes a byte of the mapping (the mapping is
//!   created with OS-level write protection);
//! - bit indices >= `bit_length` are rejected with OutOfBounds.
//!
//! Visibility between processes mapping the same file is the OS page cache;
//! `sync` bounds it. Concurrent read-write openers race at byte granularity
//! (non-atomic read-modify-write); the advisory lock is the coarse-grained
//! way out.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::{Mmap, MmapMut};

pub mod open;
pub mod ops;

/// Open mode of a bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ReadWrite,
    ReadOnly,
}

/// The live mapping; the variant is the write-protection state.
#[derive(Debug)]
enum View {
    Rw(MmapMut),
    Ro(Mmap),
}

/// File-backed (or anonymous) bit vector with O(1) random access.
#[derive(Debug)]
pub struct MmapBitField {
    path: Option<PathBuf>,
    bit_length: u64,
    byte_length: usize,
    // None for anonymous mappings. Dropping the handle releases the
    // advisory lock together with the descriptor.
    file: Option<File>,
    locked: bool,
    view: View,
}

impl MmapBitField {
    /// Number of addressable bits.
    #[inline]
    pub fn len(&self) -> u64 {
        self.bit_length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_length == 0
    }

    /// Size of the mapping in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.byte_length
    }

    /// Backing file path; `None` for anonymous fields.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn read_only(&self) -> bool {
        matches!(self.view, View::Ro(_))
    }

    /// Whether an advisory lock was taken on open.
    #[inline]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Read-only view of the mapped bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.view {
            View::Rw(m) => &m[..],
            View::Ro(m) => &m[..],
        }
    }

    #[inline]
    fn bytes_mut(&mut self) -> crate::error::Result<&mut [u8]> {
        match &mut self.view {
            View::Rw(m) => Ok(&mut m[..]),
            View::Ro(_) => Err(crate::error::Error::ReadOnly),
        }
    }
}
