//! lock — advisory whole-file locking for shared bit arrays.
//!
//! Cross-platform (fs2) advisory locks taken on the mapped data file
//! itself:
//! - Exclusive: a read-write opener that wants sole ownership.
//! - Shared: read-only openers that tolerate each other.
//!
//! Acquisition blocks until granted. The lock is released when the file
//! handle closes (bit field close/drop); `unlock_file` releases it earlier
//! on explicit close.

use std::fs::File;

use fs2::FileExt;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// Lock `file` in the requested mode. Blocks until acquired.
pub fn lock_file(file: &File, mode: LockMode) -> Result<()> {
    match mode {
        LockMode::Shared => FileExt::lock_shared(file)?,
        LockMode::Exclusive => FileExt::lock_exclusive(file)?,
    }
    Ok(())
}

/// Release a lock taken with [`lock_file`].
pub fn unlock_file(file: &File) -> Result<()> {
    FileExt::unlock(file)?;
    Ok(())
}
