//! bitfield/open — open/create logic for [`MmapBitField`].
//!
//! RW with a path: create the file if absent, extend to `byte_length` if
//! shorter (`set_len`, so the extension reads as zeros), never shrink. A
//! file longer than `byte_length` keeps its length; only the first
//! `byte_length` bytes are mapped.
//!
//! RO with a path: the file must exist and cover `byte_length` bytes; the
//! mapping is created write-protected.
//!
//! No path: anonymous zero pages, read-write only.

use std::fs::OpenOptions;
use std::path::Path;

use log::debug;
use memmap2::MmapOptions;

use crate::error::{Error, Result};
use crate::lock::{lock_file, LockMode};

use super::{MmapBitField, Mode, View};

impl MmapBitField {
    /// Open a bit field of `bit_length` bits at `path`, or anonymously when
    /// `path` is `None`. With `want_lock`, an advisory whole-file lock is
    /// taken on the backing file: exclusive for RW, shared for RO. The call
    /// blocks until the lock is granted.
    pub fn open(
        path: Option<&Path>,
        bit_length: u64,
        mode: Mode,
        want_lock: bool,
    ) -> Result<Self> {
        if bit_length == 0 {
            return Err(Error::invalid_input("bit length must be positive"));
        }
        let byte_length = usize::try_from(bit_length.div_ceil(8))
            .map_err(|_| Error::invalid_input("bit field too large for address space"))?;

        let Some(path) = path else {
            return Self::open_anon(bit_length, byte_length, mode);
        };

        match mode {
            Mode::ReadWrite => {
                let file = OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create(true)
                    .open(path)?;
                if want_lock {
                    lock_file(&file, LockMode::Exclusive)?;
                }
                let file_len = file.metadata()?.len();
                if file_len < byte_length as u64 {
                    // Extension reads back as zeros; a longer file is left
                    // at its current length.
                    file.set_len(byte_length as u64)?;
                    debug!(
                        "bitfield: extended {} from {} to {} bytes ({} bits)",
                        path.display(),
                        file_len,
                        byte_length,
                        bit_length
                    );
                }
                let map = unsafe { MmapOptions::new().len(byte_length).map_mut(&file)? };
                Ok(Self {
                    path: Some(path.to_path_buf()),
                    bit_length,
                    byte_length,
                    file: Some(file),
                    locked: want_lock,
                    view: View::Rw(map),
                })
            }
            Mode::ReadOnly => {
                let file = OpenOptions::new().read(true).open(path)?;
                if want_lock {
                    lock_file(&file, LockMode::Shared)?;
                }
                let file_len = file.metadata()?.len();
                if file_len < byte_length as u64 {
                    return Err(Error::invalid_input(format!(
                        "{}: {} bytes cannot back {} bits",
                        path.display(),
                        file_len,
                        bit_length
                    )));
                }
                let map = unsafe { MmapOptions::new().len(byte_length).map(&file)? };
                Ok(Self {
                    path: Some(path.to_path_buf()),
                    bit_length,
                    byte_length,
                    file: Some(file),
                    locked: want_lock,
                    view: View::Ro(map),
                })
            }
        }
    }

    fn open_anon(bit_length: u64, byte_length: usize, mode: Mode) -> Result<Self> {
        if mode == Mode::ReadOnly {
            // Anonymous pages start zeroed and nothing else can write them.
            return Err(Error::invalid_input(
                "anonymous bit field cannot be read-only",
            ));
        }
        let map = MmapOptions::new().len(byte_length).map_anon()?;
        debug!("bitfield: anonymous mapping of {} bits", bit_length);
        Ok(Self {
            path: None,
            bit_length,
            byte_length,
            file: None,
            locked: false,
            view: View::Rw(map),
        })
    }
}
