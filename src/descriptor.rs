//! descriptor — the sidecar text file describing a stored filter.
//!
//! Format: `<path>.desc`, UTF-8, exactly three lines:
//!   num_elements\n
//!   max_fp_prob\n     (fixed point, 8 fractional digits)
//!   ignore_case\n     (0 or 1)
//!
//! The filter core never reads this file; the store layer uses it so a
//! filter can be reopened without re-supplying (n, p).

use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Parameters recorded next to a filter file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptor {
    pub num_elements: u64,
    pub max_fp_prob: f64,
    pub ignore_case: bool,
}

/// Path of the descriptor belonging to a filter at `path`.
pub fn descriptor_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".desc");
    PathBuf::from(s)
}

impl Descriptor {
    /// Read the descriptor of the filter at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let dpath = descriptor_path(path);
        let text = fs::read_to_string(&dpath)?;
        let mut lines = text.lines();
        let num_elements = lines
            .next()
            .and_then(|l| l.trim().parse::<u64>().ok())
            .ok_or_else(|| bad_desc(&dpath, "element count"))?;
        let max_fp_prob = lines
            .next()
            .and_then(|l| l.trim().parse::<f64>().ok())
            .ok_or_else(|| bad_desc(&dpath, "false-positive rate"))?;
        let ignore_case = lines
            .next()
            .and_then(|l| l.trim().parse::<u8>().ok())
            .ok_or_else(|| bad_desc(&dpath, "ignore_case flag"))?
            != 0;
        Ok(Self {
            num_elements,
            max_fp_prob,
            ignore_case,
        })
    }

    /// Write the descriptor for the filter at `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = format!(
            "{}\n{:.8}\n{}\n",
            self.num_elements,
            self.max_fp_prob,
            u8::from(self.ignore_case)
        );
        fs::write(descriptor_path(path), text)?;
        Ok(())
    }
}

fn bad_desc(path: &Path, what: &str) -> crate::error::Error {
    IoError::new(
        ErrorKind::InvalidData,
        format!("{}: missing or malformed {}", path.display(), what),
    )
    .into()
}
