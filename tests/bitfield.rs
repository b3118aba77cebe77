use anyhow::Result;
use std::fs;

use fs2::FileExt;
use mmbloom::{Error, MmapBitField, Mode};

/// Set/clear semantics over a small field: idempotent in both directions,
/// independent across indices, exact at the last bit.
#[test]
fn set_and_clear_bits() -> Result<()> {
    let root = unique_root("setitem");
    fs::create_dir_all(&root)?;
    let path = root.join("field.bits");

    let mut bf = MmapBitField::open(Some(&path), 80, Mode::ReadWrite, false)?;
    assert_eq!(bf.len(), 80);

    // set once
    bf.set(0, true)?;
    assert!(bf.get(0)?);
    for idx in 1..bf.len() {
        assert!(!bf.get(idx)?, "bit {} disturbed", idx);
    }
    // set twice: still a no-op for the rest of the byte
    bf.set(0, true)?;
    assert!(bf.get(0)?);
    for idx in 1..bf.len() {
        assert!(!bf.get(idx)?);
    }

    // clear twice
    bf.set(0, false)?;
    bf.set(0, false)?;
    for idx in 0..bf.len() {
        assert!(!bf.get(idx)?);
    }

    // last bit, set and clear twice each
    let last = bf.len() - 1;
    bf.set(last, true)?;
    assert!(bf.get(last)?);
    bf.set(last, true)?;
    assert!(bf.get(last)?);
    bf.set(last, false)?;
    assert!(!bf.get(last)?);
    bf.set(last, false)?;
    assert!(!bf.get(last)?);

    // neighbours in one byte stay independent
    bf.set(5, true)?;
    bf.set(6, true)?;
    bf.set(5, false)?;
    assert!(!bf.get(5)?);
    assert!(bf.get(6)?);

    bf.close()?;
    Ok(())
}

#[test]
fn out_of_bounds_is_rejected() -> Result<()> {
    let mut bf = MmapBitField::open(None, 80, Mode::ReadWrite, false)?;
    assert!(matches!(
        bf.get(80),
        Err(Error::OutOfBounds { index: 80, len: 80 })
    ));
    assert!(matches!(bf.set(80, true), Err(Error::OutOfBounds { .. })));
    assert!(matches!(bf.set(u64::MAX, true), Err(Error::OutOfBounds { .. })));
    Ok(())
}

/// A read-only handle on a written field sees the data but refuses
/// mutation with a recoverable error, leaving the byte untouched.
#[test]
fn read_only_handle_faults_cleanly() -> Result<()> {
    let root = unique_root("ro");
    fs::create_dir_all(&root)?;
    let path = root.join("field.bits");

    let mut rw = MmapBitField::open(Some(&path), 80, Mode::ReadWrite, false)?;
    rw.set(0, true)?;
    rw.close()?;

    let mut ro = MmapBitField::open(Some(&path), 80, Mode::ReadOnly, false)?;
    assert!(ro.read_only());
    assert!(ro.get(0)?);
    assert!(matches!(ro.set(0, true), Err(Error::ReadOnly)));
    assert!(matches!(ro.set(1, true), Err(Error::ReadOnly)));
    assert!(matches!(ro.set(0, false), Err(Error::ReadOnly)));
    assert_eq!(ro.as_bytes()[0], 0b0000_0001);
    assert!(ro.get(0)?);
    Ok(())
}

#[test]
fn read_only_requires_a_real_file() -> Result<()> {
    let root = unique_root("ro-missing");
    fs::create_dir_all(&root)?;

    let missing = root.join("nope.bits");
    assert!(matches!(
        MmapBitField::open(Some(&missing), 8, Mode::ReadOnly, false),
        Err(Error::Io(_))
    ));

    // A file too short for the requested bit count is refused too.
    let short = root.join("short.bits");
    fs::write(&short, [0u8; 5])?;
    assert!(matches!(
        MmapBitField::open(Some(&short), 80, Mode::ReadOnly, false),
        Err(Error::Io(_))
    ));
    Ok(())
}

/// Opening extends a shorter file and preserves its contents; a longer file
/// keeps its length and only the prefix is mapped.
#[test]
fn file_length_never_shrinks() -> Result<()> {
    let root = unique_root("len");
    fs::create_dir_all(&root)?;
    let path = root.join("field.bits");

    let mut bf = MmapBitField::open(Some(&path), 80, Mode::ReadWrite, false)?;
    bf.set(3, true)?;
    bf.close()?;
    assert_eq!(fs::metadata(&path)?.len(), 10);

    // grow
    let bf = MmapBitField::open(Some(&path), 160, Mode::ReadWrite, false)?;
    assert_eq!(fs::metadata(&path)?.len(), 20);
    assert!(bf.get(3)?, "extension must preserve existing bits");
    assert!(!bf.get(100)?);
    drop(bf);

    // a request smaller than the file leaves the length alone
    let bf = MmapBitField::open(Some(&path), 80, Mode::ReadWrite, false)?;
    assert_eq!(fs::metadata(&path)?.len(), 20);
    assert_eq!(bf.byte_len(), 10);
    assert!(bf.get(3)?);
    Ok(())
}

#[test]
fn fresh_fields_are_zero_filled() -> Result<()> {
    let root = unique_root("zero");
    fs::create_dir_all(&root)?;
    let bf = MmapBitField::open(Some(&root.join("f.bits")), 123, Mode::ReadWrite, false)?;
    assert_eq!(bf.iter().len(), 123);
    assert!(bf.iter().all(|b| !b));
    Ok(())
}

/// Padding bits past bit_length stay zero even when every addressable bit
/// is set.
#[test]
fn trailing_padding_stays_clear() -> Result<()> {
    let mut bf = MmapBitField::open(None, 12, Mode::ReadWrite, false)?;
    for i in 0..12 {
        bf.set(i, true)?;
    }
    assert_eq!(bf.as_bytes(), &[0xFF, 0x0F][..]);
    Ok(())
}

#[test]
fn iterator_reports_the_pattern() -> Result<()> {
    let mut bf = MmapBitField::open(None, 80, Mode::ReadWrite, false)?;
    let on = [1u64, 8, 42, 79];
    for &i in &on {
        bf.set(i, true)?;
    }
    for (i, bit) in bf.iter().enumerate() {
        assert_eq!(bit, on.contains(&(i as u64)), "bit {}", i);
    }
    Ok(())
}

/// Seeded random fill; every readback must agree with the reference set.
#[test]
fn randomized_fill_round_trips() -> Result<()> {
    let size = 10_000u64;
    let mut bf = MmapBitField::open(None, size, Mode::ReadWrite, false)?;
    let mut rng = oorandom::Rand64::new(0x5eed);
    let mut expect = std::collections::HashSet::new();
    for _ in 0..2_000 {
        let idx = rng.rand_range(0..size);
        expect.insert(idx);
        bf.set(idx, true)?;
    }
    for i in 0..size {
        assert_eq!(bf.get(i)?, expect.contains(&i), "bit {}", i);
    }
    Ok(())
}

#[test]
fn anonymous_fields_work_read_write_only() -> Result<()> {
    let mut bf = MmapBitField::open(None, 100, Mode::ReadWrite, false)?;
    assert!(bf.path().is_none());
    bf.set(99, true)?;
    assert!(bf.get(99)?);

    assert!(matches!(
        MmapBitField::open(None, 100, Mode::ReadOnly, false),
        Err(Error::Io(_))
    ));
    assert!(matches!(
        MmapBitField::open(None, 0, Mode::ReadWrite, false),
        Err(Error::Io(_))
    ));
    Ok(())
}

/// Sync makes mutations visible to a plain file read.
#[test]
fn sync_flushes_to_storage() -> Result<()> {
    let root = unique_root("sync");
    fs::create_dir_all(&root)?;
    let path = root.join("field.bits");

    let mut bf = MmapBitField::open(Some(&path), 16, Mode::ReadWrite, false)?;
    bf.set(0, true)?;
    bf.set(9, true)?;
    bf.sync()?;
    assert_eq!(fs::read(&path)?, vec![0b0000_0001, 0b0000_0010]);
    Ok(())
}

/// The exclusive advisory lock is held for the lifetime of the handle and
/// released on close; shared locks coexist.
#[test]
fn advisory_lock_lifecycle() -> Result<()> {
    let root = unique_root("lock");
    fs::create_dir_all(&root)?;
    let path = root.join("field.bits");

    let bf = MmapBitField::open(Some(&path), 80, Mode::ReadWrite, true)?;
    assert!(bf.locked());

    let probe = fs::OpenOptions::new().read(true).write(true).open(&path)?;
    assert!(
        FileExt::try_lock_exclusive(&probe).is_err(),
        "exclusive lock must be held while the field is open"
    );
    bf.close()?;
    FileExt::try_lock_exclusive(&probe)?;
    FileExt::unlock(&probe)?;

    // shared RO locks tolerate each other
    let a = MmapBitField::open(Some(&path), 80, Mode::ReadOnly, true)?;
    let b = MmapBitField::open(Some(&path), 80, Mode::ReadOnly, true)?;
    drop(a);
    drop(b);
    Ok(())
}

// ---------- helpers ----------

fn unique_root(prefix: &str) -> std::path::PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("mmbloom-{}-{}-{}", prefix, pid, t))
}
