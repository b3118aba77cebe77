// src/cli.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::hash::{hash128, hash_buckets};
use crate::store::StoredFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mmbloom",
    version,
    about = "Persistent memory-mapped Bloom filter",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create a filter file and its descriptor.
    Create {
        #[arg(long)]
        path: PathBuf,
        /// Upper bound on the number of keys.
        #[arg(long)]
        elements: u64,
        /// Target false-positive probability.
        #[arg(long)]
        fp_prob: f64,
        /// ASCII-lowercase keys before hashing.
        #[arg(long, default_value_t = false)]
        ignore_case: bool,
        /// Hold the advisory file lock while open.
        #[arg(long, default_value_t = false)]
        lock: bool,
    },
    /// Add keys to an existing filter.
    Add {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        lock: bool,
        /// Keys to insert.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Probe keys against an existing filter.
    Check {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        lock: bool,
        /// Keys to probe.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print filter parameters and occupancy.
    Status {
        #[arg(long)]
        path: PathBuf,
    },
    /// Print the derived bucket indices of a key.
    Buckets {
        #[arg(long)]
        key: String,
        #[arg(long)]
        count: u32,
        /// Bucket range (bit count), 1..=i64::MAX.
        #[arg(long)]
        max: u64,
    },
    /// Print the 128-bit hash of a key as two signed halves.
    Hash {
        #[arg(long)]
        key: String,
        #[arg(long, default_value_t = 0)]
        seed: u32,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Create {
            path,
            elements,
            fp_prob,
            ignore_case,
            lock,
        } => {
            let filter = StoredFilter::create(&path, elements, fp_prob, ignore_case, lock)
                .with_context(|| format!("create filter {}", path.display()))?;
            println!(
                "created {} ({} bits, k={})",
                path.display(),
                filter.filter().len(),
                filter.filter().hash_count()
            );
            filter.close()?;
            Ok(())
        }
        Cmd::Add { path, lock, keys } => {
            let mut filter = StoredFilter::open(&path, lock)
                .with_context(|| format!("open filter {}", path.display()))?;
            for key in &keys {
                filter.add(key.as_bytes())?;
            }
            filter.close()?;
            println!("added {} key(s)", keys.len());
            Ok(())
        }
        Cmd::Check { path, lock, keys } => {
            let filter = StoredFilter::open_ro(&path, lock)
                .with_context(|| format!("open filter {}", path.display()))?;
            for key in &keys {
                let verdict = if filter.contains(key.as_bytes())? {
                    "maybe"
                } else {
                    "no"
                };
                println!("{}\t{}", verdict, key);
            }
            Ok(())
        }
        Cmd::Status { path } => {
            let filter = StoredFilter::open_ro(&path, false)
                .with_context(|| format!("open filter {}", path.display()))?;
            let desc = filter.descriptor();
            let set: u64 = filter
                .filter()
                .bit_field()
                .as_bytes()
                .iter()
                .map(|b| u64::from(b.count_ones()))
                .sum();
            println!("path:            {}", path.display());
            println!("elements (max):  {}", desc.num_elements);
            println!("fp rate (max):   {:.8}", desc.max_fp_prob);
            println!("ignore_case:     {}", desc.ignore_case);
            println!("bits:            {}", filter.filter().len());
            println!("bytes:           {}", filter.filter().bit_field().byte_len());
            println!("hash count (k):  {}", filter.filter().hash_count());
            println!("buckets/element: {}", filter.filter().buckets_per_element());
            println!("bits set:        {}", set);
            Ok(())
        }
        Cmd::Buckets { key, count, max } => {
            anyhow::ensure!(
                max > 0 && max <= i64::MAX as u64,
                "--max must be in 1..=i64::MAX"
            );
            for index in hash_buckets(key.as_bytes(), count, max) {
                println!("{}", index);
            }
            Ok(())
        }
        Cmd::Hash { key, seed } => {
            let (h1, h2) = hash128(key.as_bytes(), seed);
            println!("{} {}", h1, h2);
            Ok(())
        }
    }
}
