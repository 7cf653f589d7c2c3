//! Hash Command
//!
//! File hashing and byte-sums with automatic parallelization via Rayon.
//! The library itself is strictly serial; parallelism lives out here,
//! across files.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Mutex;

/// Streaming read size: 128 KB keeps the working set L2-friendly.
const READ_BUFFER: usize = 128 * 1024;

// =============================================================================
// HELPERS
// =============================================================================

fn digest_file(path: &PathBuf, seed: u64) -> Result<u64> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;

    let mut hasher = muon::Hasher::with_seed(seed);
    let mut buffer = [0u8; READ_BUFFER];

    loop {
        let n = std::io::Read::read(&mut file, &mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize())
}

fn sum_file(path: &PathBuf) -> Result<u64> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;

    let mut buffer = [0u8; READ_BUFFER];
    let mut total = 0u64;

    // The byte-sum distributes over concatenation, so per-buffer sums add up.
    loop {
        let n = std::io::Read::read(&mut file, &mut buffer)?;
        if n == 0 {
            break;
        }
        total = total.wrapping_add(muon::bytesum(&buffer[..n]));
    }

    Ok(total)
}

fn run_parallel<F>(files: &[PathBuf], per_file: F) -> Result<()>
where
    F: Fn(&PathBuf) -> Result<u64> + Sync,
{
    let results = Mutex::new(Vec::with_capacity(files.len()));
    let errors = Mutex::new(Vec::new());

    files.par_iter().for_each(|file_path| match per_file(file_path) {
        Ok(value) => {
            results.lock().unwrap().push((file_path.clone(), value));
        }
        Err(e) => {
            errors.lock().unwrap().push((file_path.clone(), e));
        }
    });

    // Print in original order
    let mut results = results.into_inner().unwrap();
    results.sort_by_key(|(path, _)| files.iter().position(|p| p == path).unwrap_or(usize::MAX));

    for (file_path, value) in results {
        println!("{value:016x}  {}", file_path.display());
    }

    let errors = errors.into_inner().unwrap();
    for (file_path, error) in &errors {
        eprintln!("Error: {}: {}", file_path.display(), error);
    }

    if !errors.is_empty() {
        anyhow::bail!("Failed to process {} file(s)", errors.len());
    }

    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Hash files (Rayon parallelizes across files when beneficial).
pub fn hash_files(files: &[PathBuf], seed: u64) -> Result<()> {
    run_parallel(files, |path| digest_file(path, seed))
}

/// Byte-sum files.
pub fn sum_files(files: &[PathBuf]) -> Result<()> {
    run_parallel(files, sum_file)
}
