//! Rand Command
//!
//! Dump a deterministic pseudo-random stream for a nonce. Useful for
//! seeding test fixtures that must be reproducible across machines.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Output granularity. Each 64 KB window is generated with the nonce
/// advanced by the number of blocks already emitted, so the stream for a
/// given `(len, nonce)` is deterministic without buffering `len` bytes.
/// Requests up to one window match `muon::generate` exactly.
const WRITE_CHUNK: usize = 64 * 1024;

// =============================================================================
// RAND
// =============================================================================

/// Write `len` pseudo-random bytes for `nonce` to `output` (stdout if none).
pub fn rand_mode(len: u64, nonce: u64, output: Option<&PathBuf>) -> Result<()> {
    let mut sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut buffer = vec![0u8; WRITE_CHUNK];
    let mut remaining = len;
    let mut block_offset = 0u64;

    while remaining > 0 {
        let step = remaining.min(WRITE_CHUNK as u64) as usize;
        muon::generate(&mut buffer[..step], nonce.wrapping_add(block_offset));
        sink.write_all(&buffer[..step])?;
        remaining -= step as u64;
        block_offset += (step as u64) / 16;
    }

    sink.flush()?;
    Ok(())
}
