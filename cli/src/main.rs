//! Muon CLI
//!
//! File hashing, checksum verification, byte-sums, and deterministic
//! pseudo-random output.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check_mode, hash_files, rand_mode, sum_files};
use std::path::PathBuf;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "muon")]
#[command(about = "Fast 64-bit hashing with bit-identical SIMD backends", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files to hash (if no subcommand)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Seed for the hash
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Print the active hardware backend and exit
    #[arg(long)]
    backend: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify checksums from file (like sha256sum -c)
    Check {
        #[arg(value_name = "FILE")]
        checksum_file: PathBuf,

        /// Seed the checksums were produced with
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
    /// Print the 64-bit byte-sum of each file
    Sum {
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Write deterministic pseudo-random bytes for a nonce
    Rand {
        /// Number of bytes to produce
        #[arg(short, long)]
        len: u64,

        /// Generator nonce
        #[arg(short, long, default_value_t = 0)]
        nonce: u64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.backend {
        println!("{}", muon::active_backend());
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Check {
            checksum_file,
            seed,
        }) => check_mode(checksum_file, *seed)?,
        Some(Commands::Sum { files }) => sum_files(files)?,
        Some(Commands::Rand { len, nonce, output }) => rand_mode(*len, *nonce, output.as_ref())?,
        None => {
            if cli.files.is_empty() {
                eprintln!("Error: No files specified");
                eprintln!("Usage: muon [FILE]... or muon --help");
                std::process::exit(1);
            }

            hash_files(&cli.files, cli.seed)?;
        }
    }

    Ok(())
}
