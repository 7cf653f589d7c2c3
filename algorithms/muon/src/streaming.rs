//! Streaming Hasher
//!
//! Incremental hashing over a fixed-size state: four AES/sum lane pairs, a
//! 64-byte staging buffer, and a byte counter. Folding is non-destructive
//! and reproduces the single-shot hash for any partition of the input.

use crate::engine::dispatcher;
use crate::kernels::constants::BLOCK_SIZE;
use crate::types::{Backend, HashState};

#[cfg(feature = "digest-trait")]
use digest::typenum::U8;
#[cfg(feature = "digest-trait")]
use digest::{FixedOutput, HashMarker, Output, OutputSizeUser, Reset, Update};

// =============================================================================
// STREAMING HASHER
// =============================================================================

/// Streaming Muon hasher.
///
/// Fixed 256-byte state, no allocation. Whole 64-byte blocks are absorbed
/// straight from the caller's slice; only ragged edges touch the staging
/// buffer, which stays zero beyond the tail so a fold sees the same
/// zero-padded block the single-shot path would.
///
/// ```rust
/// use muon::Hasher;
///
/// let mut hasher = Hasher::new();
/// hasher.update(b"Chunk 1");
/// hasher.update(b"Chunk 2");
/// assert_eq!(hasher.finalize(), muon::hash(b"Chunk 1Chunk 2"));
/// ```
#[derive(Clone, Copy)]
pub struct MuonHasher {
    state: HashState,
    backend: &'static Backend,
}

impl MuonHasher {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Create a new streaming hasher with seed 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a new streaming hasher keyed by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: HashState::with_seed(seed),
            backend: dispatcher::best(),
        }
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Append `data` to the hashed stream.
    pub fn update(&mut self, data: &[u8]) {
        let mut data = data;

        // Top up a partially filled staging buffer first.
        let staged = (self.state.ins_length % BLOCK_SIZE as u64) as usize;
        if staged != 0 {
            let take = data.len().min(BLOCK_SIZE - staged);
            self.state.ins[staged..staged + take].copy_from_slice(&data[..take]);
            self.state.ins_length += take as u64;
            data = &data[take..];
            if staged + take < BLOCK_SIZE {
                return;
            }
            let block = self.state.ins;
            (self.backend.absorb)(&mut self.state, &block);
            self.state.ins = [0u8; BLOCK_SIZE];
        }

        // Whole blocks are absorbed zero-copy from the input slice.
        let whole = data.len() - data.len() % BLOCK_SIZE;
        if whole != 0 {
            (self.backend.absorb)(&mut self.state, &data[..whole]);
            self.state.ins_length += whole as u64;
            data = &data[whole..];
        }

        if !data.is_empty() {
            self.state.ins[..data.len()].copy_from_slice(data);
            self.state.ins_length += data.len() as u64;
        }
    }

    /// Restart the stream, keeping the seed.
    pub fn reset(&mut self) {
        self.state = HashState::with_seed(self.state.seed());
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Fold the state into its 64-bit hash.
    ///
    /// Non-destructive: the hasher may keep streaming afterwards, and two
    /// folds of the same state agree.
    #[must_use]
    pub fn finalize(&self) -> u64 {
        (self.backend.fold)(&self.state)
    }

    /// Register equivalence: true iff the AES lanes, additive lanes, and key
    /// match. The staging buffer and byte counter are ignored — two
    /// equivalent states finalize identically after the same remaining
    /// bytes.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.state.aes == other.state.aes
            && self.state.sum == other.state.sum
            && self.state.key == other.state.key
    }
}

impl Default for MuonHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MuonHasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MuonHasher")
            .field("backend", &self.backend.name)
            .field("ins_length", &self.state.ins_length)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// STD HASHER INTEGRATION
// =============================================================================

impl core::hash::Hasher for MuonHasher {
    fn finish(&self) -> u64 {
        self.finalize()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

/// [`core::hash::BuildHasher`] for hash tables keyed by Muon.
///
/// ```rust
/// use std::collections::HashMap;
/// use muon::MuonBuildHasher;
///
/// let mut map: HashMap<&str, u32, MuonBuildHasher> =
///     HashMap::with_hasher(MuonBuildHasher::with_seed(42));
/// map.insert("key", 1);
/// assert_eq!(map.get("key"), Some(&1));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MuonBuildHasher {
    seed: u64,
}

impl MuonBuildHasher {
    /// Build hashers keyed by `seed`.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl core::hash::BuildHasher for MuonBuildHasher {
    type Hasher = MuonHasher;

    fn build_hasher(&self) -> MuonHasher {
        MuonHasher::with_seed(self.seed)
    }
}

// =============================================================================
// DIGEST TRAIT INTEGRATION
// =============================================================================

#[cfg(feature = "digest-trait")]
impl OutputSizeUser for MuonHasher {
    type OutputSize = U8;
}

#[cfg(feature = "digest-trait")]
impl Update for MuonHasher {
    fn update(&mut self, data: &[u8]) {
        self.update(data);
    }
}

#[cfg(feature = "digest-trait")]
impl FixedOutput for MuonHasher {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize().to_le_bytes());
    }
}

#[cfg(feature = "digest-trait")]
impl Reset for MuonHasher {
    fn reset(&mut self) {
        self.reset();
    }
}

#[cfg(feature = "digest-trait")]
impl HashMarker for MuonHasher {}
