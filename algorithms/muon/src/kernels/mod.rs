//! Hardware Kernels
//!
//! One module per backend, each exposing the same six operations over the
//! shared state layout. The portable module is the reference; the hardware
//! modules must match it bit for bit.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        pub mod aesni;
        pub mod avx512;
    } else if #[cfg(target_arch = "aarch64")] {
        pub mod neon;
    }
}

pub mod constants;
pub mod portable;
