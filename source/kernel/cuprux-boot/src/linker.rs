// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! `kernel.ld` and the addresses it publishes.
//!
//! Only the addresses of the boundary symbols carry meaning; their "values"
//! must never be read.

/// Absolute path of the linker script the kernel image must link with.
/// Mirrors `DEP_CUPRUX_BOOT_KERNEL_LD`, including a `CUPRUX_LINKER_SCRIPT`
/// override.
pub const SCRIPT_PATH: &str = env!("CUPRUX_KERNEL_LD");

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use self::boundary::zero_fill_range;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod boundary {
    use crate::zero_fill::ZeroFillRange;

    extern "C" {
        static mut __bss_start: u8;
        static mut __bss_end: u8;
    }

    /// The zero-fill range exported by the linker script.
    #[inline]
    pub fn zero_fill_range() -> ZeroFillRange {
        // SAFETY: only addresses are taken. `kernel.ld` asserts
        // `__bss_end >= __bss_start` at link time.
        unsafe {
            ZeroFillRange::from_raw_parts(
                core::ptr::addr_of_mut!(__bss_start),
                core::ptr::addr_of_mut!(__bss_end),
            )
        }
    }
}
