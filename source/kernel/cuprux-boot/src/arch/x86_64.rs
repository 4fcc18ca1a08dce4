// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! x86_64 implementation of the boot intrinsics.
//!
//! Bare-metal builds execute the real instructions. Host builds (unit tests,
//! tooling) compile the lightweight fallbacks under
//! `#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]` so the
//! sequencing logic stays testable without privileged access.

use super::{Intrinsics, Rflags};

/// The boot CPU.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cpu;

impl Cpu {
    /// Reads the RFLAGS bits the boot path tracks.
    #[inline]
    pub fn rflags(&self) -> Rflags {
        #[cfg(all(target_arch = "x86_64", target_os = "none"))]
        {
            Rflags::from_bits_truncate(::x86_64::registers::rflags::read_raw())
        }
        #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
        {
            Rflags::empty()
        }
    }
}

impl Intrinsics for Cpu {
    #[inline]
    fn mask_interrupts(&self) {
        #[cfg(all(target_arch = "x86_64", target_os = "none"))]
        ::x86_64::instructions::interrupts::disable();
    }

    #[inline]
    fn interrupts_enabled(&self) -> bool {
        self.rflags().contains(Rflags::INTERRUPT_ENABLE)
    }

    #[inline]
    fn halt(&self) {
        #[cfg(all(target_arch = "x86_64", target_os = "none"))]
        ::x86_64::instructions::hlt();
        #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
        core::hint::spin_loop();
    }

    #[inline]
    unsafe fn zero_bytes(&self, start: *mut u8, len: usize) {
        #[cfg(all(target_arch = "x86_64", target_os = "none"))]
        // SAFETY: the caller guarantees `start..start + len` is writable and
        // unused. DF is clear on entry to any asm block, so `stosb` ascends.
        unsafe {
            core::arch::asm!(
                "rep stosb",
                inout("rcx") len => _,
                inout("rdi") start => _,
                in("al") 0u8,
                options(nostack, preserves_flags),
            );
        }
        #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
        // SAFETY: same contract as above.
        unsafe {
            core::ptr::write_bytes(start, 0, len);
        }
    }
}
