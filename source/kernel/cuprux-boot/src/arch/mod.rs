// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Architecture intrinsics used by the boot trampoline
//! OWNERS: @kernel-arch-team
//! PUBLIC API: Intrinsics, Rflags, x86_64::Cpu
//! DEPENDS_ON: per-ISA modules (x86_64)
//! INVARIANTS: Privileged instructions only behind `Intrinsics`; no other module emits them

use bitflags::bitflags;

pub mod x86_64;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    /// RFLAGS bits the boot path cares about.
    pub struct Rflags: u64 {
        /// IF: maskable hardware interrupts are delivered.
        const INTERRUPT_ENABLE = 1 << 9;
        /// DF: string instructions walk towards lower addresses.
        const DIRECTION = 1 << 10;
    }
}

/// The minimal set of privileged operations the trampoline needs.
///
/// `arch::x86_64::Cpu` is the hardware implementation; tests substitute a
/// recording model.
pub trait Intrinsics {
    /// Clears the interrupt-enable flag.
    fn mask_interrupts(&self);

    /// Returns whether maskable interrupts are currently enabled.
    fn interrupts_enabled(&self) -> bool;

    /// Stops the processor until the next interrupt (or forever, once masked).
    fn halt(&self);

    /// Writes `len` zero bytes starting at `start`.
    ///
    /// # Safety
    ///
    /// `start..start + len` must be valid for writes and must not overlap
    /// memory the caller is still using, including its own stack.
    unsafe fn zero_bytes(&self, start: *mut u8, len: usize);
}

impl<A: Intrinsics + ?Sized> Intrinsics for &A {
    fn mask_interrupts(&self) {
        (**self).mask_interrupts()
    }

    fn interrupts_enabled(&self) -> bool {
        (**self).interrupts_enabled()
    }

    fn halt(&self) {
        (**self).halt()
    }

    unsafe fn zero_bytes(&self, start: *mut u8, len: usize) {
        // SAFETY: forwarded verbatim; the caller upholds the contract.
        unsafe { (**self).zero_bytes(start, len) }
    }
}
