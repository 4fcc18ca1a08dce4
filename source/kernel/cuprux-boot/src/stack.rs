// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Statically reserved boot stack
//! OWNERS: @kernel-boot-team
//! PUBLIC API: BootStack, BOOT_STACK, StackTop
//! DEPENDS_ON: config::{BOOT_STACK_SIZE, STACK_ALIGN}, zero_fill::ZeroFillRange
//! INVARIANTS: StackTop is always STACK_ALIGN-aligned and never above the raw top;
//!             BOOT_STACK lives outside the zero-fill range
//!
//! The stack is only ever addressed: `_start` loads its top into `rsp`, and
//! Rust code merely computes addresses from it. Ownership passes to the
//! higher-level runtime at the `kernel_main` call boundary.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;

use static_assertions::{assert_eq_size, const_assert_eq};

use crate::config::{BOOT_STACK_SIZE, STACK_ALIGN};
use crate::zero_fill::ZeroFillRange;

/// 64 KiB of uninitialised memory used as the stack until `kernel_main`
/// installs its own.
#[repr(C, align(16))]
pub struct BootStack {
    bytes: UnsafeCell<MaybeUninit<[u8; BOOT_STACK_SIZE]>>,
}

assert_eq_size!(BootStack, [u8; BOOT_STACK_SIZE]);
const_assert_eq!(core::mem::align_of::<BootStack>(), STACK_ALIGN);

// SAFETY: Rust never reads or writes the contents; only the boot CPU uses
// the memory, as a machine stack.
unsafe impl Sync for BootStack {}

impl BootStack {
    /// Reserves an uninitialised stack.
    pub const fn new() -> Self {
        Self { bytes: UnsafeCell::new(MaybeUninit::uninit()) }
    }

    /// Lowest address of the region.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.bytes.get() as usize
    }

    /// One past the highest byte of the region, before alignment.
    #[inline]
    pub fn raw_top(&self) -> usize {
        self.bottom() + BOOT_STACK_SIZE
    }

    /// Stack pointer value `_start` installs.
    #[inline]
    pub fn top(&self) -> StackTop {
        StackTop::align_down(self.raw_top())
    }

    /// Whether zeroing `range` would write into this stack. An empty range
    /// never overlaps anything.
    #[inline]
    pub fn overlaps(&self, range: &ZeroFillRange) -> bool {
        !range.is_empty()
            && (range.start() as usize) < self.raw_top()
            && self.bottom() < range.end() as usize
    }

    /// Size of the region in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        BOOT_STACK_SIZE
    }
}

impl Default for BootStack {
    fn default() -> Self {
        Self::new()
    }
}

/// The boot stack. Placed in `.boot_stack`, which the linker script keeps
/// outside `[__bss_start, __bss_end)`.
#[cfg_attr(all(target_arch = "x86_64", target_os = "none"), link_section = ".boot_stack")]
pub static BOOT_STACK: BootStack = BootStack::new();

/// A stack pointer value rounded down to the ABI call alignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StackTop(usize);

impl StackTop {
    /// Rounds `raw` down to the nearest `STACK_ALIGN` boundary.
    #[inline]
    pub const fn align_down(raw: usize) -> Self {
        Self(raw & !(STACK_ALIGN - 1))
    }

    /// Returns the aligned address.
    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_stack_top_is_aligned_and_in_bounds() {
        let top = BOOT_STACK.top();
        assert_eq!(top.raw() % STACK_ALIGN, 0);
        assert!(top.raw() <= BOOT_STACK.raw_top());
        assert!(BOOT_STACK.raw_top() - top.raw() < STACK_ALIGN);
        assert!(top.raw() > BOOT_STACK.bottom());
    }

    #[test]
    fn region_is_exactly_64_kib() {
        assert_eq!(BOOT_STACK.size(), 65536);
        assert_eq!(BOOT_STACK.raw_top() - BOOT_STACK.bottom(), 65536);
        // align(16) storage means rounding never moves the top.
        assert_eq!(BOOT_STACK.top().raw(), BOOT_STACK.raw_top());
    }

    #[test]
    fn align_down_keeps_aligned_values() {
        assert_eq!(StackTop::align_down(0x1000).raw(), 0x1000);
        assert_eq!(StackTop::align_down(0x100f).raw(), 0x1000);
        assert_eq!(StackTop::align_down(0x1010).raw(), 0x1010);
        assert_eq!(StackTop::align_down(0).raw(), 0);
    }

    fn span(lo: usize, hi: usize) -> ZeroFillRange {
        ZeroFillRange::new(lo as *mut u8, hi as *mut u8).expect("ordered bounds")
    }

    #[test]
    fn ranges_touching_the_stack_edges_do_not_overlap() {
        let (bottom, top) = (BOOT_STACK.bottom(), BOOT_STACK.raw_top());
        assert!(!BOOT_STACK.overlaps(&span(bottom - 4096, bottom)));
        assert!(!BOOT_STACK.overlaps(&span(top, top + 4096)));
    }

    #[test]
    fn ranges_reaching_into_the_stack_overlap() {
        let (bottom, top) = (BOOT_STACK.bottom(), BOOT_STACK.raw_top());
        assert!(BOOT_STACK.overlaps(&span(bottom - 16, bottom + 1)));
        assert!(BOOT_STACK.overlaps(&span(top - 1, top + 16)));
        assert!(BOOT_STACK.overlaps(&span(bottom - 16, top + 16)));
        assert!(BOOT_STACK.overlaps(&span(bottom + 64, bottom + 128)));
    }

    #[test]
    fn empty_range_inside_the_stack_does_not_overlap() {
        let mid = BOOT_STACK.bottom() + 1024;
        assert!(!BOOT_STACK.overlaps(&span(mid, mid)));
    }
}
