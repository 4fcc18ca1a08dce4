// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Sequenced hand-off from the boot loader to `kernel_main`
//! OWNERS: @kernel-boot-team
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests + tests/trampoline.rs (recording intrinsics)
//! PUBLIC API: Trampoline, BootState, EntryPoint
//! DEPENDS_ON: arch::Intrinsics, stack::StackTop, zero_fill::ZeroFillRange
//! INVARIANTS: Steps run strictly in order; interrupts stay masked up to and across the
//!             call; Halted is absorbing
//!
//! On hardware the first two steps happen in the `_start` stub (there is no
//! stack to run Rust on yet), which then resumes the sequence through
//! [`Trampoline::on_boot_stack`].

use core::fmt;
use core::marker::PhantomData;

use crate::arch::Intrinsics;
use crate::stack::StackTop;
use crate::zero_fill::ZeroFillRange;

/// Progress of the boot CPU through the hand-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BootState {
    Init,
    InterruptsMasked,
    StackEstablished,
    ZeroFillComplete,
    Transferred,
    /// Reached only if `kernel_main` returns. Absorbing.
    Halted,
}

impl BootState {
    /// The only legal successor of `self`.
    pub const fn next(self) -> Option<Self> {
        match self {
            BootState::Init => Some(BootState::InterruptsMasked),
            BootState::InterruptsMasked => Some(BootState::StackEstablished),
            BootState::StackEstablished => Some(BootState::ZeroFillComplete),
            BootState::ZeroFillComplete => Some(BootState::Transferred),
            BootState::Transferred => Some(BootState::Halted),
            BootState::Halted => None,
        }
    }
}

/// Address-only handle on the higher-level entry function.
///
/// The callee is typed as returning `()` on purpose: a plain `call` keeps the
/// halt fallback reachable if it ever comes back.
#[derive(Clone, Copy)]
pub struct EntryPoint(unsafe extern "C" fn());

impl EntryPoint {
    /// Wraps `entry`.
    ///
    /// # Safety
    ///
    /// `entry` must be callable with no arguments on the boot stack with
    /// interrupts masked.
    pub const unsafe fn new(entry: unsafe extern "C" fn()) -> Self {
        Self(entry)
    }

    #[inline]
    pub fn addr(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryPoint({:#x})", self.addr())
    }
}

/// The boot CPU walking from loader hand-off to `kernel_main`.
pub struct Trampoline<A: Intrinsics> {
    arch: A,
    state: BootState,
    stack_top: Option<StackTop>,
    // One boot CPU; the sequence must never be observed from elsewhere.
    _not_send_sync: PhantomData<*mut ()>,
}
static_assertions::assert_not_impl_any!(Trampoline<crate::arch::x86_64::Cpu>: Send, Sync);

impl<A: Intrinsics> Trampoline<A> {
    /// Starts at loader hand-off.
    pub fn new(arch: A) -> Self {
        Self { arch, state: BootState::Init, stack_top: None, _not_send_sync: PhantomData }
    }

    /// Resumes after `_start` masked interrupts and loaded `top` into `rsp`.
    pub fn on_boot_stack(arch: A, top: StackTop) -> Self {
        debug_assert!(!arch.interrupts_enabled(), "entered Rust with interrupts enabled");
        Self {
            arch,
            state: BootState::StackEstablished,
            stack_top: Some(top),
            _not_send_sync: PhantomData,
        }
    }

    #[inline]
    pub fn state(&self) -> BootState {
        self.state
    }

    /// Stack pointer the transfer runs on, once established.
    #[inline]
    pub fn stack_top(&self) -> Option<StackTop> {
        self.stack_top
    }

    fn advance(&mut self, to: BootState) {
        debug_assert_eq!(self.state.next(), Some(to), "boot step out of order");
        self.state = to;
    }

    /// Step 1.
    pub fn mask_interrupts(&mut self) {
        self.arch.mask_interrupts();
        self.advance(BootState::InterruptsMasked);
    }

    /// Step 2. `top` is already rounded down to the call alignment.
    pub fn establish_stack(&mut self, top: StackTop) {
        self.stack_top = Some(top);
        self.advance(BootState::StackEstablished);
    }

    /// Step 3: zero exactly `range`. An empty range issues no write.
    ///
    /// # Safety
    ///
    /// `range` must be writable and must not cover the stack in use.
    pub unsafe fn zero_fill(&mut self, range: ZeroFillRange) {
        if !range.is_empty() {
            // SAFETY: forwarded from the caller.
            unsafe { self.arch.zero_bytes(range.start(), range.len()) };
        }
        self.advance(BootState::ZeroFillComplete);
        log_debug!(target: "boot", "zero-fill ok: {} bytes at {:p}", range.len(), range.start());
    }

    /// Step 4: call `entry`. Returns only if the callee misbehaves.
    pub fn transfer(&mut self, entry: EntryPoint) {
        debug_assert!(!self.arch.interrupts_enabled(), "interrupts enabled at transfer");
        self.advance(BootState::Transferred);
        log_info!(target: "boot", "entering kernel at {:#x}", entry.addr());
        // SAFETY: `EntryPoint::new` requires the callee to accept this
        // context; the stack is aligned and static storage is zeroed.
        unsafe { (entry.0)() };
    }

    /// Step 5: absorbing halt. Re-masks on every iteration so a spurious
    /// wake (NMI, SMI) cannot leave interrupts on.
    pub fn halt(mut self) -> ! {
        self.advance(BootState::Halted);
        log_error!(target: "boot", "kernel entry returned; halting");
        loop {
            self.arch.mask_interrupts();
            self.arch.halt();
        }
    }

    /// Steps 3 to 5 from `StackEstablished`.
    ///
    /// # Safety
    ///
    /// Same as [`Trampoline::zero_fill`].
    pub unsafe fn run(mut self, range: ZeroFillRange, entry: EntryPoint) -> ! {
        // SAFETY: forwarded from the caller.
        unsafe { self.zero_fill(range) };
        self.transfer(entry);
        self.halt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::x86_64::Cpu;

    #[test]
    fn states_form_a_single_chain() {
        let mut state = BootState::Init;
        let mut seen = 1;
        while let Some(next) = state.next() {
            assert!(next > state);
            state = next;
            seen += 1;
        }
        assert_eq!(state, BootState::Halted);
        assert_eq!(seen, 6);
    }

    #[test]
    fn steps_advance_in_order() {
        let mut buf = [0x5Au8; 64];
        let mut boot = Trampoline::new(Cpu);
        assert_eq!(boot.state(), BootState::Init);
        boot.mask_interrupts();
        assert_eq!(boot.state(), BootState::InterruptsMasked);
        boot.establish_stack(StackTop::align_down(0x8000_0f0f));
        assert_eq!(boot.stack_top(), Some(StackTop::align_down(0x8000_0f00)));
        unsafe { boot.zero_fill(ZeroFillRange::from_slice(&mut buf)) };
        assert_eq!(boot.state(), BootState::ZeroFillComplete);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn resume_starts_with_stack_established() {
        let top = crate::stack::BOOT_STACK.top();
        let boot = Trampoline::on_boot_stack(Cpu, top);
        assert_eq!(boot.state(), BootState::StackEstablished);
        assert_eq!(boot.stack_top(), Some(top));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "boot step out of order")]
    fn skipping_a_step_is_caught() {
        let mut boot = Trampoline::new(Cpu);
        boot.establish_stack(StackTop::align_down(0x1000));
    }

    #[test]
    fn entry_point_reports_address() {
        extern "C" fn nop() {}
        let entry = unsafe { EntryPoint::new(nop) };
        assert_eq!(entry.addr(), nop as usize);
        assert!(format!("{:?}", entry).starts_with("EntryPoint(0x"));
    }
}
