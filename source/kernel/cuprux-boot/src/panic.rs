// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Opt-in panic handler for images without their own
//! OWNERS: @kernel-boot-team
//! PUBLIC API: panic handler (no_std, feature `panic_handler`)
//! DEPENDS_ON: arch::Intrinsics, diag::log
//! INVARIANTS: Never returns; interrupts masked on every halt iteration; no allocation

use core::panic::PanicInfo;

use crate::arch::{x86_64::Cpu, Intrinsics};

/// Reports the location (when `debug_uart` is on) and parks the CPU in the
/// same loop as the unexpected-return fault.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    let cpu = Cpu;
    cpu.mask_interrupts();
    if let Some(location) = info.location() {
        log_error!(target: "panic", "{}:{}: {}", location.file(), location.line(), info.message());
    } else {
        log_error!(target: "panic", "{}", info.message());
    }
    loop {
        cpu.mask_interrupts();
        cpu.halt();
    }
}
