// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Boot entry for the CupruxOS kernel image.
//!
//! The loader jumps to `_start` in 64-bit long mode with paging on and every
//! other register unspecified. The stub masks interrupts, clears DF, moves
//! onto `BOOT_STACK` and calls [`start_rust`], which zeroes `.bss` and enters
//! `kernel_main`.

use crate::arch::x86_64::Cpu;
use crate::arch::Rflags;
use crate::stack::BOOT_STACK;
use crate::trampoline::{EntryPoint, Trampoline};
use crate::{config, linker};

extern "C" {
    /// First function of the higher-level kernel; supplied at final link.
    fn kernel_main();
}

core::arch::global_asm!(
    r#"
    .section .text._start, "ax", @progbits
    .globl _start
    .type _start, @function
_start:
    cli
    cld

    leaq {stack}(%rip), %rsp
    addq ${stack_size}, %rsp
    andq $-{align}, %rsp

    /* No caller frame: terminate unwinder and debugger backtraces here. */
    xorl %ebp, %ebp
    callq {start_rust}

.Lhang:
    cli
    hlt
    jmp .Lhang
    .size _start, . - _start
"#,
    stack = sym BOOT_STACK,
    stack_size = const config::BOOT_STACK_SIZE,
    align = const config::STACK_ALIGN,
    start_rust = sym start_rust,
    options(att_syntax)
);

/// Rust continuation of `_start`, running on the aligned boot stack.
///
/// Static storage is not zeroed yet on entry: nothing here may touch a
/// `static` before [`Trampoline::run`] performs the fill.
extern "C" fn start_rust() -> ! {
    debug_assert!(!Cpu.rflags().contains(Rflags::DIRECTION), "DF set after cld");
    let range = linker::zero_fill_range();
    debug_assert!(!BOOT_STACK.overlaps(&range), "boot stack inside the zero-fill range");

    let boot = Trampoline::on_boot_stack(Cpu, BOOT_STACK.top());
    // SAFETY: `kernel_main` is the kernel's parameterless entry and runs in
    // exactly this context. The zero-fill range comes from `kernel.ld`,
    // which keeps `.boot_stack` outside it.
    unsafe {
        let entry = EntryPoint::new(kernel_main);
        boot.run(range, entry)
    }
}
