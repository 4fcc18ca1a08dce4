// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: x86_64 entry trampoline between a long-mode boot loader and `kernel_main`
//! OWNERS: @kernel-boot-team
//! PUBLIC API: Trampoline, BootState, EntryPoint, BootStack/BOOT_STACK, StackTop,
//!             ZeroFillRange, LayoutError, arch::Intrinsics
//! DEPENDS_ON: x86_64 (bare metal), uart_16550 + spin (debug_uart), bitflags, static_assertions
//! INVARIANTS: Interrupts masked from the first instruction to the call; rsp 16-byte aligned
//!             at the call; [__bss_start, __bss_end) zeroed exactly; never returns
//!
//! Linking this crate into a `target_os = "none"` image provides `_start`
//! and the boot stack; the image must define `extern "C" fn kernel_main()`
//! and link with `kernel.ld`, which exports `__bss_start`/`__bss_end` and
//! places `.boot_stack`. Cargo does not forward link arguments from a
//! library, so the image's build script passes the script itself. The
//! absolute path arrives as `links` metadata:
//!
//! ```ignore
//! // build.rs of the kernel image
//! let script = std::env::var("DEP_CUPRUX_BOOT_KERNEL_LD").expect("cuprux-boot linker script");
//! println!("cargo:rustc-link-arg=-T{script}");
//! ```
//!
//! The same path is available at compile time as [`linker::SCRIPT_PATH`].
//! Host builds compile only the modelled sequence so it can be tested
//! without hardware.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![forbid(clippy::unwrap_used)]

#[macro_use]
pub mod diag;

pub mod arch;
pub mod config;
pub mod linker;
pub mod stack;
pub mod trampoline;
pub mod zero_fill;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod entry;
#[cfg(all(feature = "panic_handler", target_arch = "x86_64", target_os = "none", not(test)))]
mod panic;
#[cfg(all(feature = "debug_uart", target_arch = "x86_64", target_os = "none"))]
mod uart;

#[cfg(test)]
mod tests_prop;

pub use stack::{BootStack, StackTop, BOOT_STACK};
pub use trampoline::{BootState, EntryPoint, Trampoline};
pub use zero_fill::{LayoutError, ZeroFillRange};
