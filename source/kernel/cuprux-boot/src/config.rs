// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Build-time knobs for the boot trampoline
//! OWNERS: @kernel-boot-team
//! PUBLIC API: BOOT_STACK_SIZE, STACK_ALIGN, COM1_PORT
//! DEPENDS_ON: static_assertions
//! INVARIANTS: Stack size is a multiple of the ABI alignment; values resolved at link time
//!
//! Everything here is a constant: the trampoline runs before any runtime
//! configuration source could be read.

use static_assertions::const_assert;

/// Size of the statically reserved boot stack (64 KiB).
pub const BOOT_STACK_SIZE: usize = 64 * 1024;

/// Stack alignment required at every call boundary by the SysV x86_64 ABI.
pub const STACK_ALIGN: usize = 16;

/// I/O port base of the legacy COM1 16550 UART used by `debug_uart`.
pub const COM1_PORT: u16 = 0x3F8;

const_assert!(STACK_ALIGN.is_power_of_two());
const_assert!(BOOT_STACK_SIZE % STACK_ALIGN == 0);
const_assert!(BOOT_STACK_SIZE >= 4096);
