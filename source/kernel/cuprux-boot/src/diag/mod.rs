// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Boot diagnostics
//! OWNERS: @kernel-boot-team
//! PUBLIC API: log (Level, emit, log_* macros)
//! DEPENDS_ON: uart (feature `debug_uart`)
//! INVARIANTS: Silent unless `debug_uart` is enabled on a bare-metal target

#[macro_use]
pub mod log;
