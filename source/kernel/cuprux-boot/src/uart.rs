// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! COM1 serial sink for boot diagnostics (feature `debug_uart`).
//!
//! Both the lock and the ready flag live in static storage, so nothing here
//! may run before the zero-fill step.

use core::fmt::{Arguments, Write};
use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;
use uart_16550::SerialPort;

use crate::config::COM1_PORT;

// SAFETY: COM1 is the standard legacy port; nothing else drives it during boot.
static COM1: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(COM1_PORT) });
static READY: AtomicBool = AtomicBool::new(false);

/// Writes one `[LEVEL target] message` line.
pub fn write_record(tag: &str, target: &str, args: Arguments<'_>) {
    // try_lock: a panic while logging must not deadlock the halt path.
    let Some(mut port) = COM1.try_lock() else {
        return;
    };
    if !READY.swap(true, Ordering::Relaxed) {
        port.init();
    }
    let _ = write!(port, "[{} {}] ", tag, target);
    let _ = port.write_fmt(args);
    let _ = port.write_str("\n");
}
