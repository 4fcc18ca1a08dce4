// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Minimal structured logging with severity levels
//! OWNERS: @kernel-boot-team
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Level gating only (sink is COM1 on bare metal)
//! PUBLIC API: log_* macros, emit(level,target,args)
//! DEPENDS_ON: uart (feature `debug_uart`)
//! INVARIANTS: Debug/Trace only in debug builds; single-line emission;
//!             never called before the zero-fill step completes

use core::fmt::Arguments;

/// Logging severity used on the boot path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    #[cfg_attr(not(feature = "debug_uart"), allow(dead_code))]
    pub(crate) const fn tag(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    pub(crate) const fn enabled(self) -> bool {
        match self {
            Level::Debug | Level::Trace => cfg!(debug_assertions),
            _ => true,
        }
    }
}

/// Emits a structured log line if the level is enabled and a sink exists.
pub fn emit(level: Level, target: &'static str, args: Arguments<'_>) {
    if !level.enabled() {
        return;
    }

    #[cfg(all(feature = "debug_uart", target_arch = "x86_64", target_os = "none"))]
    crate::uart::write_record(level.tag(), target, args);
    #[cfg(not(all(feature = "debug_uart", target_arch = "x86_64", target_os = "none")))]
    let _ = (target, args);
}

#[macro_export]
macro_rules! log_error {
    (target: $target:expr, $($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Error, $target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Error, module_path!(), format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_warn {
    (target: $target:expr, $($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Warn, $target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Warn, module_path!(), format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_info {
    (target: $target:expr, $($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Info, $target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Info, module_path!(), format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_debug {
    (target: $target:expr, $($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Debug, $target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Debug, module_path!(), format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_trace {
    (target: $target:expr, $($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Trace, $target, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::diag::log::emit($crate::diag::log::Level::Trace, module_path!(), format_args!($($arg)+));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_levels_follow_debug_assertions() {
        assert!(Level::Error.enabled());
        assert!(Level::Warn.enabled());
        assert!(Level::Info.enabled());
        assert_eq!(Level::Debug.enabled(), cfg!(debug_assertions));
        assert_eq!(Level::Trace.enabled(), cfg!(debug_assertions));
    }

    #[test]
    fn tags_are_stable() {
        assert_eq!(Level::Error.tag(), "ERROR");
        assert_eq!(Level::Trace.tag(), "TRACE");
    }

    #[test]
    fn macros_accept_both_forms() {
        crate::log_info!(target: "boot", "entry at {:#x}", 0x1000usize);
        crate::log_warn!("no target {}", 1);
        crate::log_trace!(target: "boot", "quiet");
    }
}
