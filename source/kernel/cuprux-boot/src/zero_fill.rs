// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Half-open byte range that must read as zero before `kernel_main`
//! OWNERS: @kernel-boot-team
//! PUBLIC API: ZeroFillRange, LayoutError
//! DEPENDS_ON: core only
//! INVARIANTS: start <= end; an empty range is valid and never written

use core::fmt;

/// Errors raised when describing a boot memory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The range ends before it starts.
    InvertedRange { start: usize, end: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `[start, end)` as published by the linker (`__bss_start`, `__bss_end`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroFillRange {
    start: *mut u8,
    end: *mut u8,
}

impl ZeroFillRange {
    /// Builds a range, rejecting `start > end`.
    pub fn new(start: *mut u8, end: *mut u8) -> Result<Self, LayoutError> {
        if (start as usize) > (end as usize) {
            return Err(LayoutError::InvertedRange { start: start as usize, end: end as usize });
        }
        Ok(Self { start, end })
    }

    /// Builds a range without checking the bounds.
    ///
    /// # Safety
    ///
    /// `start <= end` must hold. The linker script asserts this for the
    /// boundary symbols, which are the only intended input.
    pub const unsafe fn from_raw_parts(start: *mut u8, end: *mut u8) -> Self {
        Self { start, end }
    }

    /// Range covering exactly `bytes`.
    pub fn from_slice(bytes: &mut [u8]) -> Self {
        let range = bytes.as_mut_ptr_range();
        Self { start: range.start, end: range.end }
    }

    #[inline]
    pub fn start(&self) -> *mut u8 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> *mut u8 {
        self.end
    }

    /// Number of bytes covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end as usize - self.start as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
