// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg(test)]
//! CONTEXT: Property-based tests for the zero fill and stack alignment
//! OWNERS: @kernel-boot-team
//! NOTE: Tests only; no boot logic.
//!
//! TEST_SCOPE:
//!   - Zero fill writes exactly [start, end), for every start <= end
//!   - Aligned stack tops are multiples of 16, never above the raw top, at most 15 below
//!
//! TEST_SCENARIOS:
//!   - zero_fill_covers_exactly_the_range(): sentinel bytes outside the range survive
//!   - empty_range_touches_nothing(): start == end leaves the buffer intact
//!   - aligned_top_within_fifteen_bytes(): arbitrary raw tops round down correctly

use proptest::prelude::*;

use crate::arch::x86_64::Cpu;
use crate::config::STACK_ALIGN;
use crate::stack::StackTop;
use crate::trampoline::{BootState, Trampoline};
use crate::zero_fill::ZeroFillRange;

const BUF_LEN: usize = 512;

fn arb_bounds() -> impl Strategy<Value = (usize, usize)> {
    (0usize..=BUF_LEN, 0usize..=BUF_LEN).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

fn fill_from(buf: &mut [u8], start: usize, end: usize) {
    let base = buf.as_mut_ptr();
    let range = ZeroFillRange::new(unsafe { base.add(start) }, unsafe { base.add(end) })
        .expect("ordered bounds");
    let mut boot = Trampoline::on_boot_stack(Cpu, StackTop::align_down(0x7fff_fff0));
    unsafe { boot.zero_fill(range) };
    assert_eq!(boot.state(), BootState::ZeroFillComplete);
}

proptest! {
    #[test]
    fn zero_fill_covers_exactly_the_range((start, end) in arb_bounds(), sentinel in 1u8..=255) {
        let mut buf = [sentinel; BUF_LEN];
        fill_from(&mut buf, start, end);
        for (i, &byte) in buf.iter().enumerate() {
            if (start..end).contains(&i) {
                prop_assert_eq!(byte, 0, "byte {} inside the range", i);
            } else {
                prop_assert_eq!(byte, sentinel, "byte {} outside the range", i);
            }
        }
    }

    #[test]
    fn empty_range_touches_nothing(at in 0usize..=BUF_LEN, sentinel in 1u8..=255) {
        let mut buf = [sentinel; BUF_LEN];
        fill_from(&mut buf, at, at);
        prop_assert!(buf.iter().all(|&b| b == sentinel));
    }

    #[test]
    fn aligned_top_within_fifteen_bytes(raw in any::<usize>()) {
        let top = StackTop::align_down(raw);
        prop_assert_eq!(top.raw() % STACK_ALIGN, 0);
        prop_assert!(top.raw() <= raw);
        prop_assert!(raw - top.raw() <= 15);
    }
}
