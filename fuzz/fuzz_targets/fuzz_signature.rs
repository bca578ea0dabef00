// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for signature parsing
//!
//! Feeds arbitrary bytes to `parse_one` and `types`. Neither may panic, and
//! every accepted layout must satisfy the slot invariants.

#![no_main]

use dbus_sig::{parse_one, parse_one_with, types, Descriptor, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // ----------------------------------------------------------------
    // 1. Single type - must not panic, invariants hold on success
    // ----------------------------------------------------------------
    if let Ok(layout) = parse_one(data) {
        assert!(!layout.is_empty() && layout.len() <= data.len());
        for (i, &c) in layout.signature().iter().enumerate() {
            let d = layout[i];
            match c {
                b')' | b'}' => assert_eq!(d, Descriptor::ZERO),
                b'a' => {
                    assert!(d.is_valid());
                    assert_eq!(d.size(), 0);
                    assert_eq!(d.alignment(), layout[i + 1].alignment());
                }
                _ => assert!(d.is_valid()),
            }
        }

        // Strict mode only ever rejects more.
        let strict = ParseOptions::new().strict_dict_entry(true);
        if let Ok(strict_layout) = parse_one_with(data, &strict) {
            assert_eq!(strict_layout, layout);
        }
    }

    // ----------------------------------------------------------------
    // 2. Full signature split - must not panic, must consume in order
    // ----------------------------------------------------------------
    let mut offset = 0;
    for layout in types(data).flatten() {
        assert_eq!(layout.signature(), &data[offset..offset + layout.len()]);
        offset += layout.len();
    }
});
