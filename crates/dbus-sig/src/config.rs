// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parser limits and runtime options - Single Source of Truth
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: Wire-compatibility constants fixed by the D-Bus
//!   wire format (signature length, nesting depth) and the descriptor
//!   bit-layout derived from them.
//! - **Level 2 (Dynamic)**: [`ParseOptions`] for per-call behavior.
//!
//! # Example
//!
//! ```rust
//! use dbus_sig::config::{ParseOptions, DEPTH_MAX, LENGTH_MAX};
//!
//! assert_eq!(LENGTH_MAX, 255);
//! assert_eq!(DEPTH_MAX, 64);
//!
//! let strict = ParseOptions::new().strict_dict_entry(true);
//! assert!(strict.is_strict_dict_entry());
//! ```

// =======================================================================
// D-Bus Specification limits (section "Valid Signatures")
// =======================================================================

/// Maximum length of a single top-level signature, in bytes.
pub const LENGTH_MAX: usize = 255;

/// Maximum container nesting depth (any mix of arrays, structs, dict-entries).
pub const DEPTH_MAX: usize = 64;

// =======================================================================
// Descriptor bit-layout
// =======================================================================

/// Bits reserved for the fixed size of a type inside a packed descriptor.
///
/// Every signature byte contributes at most 8 bytes (including padding) to
/// a fixed-size struct, so `LENGTH_MAX * 8` bounds any size we can compute.
pub const SIZE_BITS: u32 = 12;

/// Bits reserved for the log2 alignment (0..=3).
pub const ALIGNMENT_BITS: u32 = 2;

/// Largest size representable in a descriptor.
pub const SIZE_MAX: u16 = (1 << SIZE_BITS) - 1;

const _: () = assert!(LENGTH_MAX * 8 < (1 << SIZE_BITS));
const _: () = assert!(SIZE_BITS + ALIGNMENT_BITS + 2 == u16::BITS);

/// Log2 alignment floor of a dict-entry (dict-entries are struct-aligned, 8 bytes).
pub const DICT_ENTRY_ALIGNMENT: u8 = 3;

// =======================================================================
// Runtime options
// =======================================================================

/// Per-call parser options.
///
/// The default matches the lenient reference behavior: a dict-entry is
/// accepted anywhere an element type may appear, leaving the "only inside an
/// array" rule to the value layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    strict_dict_entry: bool,
}

impl ParseOptions {
    /// Default (lenient) options.
    pub const fn new() -> Self {
        Self {
            strict_dict_entry: false,
        }
    }

    /// Reject `{...}` unless it is the element type of an array.
    #[must_use]
    pub const fn strict_dict_entry(mut self, strict: bool) -> Self {
        self.strict_dict_entry = strict;
        self
    }

    pub const fn is_strict_dict_entry(&self) -> bool {
        self.strict_dict_entry
    }
}
