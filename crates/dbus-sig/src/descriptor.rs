// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bit-packed per-slot type descriptor.
//!
//! # Binary layout
//!
//! ```text
//!  15      14      13..12      11..0
//! +-------+-------+-----------+---------------+
//! | valid | basic | alignment | size          |
//! +-------+-------+-----------+---------------+
//! ```
//!
//! `size` is the fixed wire size in bytes, or `0` for variable-size types.
//! `alignment` is log2 of the wire alignment boundary.

use crate::config::{ALIGNMENT_BITS, SIZE_BITS, SIZE_MAX};
use std::fmt;

const SIZE_MASK: u16 = SIZE_MAX;
const ALIGNMENT_SHIFT: u32 = SIZE_BITS;
const ALIGNMENT_MASK: u16 = ((1 << ALIGNMENT_BITS) - 1) << ALIGNMENT_SHIFT;
const BASIC_BIT: u16 = 1 << (SIZE_BITS + ALIGNMENT_BITS);
const VALID_BIT: u16 = 1 << (SIZE_BITS + ALIGNMENT_BITS + 1);

/// Layout summary of one signature byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Descriptor(u16);

impl Descriptor {
    /// All-zero descriptor (`valid=false`), used for closing-bracket slots and
    /// for bytes outside the alphabet.
    pub const ZERO: Self = Self(0);

    /// Build a valid descriptor.
    ///
    /// `size` is masked to [`SIZE_BITS`] and `alignment` to [`ALIGNMENT_BITS`].
    pub const fn new(size: u16, alignment: u8, basic: bool) -> Self {
        let mut bits = (size & SIZE_MASK) | VALID_BIT;
        bits |= ((alignment as u16) << ALIGNMENT_SHIFT) & ALIGNMENT_MASK;
        if basic {
            bits |= BASIC_BIT;
        }
        Self(bits)
    }

    /// Reinterpret a raw 16-bit word.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw 16-bit word.
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Fixed wire size in bytes, `0` when variable-size.
    pub const fn size(self) -> u16 {
        self.0 & SIZE_MASK
    }

    /// Log2 of the wire alignment.
    pub const fn alignment(self) -> u8 {
        ((self.0 & ALIGNMENT_MASK) >> ALIGNMENT_SHIFT) as u8
    }

    /// Wire alignment in bytes (1, 2, 4 or 8).
    pub const fn alignment_bytes(self) -> usize {
        1 << self.alignment()
    }

    pub const fn is_basic(self) -> bool {
        self.0 & BASIC_BIT != 0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & VALID_BIT != 0
    }

    /// True for a valid slot whose type has a fixed wire size.
    pub const fn is_fixed(self) -> bool {
        self.is_valid() && self.size() != 0
    }

    pub(crate) fn set_size(&mut self, size: u16) {
        debug_assert!(size <= SIZE_MAX, "fixed size {size} overflows descriptor");
        self.0 = (self.0 & !SIZE_MASK) | (size & SIZE_MASK);
    }

    pub(crate) fn set_alignment(&mut self, alignment: u8) {
        self.0 = (self.0 & !ALIGNMENT_MASK)
            | (((alignment as u16) << ALIGNMENT_SHIFT) & ALIGNMENT_MASK);
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { 'T' } else { 'F' };
        write!(
            f,
            "{{{},{},{},{}}}",
            self.size(),
            self.alignment(),
            flag(self.is_basic()),
            flag(self.is_valid())
        )
    }
}

/// Round `offset` up to the next multiple of `alignment` (a power of two).
pub(crate) const fn align_offset(offset: usize, alignment: usize) -> usize {
    (offset + alignment - 1) & !(alignment - 1)
}
