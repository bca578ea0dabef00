// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parsed type layout.
//!
//! A [`TypeLayout`] owns the pre-order descriptor array produced by
//! [`parse_one`](crate::parse_one) together with a copy of the signature bytes
//! it was parsed from. Slot `i` always describes signature byte `i`:
//!
//! ```text
//! signature:   a     {     s     v     }
//! slot:        0     1     2     3     4
//! descriptor:  {0,3} {0,3} {0,2} {0,0} zero
//! ```
//!
//! The first child of a container lives at the container's index + 1; each
//! following sibling starts right after the previous sibling's subtree.

use crate::alphabet::TypeCode;
use crate::config::LENGTH_MAX;
use crate::descriptor::Descriptor;
use std::fmt;
use std::ops::Index;

/// Descriptor array of one complete D-Bus type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeLayout {
    slots: Vec<Descriptor>,
    signature: [u8; LENGTH_MAX],
}

impl TypeLayout {
    pub(crate) fn new(signature: &[u8], slots: Vec<Descriptor>) -> Self {
        debug_assert_eq!(signature.len(), slots.len());
        let mut buf = [0u8; LENGTH_MAX];
        buf[..signature.len()].copy_from_slice(signature);
        Self {
            slots,
            signature: buf,
        }
    }

    /// Number of signature bytes consumed (one slot per byte).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a parsed type spans at least one byte.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.slots
    }

    /// The consumed signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature[..self.slots.len()]
    }

    /// Descriptor of the top-level type.
    pub fn root(&self) -> Descriptor {
        self.slots[0]
    }

    pub fn get(&self, index: usize) -> Option<Descriptor> {
        self.slots.get(index).copied()
    }

    /// Type code of slot `index`.
    pub fn code(&self, index: usize) -> Option<TypeCode> {
        self.signature().get(index).copied().and_then(TypeCode::from_byte)
    }

    /// Number of slots spanned by the type starting at `index`, closing
    /// bracket included. `None` for closing-bracket slots and out-of-range
    /// indices.
    pub fn subtree_len(&self, index: usize) -> Option<usize> {
        let sig = self.signature();
        if !self.get(index)?.is_valid() {
            return None;
        }

        let mut depth = 0usize;
        for (offset, &c) in sig[index..].iter().enumerate() {
            match c {
                b'a' => continue,
                b'(' | b'{' => depth += 1,
                b')' | b'}' => depth = depth.checked_sub(1)?,
                _ => {}
            }
            if depth == 0 {
                return Some(offset + 1);
            }
        }
        None
    }

    /// Slot indices of the direct children of the container at `index`.
    ///
    /// An array yields its element, a struct or dict-entry yields each
    /// member in order; leaves and closing brackets yield nothing.
    pub fn children(&self, index: usize) -> Children<'_> {
        let end = match self.code(index) {
            Some(TypeCode::Array) => index + 2,
            Some(TypeCode::StructOpen | TypeCode::DictEntryOpen) => self
                .subtree_len(index)
                .map_or(index + 1, |len| index + len - 1),
            _ => index + 1,
        };
        Children {
            layout: self,
            pos: index + 1,
            end,
        }
    }

    /// Hand the descriptor array over to the caller.
    pub fn into_descriptors(self) -> Vec<Descriptor> {
        self.slots
    }
}

impl Index<usize> for TypeLayout {
    type Output = Descriptor;

    fn index(&self, index: usize) -> &Descriptor {
        &self.slots[index]
    }
}

impl AsRef<[Descriptor]> for TypeLayout {
    fn as_ref(&self) -> &[Descriptor] {
        &self.slots
    }
}

impl fmt::Debug for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeLayout")
            .field("signature", &String::from_utf8_lossy(self.signature()))
            .field("slots", &self.slots)
            .finish()
    }
}

/// Iterator over the child slots of a container, see [`TypeLayout::children`].
#[derive(Debug, Clone)]
pub struct Children<'a> {
    layout: &'a TypeLayout,
    pos: usize,
    end: usize,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.pos >= self.end {
            return None;
        }
        let current = self.pos;
        self.pos += self.layout.subtree_len(current)?;
        Some(current)
    }
}
