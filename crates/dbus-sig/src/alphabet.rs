// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! D-Bus signature alphabet.
//!
//! A constant 256-entry table maps every byte to the descriptor prototype of
//! the basic type it names. Bytes outside the set of leaf codes (including the
//! container codes `a ( ) { }`) map to [`Descriptor::ZERO`].
//!
//! | code  | meaning         | size | align |
//! |-------|-----------------|------|-------|
//! | y     | uint8           | 1    | 0     |
//! | b     | boolean         | 4    | 2     |
//! | n,q   | int16, uint16   | 2    | 1     |
//! | i,u,h | int32, uint32, fd | 4  | 2     |
//! | x,t,d | int64, uint64, double | 8 | 3 |
//! | s,o   | string, object path | 0 | 2    |
//! | g     | signature       | 0    | 0     |
//! | v     | variant         | 0    | 0     |

use crate::descriptor::Descriptor;
use std::fmt;

static BUILTINS: [Descriptor; 256] = build_table();

const fn build_table() -> [Descriptor; 256] {
    let mut table = [Descriptor::ZERO; 256];
    let mut i = 0;
    while i < ALL_CODES.len() {
        let code = ALL_CODES[i];
        if let Some((size, alignment)) = code.leaf_layout() {
            table[code.as_byte() as usize] = Descriptor::new(size, alignment, code.is_basic());
        }
        i += 1;
    }
    table
}

/// Descriptor prototype for a signature byte.
///
/// Returns [`Descriptor::ZERO`] (`valid=false`) for anything that is not a
/// leaf type code.
#[inline]
pub fn lookup(byte: u8) -> Descriptor {
    BUILTINS[byte as usize]
}

/// One byte of the signature alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeCode {
    Byte = b'y',
    Boolean = b'b',
    Int16 = b'n',
    Uint16 = b'q',
    Int32 = b'i',
    Uint32 = b'u',
    Int64 = b'x',
    Uint64 = b't',
    Double = b'd',
    UnixFd = b'h',
    String = b's',
    ObjectPath = b'o',
    Signature = b'g',
    Variant = b'v',
    Array = b'a',
    StructOpen = b'(',
    StructClose = b')',
    DictEntryOpen = b'{',
    DictEntryClose = b'}',
}

/// Every alphabet byte, leaves first.
pub const ALL_CODES: [TypeCode; 19] = [
    TypeCode::Byte,
    TypeCode::Boolean,
    TypeCode::Int16,
    TypeCode::Uint16,
    TypeCode::Int32,
    TypeCode::Uint32,
    TypeCode::Int64,
    TypeCode::Uint64,
    TypeCode::Double,
    TypeCode::UnixFd,
    TypeCode::String,
    TypeCode::ObjectPath,
    TypeCode::Signature,
    TypeCode::Variant,
    TypeCode::Array,
    TypeCode::StructOpen,
    TypeCode::StructClose,
    TypeCode::DictEntryOpen,
    TypeCode::DictEntryClose,
];

impl TypeCode {
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'y' => Self::Byte,
            b'b' => Self::Boolean,
            b'n' => Self::Int16,
            b'q' => Self::Uint16,
            b'i' => Self::Int32,
            b'u' => Self::Uint32,
            b'x' => Self::Int64,
            b't' => Self::Uint64,
            b'd' => Self::Double,
            b'h' => Self::UnixFd,
            b's' => Self::String,
            b'o' => Self::ObjectPath,
            b'g' => Self::Signature,
            b'v' => Self::Variant,
            b'a' => Self::Array,
            b'(' => Self::StructOpen,
            b')' => Self::StructClose,
            b'{' => Self::DictEntryOpen,
            b'}' => Self::DictEntryClose,
            _ => return None,
        })
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Basic types: every leaf except the variant.
    pub const fn is_basic(self) -> bool {
        !matches!(self, Self::Variant) && self.leaf_layout().is_some()
    }

    /// `a`, `(` or `{`.
    pub const fn is_container_open(self) -> bool {
        matches!(self, Self::Array | Self::StructOpen | Self::DictEntryOpen)
    }

    /// `)` or `}`.
    pub const fn is_container_close(self) -> bool {
        matches!(self, Self::StructClose | Self::DictEntryClose)
    }

    /// `(size, alignment_log2)` of a leaf, `None` for container bytes.
    const fn leaf_layout(self) -> Option<(u16, u8)> {
        Some(match self {
            Self::Byte => (1, 0),
            Self::Int16 | Self::Uint16 => (2, 1),
            Self::Boolean | Self::Int32 | Self::Uint32 | Self::UnixFd => (4, 2),
            Self::Int64 | Self::Uint64 | Self::Double => (8, 3),
            Self::String | Self::ObjectPath => (0, 2),
            Self::Signature | Self::Variant => (0, 0),
            Self::Array
            | Self::StructOpen
            | Self::StructClose
            | Self::DictEntryOpen
            | Self::DictEntryClose => return None,
        })
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

impl TryFrom<u8> for TypeCode {
    type Error = crate::Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_byte(byte).ok_or(crate::Error::Malformed)
    }
}
