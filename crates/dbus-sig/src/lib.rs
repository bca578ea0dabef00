// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dbus-sig - D-Bus type-signature parser and layout calculator
//!
//! Parses the next complete type from the head of a D-Bus signature and
//! computes the static wire layout (fixed size, alignment, basic/compound
//! classification) of that type and every nested sub-type. The result is a
//! flat pre-order descriptor array that a value marshaller walks in lockstep
//! with the signature, without parsing it again.
//!
//! ## Quick Start
//!
//! ```rust
//! use dbus_sig::{parse_one, Descriptor};
//!
//! let layout = parse_one(b"a{sv}").unwrap();
//! assert_eq!(layout.len(), 5);
//!
//! // Dict-entries are 8-byte aligned, arrays inherit their element alignment.
//! assert_eq!(layout[0].alignment(), 3);
//! assert_eq!(layout[0].size(), 0);
//!
//! // Closing brackets occupy an all-zero slot.
//! assert_eq!(layout[4], Descriptor::ZERO);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------+
//! |  types()        split a full signature          |
//! +-------------------------------------------------+
//! |  parse_one()    length probe + layout pass      |
//! +-------------------------------------------------+
//! |  alphabet       byte -> descriptor prototype    |
//! +-------------------------------------------------+
//! |  Descriptor     16-bit packed {size,align,...}  |
//! +-------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeLayout`] | Owned descriptor array of one complete type |
//! | [`Descriptor`] | Bit-packed layout of one signature byte |
//! | [`TypeCode`] | One byte of the signature alphabet |
//! | [`ParseOptions`] | Per-call parser options |
//! | [`Error`] | `Malformed` or `OutOfMemory` |
//!
//! ## Logging
//!
//! Rejections are reported through the [`log`] facade at `debug` level with
//! the offending offset and rule; successful parses are logged at `trace`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

/// Signature alphabet table and type codes
pub mod alphabet;

/// Parser limits and runtime options
pub mod config;

/// Bit-packed per-slot descriptor
pub mod descriptor;

/// Error types
pub mod error;

/// Owned descriptor array and navigation helpers
pub mod layout;

/// Single-type parser
pub mod parser;

/// Iteration over every type of a full signature
pub mod types;

// Re-exports for convenience
pub use crate::alphabet::TypeCode;
pub use crate::config::{ParseOptions, DEPTH_MAX, LENGTH_MAX};
pub use crate::descriptor::Descriptor;
pub use crate::error::{Error, Result};
pub use crate::layout::{Children, TypeLayout};
pub use crate::parser::{parse_one, parse_one_with};
pub use crate::types::{types, Types};
