// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Single-type signature parser.
//!
//! Extracts the first complete type from the head of a signature and computes
//! the wire layout of that type and every nested sub-type in one linear scan.
//!
//! # Algorithm
//!
//! 1. **Length probe**: count brackets until depth returns to zero, which
//!    yields the number of bytes forming the first top-level type. Arrays do
//!    not change depth; they wrap whatever follows.
//! 2. **Layout pass**: allocate one descriptor slot per byte, then walk the
//!    bytes again with an explicit container stack. Leaves copy their
//!    prototype from the alphabet table, containers are seeded on open and
//!    folded into their parent when they complete.
//!
//! Nesting is tracked on a fixed `DEPTH_MAX` stack; the parser never recurses.
//!
//! # Folding rules
//!
//! - Array: `size = 0`, `alignment = alignment(element)`.
//! - Struct / dict-entry: `alignment = max(children)` (dict-entries start at
//!   8 bytes); `size` is the padded sum of the children when all of them are
//!   fixed-size, otherwise `0`.
//!
//! A struct opener is seeded with `size = 1` so that "still fixed" and
//! "poisoned by a variable-size child" (`size = 0`) stay distinguishable
//! before the first child arrives. The first child replaces the seed, later
//! children are appended after padding to their alignment.

use crate::alphabet;
use crate::config::{ParseOptions, DEPTH_MAX, DICT_ENTRY_ALIGNMENT, LENGTH_MAX};
use crate::descriptor::{align_offset, Descriptor};
use crate::error::{Error, Result};
use crate::layout::TypeLayout;

/// Parse the first complete type of `signature` with default options.
///
/// On success the returned layout holds one descriptor per consumed byte;
/// [`TypeLayout::len`] is the number of bytes consumed. Trailing bytes are
/// left untouched.
///
/// # Errors
///
/// [`Error::Malformed`] for any grammar or limit violation (including empty
/// input), [`Error::OutOfMemory`] if the descriptor buffer cannot be
/// allocated.
///
/// # Example
///
/// ```rust
/// use dbus_sig::parse_one;
///
/// let layout = parse_one(b"(yt)s").unwrap();
/// assert_eq!(layout.len(), 4);
/// assert_eq!(layout.root().size(), 16);
/// assert_eq!(layout.root().alignment(), 3);
/// ```
pub fn parse_one(signature: &[u8]) -> Result<TypeLayout> {
    parse_one_with(signature, &ParseOptions::default())
}

/// Parse the first complete type of `signature` with explicit options.
pub fn parse_one_with(signature: &[u8], options: &ParseOptions) -> Result<TypeLayout> {
    if signature.len() > LENGTH_MAX {
        log::debug!(
            "[parse_one] signature length {} exceeds {}",
            signature.len(),
            LENGTH_MAX
        );
        return Err(Error::Malformed);
    }

    let n_type = probe_length(signature)?;
    let signature = &signature[..n_type];

    let mut slots = Vec::new();
    slots.try_reserve_exact(n_type)?;
    slots.resize(n_type, Descriptor::ZERO);

    layout_pass(signature, &mut slots, options)?;

    log::trace!(
        "[parse_one] {:?} -> {:?}",
        String::from_utf8_lossy(signature),
        slots
    );
    Ok(TypeLayout::new(signature, slots))
}

fn malformed(signature: &[u8], offset: usize, reason: &str) -> Error {
    log::debug!(
        "[parse_one] rejected {:?} at offset {}: {}",
        String::from_utf8_lossy(signature),
        offset,
        reason
    );
    Error::Malformed
}

/// Length in bytes of the first top-level type of `signature`.
///
/// Only brackets are validated here; unknown codes are caught by the layout
/// pass.
fn probe_length(signature: &[u8]) -> Result<usize> {
    let mut depth = 0usize;

    for (i, &c) in signature.iter().enumerate() {
        match c {
            b'a' => continue,
            b'(' | b'{' => depth += 1,
            b')' | b'}' => {
                if depth == 0 {
                    return Err(malformed(signature, i, "unbalanced closing bracket"));
                }
                depth -= 1;
            }
            _ => {}
        }

        if depth == 0 {
            return Ok(i + 1);
        }
    }

    Err(malformed(signature, signature.len(), "incomplete type"))
}

/// Fill `slots` for the complete type `signature` (exactly one type long).
fn layout_pass(signature: &[u8], slots: &mut [Descriptor], options: &ParseOptions) -> Result<()> {
    // Slot indices of the open containers, innermost last.
    let mut stack = [0usize; DEPTH_MAX];
    let mut depth = 0usize;

    for (i, &c) in signature.iter().enumerate() {
        let container = depth.checked_sub(1).map(|top| stack[top]);

        // A dict-entry holds exactly a basic key and one value: `{KV}`.
        if let Some(ic) = container.filter(|&ic| signature[ic] == b'{') {
            if i == ic + 1 {
                if !alphabet::lookup(c).is_basic() {
                    return Err(malformed(signature, i, "dict-entry key must be a basic type"));
                }
            } else if i == ic + 2 {
                if c == b'}' {
                    return Err(malformed(signature, i, "dict-entry without value"));
                }
            } else if c != b'}' {
                return Err(malformed(signature, i, "dict-entry with more than two members"));
            }
        }

        let mut this = i;

        match c {
            b'(' | b'{' | b'a' => {
                if depth >= DEPTH_MAX {
                    return Err(malformed(signature, i, "container nesting too deep"));
                }
                if c == b'{'
                    && options.is_strict_dict_entry()
                    && container.map(|ic| signature[ic]) != Some(b'a')
                {
                    return Err(malformed(signature, i, "dict-entry outside of an array"));
                }

                slots[i] = match c {
                    b'a' => Descriptor::new(0, 0, false),
                    b'(' => Descriptor::new(1, 0, false),
                    _ => Descriptor::new(1, DICT_ENTRY_ALIGNMENT, false),
                };
                stack[depth] = i;
                depth += 1;

                // Containers are folded when they close, not when they open.
                continue;
            }
            b')' | b'}' => {
                let opener = if c == b')' { b'(' } else { b'{' };
                let ic = match container {
                    Some(ic) if signature[ic] == opener => ic,
                    _ => return Err(malformed(signature, i, "mismatched closing bracket")),
                };
                if ic + 1 == i {
                    return Err(malformed(signature, i, "empty struct"));
                }

                slots[i] = Descriptor::ZERO;
                this = ic;
                depth -= 1;
            }
            _ => {
                let prototype = alphabet::lookup(c);
                if !prototype.is_valid() {
                    return Err(malformed(signature, i, "unknown type code"));
                }
                slots[i] = prototype;
            }
        }

        // Collapse every array whose element just completed (`aa..T`).
        while depth > 0 && signature[stack[depth - 1]] == b'a' {
            let ia = stack[depth - 1];
            let element = slots[ia + 1].alignment();
            slots[ia].set_alignment(element);
            this = ia;
            depth -= 1;
        }

        if depth == 0 {
            return Ok(());
        }

        fold_child(signature, slots, stack[depth - 1], this)?;
    }

    Err(malformed(signature, signature.len(), "incomplete type"))
}

/// Fold the completed child at `child` into the struct or dict-entry at `parent`.
fn fold_child(
    signature: &[u8],
    slots: &mut [Descriptor],
    parent: usize,
    child: usize,
) -> Result<()> {
    let this = slots[child];
    let mut container = slots[parent];

    if container.size() != 0 && this.size() != 0 {
        let size = if child == parent + 1 {
            usize::from(this.size())
        } else {
            align_offset(usize::from(container.size()), this.alignment_bytes())
                + usize::from(this.size())
        };
        let size = u16::try_from(size)
            .ok()
            .filter(|&s| s <= crate::config::SIZE_MAX)
            .ok_or_else(|| malformed(signature, child, "fixed size overflow"))?;
        container.set_size(size);
    } else {
        container.set_size(0);
    }

    container.set_alignment(container.alignment().max(this.alignment()));
    slots[parent] = container;
    Ok(())
}
