// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::cast_possible_truncation)] // Test sizes stay tiny

//! Randomized invariant checks for `parse_one`.
//!
//! Signatures are generated from the grammar with a seeded `fastrand::Rng`
//! and compared against a straightforward recursive layout model.

use dbus_sig::{parse_one, Descriptor, Error, DEPTH_MAX, LENGTH_MAX};

const ITERATIONS: usize = 2_000;
const LEAVES: &[u8] = b"ybnqiuxtdhsogv";
const BASIC: &[u8] = b"ybnqiuxtdhsog";
const FIXED: &[u8] = b"ybnqiuxtdh";
const ALPHABET: &[u8] = b"ybnqiuxtdhsogva(){}";

// ============================================================================
// Generators
// ============================================================================

fn gen_type(rng: &mut fastrand::Rng, out: &mut Vec<u8>, depth: usize) {
    let choice = if depth == 0 { 0 } else { rng.u8(0..10) };
    match choice {
        0..=4 => out.push(LEAVES[rng.usize(..LEAVES.len())]),
        5 | 6 => {
            out.push(b'a');
            gen_type(rng, out, depth - 1);
        }
        7 | 8 => {
            out.push(b'(');
            for _ in 0..rng.usize(1..=4) {
                gen_type(rng, out, depth - 1);
            }
            out.push(b')');
        }
        _ => {
            out.extend_from_slice(b"a{");
            out.push(BASIC[rng.usize(..BASIC.len())]);
            gen_type(rng, out, depth - 1);
            out.push(b'}');
        }
    }
}

/// Only fixed-size leaves and struct nesting.
fn gen_fixed(rng: &mut fastrand::Rng, out: &mut Vec<u8>, depth: usize) {
    if depth == 0 || rng.u8(0..3) == 0 {
        out.push(FIXED[rng.usize(..FIXED.len())]);
        return;
    }
    out.push(b'(');
    for _ in 0..rng.usize(1..=4) {
        gen_fixed(rng, out, depth - 1);
    }
    out.push(b')');
}

fn random_valid(rng: &mut fastrand::Rng) -> Vec<u8> {
    loop {
        let mut sig = Vec::new();
        gen_type(rng, &mut sig, 5);
        if sig.len() <= LENGTH_MAX {
            return sig;
        }
    }
}

// ============================================================================
// Recursive reference model (standard D-Bus layout, no tricks)
// ============================================================================

fn align_up(offset: usize, alignment: u8) -> usize {
    let a = 1usize << alignment;
    (offset + a - 1) & !(a - 1)
}

fn leaf(c: u8) -> Descriptor {
    match c {
        b'y' => Descriptor::new(1, 0, true),
        b'n' | b'q' => Descriptor::new(2, 1, true),
        b'b' | b'i' | b'u' | b'h' => Descriptor::new(4, 2, true),
        b'x' | b't' | b'd' => Descriptor::new(8, 3, true),
        b's' | b'o' => Descriptor::new(0, 2, true),
        b'g' => Descriptor::new(0, 0, true),
        b'v' => Descriptor::new(0, 0, false),
        _ => unreachable!("generator produced {}", c as char),
    }
}

fn model(sig: &[u8], pos: &mut usize, out: &mut [Descriptor]) -> Descriptor {
    let idx = *pos;
    *pos += 1;
    let d = match sig[idx] {
        b'a' => {
            let element = model(sig, pos, out);
            Descriptor::new(0, element.alignment(), false)
        }
        open @ (b'(' | b'{') => {
            let close = if open == b'(' { b')' } else { b'}' };
            let mut alignment = if open == b'{' { 3 } else { 0 };
            let mut size = Some(0usize);
            let mut first = true;
            while sig[*pos] != close {
                let member = model(sig, pos, out);
                alignment = alignment.max(member.alignment());
                size = match size {
                    Some(offset) if member.size() != 0 => Some(if first {
                        usize::from(member.size())
                    } else {
                        align_up(offset, member.alignment()) + usize::from(member.size())
                    }),
                    _ => None,
                };
                first = false;
            }
            out[*pos] = Descriptor::ZERO;
            *pos += 1;
            Descriptor::new(size.unwrap_or(0) as u16, alignment, false)
        }
        c => leaf(c),
    };
    out[idx] = d;
    d
}

fn model_layout(sig: &[u8]) -> Vec<Descriptor> {
    let mut out = vec![Descriptor::ZERO; sig.len()];
    let mut pos = 0;
    model(sig, &mut pos, &mut out);
    assert_eq!(pos, sig.len());
    out
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn prop_layout_matches_recursive_model() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0001);
    for _ in 0..ITERATIONS {
        let sig = random_valid(&mut rng);
        let layout = parse_one(&sig).unwrap();
        assert_eq!(
            layout.descriptors(),
            model_layout(&sig).as_slice(),
            "{:?}",
            String::from_utf8_lossy(&sig)
        );
    }
}

#[test]
fn prop_consumed_length_ignores_tail() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0002);
    for _ in 0..ITERATIONS {
        let head = random_valid(&mut rng);
        let mut sig = head.clone();
        while sig.len() < LENGTH_MAX && rng.bool() {
            let tail = random_valid(&mut rng);
            if sig.len() + tail.len() > LENGTH_MAX {
                break;
            }
            sig.extend_from_slice(&tail);
        }
        let layout = parse_one(&sig).unwrap();
        assert_eq!(layout.len(), head.len(), "{:?}", String::from_utf8_lossy(&sig));
        assert_eq!(layout.signature(), head.as_slice());
    }
}

#[test]
fn prop_closing_slots_zero_others_valid() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0003);
    for _ in 0..ITERATIONS {
        let sig = random_valid(&mut rng);
        let layout = parse_one(&sig).unwrap();
        for (i, (&c, d)) in sig.iter().zip(layout.descriptors()).enumerate() {
            if c == b')' || c == b'}' {
                assert_eq!(*d, Descriptor::ZERO, "slot {} of {:?}", i, layout);
            } else {
                assert!(d.is_valid(), "slot {} of {:?}", i, layout);
            }
        }
    }
}

#[test]
fn prop_arrays_inherit_element_alignment() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0004);
    for _ in 0..ITERATIONS {
        let sig = random_valid(&mut rng);
        let layout = parse_one(&sig).unwrap();
        for (i, &c) in sig.iter().enumerate() {
            if c == b'a' {
                assert_eq!(layout[i].alignment(), layout[i + 1].alignment());
                assert_eq!(layout[i].size(), 0);
            }
        }
    }
}

#[test]
fn prop_fixed_structs_use_padded_layout() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0005);
    for _ in 0..ITERATIONS {
        let mut sig = Vec::new();
        gen_fixed(&mut rng, &mut sig, 4);
        if sig.len() > LENGTH_MAX {
            continue;
        }
        let layout = parse_one(&sig).unwrap();
        assert!(layout.root().is_fixed(), "{:?}", layout);
        assert_eq!(layout.root(), model_layout(&sig)[0], "{:?}", layout);
    }
}

#[test]
fn prop_overlong_rejected() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0006);
    for _ in 0..200 {
        let len = rng.usize(LENGTH_MAX + 1..=2 * LENGTH_MAX);
        let sig: Vec<u8> = (0..len)
            .map(|_| LEAVES[rng.usize(..LEAVES.len())])
            .collect();
        assert_eq!(parse_one(&sig), Err(Error::Malformed));
    }
}

#[test]
fn prop_too_deep_rejected() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0007);
    for _ in 0..200 {
        let depth = rng.usize(DEPTH_MAX + 1..=DEPTH_MAX + 20);
        let openers: Vec<u8> = (0..depth)
            .map(|_| if rng.bool() { b'a' } else { b'(' })
            .collect();
        let mut sig = openers.clone();
        sig.push(b'i');
        for &o in openers.iter().rev() {
            if o == b'(' {
                sig.push(b')');
            }
        }
        if sig.len() > LENGTH_MAX {
            continue;
        }
        assert_eq!(parse_one(&sig), Err(Error::Malformed));
    }
}

#[test]
fn prop_foreign_byte_rejected() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0008);
    for _ in 0..ITERATIONS {
        let mut sig = random_valid(&mut rng);
        let foreign = loop {
            let b = rng.u8(..);
            if !ALPHABET.contains(&b) {
                break b;
            }
        };
        let at = rng.usize(..sig.len());
        sig[at] = foreign;
        assert_eq!(
            parse_one(&sig),
            Err(Error::Malformed),
            "{:?}",
            String::from_utf8_lossy(&sig)
        );
    }
}

#[test]
fn prop_arbitrary_bytes_never_panic() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0009);
    for _ in 0..ITERATIONS {
        let len = rng.usize(0..64);
        let sig: Vec<u8> = (0..len)
            .map(|_| ALPHABET[rng.usize(..ALPHABET.len())])
            .collect();
        if let Ok(layout) = parse_one(&sig) {
            assert!(!layout.is_empty() && layout.len() <= sig.len());
            assert_eq!(layout.signature(), &sig[..layout.len()]);
        }
    }
}
