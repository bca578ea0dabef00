// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializable view of a parsed layout and its text rendering.

use colored::*;
use dbus_sig::{Descriptor, TypeLayout};
use serde::Serialize;
use std::fmt::Write;

/// One descriptor slot, unpacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRow {
    pub index: usize,
    pub code: char,
    pub size: u16,
    pub alignment: u8,
    pub basic: bool,
    pub valid: bool,
    pub bits: u16,
}

impl SlotRow {
    fn new(index: usize, code: u8, d: Descriptor) -> Self {
        Self {
            index,
            code: code as char,
            size: d.size(),
            alignment: d.alignment(),
            basic: d.is_basic(),
            valid: d.is_valid(),
            bits: d.to_bits(),
        }
    }
}

/// Layout of one complete type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReport {
    pub signature: String,
    pub consumed: usize,
    pub fixed: bool,
    pub slots: Vec<SlotRow>,
}

impl From<&TypeLayout> for TypeReport {
    fn from(layout: &TypeLayout) -> Self {
        let slots = layout
            .signature()
            .iter()
            .zip(layout.descriptors())
            .enumerate()
            .map(|(i, (&code, &d))| SlotRow::new(i, code, d))
            .collect();
        Self {
            signature: String::from_utf8_lossy(layout.signature()).into_owned(),
            consumed: layout.len(),
            fixed: layout.root().is_fixed(),
            slots,
        }
    }
}

/// Render a report as an aligned table, one row per slot.
pub fn render_pretty(report: &TypeReport) -> String {
    let mut out = String::new();
    let kind = if report.fixed {
        "fixed".green()
    } else {
        "variable".yellow()
    };
    let _ = writeln!(
        out,
        "{} {} ({} bytes consumed, {})",
        ">>>".green().bold(),
        report.signature.bold(),
        report.consumed,
        kind
    );
    let _ = writeln!(
        out,
        "{}",
        format!(
            "    {:>3}  {:<4}  {:>5}  {:>5}  {:<5}  {:<5}  {:<6}",
            "#", "code", "size", "align", "basic", "valid", "bits"
        )
        .dimmed()
    );
    for row in &report.slots {
        let line = format!(
            "    {:>3}  {:<4}  {:>5}  {:>5}  {:<5}  {:<5}  {:#06x}",
            row.index,
            row.code,
            row.size,
            1u32 << row.alignment,
            row.basic,
            row.valid,
            row.bits
        );
        if row.valid {
            let _ = writeln!(out, "{}", line);
        } else {
            let _ = writeln!(out, "{}", line.dimmed());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_layout() {
        let layout = dbus_sig::parse_one(b"(yt)").unwrap();
        let report = TypeReport::from(&layout);
        assert_eq!(report.signature, "(yt)");
        assert_eq!(report.consumed, 4);
        assert!(report.fixed);
        assert_eq!(report.slots[0].size, 16);
        assert_eq!(report.slots[0].alignment, 3);
        assert_eq!(report.slots[3].code, ')');
        assert!(!report.slots[3].valid);
        assert_eq!(report.slots[3].bits, 0);
    }

    #[test]
    fn test_report_json_shape() {
        let layout = dbus_sig::parse_one(b"ai").unwrap();
        let json = serde_json::to_value(TypeReport::from(&layout)).unwrap();
        assert_eq!(json["signature"], "ai");
        assert_eq!(json["fixed"], false);
        assert_eq!(json["slots"][1]["size"], 4);
        assert_eq!(json["slots"][1]["code"], "i");
    }

    #[test]
    fn test_render_pretty_lists_every_slot() {
        colored::control::set_override(false);
        let layout = dbus_sig::parse_one(b"a{sv}").unwrap();
        let text = render_pretty(&TypeReport::from(&layout));
        assert!(text.starts_with(">>> a{sv} (5 bytes consumed, variable)"));
        assert_eq!(text.lines().count(), 2 + 5);
        assert!(text.contains("0x0000"));
    }
}
