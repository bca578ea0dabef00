// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! dbus-sig-inspect - Show the wire layout of D-Bus type signatures
//!
//! # Usage
//!
//! ```bash
//! # Layout of the first complete type
//! dbus-sig-inspect 'a{sv}'
//!
//! # Every type of a method signature, as JSON
//! dbus-sig-inspect --all --format json 'sa{sv}as'
//!
//! # Reject dict-entries outside arrays, log the rejection reason
//! dbus-sig-inspect --strict -v '{is}'
//! ```

mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dbus_sig::{parse_one_with, ParseOptions, TypeLayout, Types};
use report::{render_pretty, TypeReport};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "dbus-sig-inspect")]
#[command(author = "naskel.com")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Show the fixed size and alignment computed for D-Bus type signatures")]
struct Cli {
    /// Signatures to inspect
    #[arg(required = true)]
    signatures: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: FormatArg,

    /// Split each signature into all of its top-level types
    #[arg(short, long)]
    all: bool,

    /// Only accept dict-entries as array elements
    #[arg(long)]
    strict: bool,

    /// Log parser decisions (debug level)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("dbus_sig=trace,dbus_sig_inspect=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = ParseOptions::new().strict_dict_entry(cli.strict);
    let mut reports = Vec::new();

    for signature in &cli.signatures {
        tracing::debug!(signature = %signature, all = cli.all, "inspecting");
        for layout in inspect(signature.as_bytes(), options, cli.all)
            .with_context(|| format!("Invalid D-Bus signature {:?}", signature))?
        {
            reports.push(TypeReport::from(&layout));
        }
    }

    match cli.format {
        FormatArg::Pretty => {
            for report in &reports {
                print!("{}", render_pretty(report));
            }
        }
        FormatArg::Json => {
            let json =
                serde_json::to_string_pretty(&reports).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Parse the first type of `signature`, or every type when `all` is set.
fn inspect(
    signature: &[u8],
    options: ParseOptions,
    all: bool,
) -> dbus_sig::Result<Vec<TypeLayout>> {
    if all {
        Types::new(signature, options).collect()
    } else {
        parse_one_with(signature, &options).map(|layout| vec![layout])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_first_type_only() {
        let layouts = inspect(b"(iy)s", ParseOptions::new(), false).unwrap();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].signature(), b"(iy)");
    }

    #[test]
    fn test_inspect_all_types() {
        let layouts = inspect(b"sa{sv}as", ParseOptions::new(), true).unwrap();
        let sigs: Vec<&[u8]> = layouts.iter().map(|l| l.signature()).collect();
        assert_eq!(sigs, [&b"s"[..], &b"a{sv}"[..], &b"as"[..]]);
    }

    #[test]
    fn test_inspect_strict_rejects_bare_dict_entry() {
        let strict = ParseOptions::new().strict_dict_entry(true);
        assert!(inspect(b"{is}", strict, false).is_err());
        assert!(inspect(b"{is}", ParseOptions::new(), false).is_ok());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["dbus-sig-inspect", "--all", "-f", "json", "--strict", "as"]);
        assert!(cli.all);
        assert!(cli.strict);
        assert!(matches!(cli.format, FormatArg::Json));
        assert_eq!(cli.signatures, vec!["as".to_string()]);
    }
}
