mod render;

use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use fmtconv_core::{CapacityPolicy, ConvertConfig, Diagnostic, convert, convert_fixed_with, lint};
use fmtconv_diagnostics as diag;

use crate::render::{Format, print_summary, render_diagnostics_pretty};

/// Name shown for the format string in annotated diagnostics.
const SOURCE_NAME: &str = "<format>";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "fmtconv",
    version,
    about = "Convert printf format strings into brace-template format strings"
)]
struct Cli {
    /// Output mode: "pretty" prints the converted string and renders
    /// diagnostics on stderr; "json" prints a single JSON object on stdout.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Explain a diagnostic ID (e.g. FMT1001) instead of converting.
    #[arg(long, value_name = "ID", conflicts_with_all = ["source_format", "format_string"])]
    explain: Option<String>,

    /// Source format name. Only `c` is supported.
    #[arg(required_unless_present = "explain")]
    source_format: Option<String>,

    /// The format string to convert.
    #[arg(required_unless_present = "explain", allow_hyphen_values = true)]
    format_string: Option<String>,

    /// Convert into a buffer whose capacity is fixed before writing.
    #[arg(long)]
    fixed: bool,

    /// Capacity in bytes for --fixed. Sized by --sizing when omitted.
    #[arg(long, value_name = "BYTES", requires = "fixed")]
    capacity: Option<usize>,

    /// How --fixed sizes its buffer when no --capacity is given.
    #[arg(long, value_enum, requires = "fixed")]
    sizing: Option<Sizing>,
}

/// Capacity estimation policy for `--fixed`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Sizing {
    /// Dry run with a counting sink (exact).
    #[default]
    Exact,
    /// Twice the source length (provable upper bound).
    Bound,
    /// 255 bytes below 64 input bytes, else three times the length.
    Legacy,
}

impl From<Sizing> for CapacityPolicy {
    fn from(s: Sizing) -> Self {
        match s {
            Sizing::Exact => CapacityPolicy::Exact,
            Sizing::Bound => CapacityPolicy::ExpansionBound,
            Sizing::Legacy => CapacityPolicy::Legacy,
        }
    }
}

/// Which output discipline a conversion uses.
#[derive(Debug, Clone)]
enum Mode {
    Growable,
    Fixed {
        capacity: Option<usize>,
        config: ConvertConfig,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "ok": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{out:#}");
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn run(cli: Cli, format: Format) -> Result<()> {
    if let Some(id) = cli.explain {
        return cmd_explain(&id, format);
    }

    let (Some(name), Some(source)) = (cli.source_format, cli.format_string) else {
        bail!("expected a source format name and a format string");
    };
    check_source_format(&name)?;

    let mode = if cli.fixed {
        Mode::Fixed {
            capacity: cli.capacity,
            config: ConvertConfig {
                capacity: cli.sizing.unwrap_or_default().into(),
            },
        }
    } else {
        Mode::Growable
    };
    cmd_convert(&source, &mode, format)
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_convert(source: &str, mode: &Mode, format: Format) -> Result<()> {
    let result = match mode {
        Mode::Growable => convert(source),
        Mode::Fixed { capacity, config } => {
            convert_fixed_with(source, *capacity, config).map(|buf| buf.into_string())
        }
    };

    let converted = match result {
        Ok(converted) => converted,
        Err(err) => {
            let diagnostics = [Diagnostic::from(&err)];
            match format {
                Format::Json => {
                    let out = serde_json::json!({
                        "ok": false,
                        "diagnostics": diagnostics,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => {
                    render_diagnostics_pretty(source, SOURCE_NAME, &diagnostics);
                }
            }
            process::exit(1);
        }
    };

    let notes = lint(source).context("lint failed on a convertible source")?;
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "output": converted,
                "notes": notes,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Converted text to stdout, notes to stderr.
            println!("{converted}");
            render_diagnostics_pretty(source, SOURCE_NAME, &notes);
            print_summary(&notes);
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output; write to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Accept the source format names this tool converts from.
///
/// `zig` is the destination grammar, so it is recognized but cannot be a
/// conversion source.
fn check_source_format(name: &str) -> Result<()> {
    match name {
        "c" | "C" => Ok(()),
        "zig" | "Zig" | "ZIG" => bail!("source format '{name}' is not supported for conversion"),
        _ => bail!("unrecognized source format '{name}' (expected 'c')"),
    }
}
