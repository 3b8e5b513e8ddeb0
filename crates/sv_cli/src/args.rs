// crates/sv_cli/src/args.rs
//
// Offline CLI argument surface.
// - --input is the only required file; --params is optional.
// - Flags override the params file field by field.
// - --validate-only loads and checks inputs without allocating.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sv_core::{
    method::Method,
    variables::{Params, MAX_DECIMALS},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Render {
    /// Plain-text table.
    Table,
    /// Report model as JSON.
    Json,
    /// Standalone HTML page.
    Html,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sitzverteilung",
    version,
    disable_help_subcommand = true,
    about = "Deterministic seat apportionment: D'Hondt, Hare/Niemeyer, Sainte-Laguë/Schepers"
)]
pub struct Args {
    /// Base data JSON (committeeSize, groups, unions).
    #[arg(long)]
    pub input: PathBuf,

    /// Params JSON (orderDecimals, proportionDecimals, methods).
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Also write the canonical result JSON to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = Render::Table)]
    pub render: Render,

    /// Report title (defaults to the base data's `name`).
    #[arg(long)]
    pub title: Option<String>,

    /// Decimals recorded for seat-order values.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_DECIMALS)))]
    pub order_decimals: Option<u8>,

    /// Decimals shown for proportions.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_DECIMALS)))]
    pub proportion_decimals: Option<u8>,

    /// Method to run; repeat for several (dhondt, hare, sls or wire tokens).
    #[arg(long = "method", value_parser = parse_method)]
    pub methods: Vec<Method>,

    /// Load and check inputs only; no allocation, no output.
    #[arg(long)]
    pub validate_only: bool,

    /// Debug logging on stderr (RUST_LOG still wins when set).
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only on stderr; skip the digest line.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Flags take precedence over the params file.
    pub fn apply_overrides(&self, params: &mut Params) {
        if let Some(d) = self.order_decimals {
            params.order_decimals = d;
        }
        if let Some(d) = self.proportion_decimals {
            params.proportion_decimals = d;
        }
        if !self.methods.is_empty() {
            params.methods = self.methods.clone();
        }
    }

    /// Default filter directive when RUST_LOG is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

fn parse_method(s: &str) -> Result<Method, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("sitzverteilung").chain(argv.iter().copied()))
    }

    #[test]
    fn input_is_required() {
        assert!(parse(&[]).is_err());
        let a = parse(&["--input", "base.json"]).unwrap();
        assert_eq!(a.render, Render::Table);
        assert!(a.methods.is_empty());
        assert_eq!(a.log_level(), "warn");
    }

    #[test]
    fn repeated_methods_are_collected() {
        let a = parse(&["--input", "b.json", "--method", "sls", "--method", "D_HONDT"]).unwrap();
        assert_eq!(a.methods, [Method::SainteLagueSchepers, Method::DHondt]);
        assert!(parse(&["--input", "b.json", "--method", "webster"]).is_err());
    }

    #[test]
    fn overrides_replace_params_fields() {
        let a = parse(&["--input", "b.json", "--order-decimals", "4", "--method", "hare"]).unwrap();
        let mut p = Params::default();
        a.apply_overrides(&mut p);
        assert_eq!(p.order_decimals, 4);
        assert_eq!(p.proportion_decimals, 3);
        assert_eq!(p.methods, [Method::HareNiemeyer]);
    }

    #[test]
    fn decimals_are_bounded() {
        assert!(parse(&["--input", "b.json", "--order-decimals", "10"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(parse(&["--input", "b.json", "-v", "-q"]).is_err());
        assert_eq!(parse(&["--input", "b.json", "-v"]).unwrap().log_level(), "debug");
    }
}
