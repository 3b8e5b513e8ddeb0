// crates/sv_cli/src/main.rs
//
// load → params overrides → (validate-only | calculate → canonical digest →
// optional result file → rendered report on stdout).
// Logs and the digest line go to stderr; stdout carries only the report.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use sv_core::variables::Params;
use sv_io::IoError;
use sv_pipeline::PipelineError;
use sv_report::ResultReport;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{Args, Render};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Malformed JSON, bad base data, bad params.
    Validation(String),
    /// Read/write failures and rendering output.
    Io(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    // clap prints usage and exits with 2 on bad flags.
    let args = Args::parse();
    init_logging(&args);

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("sitzverteilung: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

fn run(args: &Args) -> Result<(), MainError> {
    let file = sv_io::load_base_data(&args.input).map_err(map_io_err)?;
    let mut params = match &args.params {
        Some(path) => sv_io::load_params(path).map_err(map_io_err)?,
        None => Params::default(),
    };
    args.apply_overrides(&mut params);

    if args.validate_only {
        sv_pipeline::check_inputs(&file.data, &params).map_err(map_pipeline_err)?;
        info!(input = %args.input.display(), "inputs OK");
        if !args.quiet {
            eprintln!("validate-only: inputs OK");
        }
        return Ok(());
    }

    let result = sv_pipeline::calculate(&file.data, &params).map_err(map_pipeline_err)?;
    let digest = sv_io::sha256_canonical(&result).map_err(map_io_err)?;
    info!(methods = result.methods.len(), committee_size = result.committee_size, sha256 = %digest, "calculated");

    if let Some(out) = &args.out {
        sv_io::write_canonical_file(out, &result).map_err(map_io_err)?;
        info!(path = %out.display(), "wrote result");
    }

    let title = args.title.as_deref().or(file.name.as_deref());
    let report = sv_report::build_report(&result, title, params.proportion_decimals);
    let rendered = render(args.render, &report)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| MainError::Io(format!("stdout: {e}")))?;

    if !args.quiet {
        eprintln!("result sha256: {digest}");
    }
    Ok(())
}

fn render(kind: Render, report: &ResultReport) -> Result<String, MainError> {
    let render_err = |e: sv_report::ReportError| MainError::Io(e.to_string());
    match kind {
        Render::Table => Ok(sv_report::render_text(report)),
        Render::Json => sv_report::render_json(report).map(|s| s + "\n").map_err(render_err),
        #[cfg(feature = "report-html")]
        Render::Html => sv_report::render_html(report).map_err(render_err),
        #[cfg(not(feature = "report-html"))]
        Render::Html => Err(MainError::Validation("html rendering is not built into this binary".into())),
    }
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Read { .. } | IoError::Write { .. } => MainError::Io(e.to_string()),
        IoError::Json { .. } | IoError::Config(_) | IoError::Params(_) => MainError::Validation(e.to_string()),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    MainError::Validation(e.to_string())
}
