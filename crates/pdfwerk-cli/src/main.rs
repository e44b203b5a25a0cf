// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfwerk — command-line front end for the document engine.
//
// Entry point. Initialises logging, loads the engine configuration, runs one
// operation, and writes the artifact under its suggested name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pdfwerk_core::human_errors::humanize_error;
use pdfwerk_core::naming::is_pdf_file_name;
use pdfwerk_core::types::{
    CompressionLevel, Rotation, RotationScope, SelectionDescriptor, TransformReport,
    TransformRequest,
};
use pdfwerk_core::{EngineConfig, PdfwerkError, Result};
use pdfwerk_document::Engine;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "pdfwerk",
    about = "Split, merge, compress, rotate, and convert PDF documents",
    version
)]
struct Cli {
    /// Directory the result is written to
    #[arg(short, long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// JSON engine configuration file
    #[arg(long, global = true, env = "PDFWERK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract selected pages into a ZIP of single-page PDFs
    Split {
        /// Input PDF file
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Merge PDFs into one, in the order given
    Merge {
        /// Input PDF files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Recompress a PDF's content streams
    Compress {
        /// Input PDF file
        input: PathBuf,

        /// low, medium, or high (configured default when omitted)
        #[arg(short, long)]
        level: Option<CompressionLevel>,
    },

    /// Rotate all, odd, or even pages
    Rotate {
        /// Input PDF file
        input: PathBuf,

        /// Clockwise angle, a multiple of 90
        #[arg(short, long, allow_negative_numbers = true)]
        angle: i64,

        /// all, odd, or even
        #[arg(short, long, default_value = "all")]
        scope: RotationScope,
    },

    /// Convert a PDF to a Word document with the configured converter
    ToWord {
        /// Input PDF file
        input: PathBuf,
    },
}

/// Exactly one way of choosing pages.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Inclusive range, e.g. 2-5
    #[arg(long, value_name = "A-B")]
    range: Option<String>,

    /// Page list, e.g. 1,3,5-7
    #[arg(long, value_name = "LIST")]
    pages: Option<String>,

    /// Every even-numbered page
    #[arg(long)]
    even: bool,

    /// Every odd-numbered page
    #[arg(long)]
    odd: bool,
}

impl SelectionArgs {
    fn descriptor(&self) -> Result<SelectionDescriptor> {
        if let Some(range) = &self.range {
            SelectionDescriptor::from_mode("range", Some(range))
        } else if let Some(pages) = &self.pages {
            SelectionDescriptor::from_mode("specific", Some(pages))
        } else if self.even {
            SelectionDescriptor::from_mode("even", None)
        } else {
            SelectionDescriptor::from_mode("odd", None)
        }
    }
}

impl Commands {
    /// The request to run and the files it reads, in order.
    fn into_request(self) -> Result<(TransformRequest, Vec<PathBuf>)> {
        let plan = match self {
            Self::Split { input, selection } => (
                TransformRequest::Split {
                    selection: selection.descriptor()?,
                },
                vec![input],
            ),
            Self::Merge { inputs } => (TransformRequest::Merge, inputs),
            Self::Compress { input, level } => (TransformRequest::Compress { level }, vec![input]),
            Self::Rotate {
                input,
                angle,
                scope,
            } => (
                TransformRequest::Rotate {
                    angle: Rotation::from_degrees(angle)?,
                    scope,
                },
                vec![input],
            ),
            Self::ToWord { input } => (TransformRequest::ConvertToWord, vec![input]),
        };
        Ok(plan)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!(
                "{} ({} pages, {} bytes, sha256 {})",
                output.destination.display(),
                output.report.pages_processed,
                output.bytes,
                output.sha256
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            debug!(kind = %err.kind(), %err, "request failed");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// What `run` wrote, for the summary line.
#[derive(Debug)]
struct Written {
    destination: PathBuf,
    bytes: usize,
    sha256: String,
    report: TransformReport,
}

fn run(cli: Cli) -> Result<Written> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load_or_default(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config);

    let (request, paths) = cli.command.into_request()?;
    for path in non_pdf_names(&paths) {
        warn!(input = %path.display(), "input does not have a .pdf extension");
    }

    // A merge skips files it cannot read, like any other unusable input.
    let mut unreadable = BTreeMap::new();
    let inputs: Vec<Vec<u8>> = if matches!(request, TransformRequest::Merge) {
        paths
            .iter()
            .enumerate()
            .map(|(position, path)| {
                read_input(path).unwrap_or_else(|err| {
                    unreadable.insert(position, err.to_string());
                    Vec::new()
                })
            })
            .collect()
    } else {
        paths
            .iter()
            .map(|path| read_input(path))
            .collect::<Result<Vec<_>>>()?
    };

    let mut output = engine.execute(&request, &inputs)?;
    for skipped in &mut output.report.skipped_inputs {
        if let Some(reason) = unreadable.remove(&skipped.position) {
            skipped.reason = reason;
        }
    }

    std::fs::create_dir_all(&cli.output_dir)?;
    let destination = cli.output_dir.join(&output.artifact.file_name);
    std::fs::write(&destination, &output.artifact.bytes)?;

    for skipped in &output.report.skipped_inputs {
        let path = paths.get(skipped.position).map(|p| p.display().to_string());
        warn!(input = path.as_deref().unwrap_or("?"), reason = %skipped.reason, "input skipped");
    }
    if output.report.cleanup_failures > 0 {
        warn!(count = output.report.cleanup_failures, "temporary files left behind");
    }

    Ok(Written {
        destination,
        bytes: output.artifact.len(),
        sha256: output.artifact.sha256,
        report: output.report,
    })
}

fn non_pdf_names(paths: &[PathBuf]) -> impl Iterator<Item = &PathBuf> {
    paths
        .iter()
        .filter(|path| !is_pdf_file_name(&path.to_string_lossy()))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|err| PdfwerkError::Io(format!("failed to read {}: {err}", path.display())))
}

/// 2 when the caller can fix the request, 1 for environmental failures.
fn exit_code(err: &PdfwerkError) -> u8 {
    if err.kind().is_caller_error() { 2 } else { 1 }
}
