// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word conversion seam.
//
// Converting PDF to a word-processing document is delegated to an external
// collaborator: PDF bytes in, document bytes out, or a failure. The engine
// only validates the input PDF and classifies the outcome.

use std::path::PathBuf;
use std::process::Command;

use pdfwerk_core::config::WordConverterConfig;
use pdfwerk_core::error::{PdfwerkError, Result};
use tracing::{debug, info, instrument};

use crate::package::staging_dir;

/// Anything that can turn PDF bytes into DOCX bytes.
pub trait WordConverter: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    fn convert(&self, pdf: &[u8]) -> Result<Vec<u8>>;
}

/// Runs a configured command-line converter in a scratch directory.
///
/// The converter reads `input.pdf` and must write a non-empty `output.docx`;
/// `{input}` and `{output}` in the argument list are replaced with those paths.
#[derive(Debug, Clone)]
pub struct ExternalCommandConverter {
    config: WordConverterConfig,
    staging_dir: Option<PathBuf>,
}

impl ExternalCommandConverter {
    pub fn new(config: WordConverterConfig, staging_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            staging_dir,
        }
    }
}

impl WordConverter for ExternalCommandConverter {
    fn name(&self) -> &str {
        self.config
            .program
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("external")
    }

    #[instrument(skip_all, fields(converter = self.name(), input_bytes = pdf.len()))]
    fn convert(&self, pdf: &[u8]) -> Result<Vec<u8>> {
        let scratch = staging_dir(self.staging_dir.as_deref())?;
        let input = scratch.path().join("input.pdf");
        let output = scratch.path().join("output.docx");
        std::fs::write(&input, pdf)?;

        let args: Vec<String> = self
            .config
            .args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input.to_string_lossy())
                    .replace("{output}", &output.to_string_lossy())
            })
            .collect();
        debug!(program = %self.config.program.display(), ?args, "launching converter");

        let result = Command::new(&self.config.program)
            .args(&args)
            .current_dir(scratch.path())
            .output()
            .map_err(|err| {
                PdfwerkError::Io(format!(
                    "failed to launch {}: {err}",
                    self.config.program.display()
                ))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(PdfwerkError::Io(format!(
                "{} exited with {}: {}",
                self.name(),
                result.status,
                stderr.trim()
            )));
        }

        let docx = match std::fs::read(&output) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            _ => {
                let stderr = String::from_utf8_lossy(&result.stderr);
                return Err(PdfwerkError::Io(format!(
                    "{} produced no output: {}",
                    self.name(),
                    stderr.trim()
                )));
            }
        };

        info!(output_bytes = docx.len(), "Conversion complete");
        Ok(docx)
    }
}
