// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine — the boundary every collaborator calls.
//
// Each call is request-local: inputs are validated and opened, the selection
// is resolved against the real page count, the transform runs, and the result
// is packaged with a suggested name. Every failure leaves as a classified
// `PdfwerkError`.

use chrono::{Local, NaiveDateTime};
use pdfwerk_core::config::EngineConfig;
use pdfwerk_core::error::{PdfwerkError, Result};
use pdfwerk_core::types::{
    Artifact, CompressionLevel, Operation, Rotation, RotationScope, SelectionDescriptor, TransformOutput,
    TransformReport, TransformRequest,
};
use tracing::{info, instrument};

use crate::convert::{ExternalCommandConverter, WordConverter};
use crate::package::{package_archive, package_single};
use crate::pdf::DocumentHandle;
use crate::selection::PageSelection;
use crate::transform;

pub struct Engine {
    config: EngineConfig,
    converter: Box<dyn WordConverter>,
}

impl Engine {
    /// An engine whose word converter is the configured external command.
    pub fn new(config: EngineConfig) -> Self {
        let converter =
            ExternalCommandConverter::new(config.word_converter.clone(), config.staging_dir.clone());
        Self {
            config,
            converter: Box::new(converter),
        }
    }

    /// Replace the word converter.
    pub fn with_converter(mut self, converter: impl WordConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatch a described request over its input documents.
    ///
    /// Merge takes every input in order; all other operations need exactly one.
    pub fn execute(&self, request: &TransformRequest, inputs: &[Vec<u8>]) -> Result<TransformOutput> {
        match request {
            TransformRequest::Split { selection } => self.split(single(request, inputs)?, selection),
            TransformRequest::Merge => self.merge(inputs),
            TransformRequest::Compress { level } => self.compress(single(request, inputs)?, *level),
            TransformRequest::Rotate { angle, scope } => {
                self.rotate(single(request, inputs)?, *angle, *scope)
            }
            TransformRequest::ConvertToWord => self.convert_to_word(single(request, inputs)?),
        }
    }

    /// Split the selected pages into a `page_N.pdf` archive.
    #[instrument(skip(self, input), fields(input_bytes = input.len()))]
    pub fn split(&self, input: &[u8], selection: &SelectionDescriptor) -> Result<TransformOutput> {
        let handle = self.open(input)?;
        let selection = PageSelection::resolve(selection, handle.page_count())?;
        let pages = transform::split(&handle, &selection)?;
        let packaged = package_archive(&pages, &self.config, now())?;

        let report = TransformReport {
            cleanup_failures: packaged.cleanup_failures,
            ..TransformReport::with_pages(pages.len())
        };
        Ok(finished(Operation::Split, packaged.artifact, report))
    }

    /// Merge all inputs in order, skipping any that fail to open.
    #[instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn merge<B: AsRef<[u8]>>(&self, inputs: &[B]) -> Result<TransformOutput> {
        if inputs.is_empty() {
            return Err(PdfwerkError::InvalidInput("no files to merge".into()));
        }
        if inputs.len() > self.config.max_merge_inputs {
            return Err(PdfwerkError::InvalidInput(format!(
                "too many files to merge: {} (limit {})",
                inputs.len(),
                self.config.max_merge_inputs
            )));
        }
        for input in inputs {
            self.check_size(input.as_ref())?;
        }

        let outcome = transform::merge_sources(inputs)?;
        let report = TransformReport {
            pages_processed: outcome.page_count,
            skipped_inputs: outcome.skipped_inputs,
            skipped_pages: outcome.skipped_pages,
            cleanup_failures: 0,
        };
        let artifact = package_single(Operation::Merge, outcome.bytes, now());
        Ok(finished(Operation::Merge, artifact, report))
    }

    /// Recompress a document. `None` uses the configured default level.
    #[instrument(skip(self, input), fields(input_bytes = input.len()))]
    pub fn compress(&self, input: &[u8], level: Option<CompressionLevel>) -> Result<TransformOutput> {
        let handle = self.open(input)?;
        let level = level.unwrap_or(self.config.default_compression);
        let bytes = transform::compress(&handle, level)?;
        let artifact = package_single(Operation::Compress, bytes, now());
        Ok(finished(
            Operation::Compress,
            artifact,
            TransformReport::with_pages(handle.page_count()),
        ))
    }

    #[instrument(skip(self, input), fields(input_bytes = input.len()))]
    pub fn rotate(
        &self,
        input: &[u8],
        rotation: Rotation,
        scope: RotationScope,
    ) -> Result<TransformOutput> {
        let handle = self.open(input)?;
        let bytes = transform::rotate(&handle, rotation, scope)?;
        let artifact = package_single(Operation::Rotate, bytes, now());
        Ok(finished(
            Operation::Rotate,
            artifact,
            TransformReport::with_pages(handle.page_count()),
        ))
    }

    /// Validate the PDF, then hand it to the word converter.
    #[instrument(skip(self, input), fields(input_bytes = input.len(), converter = self.converter.name()))]
    pub fn convert_to_word(&self, input: &[u8]) -> Result<TransformOutput> {
        let handle = self.open(input)?;
        let docx = self.converter.convert(input)?;
        let artifact = package_single(Operation::ConvertToWord, docx, now());
        Ok(finished(
            Operation::ConvertToWord,
            artifact,
            TransformReport::with_pages(handle.page_count()),
        ))
    }

    fn check_size(&self, input: &[u8]) -> Result<()> {
        if input.len() as u64 > self.config.max_input_bytes {
            return Err(PdfwerkError::InvalidInput(format!(
                "input of {} bytes exceeds the {} byte limit",
                input.len(),
                self.config.max_input_bytes
            )));
        }
        Ok(())
    }

    fn open(&self, input: &[u8]) -> Result<DocumentHandle> {
        self.check_size(input)?;
        DocumentHandle::open(input)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("converter", &self.converter.name())
            .finish()
    }
}

fn single<'a>(request: &TransformRequest, inputs: &'a [Vec<u8>]) -> Result<&'a [u8]> {
    match inputs {
        [input] => Ok(input.as_slice()),
        _ => Err(PdfwerkError::InvalidInput(format!(
            "{} takes exactly one document, got {}",
            request.operation(),
            inputs.len()
        ))),
    }
}

fn finished(operation: Operation, artifact: Artifact, report: TransformReport) -> TransformOutput {
    info!(
        %operation,
        file_name = %artifact.file_name,
        bytes = artifact.len(),
        pages = report.pages_processed,
        lossless = report.is_lossless(),
        "Operation complete"
    );
    TransformOutput { artifact, report }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
