// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output packager — turn transform results into named deliverables.
//
// Single documents pass straight through. Split pages are staged as files in a
// per-request scratch directory and streamed into a flat ZIP archive, one
// `page_N.pdf` entry per page in selection order. Staged files are removed as
// soon as their entry is written; a file that cannot be removed is counted,
// never fatal.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use pdfwerk_core::config::{ArchiveMethod, EngineConfig};
use pdfwerk_core::error::{PdfwerkError, Result};
use pdfwerk_core::naming::{archive_entry_name, suggested_name};
use pdfwerk_core::types::{Artifact, Operation, OutputFormat};
use tempfile::TempDir;
use tracing::{debug, info, instrument, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::transform::SplitPage;

/// A packaged archive plus the number of staged files left behind.
#[derive(Debug)]
pub struct PackagedArchive {
    pub artifact: Artifact,
    pub cleanup_failures: usize,
}

/// Wrap one finished document as the artifact of `operation`.
pub fn package_single(operation: Operation, bytes: Vec<u8>, at: NaiveDateTime) -> Artifact {
    let artifact = Artifact::new(suggested_name(operation, at), operation.output_format(), bytes);
    debug!(file_name = %artifact.file_name, bytes = artifact.len(), "single artifact packaged");
    artifact
}

/// Build the split archive: entry `page_N.pdf` for each page, in the given
/// order, with no directories.
///
/// Page numbers must be unique, since each names an entry; a repeat fails
/// with `InvalidInput` before anything is staged.
#[instrument(skip_all, fields(pages = pages.len()))]
pub fn package_archive(
    pages: &[SplitPage],
    config: &EngineConfig,
    at: NaiveDateTime,
) -> Result<PackagedArchive> {
    write_archive(pages, config, at, |_| {})
}

/// `package_archive`, calling `after_entry` with each staged file once its
/// entry has been written and before the file is removed.
fn write_archive(
    pages: &[SplitPage],
    config: &EngineConfig,
    at: NaiveDateTime,
    mut after_entry: impl FnMut(&Path),
) -> Result<PackagedArchive> {
    if pages.is_empty() {
        return Err(PdfwerkError::NoValidPages);
    }
    let mut seen = BTreeSet::new();
    if let Some(repeated) = pages.iter().find(|page| !seen.insert(page.page_number)) {
        return Err(PdfwerkError::InvalidInput(format!(
            "page {} appears more than once in the archive",
            repeated.page_number
        )));
    }

    let staging = staging_dir(config.staging_dir.as_deref())?;
    // Fixed entry timestamps keep archives byte-identical across runs.
    let options = SimpleFileOptions::default()
        .compression_method(match config.archive_method {
            ArchiveMethod::Deflated => CompressionMethod::Deflated,
            ArchiveMethod::Stored => CompressionMethod::Stored,
        })
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut cleanup_failures = 0;

    for page in pages {
        let entry_name = archive_entry_name(page.page_number);
        let staged = StagedPage::write(staging.path(), &entry_name, &page.bytes)?;

        zip.start_file(entry_name.as_str(), options)
            .map_err(|err| archive_error("create entry", err))?;
        let mut file = File::open(staged.path())?;
        io::copy(&mut file, &mut zip)?;
        drop(file);
        after_entry(staged.path());

        if let Err(err) = staged.remove() {
            warn!(entry = %entry_name, %err, "failed to remove staged page");
            cleanup_failures += 1;
        }
    }

    let bytes = zip
        .finish()
        .map_err(|err| archive_error("finalise archive", err))?
        .into_inner();

    if let Err(err) = staging.close() {
        warn!(%err, "failed to remove staging directory");
        cleanup_failures += 1;
    }

    let artifact = Artifact::new(
        suggested_name(Operation::Split, at),
        OutputFormat::Zip,
        bytes,
    );
    info!(
        file_name = %artifact.file_name,
        entries = pages.len(),
        bytes = artifact.len(),
        cleanup_failures,
        "Archive packaged"
    );

    Ok(PackagedArchive {
        artifact,
        cleanup_failures,
    })
}

/// Create a per-request scratch directory under `parent`, or under the
/// system temp directory when no parent is configured.
pub(crate) fn staging_dir(parent: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("pdfwerk-");
    let dir = match parent {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            builder.tempdir_in(parent)?
        }
        None => builder.tempdir()?,
    };
    Ok(dir)
}

fn archive_error(stage: &str, err: zip::result::ZipError) -> PdfwerkError {
    PdfwerkError::Io(format!("failed to {stage}: {err}"))
}

/// A page written to the staging directory.
///
/// Removed explicitly once archived; on early return (an error part-way
/// through the archive) it is removed on drop instead.
struct StagedPage {
    path: PathBuf,
    removed: bool,
}

impl StagedPage {
    fn write(dir: &Path, name: &str, bytes: &[u8]) -> Result<Self> {
        let path = dir.join(name);
        let mut file = File::create(&path)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        std::fs::remove_file(&self.path)
    }
}

impl Drop for StagedPage {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(err) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), %err, "failed to remove staged page");
            }
        }
    }
}
