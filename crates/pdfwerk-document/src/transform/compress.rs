// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compress — rewrite a document with flate-compressed streams and unreachable
// objects dropped.

use pdfwerk_core::error::Result;
use pdfwerk_core::types::CompressionLevel;
use tracing::{info, instrument};

use crate::pdf::{DocumentHandle, PageWriter};

/// Re-emit every page of `handle` through a compressing writer.
///
/// Page count and order are preserved. The output is not guaranteed to be
/// smaller than the input. `level` is accepted for forward compatibility;
/// all levels currently run the same lossless pass.
#[instrument(skip(handle), fields(pages = handle.page_count()))]
pub fn compress(handle: &DocumentHandle, level: CompressionLevel) -> Result<Vec<u8>> {
    info!("Compressing PDF");

    let mut writer = PageWriter::new();
    writer.compress_streams();
    for page in handle.pages() {
        writer.append_page(page)?;
    }
    let bytes = writer.finish()?;

    info!(output_bytes = bytes.len(), "Compression complete");
    Ok(bytes)
}
