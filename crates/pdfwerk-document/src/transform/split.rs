// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split — one single-page document per selected page.

use pdfwerk_core::error::Result;
use tracing::{debug, info, instrument};

use crate::pdf::{DocumentHandle, PageWriter};
use crate::selection::PageSelection;

/// A single-page document cut from a source page.
#[derive(Clone, PartialEq, Eq)]
pub struct SplitPage {
    /// 1-based number of the page in the source document.
    pub page_number: usize,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for SplitPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitPage")
            .field("page_number", &self.page_number)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Copy every selected page into its own document, in selection order.
///
/// Indices at or beyond the handle's page count are skipped; a selection
/// resolved against the same handle never contains any.
#[instrument(skip_all, fields(source_pages = handle.page_count(), selected = selection.len()))]
pub fn split(handle: &DocumentHandle, selection: &PageSelection) -> Result<Vec<SplitPage>> {
    info!("Splitting PDF");

    let mut pages = Vec::with_capacity(selection.len());
    for &index in selection {
        if index >= handle.page_count() {
            debug!(index, "selected index beyond document, skipping");
            continue;
        }
        let page = handle.page(index)?;
        let mut writer = PageWriter::new();
        writer.append_page(page)?;
        pages.push(SplitPage {
            page_number: page.number(),
            bytes: writer.finish()?,
        });
    }

    debug!(produced = pages.len(), "split complete");
    Ok(pages)
}
