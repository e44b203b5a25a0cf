// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Merge — concatenate every page of several documents, in caller order.
//
// Merging is lossy on purpose: an input that cannot be opened, or a page that
// cannot be copied, is left out rather than failing the whole merge. Every
// omission is reported in the outcome.

use pdfwerk_core::error::{PdfwerkError, Result};
use pdfwerk_core::types::SkippedInput;
use tracing::{info, instrument, warn};

use crate::pdf::{DocumentHandle, PageWriter};

/// A merged document plus what was dropped on the way.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub skipped_inputs: Vec<SkippedInput>,
    pub skipped_pages: usize,
}

/// Open each source in order and merge the ones that open.
#[instrument(skip_all)]
pub fn merge_sources<I, B>(sources: I) -> Result<MergeOutcome>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut handles = Vec::new();
    let mut skipped_inputs = Vec::new();

    for (position, source) in sources.into_iter().enumerate() {
        match DocumentHandle::open(source.as_ref()) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                warn!(position, %err, "skipping unreadable merge input");
                skipped_inputs.push(SkippedInput {
                    position,
                    reason: err.to_string(),
                });
            }
        }
    }

    let mut outcome = merge_handles(&handles)?;
    outcome.skipped_inputs = skipped_inputs;
    Ok(outcome)
}

/// Append every page of every handle, preserving both orders.
///
/// Fails with `NoValidPages` only when nothing at all was collected.
#[instrument(skip_all, fields(inputs = handles.len()))]
pub fn merge_handles(handles: &[DocumentHandle]) -> Result<MergeOutcome> {
    info!("Merging PDFs");

    let mut writer = PageWriter::new();
    let mut skipped_pages = 0;

    for (position, handle) in handles.iter().enumerate() {
        for page in handle.pages() {
            if let Err(err) = writer.append_page(page) {
                warn!(position, page = page.number(), %err, "skipping page that could not be copied");
                skipped_pages += 1;
            }
        }
    }

    let page_count = writer.page_count();
    if page_count == 0 {
        return Err(PdfwerkError::NoValidPages);
    }

    let bytes = writer.finish()?;
    info!(page_count, skipped_pages, "Merge complete");

    Ok(MergeOutcome {
        bytes,
        page_count,
        skipped_inputs: Vec::new(),
        skipped_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page_label, sample_pdf};

    #[test]
    fn merge_preserves_document_and_page_order() {
        let outcome = merge_sources([sample_pdf(2), sample_pdf(3)]).unwrap();
        assert_eq!(outcome.page_count, 5);
        assert!(outcome.skipped_inputs.is_empty());

        let merged = DocumentHandle::open(&outcome.bytes).unwrap();
        let labels: Vec<String> = (0..5).map(|i| page_label(&merged, i)).collect();
        assert_eq!(labels, ["Page 1", "Page 2", "Page 1", "Page 2", "Page 3"]);
    }

    #[test]
    fn unreadable_inputs_are_skipped_and_reported() {
        let inputs: Vec<Vec<u8>> = vec![sample_pdf(1), b"garbage".to_vec(), sample_pdf(2)];
        let outcome = merge_sources(&inputs).unwrap();

        assert_eq!(outcome.page_count, 3);
        assert_eq!(outcome.skipped_inputs.len(), 1);
        assert_eq!(outcome.skipped_inputs[0].position, 1);
    }

    #[test]
    fn nothing_usable_is_no_valid_pages() {
        let err = merge_sources([b"".to_vec(), b"nope".to_vec()]).unwrap_err();
        assert!(matches!(err, PdfwerkError::NoValidPages));

        let err = merge_handles(&[]).unwrap_err();
        assert!(matches!(err, PdfwerkError::NoValidPages));
    }

    #[test]
    fn same_source_can_be_merged_twice() {
        let bytes = sample_pdf(2);
        let outcome = merge_sources([&bytes, &bytes]).unwrap();
        assert_eq!(outcome.page_count, 4);

        let merged = DocumentHandle::open(&outcome.bytes).unwrap();
        let labels: Vec<String> = (0..4).map(|i| page_label(&merged, i)).collect();
        assert_eq!(labels, ["Page 1", "Page 2", "Page 1", "Page 2"]);
    }
}
