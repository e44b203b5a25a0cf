// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document handle — an opened, read-only view over one input PDF.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use lopdf::{Document, Object, ObjectId};
use pdfwerk_core::error::{PdfwerkError, Result};
use tracing::{debug, instrument};

/// Distinguishes handles so a [`PageWriter`](super::PageWriter) can share
/// copied resources between pages of the same source.
static NEXT_HANDLE_KEY: AtomicU64 = AtomicU64::new(1);

/// Page attributes a page may inherit from its ancestors in the page tree.
pub(crate) const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// An opened PDF with at least one page.
///
/// There are no mutating operations: edits happen by copying pages into a
/// separate [`PageWriter`](super::PageWriter).
pub struct DocumentHandle {
    document: Document,
    /// Page object ids in page-tree order; index 0 is page 1.
    page_ids: Vec<ObjectId>,
    key: u64,
}

impl DocumentHandle {
    /// Parse `data` as a PDF.
    ///
    /// Fails with `Empty` for zero bytes and `Malformed` when the container
    /// cannot be parsed or holds no pages.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn open(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(PdfwerkError::Empty);
        }

        let document = Document::load_mem(data)
            .map_err(|err| PdfwerkError::Malformed(format!("failed to parse PDF: {err}")))?;

        // get_pages() is keyed by 1-based page number, so values come out in order.
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(PdfwerkError::Malformed("document has no pages".into()));
        }

        debug!(pages = page_ids.len(), "PDF opened");

        Ok(Self {
            document,
            page_ids,
            key: NEXT_HANDLE_KEY.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Read a PDF from the filesystem and open it.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref()).map_err(|err| {
            PdfwerkError::Io(format!("failed to read {}: {err}", path.as_ref().display()))
        })?;
        Self::open(&data)
    }

    /// Number of pages, fixed at open time. Always at least 1.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// The page at zero-based `index`.
    pub fn page(&self, index: usize) -> Result<PageRef<'_>> {
        let id = *self.page_ids.get(index).ok_or(PdfwerkError::OutOfRange {
            start: index as i64 + 1,
            end: index as i64 + 1,
            page_count: self.page_count(),
        })?;
        Ok(PageRef {
            handle: self,
            index,
            id,
        })
    }

    /// All pages in document order.
    pub fn pages(&self) -> impl Iterator<Item = PageRef<'_>> {
        self.page_ids
            .iter()
            .enumerate()
            .map(move |(index, &id)| PageRef {
                handle: self,
                index,
                id,
            })
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn key(&self) -> u64 {
        self.key
    }
}

impl std::fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("pages", &self.page_ids.len())
            .field("version", &self.document.version)
            .finish()
    }
}

/// A page inside a [`DocumentHandle`], valid for the handle's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct PageRef<'a> {
    handle: &'a DocumentHandle,
    index: usize,
    id: ObjectId,
}

impl<'a> PageRef<'a> {
    /// Zero-based position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based page number as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn handle(&self) -> &'a DocumentHandle {
        self.handle
    }

    pub(crate) fn object_id(&self) -> ObjectId {
        self.id
    }

    /// Effective `/Rotate`, following the page tree when the page itself
    /// does not set one.
    pub fn rotation(&self) -> i64 {
        inherited_attribute(self.handle.document(), self.id, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0)
    }
}

/// Look `key` up on the page, then on each `/Parent` in turn.
pub(crate) fn inherited_attribute<'d>(
    document: &'d Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'d Object> {
    let mut current = document.get_dictionary(page_id).ok()?;
    // Bounded walk: a malformed tree with a /Parent cycle must not hang.
    for _ in 0..64 {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = document.get_dictionary(parent).ok()?;
    }
    None
}
