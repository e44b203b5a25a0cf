// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page writer — assemble a new PDF from pages copied out of open handles.
//
// Source handles are never modified. Each appended page is a deep copy of the
// page dictionary and everything it references, so one source page can land
// in any number of destinations.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdfwerk_core::error::{PdfwerkError, Result};
use pdfwerk_core::types::Rotation;
use tracing::{debug, instrument, warn};

use super::handle::{INHERITABLE_KEYS, PageRef, inherited_attribute};

/// Builds one output document page by page.
pub struct PageWriter {
    document: Document,
    /// Reserved id of the root `/Pages` node, written out in [`finish`](Self::finish).
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    /// Per source handle: source object id -> copied object id.
    copied: HashMap<u64, BTreeMap<ObjectId, ObjectId>>,
    compress: bool,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
            copied: HashMap::new(),
            compress: false,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Flate-compress streams and drop unreachable objects when finishing.
    pub fn compress_streams(&mut self) {
        self.compress = true;
    }

    /// Append a copy of `page`, unchanged.
    pub fn append_page(&mut self, page: PageRef<'_>) -> Result<()> {
        self.append(page, None)
    }

    /// Append a copy of `page` with `rotation` added to its effective `/Rotate`.
    pub fn append_rotated(&mut self, page: PageRef<'_>, rotation: Rotation) -> Result<()> {
        self.append(page, Some(rotation))
    }

    fn append(&mut self, page: PageRef<'_>, rotation: Option<Rotation>) -> Result<()> {
        let source = page.handle().document();
        let page_id = page.object_id();
        let page_dict = source.get_dictionary(page_id).map_err(|err| {
            PdfwerkError::Malformed(format!("page {} is unreadable: {err}", page.number()))
        })?;

        let mut memo = self.copied.remove(&page.handle().key()).unwrap_or_default();

        // Back-references to this page (annotation /P, link targets) resolve
        // to the copy.
        let new_page_id = match memo.get(&page_id) {
            Some(id) => *id,
            None => {
                let id = self.document.new_object_id();
                memo.insert(page_id, id);
                id
            }
        };

        let mut new_dict = Dictionary::new();
        for (key, value) in page_dict.iter() {
            if key == b"Parent" {
                continue;
            }
            new_dict.set(key.clone(), self.copy_object(source, &mut memo, value));
        }

        // Materialise attributes the page only had through its ancestors.
        for key in INHERITABLE_KEYS {
            if new_dict.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page_id, key) {
                new_dict.set(key.to_vec(), self.copy_object(source, &mut memo, value));
            }
        }

        if let Some(rotation) = rotation {
            let effective = rotation.applied_to(page.rotation());
            new_dict.set("Rotate", Object::Integer(effective));
        }

        new_dict.set("Type", Object::Name(b"Page".to_vec()));
        new_dict.set("Parent", Object::Reference(self.pages_id));

        self.document
            .objects
            .insert(new_page_id, Object::Dictionary(new_dict));
        self.kids.push(new_page_id);
        self.copied.insert(page.handle().key(), memo);

        debug!(
            source_page = page.number(),
            output_page = self.kids.len(),
            "page copied"
        );
        Ok(())
    }

    fn copy_object(
        &mut self,
        source: &Document,
        memo: &mut BTreeMap<ObjectId, ObjectId>,
        object: &Object,
    ) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(source, memo, *id),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(source, memo, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(source, memo, dict)),
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(source, memo, &stream.dict);
                let mut copy = Stream::new(dict, stream.content.clone());
                copy.allows_compression = stream.allows_compression;
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(
        &mut self,
        source: &Document,
        memo: &mut BTreeMap<ObjectId, ObjectId>,
        dict: &Dictionary,
    ) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy_object(source, memo, value));
        }
        copy
    }

    fn copy_reference(
        &mut self,
        source: &Document,
        memo: &mut BTreeMap<ObjectId, ObjectId>,
        id: ObjectId,
    ) -> Object {
        if let Some(copied) = memo.get(&id) {
            return Object::Reference(*copied);
        }

        let referenced = match source.get_object(id) {
            Ok(object) => object,
            Err(err) => {
                warn!(?id, %err, "cannot resolve reference, using null");
                return Object::Null;
            }
        };

        // Never follow links into other pages or the page tree: that would
        // drag unselected pages into the output.
        if is_page_tree_node(referenced) {
            return Object::Null;
        }

        // Reserve the id before recursing so cycles terminate.
        let new_id = self.document.new_object_id();
        memo.insert(id, new_id);
        let copy = self.copy_object(source, memo, referenced);
        self.document.objects.insert(new_id, copy);
        Object::Reference(new_id)
    }

    /// Write the page tree and catalog, then serialise.
    #[instrument(skip(self), fields(pages = self.kids.len(), compress = self.compress))]
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let kids: Vec<Object> = self.kids.iter().map(|id| Object::Reference(*id)).collect();
        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(self.kids.len() as i64)),
            ("Kids", Object::Array(kids)),
        ]);
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]);
        let catalog_id = self.document.add_object(catalog);
        self.document.trailer.set("Root", Object::Reference(catalog_id));

        if self.compress {
            self.document.prune_objects();
            self.document.compress();
        }

        let mut output = Vec::new();
        self.document
            .save_to(&mut output)
            .map_err(|err| PdfwerkError::Io(format!("failed to serialise PDF: {err}")))?;

        debug!(output_bytes = output.len(), "document written");
        Ok(output)
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        _ => return false,
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page") | Ok(b"Pages")
    )
}
