// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process fixture PDFs for unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::pdf::DocumentHandle;

/// An `n`-page document; page `i` draws the text "Page i" with a shared font.
pub fn sample_pdf(n: usize) -> Vec<u8> {
    build(n, None)
}

/// Like [`sample_pdf`], but `/Rotate` is set on the `/Pages` node only.
pub fn sample_pdf_with_inherited_rotation(n: usize, rotate: i64) -> Vec<u8> {
    build(n, Some(rotate))
}

fn build(n: usize, inherited_rotate: Option<i64>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let kids: Vec<ObjectId> = (1..=n)
        .map(|number| add_page(&mut doc, pages_id, font_id, number))
        .collect();

    let mut pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(n as i64)),
        (
            "Kids",
            Object::Array(kids.into_iter().map(Object::Reference).collect()),
        ),
    ]);
    if let Some(rotate) = inherited_rotate {
        pages.set("Rotate", Object::Integer(rotate));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn add_page(doc: &mut Document, pages_id: ObjectId, font_id: ObjectId, number: usize) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    format!("Page {number}").into_bytes(),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
    let resources = Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]);

    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]))
}

/// The "Page N" label drawn on page `index` of `handle`.
pub fn page_label(handle: &DocumentHandle, index: usize) -> String {
    let document = handle.document();
    let page_id = handle.page(index).unwrap().object_id();
    let content = document.get_page_content(page_id).unwrap();
    let decoded = Content::decode(&content).unwrap();
    decoded
        .operations
        .iter()
        .find(|op| op.operator == "Tj")
        .and_then(|op| op.operands.first())
        .and_then(|operand| operand.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap()
}

/// Rotation of every page, in order.
pub fn rotations(bytes: &[u8]) -> Vec<i64> {
    let handle = DocumentHandle::open(bytes).unwrap();
    handle.pages().map(|page| page.rotation()).collect()
}
