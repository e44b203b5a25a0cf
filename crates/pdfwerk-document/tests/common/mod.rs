// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

/// `n` pages; page `i` draws "<tag> i". Distinct tags tell documents apart
/// after a merge.
pub fn tagged_pdf(tag: &str, n: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Courier".to_vec())),
    ]));

    let mut kids = Vec::new();
    for number in 1..=n {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(10)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("{tag} {number}").into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let font = Dictionary::from_iter(vec![("F1", Object::Reference(font_id))]);
        let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(font))]);
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(n as i64)),
        ("Kids", Object::Array(kids)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// The text drawn on each page, in page order.
pub fn labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .find(|op| op.operator == "Tj")
                .and_then(|op| op.operands.first())
                .and_then(|operand| operand.as_str().ok())
                .map(|text| String::from_utf8_lossy(text).into_owned())
                .unwrap()
        })
        .collect()
}

/// Effective `/Rotate` of each page, in page order.
pub fn rotations(bytes: &[u8]) -> Vec<i64> {
    let handle = pdfwerk_document::DocumentHandle::open(bytes).unwrap();
    handle.pages().map(|page| page.rotation()).collect()
}

/// `(name, bytes)` for each archive entry, in archive order.
pub fn archive_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|index| {
            let mut entry = archive.by_index(index).unwrap();
            let mut body = Vec::new();
            entry.read_to_end(&mut body).unwrap();
            (entry.name().to_string(), body)
        })
        .collect()
}
