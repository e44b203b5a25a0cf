// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfwerk-document — PDF page selection, transformation, and packaging.
//
// Transforms: split, merge, compress, rotate, plus conversion to Word through
// an external converter. `Engine` is the single entry point collaborators use.

pub mod convert;
pub mod engine;
pub mod package;
pub mod pdf;
pub mod selection;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use convert::{ExternalCommandConverter, WordConverter};
pub use engine::Engine;
pub use pdf::{DocumentHandle, PageRef, PageWriter};
pub use selection::PageSelection;
