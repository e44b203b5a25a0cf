// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — opening documents and writing new ones from copied pages.

pub mod handle;
pub mod writer;

pub use handle::{DocumentHandle, PageRef};
pub use writer::PageWriter;
