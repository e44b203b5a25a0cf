// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform operations — split, merge, compress, and rotate over open handles.
//
// Each operation reads its inputs through `DocumentHandle`s and writes fresh
// documents through `PageWriter`; inputs are never modified.

pub mod compress;
pub mod merge;
pub mod rotate;
pub mod split;

pub use compress::compress;
pub use merge::{MergeOutcome, merge_handles, merge_sources};
pub use rotate::rotate;
pub use split::{SplitPage, split};
