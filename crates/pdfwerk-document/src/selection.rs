// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page selector — resolve a user's page expression into validated, ascending,
// de-duplicated zero-based page indices.

use std::collections::BTreeSet;

use pdfwerk_core::error::{PdfwerkError, Result};
use pdfwerk_core::types::{Parity, SelectionDescriptor};
use tracing::{debug, instrument};

/// Zero-based page indices, unique, ascending, all below the page count they
/// were resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    indices: Vec<usize>,
}

impl PageSelection {
    /// Inclusive 1-based `start..=end`.
    ///
    /// Fails with `OutOfRange` if `start < 1`, `end > page_count`, or
    /// `start > end`.
    pub fn range(start: i64, end: i64, page_count: usize) -> Result<Self> {
        if start < 1 || end > page_count as i64 || start > end {
            return Err(PdfwerkError::OutOfRange {
                start,
                end,
                page_count,
            });
        }
        let indices = (start as usize - 1..end as usize).collect();
        Ok(Self { indices })
    }

    /// Comma-separated page numbers and `N-M` ranges, e.g. `5,1,3-4`.
    ///
    /// Pages outside `1..=page_count` are dropped, duplicates collapse, and the
    /// result is ascending regardless of token order. A reversed range such as
    /// `7-3` contributes nothing. A token that is neither an integer nor
    /// `integer-integer` fails the whole expression with `InvalidInput`; an
    /// expression that leaves no pages fails with `NoValidPages`.
    #[instrument(level = "debug")]
    pub fn explicit(text: &str, page_count: usize) -> Result<Self> {
        let mut pages = BTreeSet::new();

        for token in text.split(',') {
            let token = token.trim();
            if token.contains('-') {
                let mut bounds = token.split('-');
                let (start, end) = match (bounds.next(), bounds.next(), bounds.next()) {
                    (Some(start), Some(end), None) => {
                        (parse_token(start, token)?, parse_token(end, token)?)
                    }
                    _ => return Err(invalid_token(token)),
                };
                // Clamp so a huge range costs no more than the document.
                let first = start.max(1);
                let last = end.min(page_count as u64);
                pages.extend(first..=last);
            } else {
                let page = parse_token(token, token)?;
                if (1..=page_count as u64).contains(&page) {
                    pages.insert(page);
                }
            }
        }

        if pages.is_empty() {
            return Err(PdfwerkError::NoValidPages);
        }

        let indices: Vec<usize> = pages.into_iter().map(|page| page as usize - 1).collect();
        debug!(selected = indices.len(), "explicit selection resolved");
        Ok(Self { indices })
    }

    /// Every page whose 1-based position has the given parity.
    pub fn parity(page_count: usize, parity: Parity) -> Self {
        let indices = (0..page_count)
            .filter(|index| parity.matches(index + 1))
            .collect();
        Self { indices }
    }

    /// Resolve a descriptor against a document of `page_count` pages.
    ///
    /// Whatever the descriptor, an empty outcome is `NoValidPages`.
    pub fn resolve(descriptor: &SelectionDescriptor, page_count: usize) -> Result<Self> {
        let selection = match descriptor {
            SelectionDescriptor::Range { start, end } => Self::range(*start, *end, page_count)?,
            SelectionDescriptor::Explicit { pages } => Self::explicit(pages, page_count)?,
            SelectionDescriptor::Parity { parity } => Self::parity(page_count, *parity),
        };
        if selection.is_empty() {
            return Err(PdfwerkError::NoValidPages);
        }
        Ok(selection)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// 1-based page numbers, as shown to users.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().map(|index| index + 1)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<'a> IntoIterator for &'a PageSelection {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

fn parse_token(text: &str, token: &str) -> Result<u64> {
    text.trim().parse::<u64>().map_err(|_| invalid_token(token))
}

fn invalid_token(token: &str) -> PdfwerkError {
    PdfwerkError::InvalidInput(format!(
        "invalid page format: token '{token}' is not a page number or range"
    ))
}
