// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whatever front end sits on the engine.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::PdfwerkError;

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether resubmitting the same request unchanged may succeed.
    pub retriable: bool,
}

/// Convert a `PdfwerkError` into a `HumanError`.
pub fn humanize_error(err: &PdfwerkError) -> HumanError {
    match err {
        PdfwerkError::Empty => HumanError {
            message: "File is empty.".into(),
            suggestion: "Choose a PDF that actually contains data, then try again.".into(),
            retriable: false,
        },

        PdfwerkError::Malformed(detail) => {
            if detail.contains("no pages") {
                HumanError {
                    message: "Invalid PDF: File has no pages.".into(),
                    suggestion: "Check the file opens in a PDF viewer, or try a different file."
                        .into(),
                    retriable: false,
                }
            } else {
                HumanError {
                    message: "Invalid PDF file.".into(),
                    suggestion: format!(
                        "The file may be damaged or may not be a PDF at all. ({detail})"
                    ),
                    retriable: false,
                }
            }
        }

        PdfwerkError::InvalidInput(detail) => humanize_invalid_input(detail),

        PdfwerkError::OutOfRange { page_count, .. } => HumanError {
            message: format!(
                "Invalid page range. Please enter pages between 1 and {page_count}."
            ),
            suggestion: "The first page must not come after the last page.".into(),
            retriable: false,
        },

        PdfwerkError::NoValidPages => HumanError {
            message: "No valid pages specified.".into(),
            suggestion: "Pick at least one page that exists in the document.".into(),
            retriable: false,
        },

        PdfwerkError::Io(detail) => HumanError {
            message: "Error processing PDF.".into(),
            suggestion: format!("Try again. If this keeps happening, please report it. ({detail})"),
            retriable: true,
        },
    }
}

/// Invalid-input details come from several validators; pick the most
/// specific wording for each.
fn humanize_invalid_input(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("page format") || lower.contains("page token") {
        HumanError {
            message: "Invalid page format.".into(),
            suggestion: "Use comma-separated numbers or ranges (e.g., 1,3,5-7).".into(),
            retriable: false,
        }
    } else if lower.contains("page number") || lower.contains("start-end") {
        HumanError {
            message: "Please enter valid page numbers.".into(),
            suggestion: "Give the range as two whole numbers, e.g. 2-5.".into(),
            retriable: false,
        }
    } else if lower.contains("split type") || lower.contains("selection mode") {
        HumanError {
            message: "Invalid split type.".into(),
            suggestion: "Choose one of: range, specific, even, odd.".into(),
            retriable: false,
        }
    } else if lower.contains("rotation") {
        HumanError {
            message: "Invalid rotation angle.".into(),
            suggestion: "Rotate by 90, 180, or 270 degrees.".into(),
            retriable: false,
        }
    } else if lower.contains("no files") {
        HumanError {
            message: "No files to merge.".into(),
            suggestion: "Add at least one PDF, then try again.".into(),
            retriable: false,
        }
    } else if lower.contains("too many files") {
        HumanError {
            message: "Too many files to merge.".into(),
            suggestion: format!("Merge fewer files at a time. ({detail})"),
            retriable: false,
        }
    } else if lower.contains("exceeds") {
        HumanError {
            message: "File is too large.".into(),
            suggestion: format!("Try a smaller file. ({detail})"),
            retriable: false,
        }
    } else {
        HumanError {
            message: "The request couldn't be understood.".into(),
            suggestion: format!("Check the options and try again. ({detail})"),
            retriable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_mentions_page_count() {
        let err = PdfwerkError::OutOfRange {
            start: 3,
            end: 12,
            page_count: 10,
        };
        let human = humanize_error(&err);
        assert_eq!(
            human.message,
            "Invalid page range. Please enter pages between 1 and 10."
        );
        assert!(!human.retriable);
    }

    #[test]
    fn zero_page_pdf_gets_dedicated_message() {
        let human = humanize_error(&PdfwerkError::Malformed("document has no pages".into()));
        assert_eq!(human.message, "Invalid PDF: File has no pages.");
    }

    #[test]
    fn bad_page_list_explains_grammar() {
        let human = humanize_error(&PdfwerkError::InvalidInput(
            "invalid page format: token 'x'".into(),
        ));
        assert!(human.suggestion.contains("1,3,5-7"));
    }

    #[test]
    fn merge_limits_are_not_size_errors() {
        let human = humanize_error(&PdfwerkError::InvalidInput(
            "too many files to merge: 30 (limit 20)".into(),
        ));
        assert_eq!(human.message, "Too many files to merge.");

        let human = humanize_error(&PdfwerkError::InvalidInput(
            "input of 200 bytes exceeds the 100 byte limit".into(),
        ));
        assert_eq!(human.message, "File is too large.");
    }

    #[test]
    fn io_failure_is_retriable() {
        let human = humanize_error(&PdfwerkError::Io("disk full".into()));
        assert!(human.retriable);
        assert!(human.suggestion.contains("disk full"));
    }
}
