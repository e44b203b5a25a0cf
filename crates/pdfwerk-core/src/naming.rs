// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File naming: suggested download names for outputs, archive entry names, and
// collision-resistant names for staged uploads.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::types::Operation;

/// Length of the random token prefixed to staged upload names.
pub const UPLOAD_TOKEN_LEN: usize = 16;

/// `<prefix>_<YYYYMMDD_HHMMSS>.<ext>` for the given operation.
///
/// Second resolution only: two outputs of the same operation within one second
/// share a name. That is fine for a download name; anything that stores
/// outputs must add its own uniqueness.
pub fn suggested_name(operation: Operation, at: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        operation.output_prefix(),
        at.format("%Y%m%d_%H%M%S"),
        operation.output_format().extension()
    )
}

/// Entry name for a 1-based page inside a split archive.
pub fn archive_entry_name(page_number: usize) -> String {
    format!("page_{page_number}.pdf")
}

/// Whether a client-supplied file name carries a `.pdf` extension.
pub fn is_pdf_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// Reduce a client-supplied file name to a safe basename ending in `.pdf`.
///
/// Directory components are dropped, whitespace runs become `_`, and anything
/// outside `[A-Za-z0-9._-]` is removed.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');

    let mut safe = if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    };
    if !safe.to_ascii_lowercase().ends_with(".pdf") {
        safe.push_str(".pdf");
    }
    safe
}

/// Random hex token used to keep staged names unique across requests.
pub fn upload_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(UPLOAD_TOKEN_LEN);
    token
}

/// `<token>_<sanitized name>`, safe to use as a storage key.
pub fn staged_upload_name(original: &str) -> String {
    format!("{}_{}", upload_token(), sanitize_file_name(original))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap()
    }

    #[test]
    fn suggested_names_follow_operation() {
        assert_eq!(
            suggested_name(Operation::Split, at()),
            "split_pages_20260307_090502.zip"
        );
        assert_eq!(
            suggested_name(Operation::Merge, at()),
            "merged_20260307_090502.pdf"
        );
        assert_eq!(
            suggested_name(Operation::ConvertToWord, at()),
            "converted_20260307_090502.docx"
        );
    }

    #[test]
    fn entry_names_are_one_based() {
        assert_eq!(archive_entry_name(1), "page_1.pdf");
        assert_eq!(archive_entry_name(12), "page_12.pdf");
    }

    #[test]
    fn pdf_extension_check() {
        assert!(is_pdf_file_name("report.PDF"));
        assert!(!is_pdf_file_name("report.pdf.exe"));
        assert!(!is_pdf_file_name("pdf"));
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd.pdf");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\My Report (v2).pdf"), "My_Report_v2.pdf");
        assert_eq!(sanitize_file_name("..."), "document.pdf");
        assert_eq!(sanitize_file_name("scan.PDF"), "scan.PDF");
    }

    #[test]
    fn staged_names_are_unique_and_prefixed() {
        let first = staged_upload_name("a.pdf");
        let second = staged_upload_name("a.pdf");
        assert_ne!(first, second);
        let (token, rest) = first.split_once('_').unwrap();
        assert_eq!(token.len(), UPLOAD_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rest, "a.pdf");
    }
}
