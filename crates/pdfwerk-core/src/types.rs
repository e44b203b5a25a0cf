// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the pdfwerk engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PdfwerkError, Result};

/// The operations the engine exposes to its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Split,
    Merge,
    Compress,
    Rotate,
    ConvertToWord,
}

impl Operation {
    /// Prefix used for suggested output names.
    pub fn output_prefix(&self) -> &'static str {
        match self {
            Self::Split => "split_pages",
            Self::Merge => "merged",
            Self::Compress => "compressed",
            Self::Rotate => "rotated",
            Self::ConvertToWord => "converted",
        }
    }

    /// Container format of the artifact this operation produces.
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Self::Split => OutputFormat::Zip,
            Self::Merge | Self::Compress | Self::Rotate => OutputFormat::Pdf,
            Self::ConvertToWord => OutputFormat::Docx,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Merge => "merge",
            Self::Compress => "compress",
            Self::Rotate => "rotate",
            Self::ConvertToWord => "convert_to_word",
        }
    }
}

impl FromStr for Operation {
    type Err = PdfwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "split" => Ok(Self::Split),
            "merge" => Ok(Self::Merge),
            "compress" => Ok(Self::Compress),
            "rotate" => Ok(Self::Rotate),
            "convert_to_word" | "pdf2word" | "to_word" => Ok(Self::ConvertToWord),
            other => Err(PdfwerkError::InvalidInput(format!(
                "unsupported operation '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container formats the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Pdf,
    Zip,
    Docx,
}

impl OutputFormat {
    /// MIME type for the Content-Type of a download.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Zip => "application/zip",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Zip => "zip",
            Self::Docx => "docx",
        }
    }
}

/// Positional parity of a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Whether the page at 1-based `position` has this parity.
    pub fn matches(&self, position: usize) -> bool {
        match self {
            Self::Even => position % 2 == 0,
            Self::Odd => position % 2 != 0,
        }
    }
}

impl FromStr for Parity {
    type Err = PdfwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "even" => Ok(Self::Even),
            "odd" => Ok(Self::Odd),
            other => Err(PdfwerkError::InvalidInput(format!("unknown parity '{other}'"))),
        }
    }
}

/// How the caller asked for pages to be picked, before it is resolved
/// against an actual document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionDescriptor {
    /// Inclusive 1-based bounds.
    Range { start: i64, end: i64 },
    /// Comma-separated page numbers and `N-M` ranges, e.g. `1,3,5-7`.
    Explicit { pages: String },
    /// Every even- or odd-positioned page.
    Parity { parity: Parity },
}

impl SelectionDescriptor {
    /// Build a descriptor from a split mode keyword (`range`, `specific`,
    /// `even`, `odd`) and its textual argument.
    ///
    /// For `range` the argument is `A-B`; for `specific` it is the page list.
    pub fn from_mode(mode: &str, argument: Option<&str>) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "range" => {
                let text = argument.ok_or_else(|| {
                    PdfwerkError::InvalidInput("range selection needs 'start-end'".into())
                })?;
                let (start, end) = text.split_once('-').ok_or_else(|| {
                    PdfwerkError::InvalidInput(format!("range '{text}' is not 'start-end'"))
                })?;
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                Ok(Self::Range { start, end })
            }
            "specific" | "explicit" | "pages" => Ok(Self::Explicit {
                pages: argument.unwrap_or_default().to_string(),
            }),
            "even" => Ok(Self::Parity {
                parity: Parity::Even,
            }),
            "odd" => Ok(Self::Parity { parity: Parity::Odd }),
            other => Err(PdfwerkError::InvalidInput(format!(
                "invalid split type '{other}'"
            ))),
        }
    }
}

fn parse_page_number(text: &str) -> Result<i64> {
    text.trim().parse::<i64>().map_err(|_| {
        PdfwerkError::InvalidInput(format!("'{}' is not a valid page number", text.trim()))
    })
}

/// Recompression strength. Every level currently applies the same pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for CompressionLevel {
    type Err = PdfwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PdfwerkError::InvalidInput(format!(
                "unknown compression level '{other}'"
            ))),
        }
    }
}

/// A page rotation, normalised to one of 0, 90, 180, 270 degrees clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rotation(u16);

impl Rotation {
    pub const NONE: Rotation = Rotation(0);
    pub const CLOCKWISE_90: Rotation = Rotation(90);
    pub const HALF_TURN: Rotation = Rotation(180);
    pub const CLOCKWISE_270: Rotation = Rotation(270);

    /// Accept any multiple of 90 (negative or beyond a full turn) and
    /// normalise it. Anything else is rejected.
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(PdfwerkError::InvalidInput(format!(
                "rotation must be a multiple of 90 degrees, got {degrees}"
            )));
        }
        Ok(Self(degrees.rem_euclid(360) as u16))
    }

    pub fn degrees(&self) -> i64 {
        i64::from(self.0)
    }

    /// Add this rotation to an existing `/Rotate` value, normalising the sum.
    ///
    /// `existing` comes straight from the input file: it is reduced modulo
    /// 360 first, and a value that is not a multiple of 90 counts as 0.
    pub fn applied_to(&self, existing: i64) -> i64 {
        let existing = match existing.rem_euclid(360) {
            current if current % 90 == 0 => current,
            _ => 0,
        };
        (existing + self.degrees()) % 360
    }
}

impl TryFrom<i64> for Rotation {
    type Error = PdfwerkError;

    fn try_from(degrees: i64) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i64 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Which 1-based page positions a rotation applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationScope {
    #[default]
    All,
    Odd,
    Even,
}

impl RotationScope {
    pub fn applies_to(&self, position: usize) -> bool {
        match self {
            Self::All => true,
            Self::Odd => Parity::Odd.matches(position),
            Self::Even => Parity::Even.matches(position),
        }
    }
}

impl FromStr for RotationScope {
    type Err = PdfwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "odd" => Ok(Self::Odd),
            "even" => Ok(Self::Even),
            other => Err(PdfwerkError::InvalidInput(format!(
                "unknown rotation scope '{other}'"
            ))),
        }
    }
}

/// A fully described request. Input documents travel separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum TransformRequest {
    Split { selection: SelectionDescriptor },
    Merge,
    Compress {
        #[serde(default)]
        level: Option<CompressionLevel>,
    },
    Rotate {
        angle: Rotation,
        #[serde(default)]
        scope: RotationScope,
    },
    ConvertToWord,
}

impl TransformRequest {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Split { .. } => Operation::Split,
            Self::Merge => Operation::Merge,
            Self::Compress { .. } => Operation::Compress,
            Self::Rotate { .. } => Operation::Rotate,
            Self::ConvertToWord => Operation::ConvertToWord,
        }
    }
}

/// A finished deliverable: bytes plus a suggested download name.
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    /// SHA-256 of `bytes`, lowercase hex.
    pub sha256: String,
}

impl Artifact {
    pub fn new(file_name: String, format: OutputFormat, bytes: Vec<u8>) -> Self {
        let sha256 = crate::integrity::hash_bytes(&bytes);
        Self {
            file_name,
            format,
            bytes,
            sha256,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("bytes", &self.bytes.len())
            .field("sha256", &self.sha256)
            .finish()
    }
}

/// A merge input that was dropped instead of failing the whole merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedInput {
    /// 0-based position in the caller's ordering.
    pub position: usize,
    pub reason: String,
}

/// Diagnostics for the best-effort parts of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Pages written to the output.
    pub pages_processed: usize,
    pub skipped_inputs: Vec<SkippedInput>,
    /// Pages that could not be copied and were left out.
    pub skipped_pages: usize,
    /// Temporary files that could not be removed.
    pub cleanup_failures: usize,
}

impl TransformReport {
    pub fn with_pages(pages_processed: usize) -> Self {
        Self {
            pages_processed,
            ..Self::default()
        }
    }

    /// True when nothing was silently dropped along the way.
    pub fn is_lossless(&self) -> bool {
        self.skipped_inputs.is_empty() && self.skipped_pages == 0
    }
}

/// What every engine operation hands back.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub artifact: Artifact,
    pub report: TransformReport,
}
