// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::CompressionLevel;

/// Compression method for entries in split archives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveMethod {
    #[default]
    Deflated,
    Stored,
}

/// External PDF-to-Word converter invocation.
///
/// `{input}` and `{output}` in `args` are replaced with scratch file paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordConverterConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Default for WordConverterConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pdf2docx"),
            args: vec!["convert".into(), "{input}".into(), "{output}".into()],
        }
    }
}

/// Settings for the transformation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inputs larger than this are rejected before parsing.
    pub max_input_bytes: u64,
    /// Upper bound on documents in one merge.
    pub max_merge_inputs: usize,
    /// Level used when a compress request does not name one.
    pub default_compression: CompressionLevel,
    pub archive_method: ArchiveMethod,
    /// Parent for per-request scratch directories; system temp when unset.
    pub staging_dir: Option<PathBuf>,
    pub word_converter: WordConverterConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 100 * 1024 * 1024,
            max_merge_inputs: 20,
            default_compression: CompressionLevel::Medium,
            archive_method: ArchiveMethod::Deflated,
            staging_dir: None,
            word_converter: WordConverterConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Like [`EngineConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfwerk.json");
        std::fs::write(&path, r#"{"max_merge_inputs": 5, "archive_method": "stored"}"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.max_merge_inputs, 5);
        assert_eq!(config.archive_method, ArchiveMethod::Stored);
        assert_eq!(config.max_input_bytes, EngineConfig::default().max_input_bytes);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn garbage_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfwerk.json");
        std::fs::write(&path, "not json").unwrap();
        let err = EngineConfig::load_or_default(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfwerk.json");
        let mut config = EngineConfig::default();
        config.default_compression = CompressionLevel::High;
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }
}
