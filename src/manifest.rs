//! JSON manifest describing one encode run.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::encoding::{Encoded, OutputFormat};
use crate::srec::SrecEncoder;

/// Provenance record written next to an encoded file on request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EncodeManifest {
    pub tool_version: String,
    pub format: OutputFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub input_bytes: usize,
    pub truncated: bool,
    pub lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_records: Option<usize>,
    pub input_sha256: String,
    pub output_sha256: String,
    pub created_at: DateTime<Utc>,
}

impl EncodeManifest {
    /// Describe the result of encoding `data` into `encoded`.
    pub fn new(data: &[u8], encoded: &Encoded) -> Self {
        let data_records = match encoded.format {
            OutputFormat::Srec => Some(SrecEncoder::data_record_count(data.len())),
            OutputFormat::Assembly => None,
        };
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            format: encoded.format,
            input: None,
            output: None,
            input_bytes: data.len(),
            truncated: false,
            lines: encoded.lines,
            data_records,
            input_sha256: sha256_hex(data),
            output_sha256: sha256_hex(encoded.text.as_bytes()),
            created_at: Utc::now(),
        }
    }

    pub fn with_paths(mut self, input: Option<&Path>, output: Option<&Path>) -> Self {
        self.input = input.map(|p| p.display().to_string());
        self.output = output.map(|p| p.display().to_string());
        self
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize manifest")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_with;
    use crate::{AssemblyEncoder, SrecEncoder};
    use pretty_assertions::assert_eq;

    #[test]
    fn digest_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn srec_manifest_counts_records() {
        let data = [0u8; 40];
        let encoded = encode_with(&SrecEncoder::new(), &data).unwrap();
        let manifest = EncodeManifest::new(&data, &encoded).with_truncated(true);
        assert_eq!(manifest.format, OutputFormat::Srec);
        assert_eq!(manifest.data_records, Some(3));
        assert_eq!(manifest.lines, 6);
        assert_eq!(manifest.input_bytes, 40);
        assert!(manifest.truncated);
    }

    #[test]
    fn assembly_manifest_serializes_without_record_count() {
        let data = [1u8, 2, 3];
        let encoded = encode_with(&AssemblyEncoder::new(), &data).unwrap();
        let manifest = EncodeManifest::new(&data, &encoded)
            .with_paths(Some(Path::new("in.bin")), Some(Path::new("in.bin.asm")));
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["format"], "assembly");
        assert_eq!(json["input"], "in.bin");
        assert_eq!(json["output"], "in.bin.asm");
        assert_eq!(json["lines"], 1);
        assert!(json.get("data_records").is_none());
    }
}
