//! Assembly byte-table listings.

use tracing::debug;

use crate::encoding::{OutputFormat, TextEncoder};
use crate::error::EncodeError;
use crate::record::push_hex;

/// Directive that opens every listing line unless another one is configured.
pub const DEFAULT_DIRECTIVE: &str = "dc.b";

/// Bytes rendered on each listing line.
pub const BYTES_PER_LINE: usize = 16;

const SEPARATOR: &str = ", ";

/// Renders a byte buffer as `dc.b\t$XX, $XX, ...` lines of up to 16 bytes.
#[derive(Debug, Clone)]
pub struct AssemblyEncoder {
    prefix: String,
}

impl Default for AssemblyEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssemblyEncoder {
    pub fn new() -> Self {
        Self::with_directive(DEFAULT_DIRECTIVE)
    }

    /// Open each line with `directive` followed by a tab.
    pub fn with_directive<S: AsRef<str>>(directive: S) -> Self {
        Self {
            prefix: format!("{}\t", directive.as_ref()),
        }
    }

    /// Text placed before the first byte of every line.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn capacity_for(&self, data_len: usize) -> usize {
        // Each byte is `$XX` plus a two-character separator or the newline.
        let lines = data_len.div_ceil(BYTES_PER_LINE);
        data_len * 5 + lines * self.prefix.len().saturating_sub(1)
    }
}

impl TextEncoder for AssemblyEncoder {
    fn name(&self) -> &'static str {
        "assembly byte table"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Assembly
    }

    fn encode(&self, data: &[u8]) -> Result<String, EncodeError> {
        let mut out = String::new();
        out.try_reserve_exact(self.capacity_for(data.len()))?;

        let mut lines = 0usize;
        for chunk in data.chunks(BYTES_PER_LINE) {
            out.push_str(&self.prefix);
            for (i, &byte) in chunk.iter().enumerate() {
                if i > 0 {
                    out.push_str(SEPARATOR);
                }
                out.push('$');
                push_hex(&mut out, byte);
            }
            out.push('\n');
            lines += 1;
        }

        debug!(
            input_bytes = data.len(),
            lines,
            output_bytes = out.len(),
            "encoded assembly listing"
        );
        Ok(out)
    }
}
