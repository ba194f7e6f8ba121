use std::fmt;

use serde::Serialize;

use crate::error::EncodeError;

/// The two textual renderings a byte buffer can be turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `dc.b` byte-table listing.
    Assembly,
    /// Motorola S-Record document.
    Srec,
}

impl OutputFormat {
    /// Extension appended to an input file name when no output name is given.
    pub fn file_extension(self) -> &'static str {
        match self {
            OutputFormat::Assembly => "asm",
            OutputFormat::Srec => "srec",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Assembly => write!(f, "assembly"),
            OutputFormat::Srec => write!(f, "srec"),
        }
    }
}

/// A byte-to-text encoder. Implementations are pure: the same input always
/// produces the same text and no state is shared between calls.
pub trait TextEncoder {
    fn name(&self) -> &'static str;
    fn format(&self) -> OutputFormat;
    fn encode(&self, data: &[u8]) -> Result<String, EncodeError>;
}

/// Encoded text together with a few numbers describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub format: OutputFormat,
    pub text: String,
    pub lines: usize,
}

/// Run `encoder` over `data` and count the lines it produced.
pub fn encode_with<E: TextEncoder + ?Sized>(
    encoder: &E,
    data: &[u8],
) -> Result<Encoded, EncodeError> {
    let text = encoder.encode(data)?;
    let lines = text.bytes().filter(|b| *b == b'\n').count();
    Ok(Encoded {
        format: encoder.format(),
        text,
        lines,
    })
}
