//! Encode raw bytes as Motorola S-Records or `dc.b` assembly listings.

mod assembly;
mod encoding;
mod error;
mod manifest;
pub mod record;
mod srec;

pub use assembly::{AssemblyEncoder, BYTES_PER_LINE, DEFAULT_DIRECTIVE};
pub use encoding::{Encoded, OutputFormat, TextEncoder, encode_with};
pub use error::EncodeError;
pub use manifest::{EncodeManifest, sha256_hex};
pub use record::{RecordKind, encode_record, encode_record_tag};
pub use srec::{DEFAULT_HEADER, SrecEncoder};

/// Encodes the whole buffer as an S-Record document with the default header.
pub fn encode_srec(data: &[u8]) -> Result<String, EncodeError> {
    SrecEncoder::new().encode(data)
}

/// Renders the whole buffer as a `dc.b` listing.
pub fn encode_assembly(data: &[u8]) -> Result<String, EncodeError> {
    AssemblyEncoder::new().encode(data)
}
