//! Whole-document S-Record encoding.
//!
//! A document is one S0 header, one S1 record per 16-byte chunk of input, an S5
//! record holding the S1 count and a closing S9 record.

use tracing::debug;

use crate::encoding::{OutputFormat, TextEncoder};
use crate::error::EncodeError;
use crate::record::{self, MAX_DATA_PAYLOAD, MAX_HEADER_PAYLOAD, RecordKind};

/// Label written into the S0 record unless another one is configured.
pub const DEFAULT_HEADER: &[u8; 5] = b"DAVID";

/// Encodes a byte buffer as an S0/S1/S5/S9 document with 16-bit addresses.
#[derive(Debug, Clone)]
pub struct SrecEncoder {
    header: Vec<u8>,
}

impl Default for SrecEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SrecEncoder {
    pub fn new() -> Self {
        Self {
            header: DEFAULT_HEADER.to_vec(),
        }
    }

    /// Use `header` as the S0 payload instead of [`DEFAULT_HEADER`].
    pub fn with_header<B: Into<Vec<u8>>>(header: B) -> Result<Self, EncodeError> {
        let header = header.into();
        if header.len() > MAX_HEADER_PAYLOAD {
            return Err(EncodeError::PayloadTooLong {
                kind: RecordKind::Header,
                len: header.len(),
                max: MAX_HEADER_PAYLOAD,
            });
        }
        Ok(Self { header })
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Number of S1 records needed for `data_len` bytes of input.
    pub fn data_record_count(data_len: usize) -> usize {
        data_len.div_ceil(MAX_DATA_PAYLOAD)
    }

    fn capacity_for(&self, records: usize) -> usize {
        record::line_len(self.header.len())
            + records * record::line_len(MAX_DATA_PAYLOAD)
            + 2 * record::line_len(0)
    }
}

impl TextEncoder for SrecEncoder {
    fn name(&self) -> &'static str {
        "Motorola S-Record"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Srec
    }

    fn encode(&self, data: &[u8]) -> Result<String, EncodeError> {
        let records = Self::data_record_count(data.len());
        let count = u16::try_from(records)
            .map_err(|_| EncodeError::RecordCountOverflow { records })?;

        let mut out = String::new();
        out.try_reserve_exact(self.capacity_for(records))?;

        record::write_record(&mut out, RecordKind::Header, 0, &self.header)?;
        for (index, chunk) in data.chunks(MAX_DATA_PAYLOAD).enumerate() {
            let offset = index * MAX_DATA_PAYLOAD;
            let address =
                u16::try_from(offset).map_err(|_| EncodeError::AddressOverflow { offset })?;
            record::write_record(&mut out, RecordKind::Data16, address, chunk)?;
        }
        record::write_record(&mut out, RecordKind::Count16, count, &[])?;
        record::write_record(&mut out, RecordKind::Terminator, 0, &[])?;

        debug!(
            input_bytes = data.len(),
            data_records = records,
            output_bytes = out.len(),
            "encoded s-record document"
        );
        Ok(out)
    }
}
