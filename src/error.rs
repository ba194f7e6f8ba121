use std::collections::TryReserveError;

use thiserror::Error;

use crate::record::RecordKind;

/// Failures reported by the record and document encoders.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Only S0, S1, S5 and S9 records can be produced.
    #[error("unsupported record kind: S{0:X}")]
    UnsupportedRecordKind(u8),

    #[error("{kind} payload of {len} bytes exceeds the {max}-byte limit")]
    PayloadTooLong {
        kind: RecordKind,
        len: usize,
        max: usize,
    },

    /// The data offset no longer fits in a 16-bit address field.
    #[error("data offset {offset:#X} does not fit in a 16-bit address field")]
    AddressOverflow { offset: usize },

    /// More data records than the 16-bit S5 count field can hold.
    #[error("{records} data records exceed the S5 count limit of 65535")]
    RecordCountOverflow { records: usize },

    #[error("unable to allocate output buffer")]
    AllocationFailure(#[from] TryReserveError),
}
