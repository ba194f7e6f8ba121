//! Single S-Record line construction.
//!
//! A record line has the shape `S<tag><count><address><payload><checksum>` followed
//! by a newline, every field written as zero-padded uppercase hexadecimal. The
//! byte count covers the two address bytes, the payload and the checksum byte.

use std::fmt;

use crate::error::EncodeError;

/// Width of the address field in bytes. Every supported kind uses 16-bit addressing.
pub const ADDRESS_BYTES: usize = 2;

/// Largest payload a Data16 record carries.
pub const MAX_DATA_PAYLOAD: usize = 16;

/// Largest header payload whose byte count still fits in one byte.
pub const MAX_HEADER_PAYLOAD: usize = u8::MAX as usize - ADDRESS_BYTES - 1;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// The record kinds this crate can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// S0, carries an identifying label.
    Header,
    /// S1, data with a 16-bit load address.
    Data16,
    /// S5, the address field holds the number of S1 records.
    Count16,
    /// S9, marks the end of the file.
    Terminator,
}

impl RecordKind {
    /// Digit written after the `S`.
    pub fn tag(self) -> u8 {
        match self {
            RecordKind::Header => 0,
            RecordKind::Data16 => 1,
            RecordKind::Count16 => 5,
            RecordKind::Terminator => 9,
        }
    }

    /// Upper bound on the payload length accepted for this kind.
    pub fn max_payload(self) -> usize {
        match self {
            RecordKind::Header => MAX_HEADER_PAYLOAD,
            RecordKind::Data16 => MAX_DATA_PAYLOAD,
            RecordKind::Count16 | RecordKind::Terminator => 0,
        }
    }
}

impl TryFrom<u8> for RecordKind {
    type Error = EncodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(RecordKind::Header),
            1 => Ok(RecordKind::Data16),
            5 => Ok(RecordKind::Count16),
            9 => Ok(RecordKind::Terminator),
            other => Err(EncodeError::UnsupportedRecordKind(other)),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Header => write!(f, "S0 header"),
            RecordKind::Data16 => write!(f, "S1 data"),
            RecordKind::Count16 => write!(f, "S5 count"),
            RecordKind::Terminator => write!(f, "S9 terminator"),
        }
    }
}

/// Value of the byte-count field for a payload of `payload_len` bytes.
pub fn byte_count(payload_len: usize) -> usize {
    ADDRESS_BYTES + payload_len + 1
}

/// One's complement of the low byte of the record sum.
pub fn checksum(byte_count: u8, address: u16, payload: &[u8]) -> u8 {
    let [hi, lo] = address.to_be_bytes();
    let sum = payload
        .iter()
        .fold(byte_count.wrapping_add(hi).wrapping_add(lo), |acc, b| {
            acc.wrapping_add(*b)
        });
    !sum
}

/// Number of characters in an encoded line, newline included.
pub fn line_len(payload_len: usize) -> usize {
    // S + tag + count(2) + address(4) + payload + checksum(2) + newline
    2 + 2 + ADDRESS_BYTES * 2 + payload_len * 2 + 2 + 1
}

/// Encode one record as a newline-terminated line.
pub fn encode_record(
    kind: RecordKind,
    address: u16,
    payload: &[u8],
) -> Result<String, EncodeError> {
    let mut line = String::new();
    line.try_reserve_exact(line_len(payload.len()))?;
    write_record(&mut line, kind, address, payload)?;
    Ok(line)
}

/// Encode one record from its raw tag digit, rejecting tags outside S0/S1/S5/S9.
pub fn encode_record_tag(
    tag: u8,
    address: u16,
    payload: &[u8],
) -> Result<String, EncodeError> {
    let kind = RecordKind::try_from(tag)?;
    encode_record(kind, address, payload)
}

/// Append one record line to `out`.
pub(crate) fn write_record(
    out: &mut String,
    kind: RecordKind,
    address: u16,
    payload: &[u8],
) -> Result<(), EncodeError> {
    if payload.len() > kind.max_payload() {
        return Err(EncodeError::PayloadTooLong {
            kind,
            len: payload.len(),
            max: kind.max_payload(),
        });
    }
    // Bounded by MAX_HEADER_PAYLOAD above.
    let count = byte_count(payload.len()) as u8;

    out.push('S');
    out.push(char::from(HEX_DIGITS[usize::from(kind.tag())]));
    push_hex(out, count);
    for b in address.to_be_bytes() {
        push_hex(out, b);
    }
    for &b in payload {
        push_hex(out, b);
    }
    push_hex(out, checksum(count, address, payload));
    out.push('\n');
    Ok(())
}

/// Append `byte` as two uppercase hex digits.
pub(crate) fn push_hex(out: &mut String, byte: u8) {
    out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
    out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field_sum(line: &str) -> u32 {
        let body = line.trim_end().get(2..).unwrap_or_default();
        (0..body.len())
            .step_by(2)
            .map(|i| u32::from_str_radix(&body[i..i + 2], 16).unwrap())
            .sum()
    }

    #[test]
    fn known_data_vector() {
        let line = encode_record(RecordKind::Data16, 0, &[0x00, 0xFF]).unwrap();
        // 05 + 00 + 00 + 00 + FF = 0x104, !0x04 = 0xFB
        assert_eq!(line, "S105000000FFFB\n");
    }

    #[test]
    fn data_record_fields() {
        let line = encode_record(RecordKind::Data16, 0x1234, &[0xAB]).unwrap();
        // 04 + 12 + 34 + AB = 0xF5, !0xF5 = 0x0A
        assert_eq!(line, "S1041234AB0A\n");
    }

    #[test]
    fn count_and_terminator_have_byte_count_three() {
        assert_eq!(encode_record(RecordKind::Count16, 2, &[]).unwrap(), "S5030002FA\n");
        assert_eq!(encode_record(RecordKind::Terminator, 0, &[]).unwrap(), "S9030000FC\n");
    }

    #[test]
    fn header_record_carries_label() {
        let line = encode_record(RecordKind::Header, 0, b"HDR").unwrap();
        assert!(line.starts_with("S0060000484452"));
        assert_eq!(field_sum(&line) & 0xFF, 0xFF);
    }

    #[test]
    fn checksum_identity_holds_for_all_kinds() {
        let cases: [(RecordKind, u16, &[u8]); 4] = [
            (RecordKind::Header, 0, b"DAVID"),
            (RecordKind::Data16, 0xFFF0, &[0xFF; 16]),
            (RecordKind::Count16, 0xFFFF, &[]),
            (RecordKind::Terminator, 0, &[]),
        ];
        for (kind, address, payload) in cases {
            let line = encode_record(kind, address, payload).unwrap();
            assert_eq!(field_sum(&line) & 0xFF, 0xFF, "{kind}: {line}");
            assert_eq!(line.len(), line_len(payload.len()));
        }
    }

    #[test]
    fn rejects_unsupported_tags() {
        for tag in [2u8, 3, 4, 6, 7, 8, 0x0A, 0xFF] {
            let err = encode_record_tag(tag, 0, &[]).unwrap_err();
            assert!(matches!(err, EncodeError::UnsupportedRecordKind(t) if t == tag));
        }
        assert_eq!(encode_record_tag(9, 0, &[]).unwrap(), "S9030000FC\n");
    }

    #[test]
    fn rejects_oversized_payloads() {
        let err = encode_record(RecordKind::Data16, 0, &[0; 17]).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::PayloadTooLong { kind: RecordKind::Data16, len: 17, max: 16 }
        ));
        assert!(encode_record(RecordKind::Terminator, 0, &[1]).is_err());
        assert!(encode_record(RecordKind::Header, 0, &[b'A'; MAX_HEADER_PAYLOAD]).is_ok());
        assert!(encode_record(RecordKind::Header, 0, &[b'A'; MAX_HEADER_PAYLOAD + 1]).is_err());
    }

    #[test]
    fn longest_header_uses_full_count_byte() {
        let line = encode_record(RecordKind::Header, 0, &[0; MAX_HEADER_PAYLOAD]).unwrap();
        assert!(line.starts_with("S0FF0000"));
    }
}
