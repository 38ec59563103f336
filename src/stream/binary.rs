//! Little-endian binary item stream: zero or more `#`-prefixed ASCII header
//! lines, then a tightly packed sequence of `u32` item identifiers.

use std::io::{BufRead, Read};

use super::Record;
use crate::common::HhError;

/// Skips the `#`-prefixed header lines, then decodes the remaining bytes as
/// a packed little-endian `u32` stream, one [`Record`] per item (weight
/// always 1).
pub(super) fn parse<R: BufRead>(mut reader: R) -> Result<Vec<Record>, HhError> {
    skip_header(&mut reader)?;

    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;

    if payload.len() % 4 != 0 {
        return Err(HhError::InputFormat {
            detail: format!(
                "binary payload length {} is not a multiple of 4 bytes",
                payload.len()
            ),
        });
    }

    Ok(payload
        .chunks_exact(4)
        .map(|chunk| Record {
            uid: u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            weight: 1,
        })
        .collect())
}

/// Consumes leading ASCII lines starting with `#`, leaving the reader
/// positioned at the first byte of the binary payload.
fn skip_header<R: BufRead>(reader: &mut R) -> Result<(), HhError> {
    loop {
        let peek = reader.fill_buf()?;
        match peek.first() {
            Some(b'#') => {}
            _ => return Ok(()),
        }

        let mut line = Vec::new();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skips_header_and_decodes_payload() {
        let mut data = Vec::new();
        data.extend_from_slice(b"#N=8\n");
        data.extend_from_slice(b"#Seed1=1\n");
        for uid in 0u32..8 {
            data.extend_from_slice(&uid.to_le_bytes());
        }

        let records = parse(Cursor::new(data)).unwrap();
        assert_eq!(records.len(), 8);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.uid, i as u32);
            assert_eq!(record.weight, 1);
        }
    }

    #[test]
    fn no_header_is_fine() {
        let mut data = Vec::new();
        data.extend_from_slice(&42u32.to_le_bytes());
        let records = parse(Cursor::new(data)).unwrap();
        assert_eq!(records, vec![Record { uid: 42, weight: 1 }]);
    }

    #[test]
    fn truncated_payload_is_input_format_error() {
        let data = vec![0u8, 1, 2];
        assert!(parse(Cursor::new(data)).is_err());
    }

    #[test]
    fn empty_payload_yields_no_records() {
        let data = b"#empty\n".to_vec();
        let records = parse(Cursor::new(data)).unwrap();
        assert!(records.is_empty());
    }
}
