//! NUST and DARPA whitespace-separated textual trace records.
//!
//! Both formats carry far more fields than the core cares about; only the
//! source IP is extracted, packed big-endian into the `u32` `uid` the
//! heavy-hitter engine operates on.

use std::io::BufRead;

use super::Record;
use crate::common::HhError;

const NUST_FIELD_COUNT: usize = 11;
const NUST_SOURCE_IP_FIELD: usize = 2;

const DARPA_FIELD_COUNT: usize = 11;
const DARPA_SOURCE_IP_FIELD: usize = 7;

/// Parses one NUST record per non-empty line.
pub(super) fn parse_nust<R: BufRead>(reader: R) -> Result<Vec<Record>, HhError> {
    parse_lines(reader, NUST_FIELD_COUNT, NUST_SOURCE_IP_FIELD, "NUST")
}

/// Parses one DARPA record per non-empty line.
pub(super) fn parse_darpa<R: BufRead>(reader: R) -> Result<Vec<Record>, HhError> {
    parse_lines(reader, DARPA_FIELD_COUNT, DARPA_SOURCE_IP_FIELD, "DARPA")
}

fn parse_lines<R: BufRead>(
    reader: R,
    field_count: usize,
    source_ip_field: usize,
    format_name: &str,
) -> Result<Vec<Record>, HhError> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < field_count {
            return Err(HhError::InputFormat {
                detail: format!(
                    "unable to read {} data: expected {} fields, found {} in {:?}",
                    format_name,
                    field_count,
                    fields.len(),
                    line
                ),
            });
        }

        let uid = pack_ipv4(fields[source_ip_field])?;
        records.push(Record { uid, weight: 1 });
    }
    Ok(records)
}

/// Packs a dotted-quad IPv4 address big-endian into a `u32`, matching the
/// source driver's `(h1<<24)|(h2<<16)|(h3<<8)|h4` packing.
fn pack_ipv4(dotted: &str) -> Result<u32, HhError> {
    let octets: Vec<&str> = dotted.split('.').collect();
    if octets.len() != 4 {
        return Err(HhError::InputFormat {
            detail: format!("unable to read source IP {:?}", dotted),
        });
    }

    let mut uid: u32 = 0;
    for octet in octets {
        let byte: u8 = octet.parse().map_err(|_| HhError::InputFormat {
            detail: format!("unable to read source IP {:?}", dotted),
        })?;
        uid = (uid << 8) | byte as u32;
    }
    Ok(uid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn packs_dotted_ip_big_endian() {
        assert_eq!(pack_ipv4("10.0.0.1").unwrap(), 0x0A000001);
        assert_eq!(pack_ipv4("255.255.255.255").unwrap(), 0xFFFFFFFF);
    }

    #[test]
    fn rejects_malformed_ip() {
        assert!(pack_ipv4("10.0.1").is_err());
        assert!(pack_ipv4("10.0.0.256").is_err());
    }

    #[test]
    fn parses_nust_line() {
        let line = "1234.5 1500 192.168.1.1 10.0.0.2 80 443 SYN 6 0 in 42\n";
        let records = parse_nust(Cursor::new(line.as_bytes())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid, 0xC0A80101);
        assert_eq!(records[0].weight, 1);
    }

    #[test]
    fn parses_darpa_line() {
        let line = "7 2026-07-27 12:00:00 00:00:05 http 1024 80 172.16.0.5 10.0.0.9 0.0 none\n";
        let records = parse_darpa(Cursor::new(line.as_bytes())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid, 0xAC100005);
    }

    #[test]
    fn rejects_short_records() {
        let line = "not enough fields here\n";
        assert!(parse_nust(Cursor::new(line.as_bytes())).is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let data = "\n\n7 2026-07-27 12:00:00 00:00:05 http 1024 80 172.16.0.5 10.0.0.9 0.0 none\n\n";
        let records = parse_darpa(Cursor::new(data.as_bytes())).unwrap();
        assert_eq!(records.len(), 1);
    }
}
