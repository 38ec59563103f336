//! Ambient ingestion layer: turns a file on disk into a sequence of
//! `(uid, weight)` records the core never has to parse itself.
//!
//! Three formats are supported, selected by substring match on the input
//! filename: NUST and DARPA textual network-trace records (`uid` is the
//! source IP packed big-endian into a `u32`), and a little-endian binary
//! format carrying bare `u32` item identifiers with implicit weight 1. This
//! module is the only place in the crate that knows these formats exist —
//! [`crate::hh`] only ever sees `(uid, weight)` pairs.

mod binary;
mod text;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::common::HhError;

/// A single parsed stream record: an item identifier and its weight.
///
/// Every format this module parses assigns weight 1; the field exists so
/// callers (and the core, which accepts signed weights for count-median)
/// have a uniform record shape to feed `HeavyHitter::update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    /// The item identifier fed to the heavy-hitter engine.
    pub uid: u32,
    /// The weight this record contributes.
    pub weight: i64,
}

/// Which wire format an input file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// NUST network-trace textual records.
    Nust,
    /// DARPA intrusion-detection textual records.
    Darpa,
    /// Little-endian binary item stream.
    Binary,
}

/// Infers the input format from a substring of the filename, matching the
/// source driver's own heuristic: `NUST`, `DARPA`, or either of `Zipfian`/
/// `Weighted` (both indicate the binary generator's output).
pub fn infer_format(filename: &str) -> Option<Format> {
    if filename.contains("NUST") {
        Some(Format::Nust)
    } else if filename.contains("DARPA") {
        Some(Format::Darpa)
    } else if filename.contains("Zipfian") || filename.contains("Weighted") {
        Some(Format::Binary)
    } else {
        None
    }
}

/// Reads every record from `path` under the given `format`.
///
/// A parse failure on any single record is fatal for the whole read — this
/// crate does not skip malformed records and continue, matching the source
/// driver's behavior.
pub fn read_records(path: &Path, format: Format) -> Result<Vec<Record>, HhError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match format {
        Format::Binary => binary::parse(reader),
        Format::Nust => text::parse_nust(reader),
        Format::Darpa => text::parse_darpa(reader),
    }
}
