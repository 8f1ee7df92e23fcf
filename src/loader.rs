//! CSV ingest for the raw delivery export.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::record::RawRecord;

/// Reads the raw export from a file path.
///
/// # Errors
///
/// Fails if the file cannot be opened or any row does not match the expected
/// schema (a missing column aborts on the first row).
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records = read_records(file).with_context(|| format!("reading {}", path.display()))?;
    debug!(rows = records.len(), path = %path.display(), "Raw export loaded");
    Ok(records)
}

/// Reads raw records from any CSV source.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let record: RawRecord = result.with_context(|| format!("row {}", i + 1))?;
        rows.push(record);
    }

    Ok(rows)
}
