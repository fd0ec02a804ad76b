//! CSV export for a fleet's `time`/`grades` output sequences.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Column header for the telemetry CSV export.
const HEADER: &str = "time_s,grade";

/// Exports a fleet's `time`/`grades` sequences to a CSV file at the given
/// path.
///
/// # Panics
///
/// Panics if `time` and `grades` differ in length — a caller bug, since
/// `Fleet` guarantees they stay equal-length.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(time: &[f64], grades: &[f64], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(time, grades, buf)
}

/// Writes a fleet's `time`/`grades` sequences as CSV to any writer.
///
/// # Panics
///
/// Panics if `time` and `grades` differ in length.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(time: &[f64], grades: &[f64], writer: impl Write) -> io::Result<()> {
    assert_eq!(time.len(), grades.len(), "time and grades must be equal length");

    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER.split(','))?;

    for (t, g) in time.iter().zip(grades.iter()) {
        wtr.write_record(&[format!("{t:.4}"), format!("{g:.6}")])?;
    }

    wtr.flush()?;
    Ok(())
}
