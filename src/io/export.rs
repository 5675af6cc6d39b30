//! CSV export for per-hour simulation records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::HourRecord;

/// Column header for CSV curve export.
const HEADER: &str = "hour,consumer_kw,resulting_kw,delta_kw,in_window";

/// Exports hour records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `records` - Per-hour records from a generated simulator
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes hour records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.consumer_kw),
            format!("{:.4}", r.resulting_kw),
            format!("{:.4}", r.delta_kw()),
            r.in_window.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(hour: usize) -> HourRecord {
        HourRecord {
            hour,
            consumer_kw: 2.0,
            resulting_kw: 0.5,
            in_window: hour >= 19,
        }
    }

    #[test]
    fn header_matches_schema() {
        let records = vec![make_record(1)];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(first_line, "hour,consumer_kw,resulting_kw,delta_kw,in_window");
    }

    #[test]
    fn row_count_matches_hour_count() {
        let records: Vec<HourRecord> = (1..=24).map(make_record).collect();
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 24 data rows
        assert_eq!(lines.len(), 25);
        assert_eq!(lines[24], "24,2.0000,0.5000,-1.5000,true");
    }

    #[test]
    fn deterministic_output() {
        let records: Vec<HourRecord> = (1..=5).map(make_record).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&records, &mut buf1).ok();
        write_csv(&records, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn exported_file_reads_back_as_curve() {
        let records: Vec<HourRecord> = (1..=24).map(make_record).collect();
        let path = std::env::temp_dir().join(format!("bess-sim-export-{}.csv", std::process::id()));
        export_csv(&records, &path).expect("export should succeed");

        let curve = crate::io::import::read_curve_csv(&path).expect("consumer_kw column");
        assert_eq!(curve[0], 2.0);
        std::fs::remove_file(&path).ok();
    }
}
