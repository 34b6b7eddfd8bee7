//! Flat-text formats read and written by the store.
//!
//! Input files are whitespace-separated `phone relays minutes` triples read
//! until end of input. Export files hold one tab-separated record per line
//! with all seven fields at two decimals; they can be loaded back, in which
//! case only the first three columns are used.

use std::io::Write;

use crate::error::{Error, Result};
use crate::record::CallRecord;

/// Number of columns in an export line.
pub const EXPORT_COLUMNS: usize = 7;

/// Layout of an input file, detected from its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLayout {
    /// Repeating `phone relays minutes` triples, line breaks insignificant.
    Triples,
    /// One exported record per line.
    Export,
}

impl InputLayout {
    /// Detect the layout of the given input.
    ///
    /// Input is an export only when every non-blank line holds exactly
    /// [`EXPORT_COLUMNS`] tab-separated fields; anything else is triples.
    #[must_use]
    pub fn detect(input: &str) -> Self {
        let mut lines = input
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .peekable();

        // Empty input has no records either way
        if lines.peek().is_none() {
            return Self::Triples;
        }

        if lines.all(|line| line.split('\t').count() == EXPORT_COLUMNS) {
            Self::Export
        } else {
            Self::Triples
        }
    }
}

/// Parse every record in `input`.
///
/// Records come back unprocessed. Nothing is returned unless the whole input
/// parses.
///
/// # Errors
///
/// Returns [`Error::Parse`] on a malformed number or a trailing incomplete
/// triple.
pub fn parse_records(input: &str) -> Result<Vec<CallRecord>> {
    match InputLayout::detect(input) {
        InputLayout::Triples => parse_triples(input),
        InputLayout::Export => parse_export_lines(input),
    }
}

fn parse_triples(input: &str) -> Result<Vec<CallRecord>> {
    let mut tokens = input
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |token| (i + 1, token)));

    let mut records = Vec::new();
    while let Some((line, phone_number)) = tokens.next() {
        let (line, token) = tokens.next().ok_or_else(|| {
            Error::parse(line, format!("missing relay stations for {phone_number}"))
        })?;
        let relay_stations = parse_number(line, token, "relay stations")?;

        let (line, token) = tokens.next().ok_or_else(|| {
            Error::parse(line, format!("missing call length for {phone_number}"))
        })?;
        let length_minutes = parse_number(line, token, "call length")?;

        records.push(CallRecord::unprocessed(
            phone_number,
            relay_stations,
            length_minutes,
        ));
    }
    Ok(records)
}

fn parse_export_lines(input: &str) -> Result<Vec<CallRecord>> {
    let mut records = Vec::new();
    for (i, text) in input.lines().enumerate() {
        let line = i + 1;
        let text = text.trim_end();
        if text.trim().is_empty() {
            continue;
        }
        let columns: Vec<&str> = text.split('\t').map(str::trim).collect();
        if columns.len() != EXPORT_COLUMNS {
            return Err(Error::parse(
                line,
                format!(
                    "expected {EXPORT_COLUMNS} columns, found {}",
                    columns.len()
                ),
            ));
        }

        let relay_stations = parse_number(line, columns[1], "relay stations")?;
        let length_minutes = parse_number(line, columns[2], "call length")?;
        for derived in &columns[3..] {
            parse_number(line, derived, "billing amount")?;
        }

        records.push(CallRecord::unprocessed(
            columns[0],
            relay_stations,
            length_minutes,
        ));
    }
    Ok(records)
}

fn parse_number(line: usize, token: &str, field: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::parse(line, format!("expected {field}, found {token:?}")))
}

/// Format one record as an export line (without the line terminator).
#[must_use]
pub fn export_line(record: &CallRecord) -> String {
    format!(
        "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
        record.phone_number,
        record.relay_stations,
        record.length_minutes,
        record.net_cost,
        record.tax_rate,
        record.call_tax,
        record.total_cost,
    )
}

/// Write records in export format, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_export<'a, W: Write>(
    mut writer: W,
    records: impl IntoIterator<Item = &'a CallRecord>,
) -> Result<usize> {
    let mut written = 0;
    for record in records {
        writeln!(writer, "{}", export_line(record))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_layout() {
        assert_eq!(InputLayout::detect("555 10 60\n"), InputLayout::Triples);
        assert_eq!(
            InputLayout::detect("\n555\t10.00\t60.00\t4.80\t0.03\t0.14\t4.94\n"),
            InputLayout::Export
        );
        assert_eq!(InputLayout::detect(""), InputLayout::Triples);
    }

    #[test]
    fn test_parse_triples_one_per_line() {
        let records = parse_records("555-0100 10 60\n555-0101 3 2.5\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].phone_number, "555-0100");
        assert!((records[0].relay_stations - 10.0).abs() < f64::EPSILON);
        assert!((records[1].length_minutes - 2.5).abs() < f64::EPSILON);
        assert!(records.iter().all(|r| r.net_cost == 0.0));
    }

    #[test]
    fn test_parse_triples_ignore_line_breaks() {
        let records = parse_records("555-0100 10\n60 555-0101\n3 2.5").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].phone_number, "555-0101");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_incomplete_triple() {
        let err = parse_records("555-0100 10 60\n555-0101 3\n").unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("call length"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse_records("555-0100 ten 60").unwrap_err();
        assert!(err.to_string().contains("\"ten\""));
    }

    #[test]
    fn test_parse_export_lines_ignores_derived() {
        let input = "555-0100\t10.00\t60.00\t4.80\t0.03\t0.14\t4.94\n\
                     555-0101\t3.00\t2.50\t0.06\t0.01\t0.00\t0.06\n";
        let records = parse_records(input).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].phone_number, "555-0101");
        assert_eq!(records[0].net_cost, 0.0);
        assert_eq!(records[0].total_cost, 0.0);
    }

    #[test]
    fn test_parse_export_short_line() {
        // A short line means the file is not an export; as triples it is malformed
        let input = "555-0100\t10.00\t60.00\t4.80\t0.03\t0.14\t4.94\n555-0101\t3.00\n";
        assert_eq!(InputLayout::detect(input), InputLayout::Triples);
        let err = parse_records(input).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_triples_with_seven_tokens_on_first_line() {
        let input = "A 1 1 B 2 2 C\n3 3\n";
        assert_eq!(InputLayout::detect(input), InputLayout::Triples);

        let records = parse_records(input).unwrap();
        let numbers: Vec<&str> = records.iter().map(|r| r.phone_number.as_str()).collect();
        assert_eq!(numbers, vec!["A", "B", "C"]);
        assert!((records[2].relay_stations - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_export_with_trailing_tab() {
        let input = "555-0100\t10.00\t60.00\t4.80\t0.03\t0.14\t4.94\t\n";
        assert_eq!(InputLayout::detect(input), InputLayout::Export);
        assert_eq!(parse_records(input).unwrap().len(), 1);
    }

    #[test]
    fn test_export_line_format() {
        let record = CallRecord::priced("555-0100", 10.0, 60.0);
        assert_eq!(
            export_line(&record),
            "555-0100\t10.00\t60.00\t4.80\t0.03\t0.14\t4.94"
        );
    }

    #[test]
    fn test_write_export() {
        let records = vec![
            CallRecord::unprocessed("a", 1.0, 2.0),
            CallRecord::unprocessed("b", 3.0, 4.0),
        ];
        let mut out = Vec::new();
        let written = write_export(&mut out, &records).unwrap();

        assert_eq!(written, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "a\t1.00\t2.00\t0.00\t0.00\t0.00\t0.00\nb\t3.00\t4.00\t0.00\t0.00\t0.00\t0.00\n"
        );
    }
}
