//! Console rendering of call records.
//!
//! All amounts are printed with two decimals.

use crate::error::Result;
use crate::pricing::{TaxBracket, RATE_PER_50_RELAYS};
use crate::record::CallRecord;
use crate::store::Totals;

/// Table column headers.
pub const HEADERS: [&str; 7] = [
    "Cell Phone #",
    "Relays",
    "Min",
    "Net",
    "Rate",
    "Tax",
    "Total Cost",
];

fn header_row() -> String {
    format!(
        "{:<16}{:>9}{:>9}{:>9}{:>7}{:>9}{:>12}",
        HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4], HEADERS[5], HEADERS[6]
    )
}

fn record_row(record: &CallRecord) -> String {
    format!(
        "{:<16}{:>9.2}{:>9.2}{:>9.2}{:>7.2}{:>9.2}{:>12.2}",
        record.phone_number,
        record.relay_stations,
        record.length_minutes,
        record.net_cost,
        record.tax_rate,
        record.call_tax,
        record.total_cost,
    )
}

fn totals_row(totals: &Totals) -> String {
    format!(
        "{:<16}{:>9.2}{:>9.2}{:>9.2}{:>7}{:>9.2}{:>12.2}",
        "Totals",
        totals.relay_stations,
        totals.length_minutes,
        totals.net_cost,
        "N/A",
        totals.call_tax,
        totals.total_cost,
    )
}

/// Render a header row followed by one row per record.
#[must_use]
pub fn render_table<'a>(records: impl IntoIterator<Item = &'a CallRecord>) -> String {
    let mut out = header_row();
    out.push('\n');
    for record in records {
        out.push_str(&record_row(record));
        out.push('\n');
    }
    out
}

/// Render the records of one phone number followed by their totals.
#[must_use]
pub fn render_stats<'a>(
    records: impl IntoIterator<Item = &'a CallRecord>,
    totals: &Totals,
) -> String {
    let mut out = render_table(records);
    out.push_str(&totals_row(totals));
    out.push('\n');
    out
}

/// Render the tax bracket table.
#[must_use]
pub fn render_rates() -> String {
    let mut out = format!("{:<12}{:>6}\n", "Relays", "Rate");
    for bracket in TaxBracket::ALL {
        out.push_str(&format!(
            "{:<12}{:>5}%\n",
            bracket.range_label(),
            bracket.rate_percent()
        ));
    }
    out.push_str(&format!(
        "\nNet cost = relays / 50 * {RATE_PER_50_RELAYS:.2} * minutes\n"
    ));
    out
}

/// Render records as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn records_json<'a>(records: impl IntoIterator<Item = &'a CallRecord>) -> Result<String> {
    let records: Vec<&CallRecord> = records.into_iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Render the records of one phone number and their totals as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn stats_json<'a>(
    records: impl IntoIterator<Item = &'a CallRecord>,
    totals: &Totals,
) -> Result<String> {
    let records: Vec<&CallRecord> = records.into_iter().collect();
    let value = serde_json::json!({
        "records": records,
        "totals": totals,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
