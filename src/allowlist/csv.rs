/// CSV template parsing for the upload flow
///
/// The template is two columns, `address` and `fractions` (percentage of
/// the total), with a required header row. Rows come back verbatim as
/// [`RawAllowlistRow`]s; nothing here judges the values, that is the
/// allocator's and validator's job.
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::Error;

use super::types::RawAllowlistRow;

const ADDRESS_COLUMN: &str = "address";
const FRACTION_COLUMNS: [&str; 2] = ["fractions", "percentage"];

/// Parse uploaded CSV bytes into raw allow-list rows
///
/// Header names are matched case-insensitively; the fraction column may
/// be called `fractions` or `percentage`. A missing column is an
/// [`Error::Csv`]. Rows with both cells blank are skipped.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawAllowlistRow>, Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::Csv(format!("Failed to read header row: {}", e)))?
        .clone();

    let address_idx = find_column(&headers, &[ADDRESS_COLUMN])
        .ok_or_else(|| Error::Csv(format!("Missing '{}' column", ADDRESS_COLUMN)))?;
    let fraction_idx = find_column(&headers, &FRACTION_COLUMNS)
        .ok_or_else(|| Error::Csv(format!("Missing '{}' column", FRACTION_COLUMNS[0])))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::Csv(format!("Row {}: {}", line, e)))?;

        let address = record.get(address_idx).unwrap_or_default();
        let fractions = record.get(fraction_idx).unwrap_or_default();
        if address.is_empty() && fractions.is_empty() {
            continue;
        }

        rows.push(RawAllowlistRow {
            address: address.to_string(),
            fractions: fractions.to_string(),
        });
    }

    debug!(rows = rows.len(), "parsed allow list CSV");
    Ok(rows)
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}
