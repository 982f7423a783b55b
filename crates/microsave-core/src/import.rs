//! CSV import for raw transactions
//!
//! Expected layout, header row required, column order free:
//!
//! ```text
//! date,amount
//! 2023-10-12 20:15:30,250
//! 2023-02-28 15:49:20,375
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RawTransaction;
use crate::period::Timestamp;

/// Parse `date,amount` CSV data into raw transactions, preserving row order
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_col = column_index(&headers, "date")?;
    let amount_col = column_index(&headers, "amount")?;

    let mut transactions = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = i + 2;

        let date_str = record
            .get(date_col)
            .ok_or_else(|| Error::Import(format!("line {}: missing date", line)))?;
        let amount_str = record
            .get(amount_col)
            .ok_or_else(|| Error::Import(format!("line {}: missing amount", line)))?;

        let date = Timestamp::parse(date_str)
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;
        let amount = parse_amount(amount_str)
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        transactions.push(RawTransaction { date, amount });
    }

    debug!(count = transactions.len(), "Parsed transactions CSV");
    Ok(transactions)
}

/// Open and parse a CSV file
pub fn read_transactions_csv(path: &Path) -> Result<Vec<RawTransaction>> {
    let file = File::open(path)?;
    parse_transactions_csv(file)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::Import(format!("missing '{}' column", name)))
}

fn parse_amount(s: &str) -> Result<f64> {
    let amount: f64 = s
        .parse()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))?;
    if !amount.is_finite() {
        return Err(Error::Import(format!("Amount is not finite: {}", s)));
    }
    Ok(amount)
}
