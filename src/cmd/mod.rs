pub mod batch;
pub mod calc;
pub mod schema;

use crate::core::{BatchInput, CalculationInput, CalculationRecord};
use anyhow::Context;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// One batch entry: the converted input plus its label from the source row.
pub struct BatchEntry {
    pub input: CalculationInput,
    pub description: Option<String>,
}

/// Read calculations from a CSV or JSON file (or JSON on stdin with "-"),
/// dispatching on the file extension.
pub fn read_batch(path: &Path) -> anyhow::Result<Vec<BatchEntry>> {
    if path.as_os_str() == "-" {
        return read_from_stdin();
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => read_json(reader),
        // Default to CSV for .csv files and any other extension
        _ => read_csv(reader),
    }
}

fn read_from_stdin() -> anyhow::Result<Vec<BatchEntry>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_json(io::Cursor::new(buffer))
}

fn read_json<R: Read>(reader: R) -> anyhow::Result<Vec<BatchEntry>> {
    let batch: BatchInput = serde_json::from_reader(reader)?;
    log::info!("Read {} calculations", batch.calculations.len());
    batch
        .calculations
        .into_iter()
        .enumerate()
        .map(|(i, record)| convert(record).with_context(|| format!("calculation {}", i + 1)))
        .collect()
}

fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<BatchEntry>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for (i, result) in rdr.deserialize::<CalculationRecord>().enumerate() {
        let record = result.with_context(|| format!("csv row {}", i + 1))?;
        entries.push(convert(record).with_context(|| format!("csv row {}", i + 1))?);
    }
    log::info!("Read {} csv records", entries.len());
    Ok(entries)
}

fn convert(record: CalculationRecord) -> anyhow::Result<BatchEntry> {
    let description = record.description.clone();
    let input = CalculationInput::try_from(record)?;
    Ok(BatchEntry { input, description })
}

pub(crate) fn format_inr(amount: Decimal) -> String {
    format!("\u{20B9}{:.2}", amount.round_dp(2))
}

pub(crate) fn format_inr_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-\u{20B9}{:.2}", amount.abs().round_dp(2))
    } else {
        format!("\u{20B9}{:.2}", amount.round_dp(2))
    }
}

/// Headline classification by the sign of the net result.
pub(crate) fn outcome(net_profit_after_tax: Decimal) -> &'static str {
    match net_profit_after_tax.cmp(&Decimal::ZERO) {
        std::cmp::Ordering::Greater => "profit",
        std::cmp::Ordering::Equal => "break-even",
        std::cmp::Ordering::Less => "loss",
    }
}
