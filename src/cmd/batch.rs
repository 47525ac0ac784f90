//! Batch command - evaluate a file of independent calculations

use crate::cmd::{format_inr, format_inr_signed, outcome, read_batch, BatchEntry};
use crate::core::{calculate, CalculationResult};
use anyhow::Context;
use clap::Args;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV or JSON file of calculations (or "-" for JSON on stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// Row for the batch table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct CalculationRow {
    #[tabled(rename = "#")]
    #[serde(rename = "row_num")]
    pub row_num: String,

    #[tabled(rename = "Method")]
    pub method: String,

    #[tabled(rename = "Sale (excl GST)")]
    pub sale_price_without_gst: String,

    #[tabled(rename = "Total Sale")]
    pub total_sale_amount: String,

    #[tabled(rename = "Purchase Cost")]
    pub total_purchase_cost: String,

    #[tabled(rename = "GST Diff")]
    pub gst_difference: String,

    #[tabled(rename = "Expenses")]
    pub total_expenses: String,

    #[tabled(rename = "Profit Before Tax")]
    pub profit_before_tax: String,

    #[tabled(rename = "Tax")]
    pub tax_amount: String,

    #[tabled(rename = "Net Profit")]
    pub net_profit_after_tax: String,

    #[tabled(rename = "Outcome")]
    pub outcome: String,

    #[tabled(rename = "Description")]
    pub description: String,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let entries = read_batch(&self.file)?;

        let mut rows = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            let result =
                calculate(&entry.input).with_context(|| format!("calculation {}", i + 1))?;
            rows.push(build_row(i + 1, entry, &result));
        }

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[CalculationRow]) {
        if rows.is_empty() {
            println!("No calculations found in input");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, rows: &[CalculationRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn build_row(row_num: usize, entry: &BatchEntry, result: &CalculationResult) -> CalculationRow {
    CalculationRow {
        row_num: format!("#{}", row_num),
        method: entry.input.sale.method_name().to_string(),
        sale_price_without_gst: format_inr(result.sale_price_without_gst),
        total_sale_amount: format_inr(result.total_sale_amount),
        total_purchase_cost: format_inr(result.total_purchase_cost),
        gst_difference: format_inr_signed(result.gst_difference),
        total_expenses: format_inr(result.total_expenses),
        profit_before_tax: format_inr_signed(result.profit_before_tax),
        tax_amount: format_inr(result.tax_amount),
        net_profit_after_tax: format_inr_signed(result.net_profit_after_tax),
        outcome: outcome(result.net_profit_after_tax).to_string(),
        description: entry.description.clone().unwrap_or_default(),
    }
}
