//! Schema command - print expected input formats

use crate::core::BatchInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or csv-header
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the batch input format
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(BatchInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Input Format");
        println!("================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", name, req, description);
        }
        println!();
        println!("Rates are percentages: 18 means 18%");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &[
    "method",
    "purchase_price",
    "gst_rate_purchase",
    "sale_price_excl_gst",
    "sale_price_incl_gst",
    "gst_rate_sale",
    "transport_cost",
    "goodwill_spent",
    "description",
];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    (
        "method",
        true,
        "exclusive or inclusive; selects the authoritative sale price column",
    ),
    ("purchase_price", true, "Purchase price without GST"),
    (
        "gst_rate_purchase",
        true,
        "GST rate on the purchase, percent",
    ),
    (
        "sale_price_excl_gst",
        false,
        "Sale price without GST (required when method = exclusive)",
    ),
    (
        "sale_price_incl_gst",
        false,
        "Sale price with GST embedded (required when method = inclusive)",
    ),
    ("gst_rate_sale", true, "GST rate on the sale, percent"),
    ("transport_cost", false, "Transport cost (default 0)"),
    ("goodwill_spent", false, "Goodwill spent (default 0)"),
    ("description", false, "Optional label echoed in output"),
];
