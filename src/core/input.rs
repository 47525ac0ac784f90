use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("negative {field}: {value}")]
    NegativeInput { field: &'static str, value: Decimal },
    #[error("unknown sale method: {0} (expected \"exclusive\" or \"inclusive\")")]
    UnknownMethod(String),
    #[error("sale_price_excl_gst required for the exclusive method")]
    MissingExclusivePrice,
    #[error("sale_price_incl_gst required for the inclusive method")]
    MissingInclusivePrice,
}

/// Sale price in one of the two entry conventions.
///
/// The variant is the method selector: each carries only the amount that is
/// authoritative under that convention, so an input can never hold a price
/// that disagrees with its method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalePrice {
    /// Sale price entered without GST
    Exclusive { sale_price_excl_gst: Decimal },
    /// Sale price entered with GST already embedded
    Inclusive { sale_price_incl_gst: Decimal },
}

impl SalePrice {
    pub fn amount(&self) -> Decimal {
        match self {
            SalePrice::Exclusive { sale_price_excl_gst } => *sale_price_excl_gst,
            SalePrice::Inclusive { sale_price_incl_gst } => *sale_price_incl_gst,
        }
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            SalePrice::Exclusive { .. } => "exclusive",
            SalePrice::Inclusive { .. } => "inclusive",
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            SalePrice::Exclusive { .. } => "sale_price_excl_gst",
            SalePrice::Inclusive { .. } => "sale_price_incl_gst",
        }
    }
}

/// Inputs for one buy/sell profit calculation.
///
/// Constructed per invocation; all amounts and rates must be non-negative.
/// Rates are percentages (18.0 means 18%).
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    pub sale: SalePrice,
    /// Purchase price without GST
    pub purchase_price: Decimal,
    pub gst_rate_purchase: Decimal,
    pub gst_rate_sale: Decimal,
    pub transport_cost: Decimal,
    pub goodwill_spent: Decimal,
}

impl CalculationInput {
    /// Reject negative amounts or rates before any derivation runs.
    ///
    /// Non-negative rates also keep the inclusive-method divisor
    /// `1 + rate/100` at or above one.
    pub fn validate(&self) -> Result<(), CalcError> {
        let fields = [
            (self.sale.field_name(), self.sale.amount()),
            ("purchase_price", self.purchase_price),
            ("gst_rate_purchase", self.gst_rate_purchase),
            ("gst_rate_sale", self.gst_rate_sale),
            ("transport_cost", self.transport_cost),
            ("goodwill_spent", self.goodwill_spent),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(CalcError::NegativeInput { field, value });
            }
        }
        Ok(())
    }
}

/// Root of the batch JSON input
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchInput {
    pub calculations: Vec<CalculationRecord>,
}

/// Flat record as it arrives from CSV rows or batch JSON.
///
/// `method` selects which of the two sale price columns is authoritative;
/// the other may be left empty.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CalculationRecord {
    /// "exclusive" or "inclusive"
    pub method: String,
    /// Purchase price without GST
    #[schemars(with = "f64")]
    pub purchase_price: Decimal,
    /// GST rate on the purchase, percent (18 = 18%)
    #[schemars(with = "f64")]
    pub gst_rate_purchase: Decimal,
    /// Sale price without GST (required when method = exclusive)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub sale_price_excl_gst: Option<Decimal>,
    /// Sale price with GST embedded (required when method = inclusive)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub sale_price_incl_gst: Option<Decimal>,
    /// GST rate on the sale, percent
    #[schemars(with = "f64")]
    pub gst_rate_sale: Decimal,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub transport_cost: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub goodwill_spent: Option<Decimal>,
    /// Optional label echoed in output
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<CalculationRecord> for CalculationInput {
    type Error = CalcError;

    fn try_from(record: CalculationRecord) -> Result<Self, CalcError> {
        let sale = match record.method.to_lowercase().as_str() {
            "exclusive" => SalePrice::Exclusive {
                sale_price_excl_gst: record
                    .sale_price_excl_gst
                    .ok_or(CalcError::MissingExclusivePrice)?,
            },
            "inclusive" => SalePrice::Inclusive {
                sale_price_incl_gst: record
                    .sale_price_incl_gst
                    .ok_or(CalcError::MissingInclusivePrice)?,
            },
            other => return Err(CalcError::UnknownMethod(other.to_string())),
        };

        Ok(CalculationInput {
            sale,
            purchase_price: record.purchase_price,
            gst_rate_purchase: record.gst_rate_purchase,
            gst_rate_sale: record.gst_rate_sale,
            transport_cost: record.transport_cost.unwrap_or(Decimal::ZERO),
            goodwill_spent: record.goodwill_spent.unwrap_or(Decimal::ZERO),
        })
    }
}
