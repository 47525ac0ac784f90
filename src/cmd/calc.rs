//! Calc command - evaluate a single buy/sell transaction from flags

use crate::cmd::{format_inr, format_inr_signed, outcome};
use crate::core::{
    calculate, CalculationInput, CalculationResult, SalePrice, OTHER_EXPENSES_PERCENT,
};
use clap::{ArgGroup, Args};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Args, Debug)]
#[command(group = ArgGroup::new("sale").required(true))]
pub struct CalcCommand {
    /// Purchase price without GST
    #[arg(long, value_name = "AMOUNT")]
    purchase_price: Decimal,

    /// GST rate on the purchase, percent
    #[arg(long, value_name = "PCT", default_value_t = dec!(18))]
    gst_purchase: Decimal,

    /// Sale price without GST
    #[arg(long, value_name = "AMOUNT", group = "sale")]
    sale_excl: Option<Decimal>,

    /// Sale price with GST included
    #[arg(long, value_name = "AMOUNT", group = "sale")]
    sale_incl: Option<Decimal>,

    /// GST rate on the sale, percent
    #[arg(long, value_name = "PCT", default_value_t = dec!(18))]
    gst_sale: Decimal,

    /// Transport cost
    #[arg(long, value_name = "AMOUNT", default_value_t = Decimal::ZERO)]
    transport: Decimal,

    /// Goodwill spent
    #[arg(long, value_name = "AMOUNT", default_value_t = Decimal::ZERO)]
    goodwill: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Calculation output for JSON consumers. Amounts are 2-decimal strings.
#[derive(Debug, Serialize)]
struct ResultData {
    method: String,
    outcome: String,
    sale_price_without_gst: String,
    gst_on_sale: String,
    total_sale_amount: String,
    purchase_price_without_gst: String,
    gst_on_purchase: String,
    total_purchase_cost: String,
    gst_difference: String,
    gross_profit: String,
    other_expenses: String,
    total_expenses: String,
    profit_before_tax: String,
    tax_amount: String,
    net_profit_after_tax: String,
    tax_applicable: bool,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let sale = match (self.sale_excl, self.sale_incl) {
            (Some(sale_price_excl_gst), None) => SalePrice::Exclusive { sale_price_excl_gst },
            (None, Some(sale_price_incl_gst)) => SalePrice::Inclusive { sale_price_incl_gst },
            _ => unreachable!("arg group enforces exactly one sale price"),
        };
        let input = CalculationInput {
            sale,
            purchase_price: self.purchase_price,
            gst_rate_purchase: self.gst_purchase,
            gst_rate_sale: self.gst_sale,
            transport_cost: self.transport,
            goodwill_spent: self.goodwill,
        };

        let result = calculate(&input)?;

        if self.json {
            self.print_json(&input, &result)
        } else {
            self.print_text(&input, &result);
            Ok(())
        }
    }

    fn print_text(&self, input: &CalculationInput, result: &CalculationResult) {
        println!();
        match outcome(result.net_profit_after_tax) {
            "profit" => println!(
                "NET PROFIT AFTER TAX: {}",
                format_inr(result.net_profit_after_tax)
            ),
            "break-even" => println!("BREAK-EVEN: {}", format_inr(result.net_profit_after_tax)),
            _ => println!(
                "NET LOSS: {}",
                format_inr(result.net_profit_after_tax.abs())
            ),
        }
        println!();

        println!("Profit Before Tax     {}", format_inr_signed(result.profit_before_tax));
        println!("GST Difference        {}", format_inr_signed(result.gst_difference));
        println!("Total Expenses        {}", format_inr(result.total_expenses));
        println!("Taxation              {}", format_inr(result.tax_amount));
        if result.tax_applicable {
            println!("Tax applies: profit before tax is positive");
        } else {
            println!("No tax: profit before tax is zero or negative");
        }
        println!();

        println!("Expenses");
        println!("  Transport           {}", format_inr(input.transport_cost));
        println!(
            "  Other ({}% of sale) {}",
            OTHER_EXPENSES_PERCENT,
            format_inr(result.other_expenses)
        );
        println!("  Goodwill            {}", format_inr(input.goodwill_spent));
        println!();

        println!("Sale");
        println!("  Without GST         {}", format_inr(result.sale_price_without_gst));
        println!("  GST on Sale         {}", format_inr(result.gst_on_sale));
        println!("  Total Sale Amount   {}", format_inr(result.total_sale_amount));
        println!();

        println!("Purchase");
        println!("  Without GST         {}", format_inr(result.purchase_price_without_gst));
        println!("  GST on Purchase     {}", format_inr(result.gst_on_purchase));
        println!("  Total Purchase Cost {}", format_inr(result.total_purchase_cost));
    }

    fn print_json(&self, input: &CalculationInput, result: &CalculationResult) -> anyhow::Result<()> {
        let data = ResultData {
            method: input.sale.method_name().to_string(),
            outcome: outcome(result.net_profit_after_tax).to_string(),
            sale_price_without_gst: format_plain(result.sale_price_without_gst),
            gst_on_sale: format_plain(result.gst_on_sale),
            total_sale_amount: format_plain(result.total_sale_amount),
            purchase_price_without_gst: format_plain(result.purchase_price_without_gst),
            gst_on_purchase: format_plain(result.gst_on_purchase),
            total_purchase_cost: format_plain(result.total_purchase_cost),
            gst_difference: format_plain(result.gst_difference),
            gross_profit: format_plain(result.gross_profit),
            other_expenses: format_plain(result.other_expenses),
            total_expenses: format_plain(result.total_expenses),
            profit_before_tax: format_plain(result.profit_before_tax),
            tax_amount: format_plain(result.tax_amount),
            net_profit_after_tax: format_plain(result.net_profit_after_tax),
            tax_applicable: result.tax_applicable,
        };
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn format_plain(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
