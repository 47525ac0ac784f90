use super::input::{CalcError, CalculationInput, SalePrice};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Other expenses charged on every sale, percent of the GST-exclusive sale
/// price. Fixed system constant, not user-editable.
pub const OTHER_EXPENSES_PERCENT: Decimal = dec!(0.5);

/// Share of the exclusive sale price that is taxed when a deal turns a profit.
pub const TAXABLE_SALE_SHARE: Decimal = dec!(0.02);

/// Rate applied to the taxable share. Together with [`TAXABLE_SALE_SHARE`]
/// this is fixed business policy; it does not scale with the profit itself.
pub const TAX_RATE: Decimal = dec!(0.304);

const HUNDRED: Decimal = dec!(100);

/// Derived results of one calculation.
///
/// `total_sale_amount` always equals `sale_price_without_gst + gst_on_sale`,
/// whichever convention the sale price was entered in.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub sale_price_without_gst: Decimal,
    pub gst_on_sale: Decimal,
    pub total_sale_amount: Decimal,
    pub purchase_price_without_gst: Decimal,
    pub gst_on_purchase: Decimal,
    pub total_purchase_cost: Decimal,
    /// GST collected on the sale minus GST paid on the purchase; may be negative
    pub gst_difference: Decimal,
    /// Exclusive sale price minus purchase price; may be negative
    pub gross_profit: Decimal,
    pub other_expenses: Decimal,
    pub total_expenses: Decimal,
    pub profit_before_tax: Decimal,
    pub tax_amount: Decimal,
    pub net_profit_after_tax: Decimal,
    /// True iff profit before tax was positive and the levy applied
    pub tax_applicable: bool,
}

/// Derive the full result set for one buy/sell transaction.
///
/// Rejects negative inputs up front; otherwise the computation is total,
/// deterministic and side-effect free. Break-even and loss both go untaxed;
/// callers distinguish them by the sign of `net_profit_after_tax`.
pub fn calculate(input: &CalculationInput) -> Result<CalculationResult, CalcError> {
    input.validate()?;

    // Normalize the sale to its GST-exclusive basis. For an inclusive price
    // the GST is backed out; a zero rate divides by one and changes nothing.
    let (sale_price_without_gst, gst_on_sale, total_sale_amount) = match input.sale {
        SalePrice::Exclusive { sale_price_excl_gst } => {
            let gst = sale_price_excl_gst * input.gst_rate_sale / HUNDRED;
            (sale_price_excl_gst, gst, sale_price_excl_gst + gst)
        }
        SalePrice::Inclusive { sale_price_incl_gst } => {
            let base = sale_price_incl_gst / (Decimal::ONE + input.gst_rate_sale / HUNDRED);
            (base, sale_price_incl_gst - base, sale_price_incl_gst)
        }
    };
    log::debug!(
        "sale basis ({}): excl={}, gst={}, total={}",
        input.sale.method_name(),
        sale_price_without_gst,
        gst_on_sale,
        total_sale_amount
    );

    let gst_on_purchase = input.purchase_price * input.gst_rate_purchase / HUNDRED;
    let total_purchase_cost = input.purchase_price + gst_on_purchase;

    let gst_difference = gst_on_sale - gst_on_purchase;
    let gross_profit = sale_price_without_gst - input.purchase_price;

    let other_expenses = sale_price_without_gst * OTHER_EXPENSES_PERCENT / HUNDRED;
    let total_expenses = input.transport_cost + other_expenses + input.goodwill_spent;
    let profit_before_tax = gross_profit - total_expenses;

    // The levy hits only profitable deals and is charged on the exclusive
    // sale price, not on the profit itself.
    let (tax_amount, tax_applicable) = if profit_before_tax > Decimal::ZERO {
        (sale_price_without_gst * TAXABLE_SALE_SHARE * TAX_RATE, true)
    } else {
        (Decimal::ZERO, false)
    };
    let net_profit_after_tax = profit_before_tax - tax_amount;
    log::debug!(
        "profit_before_tax={}, tax={}, net={}",
        profit_before_tax,
        tax_amount,
        net_profit_after_tax
    );

    Ok(CalculationResult {
        sale_price_without_gst,
        gst_on_sale,
        total_sale_amount,
        purchase_price_without_gst: input.purchase_price,
        gst_on_purchase,
        total_purchase_cost,
        gst_difference,
        gross_profit,
        other_expenses,
        total_expenses,
        profit_before_tax,
        tax_amount,
        net_profit_after_tax,
        tax_applicable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn exclusive(purchase_price: Decimal, sale_price: Decimal) -> CalculationInput {
        CalculationInput {
            sale: SalePrice::Exclusive {
                sale_price_excl_gst: sale_price,
            },
            purchase_price,
            gst_rate_purchase: dec!(18),
            gst_rate_sale: dec!(18),
            transport_cost: Decimal::ZERO,
            goodwill_spent: Decimal::ZERO,
        }
    }

    fn inclusive(purchase_price: Decimal, sale_price: Decimal) -> CalculationInput {
        CalculationInput {
            sale: SalePrice::Inclusive {
                sale_price_incl_gst: sale_price,
            },
            purchase_price,
            gst_rate_purchase: dec!(18),
            gst_rate_sale: dec!(18),
            transport_cost: Decimal::ZERO,
            goodwill_spent: Decimal::ZERO,
        }
    }

    #[test]
    fn exclusive_method_full_breakdown() {
        let mut input = exclusive(dec!(6450), dec!(7400));
        input.goodwill_spent = dec!(100);

        let result = calculate(&input).unwrap();
        assert_eq!(result.sale_price_without_gst, dec!(7400));
        assert_eq!(result.gst_on_sale, dec!(1332));
        assert_eq!(result.total_sale_amount, dec!(8732));
        assert_eq!(result.purchase_price_without_gst, dec!(6450));
        assert_eq!(result.gst_on_purchase, dec!(1161));
        assert_eq!(result.total_purchase_cost, dec!(7611));
        assert_eq!(result.gst_difference, dec!(171));
        assert_eq!(result.gross_profit, dec!(950));
        assert_eq!(result.other_expenses, dec!(37));
        assert_eq!(result.total_expenses, dec!(137));
        assert_eq!(result.profit_before_tax, dec!(813));
        assert_eq!(result.tax_amount, dec!(44.992));
        assert_eq!(result.net_profit_after_tax, dec!(768.008));
        assert!(result.tax_applicable);
    }

    #[test]
    fn inclusive_method_backs_out_gst() {
        let input = inclusive(dec!(6450), dec!(8500));

        let result = calculate(&input).unwrap();
        assert_eq!(result.sale_price_without_gst.round_dp(2), dec!(7203.39));
        assert_eq!(result.gst_on_sale.round_dp(2), dec!(1296.61));
        assert_eq!(result.total_sale_amount, dec!(8500));
    }

    #[test]
    fn total_sale_equals_base_plus_gst_for_both_methods() {
        for input in [
            exclusive(dec!(6450), dec!(7400)),
            inclusive(dec!(6450), dec!(8500)),
            inclusive(dec!(100), dec!(333.33)),
            exclusive(dec!(0), dec!(0)),
        ] {
            let result = calculate(&input).unwrap();
            assert_eq!(
                result.total_sale_amount,
                result.sale_price_without_gst + result.gst_on_sale
            );
        }
    }

    #[test]
    fn methods_round_trip() {
        // Entering P exclusive, or P plus its GST inclusive, lands on the
        // same exclusive base.
        for (price, rate) in [(dec!(7400), dec!(18)), (dec!(250.40), dec!(12.5))] {
            let mut excl = exclusive(dec!(100), price);
            excl.gst_rate_sale = rate;
            let mut incl = inclusive(dec!(100), price * (Decimal::ONE + rate / dec!(100)));
            incl.gst_rate_sale = rate;

            let from_excl = calculate(&excl).unwrap();
            let from_incl = calculate(&incl).unwrap();
            assert_eq!(
                from_excl.sale_price_without_gst.round_dp(8),
                from_incl.sale_price_without_gst.round_dp(8)
            );
            assert_eq!(
                from_excl.gst_on_sale.round_dp(8),
                from_incl.gst_on_sale.round_dp(8)
            );
        }
    }

    #[test]
    fn zero_sale_rate_inclusive_is_identity() {
        let mut input = inclusive(dec!(100), dec!(8500));
        input.gst_rate_sale = Decimal::ZERO;

        let result = calculate(&input).unwrap();
        assert_eq!(result.sale_price_without_gst, dec!(8500));
        assert_eq!(result.gst_on_sale, Decimal::ZERO);
        assert_eq!(result.total_sale_amount, dec!(8500));
    }

    #[test]
    fn tax_is_exact_share_of_sale_when_profitable() {
        let input = exclusive(dec!(6450), dec!(7400));
        let result = calculate(&input).unwrap();
        assert!(result.profit_before_tax > Decimal::ZERO);
        assert_eq!(result.tax_amount, dec!(7400) * dec!(0.00608));
    }

    #[test]
    fn loss_goes_untaxed() {
        let input = exclusive(dec!(9000), dec!(7400));

        let result = calculate(&input).unwrap();
        assert!(result.profit_before_tax < Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert!(!result.tax_applicable);
        assert_eq!(result.net_profit_after_tax, result.profit_before_tax);
    }

    #[test]
    fn break_even_goes_untaxed() {
        // gross profit 5 exactly cancels the 0.5% other expenses on 1000
        let input = exclusive(dec!(995), dec!(1000));

        let result = calculate(&input).unwrap();
        assert_eq!(result.profit_before_tax, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert!(!result.tax_applicable);
        assert_eq!(result.net_profit_after_tax, Decimal::ZERO);
    }

    #[test]
    fn all_zero_inputs_derive_to_zero() {
        let mut input = exclusive(Decimal::ZERO, Decimal::ZERO);
        input.gst_rate_purchase = Decimal::ZERO;
        input.gst_rate_sale = Decimal::ZERO;

        let result = calculate(&input).unwrap();
        assert_eq!(result.total_sale_amount, Decimal::ZERO);
        assert_eq!(result.total_purchase_cost, Decimal::ZERO);
        assert_eq!(result.gross_profit, Decimal::ZERO);
        assert_eq!(result.total_expenses, Decimal::ZERO);
        assert_eq!(result.profit_before_tax, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.net_profit_after_tax, Decimal::ZERO);
        assert!(!result.tax_applicable);
    }

    #[test]
    fn higher_purchase_price_means_lower_profit() {
        let cheap = calculate(&exclusive(dec!(6000), dec!(7400))).unwrap();
        let dear = calculate(&exclusive(dec!(6450), dec!(7400))).unwrap();
        assert!(dear.gross_profit < cheap.gross_profit);
        assert!(dear.net_profit_after_tax < cheap.net_profit_after_tax);

        // Crossing into loss territory stays non-increasing
        let ruinous = calculate(&exclusive(dec!(9000), dec!(7400))).unwrap();
        assert!(ruinous.net_profit_after_tax <= dear.net_profit_after_tax);
    }

    #[test]
    fn negative_input_fails_fast() {
        let input = exclusive(dec!(-1), dec!(7400));
        assert_eq!(
            calculate(&input).unwrap_err(),
            CalcError::NegativeInput {
                field: "purchase_price",
                value: dec!(-1)
            }
        );
    }
}
