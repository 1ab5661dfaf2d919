//! financing calculator
//!
//! derives the full financial breakdown of a contract: IVA, down payment,
//! financed balance, flat interest and the periodic installment. pure function
//! of its inputs; business-rule edge cases degrade to zero-amount branches and
//! never error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::FinancingCatalog;
use crate::decimal::{Money, Rate};

/// fixed value-added tax rate (19%), toggleable per contract but not
/// configurable
pub const IVA_RATE: Decimal = dec!(0.19);

/// raw contract inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    /// pre-tax contract price; zero means pure recurring service
    pub contract_value: Money,
    pub apply_iva: bool,
    /// percentage of the tax-inclusive total paid up front, [0, 100]
    pub down_payment_percentage: Decimal,
    /// catalog key, which doubles as the term in months; 0 means pay in full
    pub plan_key: u32,
}

impl ContractTerms {
    /// terms for the self-registration flow, which exposes no down-payment path
    pub fn self_registered(contract_value: Money, apply_iva: bool, plan_key: u32) -> Self {
        Self {
            contract_value,
            apply_iva,
            down_payment_percentage: Decimal::ZERO,
            plan_key,
        }
    }
}

/// derived financial breakdown, denormalized onto the client on write
///
/// every figure is kept at full precision except `monthly_installment`, which
/// is rounded to 2 decimal places. the small residual between
/// `total_with_interest` and `monthly_installment × term` is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FinancingBreakdown {
    pub iva_amount: Money,
    pub total_with_iva: Money,
    pub down_payment: Money,
    pub amount_to_finance: Money,
    pub interest_rate_applied: Rate,
    pub interest_amount: Money,
    pub total_with_interest: Money,
    pub monthly_installment: Money,
}

/// compute the financing breakdown for a contract
///
/// branch map:
/// - no contract value: all-zero breakdown, the caller supplies the recurring
///   amount directly
/// - plan key 0: single due amount equal to the tax-inclusive total
/// - known plan key with a positive financed balance: flat interest applied
///   once, installment = total / term rounded to 2 dp
/// - anything else (unknown key, or financing requested with nothing left to
///   finance): zero installment, the client is paid off at signing
pub fn compute_financing(terms: &ContractTerms, catalog: &FinancingCatalog) -> FinancingBreakdown {
    // defensive coercion: negative inputs behave as zero
    let contract_value = terms.contract_value.max(Money::ZERO);
    if !contract_value.is_positive() {
        return FinancingBreakdown::default();
    }

    let iva_amount = if terms.apply_iva {
        contract_value * IVA_RATE
    } else {
        Money::ZERO
    };
    let total_with_iva = contract_value + iva_amount;

    let pct = terms
        .down_payment_percentage
        .clamp(Decimal::ZERO, dec!(100));
    let down_payment = total_with_iva.percentage(pct);
    let amount_to_finance = (total_with_iva - down_payment).max(Money::ZERO);

    if terms.plan_key == 0 {
        // pay in full: one due amount, no interest math
        return FinancingBreakdown {
            iva_amount,
            total_with_iva,
            down_payment,
            amount_to_finance,
            monthly_installment: total_with_iva,
            ..Default::default()
        };
    }

    match catalog.rate_for(terms.plan_key) {
        Some(rate) if amount_to_finance.is_positive() => {
            let interest_amount = amount_to_finance * rate.as_decimal();
            let total_with_interest = amount_to_finance + interest_amount;
            let monthly_installment =
                (total_with_interest / Decimal::from(terms.plan_key)).round_dp(2);
            FinancingBreakdown {
                iva_amount,
                total_with_iva,
                down_payment,
                amount_to_finance,
                interest_rate_applied: rate,
                interest_amount,
                total_with_interest,
                monthly_installment,
            }
        }
        // unknown plan key, or financed balance already covered by the down
        // payment: nothing periodic is due
        _ => FinancingBreakdown {
            iva_amount,
            total_with_iva,
            down_payment,
            amount_to_finance,
            ..Default::default()
        },
    }
}
