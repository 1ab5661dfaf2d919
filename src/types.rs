use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a client
pub type ClientId = Uuid;

/// contract values below this ceiling, with no financing plan, are treated as
/// small one-off contracts rather than open-ended recurring service.
///
/// the value is a product decision inherited from the billing rules; do not
/// change it without confirmation.
pub const SINGLE_PAYMENT_CEILING: Money =
    Money::from_raw(Decimal::from_parts(1_000_000, 0, 0, false, 0));

/// client lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// paying according to plan
    Active,
    /// all obligations satisfied, schedule yields nothing
    Completed,
    /// flagged externally, no automatic transition into or out of it
    Defaulted,
    /// self-registered, awaiting admin approval
    PendingApproval,
}

/// payment record validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// submitted, proof not yet reviewed
    Pending,
    /// accepted by an administrator; the only kind that advances the schedule
    Validated,
    /// proof rejected, kept for audit only
    Rejected,
}

/// status of a single installment relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Paid,
    Pending,
    Overdue,
}

/// historical payment record, subordinate to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_date: NaiveDate,
    pub amount_paid: Money,
    pub recorded_at: DateTime<Utc>,
    pub status: PaymentStatus,
}

impl PaymentRecord {
    pub fn is_validated(&self) -> bool {
        self.status == PaymentStatus::Validated
    }
}

/// the three schedule shapes a client can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanShape {
    /// small one-off contract, exactly one due amount
    SinglePayment,
    /// fixed term, flat installment amount per month
    Financed,
    /// recurring service with no fixed end
    OpenEndedRecurring,
}

impl PlanShape {
    /// classify from the plan term and contract value
    pub fn classify(financing_plan: u32, contract_value: Money) -> Self {
        if financing_plan > 0 {
            PlanShape::Financed
        } else if contract_value.is_positive() && contract_value < SINGLE_PAYMENT_CEILING {
            PlanShape::SinglePayment
        } else {
            PlanShape::OpenEndedRecurring
        }
    }
}
