//! full historical schedule reconstruction
//!
//! rebuilds the complete "installments so far + upcoming" view for the admin
//! screen. instead of counting forward from the next payment date, this walks
//! backward one month per validated payment to infer each historical due date,
//! then walks forward assigning payments to installments in order.
//!
//! known limitation: the assignment assumes payments arrived in due-date
//! order. when a client pays out of chronological order the paid/overdue
//! attribution per installment is approximate; the running balance is still
//! exact because it subtracts actual amounts paid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::dates::add_months_clamped;
use crate::decimal::Money;
use crate::schedule::status_as_of;
use crate::types::{InstallmentStatus, PaymentRecord, PlanShape};

/// one reconstructed installment, past or future
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub number: u32,
    pub due_date: NaiveDate,
    /// nominal amount due
    pub amount: Money,
    /// actual amount of the payment assigned to this installment
    pub paid_amount: Option<Money>,
    pub paid_on: Option<NaiveDate>,
    pub status: InstallmentStatus,
    /// balance still owed after this installment, decremented by actual
    /// amounts paid rather than nominal amounts
    pub remaining_balance: Money,
}

/// reconstruct the full installment timeline for a client as of `today`
pub fn payment_timeline(
    client: &Client,
    history: &[PaymentRecord],
    today: NaiveDate,
) -> Vec<TimelineEntry> {
    let mut paid: Vec<&PaymentRecord> =
        history.iter().filter(|r| r.is_validated()).collect();
    paid.sort_by_key(|r| r.payment_date);
    let paid_count = paid.len() as u32;

    let (total_installments, starting_balance) = match client.plan_shape() {
        PlanShape::Financed => {
            let total = if client.total_with_interest.is_positive() {
                client.total_with_interest
            } else {
                client.payment_amount * Decimal::from(client.financing_plan)
            };
            (client.financing_plan, total)
        }
        PlanShape::SinglePayment => {
            let total = if client.total_with_iva.is_positive() {
                client.total_with_iva
            } else {
                client.payment_amount
            };
            (1, total)
        }
        PlanShape::OpenEndedRecurring => {
            // no fixed total exists; show everything paid plus the next one
            let count = paid_count + 1;
            (count, client.payment_amount * Decimal::from(count))
        }
    };

    let mut entries = Vec::with_capacity(total_installments as usize);
    let mut balance = starting_balance;

    for number in 1..=total_installments {
        // installment 1 sits `paid_count` months before the stored next
        // payment date; the offset form keeps the anchor day from drifting
        // through short months
        let offset = number as i32 - 1 - paid_count as i32;
        let due_date =
            add_months_clamped(client.next_payment_date, offset, client.payment_day_of_month);

        let payment = paid.get(number as usize - 1);
        let (paid_amount, paid_on, status) = match payment {
            Some(record) => {
                balance = (balance - record.amount_paid).max(Money::ZERO);
                (
                    Some(record.amount_paid),
                    Some(record.payment_date),
                    InstallmentStatus::Paid,
                )
            }
            None => (None, None, status_as_of(due_date, today)),
        };

        entries.push(TimelineEntry {
            number,
            due_date,
            amount: client.payment_amount,
            paid_amount,
            paid_on,
            status,
            remaining_balance: balance,
        });
    }

    entries
}
