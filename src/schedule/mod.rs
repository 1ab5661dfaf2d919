//! installment schedule generator
//!
//! derives the forward-looking list of pending installments from a snapshot of
//! a client and its payment history. everything here is recomputed on every
//! read; nothing is persisted.

pub mod timeline;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::dates::add_months_clamped;
use crate::decimal::Money;
use crate::types::{ClientStatus, InstallmentStatus, PaymentRecord, PlanShape};

pub use timeline::{payment_timeline, TimelineEntry};

/// one forward-looking payment obligation, ephemeral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingInstallment {
    /// 1-based position within the plan
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub status: InstallmentStatus,
    pub description: String,
}

/// generate the pending installments for a client as of `today`
///
/// branch map:
/// - completed clients owe nothing, whatever the other fields say
/// - financed plans yield the remaining installments `k+1 ..= n`, the first
///   due on the stored next-payment date and each following one a clamped
///   calendar month later
/// - small one-off contracts yield their single obligation until a validated
///   payment exists
/// - open-ended recurring clients always owe exactly the next payment
pub fn pending_installments(
    client: &Client,
    history: &[PaymentRecord],
    today: NaiveDate,
) -> Vec<PendingInstallment> {
    if client.status == ClientStatus::Completed {
        return Vec::new();
    }

    match client.plan_shape() {
        PlanShape::Financed => financed_installments(client, today),
        PlanShape::SinglePayment => single_installment(client, history, today),
        PlanShape::OpenEndedRecurring => vec![next_recurring_installment(client, today)],
    }
}

fn financed_installments(client: &Client, today: NaiveDate) -> Vec<PendingInstallment> {
    let total = client.financing_plan;
    let first = client.payments_made_count + 1;
    let mut installments = Vec::new();
    let mut due_date = client.next_payment_date;

    for number in first..=total {
        if number > first {
            due_date = add_months_clamped(due_date, 1, client.payment_day_of_month);
        }
        installments.push(PendingInstallment {
            number,
            due_date,
            amount: client.payment_amount,
            status: status_as_of(due_date, today),
            description: format!("Cuota {number} de {total}"),
        });
    }

    installments
}

fn single_installment(
    client: &Client,
    history: &[PaymentRecord],
    today: NaiveDate,
) -> Vec<PendingInstallment> {
    // the one-shot obligation disappears as soon as a validated payment exists
    if history.iter().any(PaymentRecord::is_validated) {
        return Vec::new();
    }
    vec![PendingInstallment {
        number: 1,
        due_date: client.next_payment_date,
        amount: client.payment_amount,
        status: status_as_of(client.next_payment_date, today),
        description: "Pago único completo".to_string(),
    }]
}

fn next_recurring_installment(client: &Client, today: NaiveDate) -> PendingInstallment {
    PendingInstallment {
        number: client.payments_made_count + 1,
        due_date: client.next_payment_date,
        amount: client.payment_amount,
        status: status_as_of(client.next_payment_date, today),
        description: "Próximo pago mensual".to_string(),
    }
}

/// overdue only when today is strictly after the due date
pub(crate) fn status_as_of(due_date: NaiveDate, today: NaiveDate) -> InstallmentStatus {
    if today > due_date {
        InstallmentStatus::Overdue
    } else {
        InstallmentStatus::Pending
    }
}
