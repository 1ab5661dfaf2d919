//! client entity and its mutation paths
//!
//! the client record denormalizes the computed breakdown: every write path
//! recomputes via the financing calculator before persisting, and reads never
//! recompute (recompute-on-write, cache-on-record).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::FinancingCatalog;
use crate::dates::add_months_clamped;
use crate::decimal::{Money, Rate};
use crate::errors::{PlanError, Result};
use crate::events::{Event, EventStore};
use crate::financing::{compute_financing, ContractTerms};
use crate::types::{ClientId, ClientStatus, PaymentRecord, PaymentStatus, PlanShape};

/// client state as held by the external store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    // identification
    pub id: ClientId,
    pub created_at: DateTime<Utc>,

    // contract terms
    pub contract_value: Money,
    pub apply_iva: bool,
    pub down_payment_percentage: Decimal,
    /// plan term in months; 0 means no financing
    pub financing_plan: u32,

    // denormalized breakdown, written by apply_contract_terms only
    pub iva_amount: Money,
    pub total_with_iva: Money,
    pub down_payment: Money,
    pub amount_to_finance: Money,
    pub interest_rate_applied: Rate,
    pub interest_amount: Money,
    pub total_with_interest: Money,

    // billing anchor
    /// authoritative periodic (or one-time) amount due
    pub payment_amount: Money,
    pub payment_day_of_month: u8,
    /// due date of the next unpaid installment
    pub next_payment_date: NaiveDate,
    /// count of validated payments so far
    pub payments_made_count: u32,

    pub status: ClientStatus,
}

impl Client {
    /// create an admin-registered client, active from the start
    pub fn new(
        id: ClientId,
        payment_day_of_month: u8,
        next_payment_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        Self::with_status(
            id,
            payment_day_of_month,
            next_payment_date,
            created_at,
            ClientStatus::Active,
        )
    }

    /// create a self-registered client awaiting admin approval
    pub fn self_registered(
        id: ClientId,
        payment_day_of_month: u8,
        next_payment_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        Self::with_status(
            id,
            payment_day_of_month,
            next_payment_date,
            created_at,
            ClientStatus::PendingApproval,
        )
    }

    fn with_status(
        id: ClientId,
        payment_day_of_month: u8,
        next_payment_date: NaiveDate,
        created_at: DateTime<Utc>,
        status: ClientStatus,
    ) -> Result<Self> {
        if !(1..=31).contains(&payment_day_of_month) {
            return Err(PlanError::InvalidDayOfMonth {
                day: payment_day_of_month,
            });
        }
        Ok(Self {
            id,
            created_at,
            contract_value: Money::ZERO,
            apply_iva: false,
            down_payment_percentage: Decimal::ZERO,
            financing_plan: 0,
            iva_amount: Money::ZERO,
            total_with_iva: Money::ZERO,
            down_payment: Money::ZERO,
            amount_to_finance: Money::ZERO,
            interest_rate_applied: Rate::ZERO,
            interest_amount: Money::ZERO,
            total_with_interest: Money::ZERO,
            payment_amount: Money::ZERO,
            payment_day_of_month,
            next_payment_date,
            payments_made_count: 0,
            status,
        })
    }

    /// which schedule shape this client follows
    pub fn plan_shape(&self) -> PlanShape {
        PlanShape::classify(self.financing_plan, self.contract_value)
    }

    /// apply new contract terms, recomputing the breakdown before it is
    /// persisted
    ///
    /// the zero-contract case leaves `payment_amount` alone so the recurring
    /// amount entered through `set_recurring_amount` survives term edits.
    /// financing requested against a balance already covered by the down
    /// payment completes the client at signing.
    pub fn apply_contract_terms(
        &mut self,
        terms: &ContractTerms,
        catalog: &FinancingCatalog,
        events: &mut EventStore,
        timestamp: DateTime<Utc>,
    ) {
        let breakdown = compute_financing(terms, catalog);

        self.contract_value = terms.contract_value.max(Money::ZERO);
        self.apply_iva = terms.apply_iva;
        self.down_payment_percentage = terms
            .down_payment_percentage
            .clamp(Decimal::ZERO, dec!(100));
        self.financing_plan = terms.plan_key;

        self.iva_amount = breakdown.iva_amount;
        self.total_with_iva = breakdown.total_with_iva;
        self.down_payment = breakdown.down_payment;
        self.amount_to_finance = breakdown.amount_to_finance;
        self.interest_rate_applied = breakdown.interest_rate_applied;
        self.interest_amount = breakdown.interest_amount;
        self.total_with_interest = breakdown.total_with_interest;

        if self.contract_value.is_positive() {
            self.payment_amount = breakdown.monthly_installment;
        }

        events.emit(Event::ContractTermsApplied {
            client_id: self.id,
            payment_amount: self.payment_amount,
            total_with_interest: self.total_with_interest,
            timestamp,
        });

        if self.financing_plan > 0
            && self.contract_value.is_positive()
            && !breakdown.amount_to_finance.is_positive()
        {
            self.complete(events, timestamp);
        }
    }

    /// direct entry of the recurring amount for zero-contract clients
    pub fn set_recurring_amount(
        &mut self,
        amount: Money,
        events: &mut EventStore,
        timestamp: DateTime<Utc>,
    ) {
        self.payment_amount = amount.max(Money::ZERO);
        events.emit(Event::RecurringAmountSet {
            client_id: self.id,
            amount: self.payment_amount,
            timestamp,
        });
    }

    /// register a payment an administrator has validated
    ///
    /// bumps the payments-made count, advances the next payment date one
    /// clamped calendar month, and completes the client when the financed
    /// term is exhausted or the single obligation is satisfied
    pub fn register_validated_payment(
        &mut self,
        record: &PaymentRecord,
        events: &mut EventStore,
    ) -> Result<()> {
        if record.status != PaymentStatus::Validated {
            return Err(PlanError::PaymentNotValidated {
                status: record.status,
            });
        }
        if self.status != ClientStatus::Active {
            return Err(PlanError::ClientNotActive {
                status: self.status,
            });
        }

        let shape = self.plan_shape();
        self.payments_made_count += 1;
        self.next_payment_date =
            add_months_clamped(self.next_payment_date, 1, self.payment_day_of_month);

        events.emit(Event::PaymentValidated {
            client_id: self.id,
            amount: record.amount_paid,
            installment_number: self.payments_made_count,
            next_payment_date: self.next_payment_date,
            timestamp: record.recorded_at,
        });

        match shape {
            PlanShape::Financed if self.payments_made_count >= self.financing_plan => {
                self.complete(events, record.recorded_at);
            }
            PlanShape::SinglePayment => {
                self.complete(events, record.recorded_at);
            }
            _ => {}
        }

        Ok(())
    }

    /// externally driven: flag the client as defaulted
    pub fn mark_defaulted(&mut self, events: &mut EventStore, timestamp: DateTime<Utc>) {
        self.transition(ClientStatus::Defaulted, events, timestamp);
    }

    /// externally driven: approve a self-registered client
    pub fn approve(&mut self, events: &mut EventStore, timestamp: DateTime<Utc>) {
        self.transition(ClientStatus::Active, events, timestamp);
    }

    /// externally driven: put a defaulted client back on plan
    pub fn reactivate(&mut self, events: &mut EventStore, timestamp: DateTime<Utc>) {
        self.transition(ClientStatus::Active, events, timestamp);
    }

    fn complete(&mut self, events: &mut EventStore, timestamp: DateTime<Utc>) {
        self.transition(ClientStatus::Completed, events, timestamp);
        events.emit(Event::ClientCompleted {
            client_id: self.id,
            timestamp,
        });
    }

    fn transition(
        &mut self,
        new_status: ClientStatus,
        events: &mut EventStore,
        timestamp: DateTime<Utc>,
    ) {
        if self.status == new_status {
            return;
        }
        events.emit(Event::StatusChanged {
            client_id: self.id,
            old_status: self.status,
            new_status,
            timestamp,
        });
        self.status = new_status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ts(y: i32, m: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, day, 12, 0, 0).unwrap()
    }

    fn validated(y: i32, m: u32, day: u32, amount: i64) -> PaymentRecord {
        PaymentRecord {
            payment_date: d(y, m, day),
            amount_paid: Money::from_major(amount),
            recorded_at: ts(y, m, day),
            status: PaymentStatus::Validated,
        }
    }

    fn financed_terms() -> ContractTerms {
        ContractTerms {
            contract_value: Money::from_major(1_000_000),
            apply_iva: true,
            down_payment_percentage: dec!(10),
            plan_key: 6,
        }
    }

    #[test]
    fn test_payment_day_validated() {
        assert!(matches!(
            Client::new(Uuid::new_v4(), 0, d(2024, 1, 1), ts(2024, 1, 1)),
            Err(PlanError::InvalidDayOfMonth { day: 0 })
        ));
        assert!(matches!(
            Client::new(Uuid::new_v4(), 32, d(2024, 1, 1), ts(2024, 1, 1)),
            Err(PlanError::InvalidDayOfMonth { day: 32 })
        ));
        assert!(Client::new(Uuid::new_v4(), 31, d(2024, 1, 1), ts(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_recompute_on_write_overwrites_stale_fields() {
        let mut client = Client::new(Uuid::new_v4(), 15, d(2024, 2, 15), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        let catalog = FinancingCatalog::default();

        client.apply_contract_terms(&financed_terms(), &catalog, &mut events, ts(2024, 1, 10));
        assert_eq!(client.total_with_interest, Money::from_major(1_156_680));
        assert_eq!(
            client.payment_amount,
            Money::from_str_exact("192780.00").unwrap()
        );

        // switch to no-IVA pay-in-full; every derived field is recomputed
        let new_terms = ContractTerms {
            contract_value: Money::from_major(400_000),
            apply_iva: false,
            down_payment_percentage: Decimal::ZERO,
            plan_key: 0,
        };
        client.apply_contract_terms(&new_terms, &catalog, &mut events, ts(2024, 1, 11));
        assert_eq!(client.iva_amount, Money::ZERO);
        assert_eq!(client.total_with_iva, Money::from_major(400_000));
        assert_eq!(client.total_with_interest, Money::ZERO);
        assert_eq!(client.payment_amount, Money::from_major(400_000));
        assert_eq!(client.plan_shape(), PlanShape::SinglePayment);
    }

    #[test]
    fn test_zero_contract_keeps_direct_amount() {
        let mut client = Client::new(Uuid::new_v4(), 5, d(2024, 2, 5), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        client.set_recurring_amount(Money::from_major(50_000), &mut events, ts(2024, 1, 10));

        let terms = ContractTerms::self_registered(Money::ZERO, true, 0);
        client.apply_contract_terms(&terms, &FinancingCatalog::default(), &mut events, ts(2024, 1, 11));
        // the calculator invents nothing for a zero contract
        assert_eq!(client.payment_amount, Money::from_major(50_000));
        assert_eq!(client.total_with_iva, Money::ZERO);
    }

    #[test]
    fn test_fully_downpaid_financing_completes_at_signing() {
        let mut client = Client::new(Uuid::new_v4(), 15, d(2024, 2, 15), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        let terms = ContractTerms {
            contract_value: Money::from_major(1_000_000),
            apply_iva: true,
            down_payment_percentage: dec!(100),
            plan_key: 6,
        };
        client.apply_contract_terms(&terms, &FinancingCatalog::default(), &mut events, ts(2024, 1, 10));
        assert_eq!(client.status, ClientStatus::Completed);
        assert!(events
            .events()
            .iter()
            .any(|e| matches!(e, Event::ClientCompleted { .. })));
    }

    #[test]
    fn test_validated_payment_advances_and_completes() {
        let mut client = Client::new(Uuid::new_v4(), 31, d(2024, 1, 31), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        let catalog = FinancingCatalog::default();
        let terms = ContractTerms {
            contract_value: Money::from_major(1_000_000),
            apply_iva: true,
            down_payment_percentage: dec!(10),
            plan_key: 3,
        };
        client.apply_contract_terms(&terms, &catalog, &mut events, ts(2024, 1, 10));

        client
            .register_validated_payment(&validated(2024, 1, 30, 374_850), &mut events)
            .unwrap();
        assert_eq!(client.payments_made_count, 1);
        // anchor day 31 snaps into february
        assert_eq!(client.next_payment_date, d(2024, 2, 29));

        client
            .register_validated_payment(&validated(2024, 2, 28, 374_850), &mut events)
            .unwrap();
        assert_eq!(client.next_payment_date, d(2024, 3, 31));
        assert_eq!(client.status, ClientStatus::Active);

        client
            .register_validated_payment(&validated(2024, 3, 30, 374_850), &mut events)
            .unwrap();
        assert_eq!(client.status, ClientStatus::Completed);

        // invariant: the count never exceeds the plan term while active
        assert_eq!(client.payments_made_count, 3);
        assert!(matches!(
            client.register_validated_payment(&validated(2024, 4, 30, 374_850), &mut events),
            Err(PlanError::ClientNotActive { .. })
        ));
    }

    #[test]
    fn test_single_payment_completes_after_one() {
        let mut client = Client::new(Uuid::new_v4(), 15, d(2024, 2, 15), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        client.apply_contract_terms(
            &ContractTerms::self_registered(Money::from_major(500_000), true, 0),
            &FinancingCatalog::default(),
            &mut events,
            ts(2024, 1, 10),
        );
        client
            .register_validated_payment(&validated(2024, 2, 10, 595_000), &mut events)
            .unwrap();
        assert_eq!(client.status, ClientStatus::Completed);
    }

    #[test]
    fn test_open_ended_never_autocompletes() {
        let mut client = Client::new(Uuid::new_v4(), 5, d(2024, 2, 5), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        client.set_recurring_amount(Money::from_major(50_000), &mut events, ts(2024, 1, 10));
        for month in 2..=11u32 {
            client
                .register_validated_payment(&validated(2024, month, 4, 50_000), &mut events)
                .unwrap();
        }
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(client.payments_made_count, 10);
        assert_eq!(client.next_payment_date, d(2024, 12, 5));
    }

    #[test]
    fn test_rejects_unvalidated_records() {
        let mut client = Client::new(Uuid::new_v4(), 5, d(2024, 2, 5), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        let mut record = validated(2024, 2, 4, 50_000);
        record.status = PaymentStatus::Pending;
        assert!(matches!(
            client.register_validated_payment(&record, &mut events),
            Err(PlanError::PaymentNotValidated { .. })
        ));
        assert_eq!(client.payments_made_count, 0);
    }

    #[test]
    fn test_status_lifecycle_and_events() {
        let mut client =
            Client::self_registered(Uuid::new_v4(), 5, d(2024, 2, 5), ts(2024, 1, 10)).unwrap();
        assert_eq!(client.status, ClientStatus::PendingApproval);
        let mut events = EventStore::new();

        client.approve(&mut events, ts(2024, 1, 11));
        assert_eq!(client.status, ClientStatus::Active);
        client.mark_defaulted(&mut events, ts(2024, 6, 1));
        assert!(matches!(
            client.register_validated_payment(&validated(2024, 6, 5, 50_000), &mut events),
            Err(PlanError::ClientNotActive { .. })
        ));
        client.reactivate(&mut events, ts(2024, 7, 1));
        assert_eq!(client.status, ClientStatus::Active);

        let changes: Vec<_> = events
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, Event::StatusChanged { .. }))
            .collect();
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_client_json_round_trip() {
        let mut client = Client::new(Uuid::new_v4(), 15, d(2024, 2, 15), ts(2024, 1, 10)).unwrap();
        let mut events = EventStore::new();
        client.apply_contract_terms(
            &financed_terms(),
            &FinancingCatalog::default(),
            &mut events,
            ts(2024, 1, 10),
        );

        let json = serde_json::to_string(&client).unwrap();
        let restored: Client = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, client);
    }
}
