use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{ClientId, ClientStatus};

/// all events emitted by client mutation paths, drained by the persistence
/// collaborator after each operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// contract terms changed and the breakdown was recomputed
    ContractTermsApplied {
        client_id: ClientId,
        payment_amount: Money,
        total_with_interest: Money,
        timestamp: DateTime<Utc>,
    },
    /// zero-contract recurring amount entered directly
    RecurringAmountSet {
        client_id: ClientId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    /// an administrator accepted a payment proof
    PaymentValidated {
        client_id: ClientId,
        amount: Money,
        installment_number: u32,
        next_payment_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    /// all obligations satisfied
    ClientCompleted {
        client_id: ClientId,
        timestamp: DateTime<Utc>,
    },
    /// externally driven status change
    StatusChanged {
        client_id: ClientId,
        old_status: ClientStatus,
        new_status: ClientStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
