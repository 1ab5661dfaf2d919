//! time-aware evaluation seam
//!
//! the schedule functions are pure and take "today" explicitly; this engine is
//! the single place that sources the date, from a `SafeTimeProvider` so tests
//! and demos can run against a controlled clock.

use hourglass_rs::SafeTimeProvider;

use crate::client::Client;
use crate::schedule::{payment_timeline, pending_installments, PendingInstallment, TimelineEntry};
use crate::types::PaymentRecord;

/// evaluates schedules at the provider's current date
pub struct ScheduleEngine<'a> {
    time: &'a SafeTimeProvider,
}

impl<'a> ScheduleEngine<'a> {
    pub fn new(time: &'a SafeTimeProvider) -> Self {
        Self { time }
    }

    /// forward-looking pending installments as of now
    pub fn pending(&self, client: &Client, history: &[PaymentRecord]) -> Vec<PendingInstallment> {
        pending_installments(client, history, self.time.now().date_naive())
    }

    /// full historical reconstruction as of now
    pub fn timeline(&self, client: &Client, history: &[PaymentRecord]) -> Vec<TimelineEntry> {
        payment_timeline(client, history, self.time.now().date_naive())
    }
}
