pub mod catalog;
pub mod client;
pub mod dates;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod financing;
pub mod schedule;
pub mod types;

// re-export key types
pub use catalog::{FinancingCatalog, FinancingPlan};
pub use client::Client;
pub use decimal::{Money, Rate};
pub use engine::ScheduleEngine;
pub use errors::{PlanError, Result};
pub use events::{Event, EventStore};
pub use financing::{compute_financing, ContractTerms, FinancingBreakdown, IVA_RATE};
pub use schedule::{payment_timeline, pending_installments, PendingInstallment, TimelineEntry};
pub use types::{
    ClientId, ClientStatus, InstallmentStatus, PaymentRecord, PaymentStatus, PlanShape,
    SINGLE_PAYMENT_CEILING,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
