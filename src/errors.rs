use thiserror::Error;

use crate::types::{ClientStatus, PaymentStatus};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("malformed date: {value}")]
    MalformedDate {
        value: String,
    },

    #[error("payment day of month out of range 1..=31: {day}")]
    InvalidDayOfMonth {
        day: u8,
    },

    #[error("client cannot accept payments: current status is {status:?}")]
    ClientNotActive {
        status: ClientStatus,
    },

    #[error("payment record is not validated: status is {status:?}")]
    PaymentNotValidated {
        status: PaymentStatus,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, PlanError>;
