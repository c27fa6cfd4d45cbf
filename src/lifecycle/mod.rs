//! Trip and payment lifecycle rules.
//!
//! Every check here is pure: it looks at already-loaded rows and returns either the
//! next state or a [`Violation`]. Services evaluate these before issuing any write.

pub mod payment;
pub mod trip;

use thiserror::Error;

/// An expected domain rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidRange(&'static str),

    #[error("{0}")]
    InvalidState(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("payment amount {actual} does not match trip total price {expected}")]
    AmountMismatch { expected: i64, actual: i64 },
}

pub type Checked<T> = Result<T, Violation>;

/// Turns a missing row into `Violation::NotFound`.
pub fn found<T>(row: Option<T>, entity: &'static str) -> Checked<T> {
    row.ok_or(Violation::NotFound(entity))
}
