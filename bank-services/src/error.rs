//! Errors.

use thiserror::Error;
use tokio::sync::{AcquireError, oneshot::error::RecvError};

/// An error that occurred while serving customers.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum BankError {
    /// The admission gate was closed while a customer waited for an attendant.
    ///
    /// Unrecoverable.
    #[error("Unable to admit customer: admission gate closed")]
    AdmissionClosed,

    /// Something went wrong while waiting for a customer to depart.
    ///
    /// Unrecoverable.
    #[error("Error while waiting for a customer to depart: channel closed. {0}")]
    Rx(#[from] RecvError),

    /// The engine's bookkeeping is broken. Indicates a bug, never expected in correct operation.
    #[error("The bank violated its invariants")]
    InvariantViolation(#[source] InvariantViolation),

    /// A service task panicked.
    #[error("A service task panicked")]
    Panic,

    /// A service task was cancelled before the customer departed.
    #[error("A service task was cancelled")]
    Cancelled,
}

/// Invalid [`BankConfig`](crate::BankConfig) parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// At least one server is needed.
    #[error("the bank needs at least one server")]
    NoServers,

    /// At least one attendant is needed.
    #[error("the bank needs at least one attendant")]
    NoAttendants,

    /// More attendants than servers would admit customers with no counter to go to.
    #[error("{attendants} attendants cannot share {servers} servers")]
    TooManyAttendants {
        /// The number of attendants requested.
        attendants: usize,
        /// The number of servers available.
        servers: usize,
    },

    /// Ticks must take some real time.
    #[error("the time unit must be greater than zero")]
    ZeroTimeUnit,
}

/// The bank's admission bookkeeping disagreed with its queue or server pool.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantViolation {
    /// An attendant admitted a customer but every server was occupied.
    #[error("admitted a customer but no server was free: {occupied} of {servers} occupied")]
    NoFreeServer {
        /// Servers occupied at the time.
        occupied: usize,
        /// Servers in the pool.
        servers: usize,
    },

    /// An attendant became free but nobody was waiting to be admitted.
    #[error("admitted a customer but the waiting queue was empty")]
    EmptyQueue,
}

/// Result type for bank operations.
pub type BankResult<T> = std::result::Result<T, BankError>;

impl From<AcquireError> for BankError {
    fn from(_err: AcquireError) -> Self {
        BankError::AdmissionClosed
    }
}

impl From<InvariantViolation> for BankError {
    fn from(violation: InvariantViolation) -> Self {
        BankError::InvariantViolation(violation)
    }
}
