//! Common error types

use thiserror::Error;

/// Errors raised while parsing domain codes from strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCodeError {
    /// Unknown subscription type code
    #[error("invalid subscription type: {0}")]
    SubscriptionType(String),

    /// Unknown subscription status code
    #[error("invalid subscription status: {0}")]
    SubscriptionStatus(String),

    /// Unknown phase code
    #[error("invalid phase: {0}")]
    Phase(String),

    /// Unknown role code
    #[error("invalid role: {0}")]
    Role(String),

    /// Unknown weigh-in period code
    #[error("invalid weigh-in period: {0}")]
    WeighInPeriod(String),
}
