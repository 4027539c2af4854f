//! Storage errors

use nutricoach_types::UserId;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Record not found
    #[error("record not found")]
    NotFound,

    /// The user already holds an ACTIVE subscription
    #[error("user {user_id} already has an active subscription")]
    ActiveSubscriptionExists { user_id: UserId },

    /// Uniqueness constraint violated
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
