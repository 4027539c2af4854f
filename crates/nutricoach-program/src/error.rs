//! Program errors

use chrono::NaiveDate;
use nutricoach_store::StoreError;
use nutricoach_types::UserId;
use thiserror::Error;

/// Program errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Subscription not found
    #[error("subscription not found")]
    SubscriptionNotFound,

    /// Menu week not found
    #[error("menu week not found")]
    MenuWeekNotFound,

    /// Recipe not found
    #[error("recipe not found")]
    RecipeNotFound,

    /// The user already holds an ACTIVE subscription
    #[error("user {user_id} already has an active subscription; end or delete it first")]
    ActiveSubscriptionExists { user_id: UserId },

    /// Phase sessions are out of order, overlapping or empty intervals
    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    /// A date inside the program is covered by no phase session
    #[error("no phase session covers {date} although the program has not ended")]
    TimelineGap { date: NaiveDate },

    /// Date arithmetic left the supported calendar range
    #[error("date out of range: {0}")]
    DateOutOfRange(NaiveDate),

    /// Invalid input
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness conflict
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage error
    #[error("storage error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProgramError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ActiveSubscriptionExists { user_id } => {
                Self::ActiveSubscriptionExists { user_id }
            }
            StoreError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Store(other),
        }
    }
}

impl ProgramError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound
                | Self::SubscriptionNotFound
                | Self::MenuWeekNotFound
                | Self::RecipeNotFound
                | Self::Store(StoreError::NotFound)
        )
    }

    /// Check if this is a caller-facing validation or business rule error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::ActiveSubscriptionExists { .. }
                | Self::Conflict(_)
                | Self::DateOutOfRange(_)
        )
    }

    /// Map a storage `NotFound` to a domain-specific error
    pub(crate) fn not_found_as(err: StoreError, not_found: ProgramError) -> ProgramError {
        match err {
            StoreError::NotFound => not_found,
            other => other.into(),
        }
    }
}

/// Result type for program operations
pub type ProgramResult<T> = Result<T, ProgramError>;
