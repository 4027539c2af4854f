//! Subscription types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ParseCodeError, PhaseType, UserId};

/// Unique subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    /// Create a new random subscription ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a subscription ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique phase session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseSessionId(pub Uuid);

impl PhaseSessionId {
    /// Create a new random phase session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhaseSessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscription plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionType {
    /// 6 weeks, one standard cycle
    Standard6,
    /// 12 weeks, two standard cycles
    Standard12,
    /// 24 weeks, four standard cycles
    Standard24,
    /// 48 weeks, eight standard cycles
    Standard48,
    /// 12 weeks, two VIP cycles
    Vip12,
    /// 16 weeks, two VIP cycles then a configurable final phase
    Vippp16,
}

impl SubscriptionType {
    /// Every plan, in catalogue order
    pub const ALL: [SubscriptionType; 6] = [
        Self::Standard6,
        Self::Standard12,
        Self::Standard24,
        Self::Standard48,
        Self::Vip12,
        Self::Vippp16,
    ];

    /// Total program duration in weeks
    pub const fn duration_weeks(&self) -> u32 {
        match self {
            Self::Standard6 => 6,
            Self::Standard12 => 12,
            Self::Standard24 => 24,
            Self::Standard48 => 48,
            Self::Vip12 => 12,
            Self::Vippp16 => 16,
        }
    }

    /// Whether the last phase of this plan is chosen by configuration
    pub const fn has_variable_final_phase(&self) -> bool {
        matches!(self, Self::Vippp16)
    }

    /// Wire code for this plan
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Standard6 => "STANDARD6",
            Self::Standard12 => "STANDARD12",
            Self::Standard24 => "STANDARD24",
            Self::Standard48 => "STANDARD48",
            Self::Vip12 => "VIP12",
            Self::Vippp16 => "VIPPP16",
        }
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for SubscriptionType {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|ty| ty.code() == code)
            .ok_or_else(|| ParseCodeError::SubscriptionType(s.to_string()))
    }
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    /// Subscription is running
    Active,
    /// Subscription was ended by an admin or ran out
    Ended,
    /// Subscription is paused
    Suspended,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Ended => write!(f, "ENDED"),
            Self::Suspended => write!(f, "SUSPENDED"),
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "ENDED" => Ok(Self::Ended),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(ParseCodeError::SubscriptionStatus(s.to_string())),
        }
    }
}

/// User subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID
    pub id: SubscriptionId,
    /// User the subscription is assigned to
    pub user_id: UserId,
    /// Plan
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    /// First day of the program
    pub start_date: NaiveDate,
    /// Day after the last day of the program
    pub end_date: NaiveDate,
    /// Subscription status
    pub status: SubscriptionStatus,
    /// When the subscription was created
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// One dated occurrence of a phase within a subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSession {
    pub id: PhaseSessionId,
    pub subscription_id: SubscriptionId,
    pub phase: PhaseType,
    /// Inclusive start
    pub start_date: NaiveDate,
    /// Exclusive end
    pub end_date: NaiveDate,
}

impl PhaseSession {
    /// Half-open containment: `start <= date < end`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }
}

/// A subscription together with its phase sessions, in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionWithPhases {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub phase_sessions: Vec<PhaseSession>,
}
