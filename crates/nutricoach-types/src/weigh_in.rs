//! Weigh-in types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ParseCodeError, UserId};

/// Unique weigh-in identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeighInId(pub Uuid);

impl WeighInId {
    /// Create a new random weigh-in ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WeighInId {
    fn default() -> Self {
        Self::new()
    }
}

/// A body-weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighIn {
    pub id: WeighInId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub note: Option<String>,
    pub photo_url: Option<String>,
}

/// Time window used when listing weigh-ins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeighInPeriod {
    /// Last 3 days
    ThreeDays,
    /// Last 7 days
    SevenDays,
    /// Last 30 days
    ThirtyDays,
    /// Everything
    All,
    /// Inclusive custom range
    Custom { start: NaiveDate, end: NaiveDate },
}

impl WeighInPeriod {
    /// Look-back window in days for the rolling periods
    pub const fn lookback_days(&self) -> Option<i64> {
        match self {
            Self::ThreeDays => Some(3),
            Self::SevenDays => Some(7),
            Self::ThirtyDays => Some(30),
            Self::All | Self::Custom { .. } => None,
        }
    }

    /// Parse a rolling period code (`3d`, `7d`, `30d`, `all`)
    ///
    /// `custom` carries dates and is built directly.
    pub fn from_code(code: &str) -> Result<Self, ParseCodeError> {
        match code {
            "3d" => Ok(Self::ThreeDays),
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            "all" => Ok(Self::All),
            _ => Err(ParseCodeError::WeighInPeriod(code.to_string())),
        }
    }
}

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// Aggregate weight statistics for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighInStats {
    pub last_weight_kg: f64,
    pub last_date: NaiveDate,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    /// Body-mass index rounded to one decimal, when height is known
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
}

/// Chart point for recent weigh-ins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub id: WeighInId,
    pub date: NaiveDate,
    pub value: f64,
}
