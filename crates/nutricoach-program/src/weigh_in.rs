//! Weigh-in service

use chrono::{Days, NaiveDate};
use nutricoach_store::{CreateWeighIn, Repositories};
use nutricoach_types::{
    BmiCategory, UserId, WeighIn, WeighInPeriod, WeighInStats, WeightPoint,
};
use serde::Deserialize;

use crate::error::{ProgramError, ProgramResult};

/// Number of points returned by [`WeighInService::last_7`]
const RECENT_POINTS: usize = 7;

/// New weigh-in input
#[derive(Debug, Clone, Deserialize)]
pub struct NewWeighIn {
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub weight_kg: f64,
    pub note: Option<String>,
    pub photo_url: Option<String>,
}

/// Build a listing period from query parameters.
///
/// No period means everything; `custom` requires both dates.
pub fn period_from_query(
    period: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ProgramResult<WeighInPeriod> {
    match period {
        None => Ok(WeighInPeriod::All),
        Some("custom") => match (start, end) {
            (Some(start), Some(end)) if start <= end => Ok(WeighInPeriod::Custom { start, end }),
            (Some(_), Some(_)) => Err(ProgramError::Validation(
                "custom period start is after its end".into(),
            )),
            _ => Err(ProgramError::Validation(
                "custom period requires both start and end dates".into(),
            )),
        },
        Some(code) => {
            WeighInPeriod::from_code(code).map_err(|e| ProgramError::Validation(e.to_string()))
        }
    }
}

/// Body-mass index rounded to one decimal
pub fn body_mass_index(weight_kg: f64, height_cm: u16) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm == 0 {
        return None;
    }
    let height_m = f64::from(height_cm) / 100.0;
    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

/// Weigh-in service
#[derive(Clone)]
pub struct WeighInService {
    repos: Repositories,
}

impl WeighInService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Record a weigh-in; dates after `today` are rejected
    pub async fn record(
        &self,
        user_id: UserId,
        input: NewWeighIn,
        today: NaiveDate,
    ) -> ProgramResult<WeighIn> {
        if !input.weight_kg.is_finite() || input.weight_kg < 0.0 {
            return Err(ProgramError::Validation(format!(
                "invalid weight: {}",
                input.weight_kg
            )));
        }

        let date = input.date.unwrap_or(today);
        if date > today {
            return Err(ProgramError::Validation(
                "weigh-in date cannot be in the future".into(),
            ));
        }

        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ProgramError::UserNotFound)?;

        let weigh_in = self
            .repos
            .weigh_ins
            .create(CreateWeighIn {
                user_id,
                date,
                weight_kg: input.weight_kg,
                note: input.note,
                photo_url: input.photo_url,
            })
            .await?;

        metrics::counter!("program_weigh_ins_recorded_total").increment(1);
        tracing::debug!(user_id = %user_id, date = %date, "Weigh-in recorded");

        Ok(weigh_in)
    }

    /// Weigh-ins within a period, oldest first
    pub async fn list(
        &self,
        user_id: UserId,
        period: WeighInPeriod,
        today: NaiveDate,
    ) -> ProgramResult<Vec<WeighIn>> {
        let (from, to) = match period {
            WeighInPeriod::All => (None, None),
            WeighInPeriod::Custom { start, end } => (Some(start), Some(end)),
            rolling => {
                let days = rolling.lookback_days().unwrap_or_default();
                let from = today
                    .checked_sub_days(Days::new(days.unsigned_abs()))
                    .ok_or(ProgramError::DateOutOfRange(today))?;
                (Some(from), None)
            }
        };

        Ok(self.repos.weigh_ins.list_by_user_id(user_id, from, to).await?)
    }

    /// Weight statistics; `None` if the user has never weighed in
    pub async fn stats(&self, user_id: UserId) -> ProgramResult<Option<WeighInStats>> {
        let Some(last) = self.repos.weigh_ins.latest(user_id).await? else {
            return Ok(None);
        };
        let (min, max) = self
            .repos
            .weigh_ins
            .weight_range(user_id)
            .await?
            .unwrap_or((last.weight_kg, last.weight_kg));

        let height = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .and_then(|u| u.height_cm);
        let bmi = height.and_then(|h| body_mass_index(last.weight_kg, h));

        Ok(Some(WeighInStats {
            last_weight_kg: last.weight_kg,
            last_date: last.date,
            min_weight_kg: min,
            max_weight_kg: max,
            bmi,
            bmi_category: bmi.map(BmiCategory::from_bmi),
        }))
    }

    /// The 7 most recent weigh-ins, oldest first
    pub async fn last_7(&self, user_id: UserId) -> ProgramResult<Vec<WeightPoint>> {
        let mut recent = self.repos.weigh_ins.recent(user_id, RECENT_POINTS).await?;
        recent.reverse();
        Ok(recent
            .into_iter()
            .map(|w| WeightPoint {
                id: w.id,
                date: w.date,
                value: w.weight_kg,
            })
            .collect())
    }

    /// Latest weight and weight lost since the first weigh-in
    pub async fn progress(&self, user_id: UserId) -> ProgramResult<(Option<f64>, Option<f64>)> {
        let latest = self.repos.weigh_ins.latest(user_id).await?;
        let first = self.repos.weigh_ins.first(user_id).await?;

        let current = latest.as_ref().map(|w| w.weight_kg);
        let lost = match (first, latest) {
            (Some(first), Some(latest)) => Some(first.weight_kg - latest.weight_kg),
            _ => None,
        };
        Ok((current, lost))
    }
}
