//! Phase timeline generation
//!
//! Expands a subscription's pattern into dated, contiguous phase sessions.
//! Sessions are half-open `[start, end)`: each session starts on the previous
//! session's end date.

use chrono::{Days, NaiveDate};
use nutricoach_store::CreatePhaseSession;
use nutricoach_types::{PhaseType, SubscriptionType};
use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};
use crate::pattern::{PatternEntry, PatternTable, FINAL_PHASE_WEEKS};

/// One dated phase of a generated timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSession {
    pub phase: PhaseType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<TimelineSession> for CreatePhaseSession {
    fn from(s: TimelineSession) -> Self {
        CreatePhaseSession {
            phase: s.phase,
            start_date: s.start_date,
            end_date: s.end_date,
        }
    }
}

/// Generated timeline and the program end date it implies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub sessions: Vec<TimelineSession>,
    /// End of the last session, or the untouched end date when no pattern exists
    pub end_date: NaiveDate,
}

impl Timeline {
    /// True when no pattern was found and nothing was generated
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Expand the pattern of `subscription_type` starting at `start_date`.
///
/// Without a pattern in `table` the result has no sessions and keeps
/// `existing_end_date`. For `VIPPP16` a final `final_phase` session of
/// [`FINAL_PHASE_WEEKS`] is appended, defaulting to EQUILIBRE.
pub fn generate_timeline(
    table: &PatternTable,
    subscription_type: SubscriptionType,
    start_date: NaiveDate,
    existing_end_date: NaiveDate,
    final_phase: Option<PhaseType>,
) -> ProgramResult<Timeline> {
    let Some(pattern) = table.lookup(subscription_type) else {
        return Ok(Timeline {
            sessions: Vec::new(),
            end_date: existing_end_date,
        });
    };

    let mut entries = pattern.to_vec();
    if subscription_type.has_variable_final_phase() {
        entries.push(PatternEntry::new(
            final_phase.unwrap_or_default(),
            FINAL_PHASE_WEEKS,
        ));
    }

    let mut cursor = start_date;
    let mut sessions = Vec::with_capacity(entries.len());
    for entry in entries {
        let end_date = cursor
            .checked_add_days(Days::new(u64::from(entry.weeks) * 7))
            .ok_or(ProgramError::DateOutOfRange(cursor))?;
        sessions.push(TimelineSession {
            phase: entry.phase,
            start_date: cursor,
            end_date,
        });
        cursor = end_date;
    }

    Ok(Timeline {
        sessions,
        end_date: cursor,
    })
}
