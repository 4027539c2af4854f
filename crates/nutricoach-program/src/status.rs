//! Program status resolution
//!
//! Answers "where is this user in their program on a given day" from the
//! active subscription and its phase sessions. Uses the same half-open
//! `[start, end)` convention as the timeline generator, so a day equal to a
//! session's end date belongs to the next session.

use chrono::NaiveDate;
use nutricoach_types::{PhaseType, SubscriptionWithPhases};
use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};

/// Position of a user in their program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStatus {
    pub has_active_subscription: bool,
    /// Current phase; `None` before the start, after the end, or without phases
    pub phase: Option<PhaseType>,
    /// 1-based day within the current phase
    pub day_in_phase: Option<i64>,
    /// 1-based week within the current phase
    pub week_in_phase: Option<i64>,
    /// 1-based day within the program; zero or negative before the start
    pub day_in_program: Option<i64>,
    pub is_finished: bool,
}

impl ProgramStatus {
    /// Status of a user without an active subscription
    pub fn inactive() -> Self {
        Self::default()
    }

    fn active(day_in_program: i64) -> Self {
        Self {
            has_active_subscription: true,
            day_in_program: Some(day_in_program),
            ..Self::default()
        }
    }

    /// True when the program start date is still ahead
    pub fn is_not_started(&self) -> bool {
        self.has_active_subscription && self.day_in_program.is_some_and(|d| d < 1)
    }
}

/// Check that the phase sessions form a contiguous timeline starting on the
/// subscription's start date.
pub fn validate_timeline(sub: &SubscriptionWithPhases) -> ProgramResult<()> {
    let sessions = &sub.phase_sessions;

    if let Some(first) = sessions.first() {
        if first.start_date != sub.subscription.start_date {
            return Err(ProgramError::InvalidTimeline(format!(
                "first phase starts {} but subscription starts {}",
                first.start_date, sub.subscription.start_date
            )));
        }
    }

    for session in sessions {
        if session.start_date >= session.end_date {
            return Err(ProgramError::InvalidTimeline(format!(
                "phase {} [{}, {}) is empty or reversed",
                session.phase, session.start_date, session.end_date
            )));
        }
    }

    for pair in sessions.windows(2) {
        if pair[0].end_date != pair[1].start_date {
            return Err(ProgramError::InvalidTimeline(format!(
                "phase ending {} is followed by a phase starting {}",
                pair[0].end_date, pair[1].start_date
            )));
        }
    }

    Ok(())
}

/// Resolve the program status of `active` on `today`.
pub fn resolve_status(
    active: Option<&SubscriptionWithPhases>,
    today: NaiveDate,
) -> ProgramResult<ProgramStatus> {
    let Some(sub) = active else {
        return Ok(ProgramStatus::inactive());
    };
    validate_timeline(sub)?;

    let day_in_program = (today - sub.subscription.start_date).num_days() + 1;
    if day_in_program < 1 {
        return Ok(ProgramStatus::active(day_in_program));
    }

    if let Some(session) = sub.phase_sessions.iter().find(|s| s.contains(today)) {
        let day_in_phase = (today - session.start_date).num_days() + 1;
        return Ok(ProgramStatus {
            phase: Some(session.phase),
            day_in_phase: Some(day_in_phase),
            week_in_phase: Some(week_of_day(day_in_phase)),
            ..ProgramStatus::active(day_in_program)
        });
    }

    if today >= sub.subscription.end_date {
        return Ok(ProgramStatus {
            is_finished: true,
            ..ProgramStatus::active(day_in_program)
        });
    }

    if sub.phase_sessions.is_empty() {
        // Generated without a pattern: running, but with no known phase
        return Ok(ProgramStatus::active(day_in_program));
    }

    Err(ProgramError::TimelineGap { date: today })
}

/// 1-based week containing a 1-based day
pub fn week_of_day(day: i64) -> i64 {
    (day + 6).div_euclid(7)
}

/// 1-based weekday (1..=7) of a 1-based day
pub fn weekday_of_day(day: i64) -> i64 {
    (day - 1).rem_euclid(7) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nutricoach_types::{
        PhaseSession, PhaseSessionId, Subscription, SubscriptionId, SubscriptionStatus,
        SubscriptionType, UserId,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(
        start: NaiveDate,
        end: NaiveDate,
        phases: &[(PhaseType, NaiveDate, NaiveDate)],
    ) -> SubscriptionWithPhases {
        let id = SubscriptionId::new();
        SubscriptionWithPhases {
            subscription: Subscription {
                id,
                user_id: UserId::new(),
                subscription_type: SubscriptionType::Standard6,
                start_date: start,
                end_date: end,
                status: SubscriptionStatus::Active,
                created_at: Utc::now(),
            },
            phase_sessions: phases
                .iter()
                .map(|&(phase, s, e)| PhaseSession {
                    id: PhaseSessionId::new(),
                    subscription_id: id,
                    phase,
                    start_date: s,
                    end_date: e,
                })
                .collect(),
        }
    }

    fn standard6() -> SubscriptionWithPhases {
        subscription(
            date(2024, 1, 1),
            date(2024, 2, 12),
            &[
                (PhaseType::Detox, date(2024, 1, 1), date(2024, 1, 15)),
                (PhaseType::Equilibre, date(2024, 1, 15), date(2024, 2, 12)),
            ],
        )
    }

    #[test]
    fn test_no_active_subscription() {
        let status = resolve_status(None, date(2024, 1, 1)).unwrap();
        assert_eq!(status, ProgramStatus::inactive());
        assert!(!status.has_active_subscription);
        assert!(status.day_in_program.is_none());
    }

    #[test]
    fn test_first_day_of_program() {
        let sub = standard6();
        let status = resolve_status(Some(&sub), date(2024, 1, 1)).unwrap();

        assert_eq!(status.phase, Some(PhaseType::Detox));
        assert_eq!(status.day_in_phase, Some(1));
        assert_eq!(status.week_in_phase, Some(1));
        assert_eq!(status.day_in_program, Some(1));
        assert!(!status.is_finished);
    }

    #[test]
    fn test_week_boundaries_inside_a_phase() {
        let sub = standard6();

        let day7 = resolve_status(Some(&sub), date(2024, 1, 7)).unwrap();
        assert_eq!(day7.day_in_phase, Some(7));
        assert_eq!(day7.week_in_phase, Some(1));

        let day8 = resolve_status(Some(&sub), date(2024, 1, 8)).unwrap();
        assert_eq!(day8.day_in_phase, Some(8));
        assert_eq!(day8.week_in_phase, Some(2));
    }

    #[test]
    fn test_session_end_date_belongs_to_next_phase() {
        let sub = standard6();
        let status = resolve_status(Some(&sub), date(2024, 1, 15)).unwrap();

        assert_eq!(status.phase, Some(PhaseType::Equilibre));
        assert_eq!(status.day_in_phase, Some(1));
        assert_eq!(status.week_in_phase, Some(1));
        assert_eq!(status.day_in_program, Some(15));
    }

    #[test]
    fn test_last_day_before_end() {
        let sub = standard6();
        let status = resolve_status(Some(&sub), date(2024, 2, 11)).unwrap();

        assert_eq!(status.phase, Some(PhaseType::Equilibre));
        assert_eq!(status.day_in_phase, Some(28));
        assert_eq!(status.week_in_phase, Some(4));
    }

    #[test]
    fn test_end_date_is_finished() {
        let sub = standard6();
        let status = resolve_status(Some(&sub), date(2024, 2, 12)).unwrap();

        assert!(status.has_active_subscription);
        assert!(status.is_finished);
        assert_eq!(status.phase, None);
        assert_eq!(status.day_in_phase, None);
        assert_eq!(status.week_in_phase, None);
        assert_eq!(status.day_in_program, Some(43));
    }

    #[test]
    fn test_not_started_yet() {
        let sub = standard6();

        let eve = resolve_status(Some(&sub), date(2023, 12, 31)).unwrap();
        assert!(eve.has_active_subscription);
        assert!(eve.is_not_started());
        assert_eq!(eve.phase, None);
        assert_eq!(eve.day_in_phase, None);
        assert_eq!(eve.day_in_program, Some(0));

        let week_before = resolve_status(Some(&sub), date(2023, 12, 25)).unwrap();
        assert_eq!(week_before.day_in_program, Some(-6));
        assert!(!week_before.is_finished);
    }

    #[test]
    fn test_empty_timeline_is_running_without_phase() {
        let sub = subscription(date(2024, 1, 1), date(2024, 3, 1), &[]);

        let running = resolve_status(Some(&sub), date(2024, 2, 1)).unwrap();
        assert_eq!(running.phase, None);
        assert!(!running.is_finished);
        assert_eq!(running.day_in_program, Some(32));

        let done = resolve_status(Some(&sub), date(2024, 3, 1)).unwrap();
        assert!(done.is_finished);
    }

    #[test]
    fn test_gap_before_end_is_an_error() {
        // End date pushed past the last phase
        let sub = subscription(
            date(2024, 1, 1),
            date(2024, 3, 1),
            &[(PhaseType::Detox, date(2024, 1, 1), date(2024, 1, 15))],
        );

        let err = resolve_status(Some(&sub), date(2024, 2, 1)).unwrap_err();
        assert_eq!(err, ProgramError::TimelineGap { date: date(2024, 2, 1) });
    }

    #[test]
    fn test_capped_end_date_still_reports_covering_phase() {
        // Ended early by an admin then reactivated: sessions outlive end date
        let mut sub = standard6();
        sub.subscription.end_date = date(2024, 1, 20);

        let status = resolve_status(Some(&sub), date(2024, 1, 25)).unwrap();
        assert_eq!(status.phase, Some(PhaseType::Equilibre));
        assert!(!status.is_finished);
    }

    #[test]
    fn test_non_contiguous_sessions_are_rejected() {
        let sub = subscription(
            date(2024, 1, 1),
            date(2024, 2, 12),
            &[
                (PhaseType::Detox, date(2024, 1, 1), date(2024, 1, 15)),
                (PhaseType::Equilibre, date(2024, 1, 16), date(2024, 2, 12)),
            ],
        );
        assert!(matches!(
            resolve_status(Some(&sub), date(2024, 1, 10)),
            Err(ProgramError::InvalidTimeline(_))
        ));
    }

    #[test]
    fn test_first_session_must_start_with_subscription() {
        let sub = subscription(
            date(2024, 1, 1),
            date(2024, 2, 12),
            &[(PhaseType::Detox, date(2024, 1, 2), date(2024, 2, 12))],
        );
        assert!(matches!(
            validate_timeline(&sub),
            Err(ProgramError::InvalidTimeline(_))
        ));
    }

    #[test]
    fn test_reversed_session_is_rejected() {
        let sub = subscription(
            date(2024, 1, 1),
            date(2024, 2, 12),
            &[(PhaseType::Detox, date(2024, 1, 1), date(2024, 1, 1))],
        );
        assert!(matches!(
            validate_timeline(&sub),
            Err(ProgramError::InvalidTimeline(_))
        ));
    }

    #[test]
    fn test_week_and_weekday_of_day() {
        assert_eq!(week_of_day(1), 1);
        assert_eq!(week_of_day(7), 1);
        assert_eq!(week_of_day(8), 2);
        assert_eq!(week_of_day(28), 4);
        assert_eq!(weekday_of_day(1), 1);
        assert_eq!(weekday_of_day(7), 7);
        assert_eq!(weekday_of_day(8), 1);
        assert_eq!(weekday_of_day(16), 2);
    }
}
