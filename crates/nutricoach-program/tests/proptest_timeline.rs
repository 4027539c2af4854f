//! Property-based tests for timeline generation and status resolution
//!
//! - Generated sessions are contiguous and start on the subscription start
//! - The final phase override only changes the last `VIPPP16` session
//! - Every day of a generated program resolves to exactly one phase

use chrono::{Days, NaiveDate, Utc};
use nutricoach_program::{
    generate_timeline, pattern_weeks, resolve_status, PatternTable, Timeline, FINAL_PHASE_WEEKS,
};
use nutricoach_types::{
    PhaseSession, PhaseSessionId, PhaseType, Subscription, SubscriptionId, SubscriptionStatus,
    SubscriptionType, SubscriptionWithPhases, UserId,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_subscription_type() -> impl Strategy<Value = SubscriptionType> {
    prop::sample::select(SubscriptionType::ALL.to_vec())
}

fn arb_phase() -> impl Strategy<Value = Option<PhaseType>> {
    prop_oneof![
        Just(None),
        Just(Some(PhaseType::Detox)),
        Just(Some(PhaseType::Equilibre)),
    ]
}

/// Start dates between 2000 and roughly 2080
fn arb_start_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..30_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn generate(ty: SubscriptionType, start: NaiveDate, final_phase: Option<PhaseType>) -> Timeline {
    generate_timeline(PatternTable::standard(), ty, start, start, final_phase).unwrap()
}

fn stored(ty: SubscriptionType, start: NaiveDate, timeline: &Timeline) -> SubscriptionWithPhases {
    let id = SubscriptionId::new();
    SubscriptionWithPhases {
        subscription: Subscription {
            id,
            user_id: UserId::new(),
            subscription_type: ty,
            start_date: start,
            end_date: timeline.end_date,
            status: SubscriptionStatus::Active,
            created_at: Utc::now(),
        },
        phase_sessions: timeline
            .sessions
            .iter()
            .map(|s| PhaseSession {
                id: PhaseSessionId::new(),
                subscription_id: id,
                phase: s.phase,
                start_date: s.start_date,
                end_date: s.end_date,
            })
            .collect(),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: sessions tile `[start, end)` without gaps or overlaps
    #[test]
    fn prop_sessions_are_contiguous(
        ty in arb_subscription_type(),
        start in arb_start_date(),
        final_phase in arb_phase(),
    ) {
        let timeline = generate(ty, start, final_phase);

        prop_assert!(!timeline.is_empty());
        prop_assert_eq!(timeline.sessions[0].start_date, start);
        for pair in timeline.sessions.windows(2) {
            prop_assert_eq!(pair[0].end_date, pair[1].start_date);
        }
        for session in &timeline.sessions {
            prop_assert!(session.start_date < session.end_date);
            prop_assert_eq!((session.end_date - session.start_date).num_days() % 7, 0);
        }
        prop_assert_eq!(timeline.sessions.last().unwrap().end_date, timeline.end_date);
    }

    /// Property: program length matches the plan's advertised weeks
    #[test]
    fn prop_length_matches_plan_duration(
        ty in arb_subscription_type(),
        start in arb_start_date(),
    ) {
        let timeline = generate(ty, start, None);
        let days = (timeline.end_date - start).num_days();
        prop_assert_eq!(days, i64::from(ty.duration_weeks()) * 7);

        let pattern = PatternTable::standard().lookup(ty).unwrap();
        let extra = if ty.has_variable_final_phase() { FINAL_PHASE_WEEKS } else { 0 };
        prop_assert_eq!(pattern_weeks(pattern) + extra, ty.duration_weeks());
    }

    /// Property: the final phase override only touches the last VIPPP16 session
    #[test]
    fn prop_final_phase_only_changes_last_session(
        start in arb_start_date(),
        final_phase in arb_phase(),
    ) {
        let default = generate(SubscriptionType::Vippp16, start, None);
        let custom = generate(SubscriptionType::Vippp16, start, final_phase);

        let n = default.sessions.len();
        prop_assert_eq!(custom.sessions.len(), n);
        prop_assert_eq!(&custom.sessions[..n - 1], &default.sessions[..n - 1]);
        prop_assert_eq!(custom.sessions[n - 1].phase, final_phase.unwrap_or(PhaseType::Equilibre));
        prop_assert_eq!(custom.end_date, default.end_date);
    }

    /// Property: the final phase is ignored for other plans
    #[test]
    fn prop_final_phase_ignored_elsewhere(
        ty in arb_subscription_type(),
        start in arb_start_date(),
        final_phase in arb_phase(),
    ) {
        prop_assume!(!ty.has_variable_final_phase());
        prop_assert_eq!(generate(ty, start, final_phase), generate(ty, start, None));
    }

    /// Property: each day of the program lands in exactly one session, and
    /// the status resolver agrees with it
    #[test]
    fn prop_every_day_resolves_to_one_phase(
        ty in arb_subscription_type(),
        start in arb_start_date(),
        final_phase in arb_phase(),
        offset in 0u64..400,
    ) {
        let timeline = generate(ty, start, final_phase);
        let sub = stored(ty, start, &timeline);
        let today = start.checked_add_days(Days::new(offset)).unwrap();

        let covering: Vec<_> = sub.phase_sessions.iter().filter(|s| s.contains(today)).collect();
        let status = resolve_status(Some(&sub), today).unwrap();

        if today < timeline.end_date {
            prop_assert_eq!(covering.len(), 1);
            prop_assert_eq!(status.phase, Some(covering[0].phase));
            prop_assert!(!status.is_finished);
            let day = status.day_in_phase.unwrap();
            prop_assert!(day >= 1);
            prop_assert_eq!(status.week_in_phase, Some((day - 1) / 7 + 1));
        } else {
            prop_assert!(covering.is_empty());
            prop_assert_eq!(status.phase, None);
            prop_assert!(status.is_finished);
        }
        prop_assert_eq!(status.day_in_program, Some(offset as i64 + 1));
    }
}
