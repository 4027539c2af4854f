//! Subcommand implementations

use chrono::{NaiveDate, Utc};
use clap::Args;
use nutricoach_program::{
    generate_timeline, AssignSubscriptionRequest, PatternEntry, ProgramConfig, ProgramStatus,
    SubscriptionService, Timeline,
};
use nutricoach_store::{CreateUser, MemoryRepositories, Repositories, UserRepository};
use nutricoach_types::{PhaseType, Role, SubscriptionType, SubscriptionWithPhases, UserId};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;

#[derive(Args)]
pub struct TimelineArgs {
    /// Plan code, e.g. STANDARD6 or VIPPP16
    #[arg(long = "type", value_name = "TYPE")]
    subscription_type: SubscriptionType,

    /// First day of the program (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Final VIPPP16 phase, overriding phase_finale_vippp
    #[arg(long)]
    final_phase: Option<PhaseType>,
}

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    plan: TimelineArgs,

    /// Day to resolve (YYYY-MM-DD); defaults to today in UTC
    #[arg(long)]
    on: Option<NaiveDate>,
}

#[derive(Serialize)]
struct TimelineOutput {
    #[serde(rename = "type")]
    subscription_type: SubscriptionType,
    start_date: NaiveDate,
    #[serde(flatten)]
    timeline: Timeline,
}

#[derive(Serialize)]
struct StatusOutput {
    on: NaiveDate,
    subscription: SubscriptionWithPhases,
    status: ProgramStatus,
}

#[derive(Serialize)]
struct PatternOutput<'a> {
    #[serde(rename = "type")]
    subscription_type: SubscriptionType,
    duration_weeks: u32,
    phases: &'a [PatternEntry],
    variable_final_phase: Option<PhaseType>,
}

fn program_config(config: &Config, final_phase: Option<PhaseType>) -> ProgramConfig {
    match final_phase {
        Some(phase) => config.program.clone().with_final_phase(Some(phase)),
        None => config.program.clone(),
    }
}

/// `nutricoach timeline`
pub fn timeline(config: &Config, args: TimelineArgs) -> anyhow::Result<Value> {
    let program = program_config(config, args.final_phase);
    let timeline = generate_timeline(
        &program.patterns,
        args.subscription_type,
        args.start,
        args.start,
        program.final_phase_vippp,
    )?;

    if timeline.is_empty() {
        tracing::warn!(subscription_type = %args.subscription_type, "No phase pattern for plan");
    }

    Ok(serde_json::to_value(TimelineOutput {
        subscription_type: args.subscription_type,
        start_date: args.start,
        timeline,
    })?)
}

/// `nutricoach status`
///
/// Assigns the plan to a throwaway user in an in-memory store and resolves
/// its status through the subscription service.
pub async fn status(config: &Config, args: StatusArgs) -> anyhow::Result<Value> {
    let on = args.on.unwrap_or_else(|| Utc::now().date_naive());
    let program = program_config(config, args.plan.final_phase);

    let memory = MemoryRepositories::new();
    let user = memory
        .users
        .create(CreateUser {
            id: UserId::new(),
            email: "operator@nutricoach.local".to_string(),
            first_name: None,
            last_name: None,
            role: Role::User,
            height_cm: None,
        })
        .await?;

    let service = SubscriptionService::new(Repositories::from(memory), program);
    let subscription = service
        .assign_subscription(AssignSubscriptionRequest {
            user_id: user.id,
            subscription_type: args.plan.subscription_type,
            start_date: args.plan.start,
        })
        .await?;
    let status = service.program_status_for_user(user.id, on).await?;

    Ok(serde_json::to_value(StatusOutput {
        on,
        subscription,
        status,
    })?)
}

/// `nutricoach patterns`
pub fn patterns(config: &Config) -> anyhow::Result<Value> {
    let program = &config.program;
    let rows: Vec<_> = SubscriptionType::ALL
        .iter()
        .filter_map(|&ty| {
            program.patterns.lookup(ty).map(|phases| PatternOutput {
                subscription_type: ty,
                duration_weeks: ty.duration_weeks(),
                phases,
                variable_final_phase: ty
                    .has_variable_final_phase()
                    .then(|| program.final_phase_vippp.unwrap_or_default()),
            })
        })
        .collect();

    Ok(serde_json::to_value(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            program: ProgramConfig::new(),
        }
    }

    fn plan(subscription_type: SubscriptionType, final_phase: Option<PhaseType>) -> TimelineArgs {
        TimelineArgs {
            subscription_type,
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            final_phase,
        }
    }

    #[test]
    fn test_timeline_output() {
        let args = plan(SubscriptionType::Vippp16, Some(PhaseType::Detox));
        let value = timeline(&config(), args).unwrap();

        assert_eq!(value["type"], "VIPPP16");
        assert_eq!(value["end_date"], "2024-04-22");
        let sessions = value["sessions"].as_array().unwrap();
        assert_eq!(sessions.len(), 5);
        assert_eq!(sessions[4]["phase"], "DETOX");
    }

    #[tokio::test]
    async fn test_status_output() {
        let args = StatusArgs {
            plan: plan(SubscriptionType::Standard6, None),
            on: NaiveDate::from_ymd_opt(2024, 1, 15),
        };
        let value = status(&config(), args).await.unwrap();

        assert_eq!(value["status"]["phase"], "EQUILIBRE");
        assert_eq!(value["status"]["day_in_phase"], 1);
        assert_eq!(value["subscription"]["end_date"], "2024-02-12");
        let sessions = value["subscription"]["phase_sessions"].as_array().unwrap();
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_patterns_lists_every_plan() {
        let value = patterns(&config()).unwrap();
        let rows = value.as_array().unwrap();

        assert_eq!(rows.len(), SubscriptionType::ALL.len());
        let vippp = rows.iter().find(|r| r["type"] == "VIPPP16").unwrap();
        assert_eq!(vippp["variable_final_phase"], "EQUILIBRE");
    }
}
