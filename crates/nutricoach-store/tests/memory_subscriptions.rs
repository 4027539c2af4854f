//! In-memory subscription storage tests
//!
//! Covers the atomic create, the one-active-subscription constraint and
//! cascade deletion of phase sessions.

use chrono::NaiveDate;
use nutricoach_store::{
    CreatePhaseSession, CreateSubscription, MemorySubscriptionRepository, StoreError,
    SubscriptionFilter, SubscriptionRepository,
};
use nutricoach_types::{PhaseType, SubscriptionId, SubscriptionStatus, SubscriptionType, UserId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn standard6(user_id: UserId, status: SubscriptionStatus) -> CreateSubscription {
    CreateSubscription {
        id: SubscriptionId::new(),
        user_id,
        subscription_type: SubscriptionType::Standard6,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 2, 12),
        status,
    }
}

fn standard6_phases() -> Vec<CreatePhaseSession> {
    vec![
        CreatePhaseSession {
            phase: PhaseType::Detox,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 15),
        },
        CreatePhaseSession {
            phase: PhaseType::Equilibre,
            start_date: date(2024, 1, 15),
            end_date: date(2024, 2, 12),
        },
    ]
}

#[tokio::test]
async fn test_create_with_phases_is_visible_as_a_whole() {
    let repo = MemorySubscriptionRepository::new();
    let user = UserId::new();

    let created = repo
        .create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
        .await
        .unwrap();

    let found = repo
        .find_active_by_user_id(user)
        .await
        .unwrap()
        .expect("active subscription");
    assert_eq!(found, created);
    assert_eq!(found.phase_sessions.len(), 2);
    assert!(found
        .phase_sessions
        .iter()
        .all(|p| p.subscription_id == created.subscription.id));
}

#[tokio::test]
async fn test_second_active_subscription_is_rejected() {
    let repo = MemorySubscriptionRepository::new();
    let user = UserId::new();

    repo.create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
        .await
        .unwrap();

    let err = repo
        .create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::ActiveSubscriptionExists { user_id: user });

    // Nothing from the rejected batch was stored
    assert_eq!(repo.phase_session_count().await, 2);
}

#[tokio::test]
async fn test_ended_subscription_does_not_block_a_new_one() {
    let repo = MemorySubscriptionRepository::new();
    let user = UserId::new();

    repo.create_with_phases(standard6(user, SubscriptionStatus::Ended), standard6_phases())
        .await
        .unwrap();
    repo.create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
        .await
        .unwrap();

    let all = repo.list_by_user_id(user).await.unwrap();
    assert_eq!(all.len(), 2);
    // Newest first
    assert_eq!(all[0].subscription.status, SubscriptionStatus::Active);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_allow_only_one_active() {
    let repo = MemorySubscriptionRepository::new();
    let user = UserId::new();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
                .await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(StoreError::ActiveSubscriptionExists { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(ok, 1);
    let active = repo
        .list(SubscriptionFilter {
            user_id: Some(user),
            status: Some(SubscriptionStatus::Active),
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_reactivation_respects_one_active_rule() {
    let repo = MemorySubscriptionRepository::new();
    let user = UserId::new();

    let ended = repo
        .create_with_phases(standard6(user, SubscriptionStatus::Ended), standard6_phases())
        .await
        .unwrap();
    repo.create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
        .await
        .unwrap();

    let err = repo
        .update_status(ended.subscription.id, SubscriptionStatus::Active, None)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::ActiveSubscriptionExists { user_id: user });
}

#[tokio::test]
async fn test_delete_cascades_phase_sessions() {
    let repo = MemorySubscriptionRepository::new();
    let user = UserId::new();

    let created = repo
        .create_with_phases(standard6(user, SubscriptionStatus::Active), standard6_phases())
        .await
        .unwrap();
    assert_eq!(repo.phase_session_count().await, 2);

    repo.delete(created.subscription.id).await.unwrap();

    assert_eq!(repo.phase_session_count().await, 0);
    assert!(repo.find_by_id(created.subscription.id).await.unwrap().is_none());
    assert_eq!(
        repo.delete(created.subscription.id).await.unwrap_err(),
        StoreError::NotFound
    );
}
