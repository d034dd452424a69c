//! Integration tests for the expiration sweep.
//!
//! Runs `ExpireSessionsHandler` against `InMemoryPlanningStore`:
//! 1. The single-client scenario end to end
//! 2. Idempotence and preservation of completed sessions
//! 3. Races with concurrent completion and with concurrent passes
//! 4. Paging across many keyset pages
//! 5. Property checks over random schedules

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use tokio::sync::Mutex;

use coach_planning::adapters::InMemoryPlanningStore;
use coach_planning::application::{
    ExpireSessionsCommand, ExpireSessionsHandler, GetClientPlanningsHandler,
    GetClientPlanningsQuery, SweepSettings,
};
use coach_planning::domain::foundation::{
    ClientId, DomainError, PlanningId, SessionStatus, Timestamp, TrainingSessionId,
};
use coach_planning::domain::planning::{Planning, SweepCursor, TrainingSession};
use coach_planning::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 2, 20, 18, 0, 0).unwrap().into()
}

fn planning_with_minutes(client: &str, offsets_minutes: &[i64]) -> Planning {
    let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let created_at = t0().plus_days(-30);
    let mut planning = Planning::new(
        PlanningId::new(),
        ClientId::new(client).unwrap(),
        "Winter block",
        day,
        day,
        created_at,
    )
    .unwrap();
    for minutes in offsets_minutes {
        planning
            .add_session(TrainingSession::schedule(
                TrainingSessionId::new(),
                *planning.id(),
                t0().plus_minutes(*minutes),
                created_at,
            ))
            .unwrap();
    }
    planning
}

async fn seeded(offsets_minutes: &[i64]) -> (Arc<InMemoryPlanningStore>, Planning) {
    let store = Arc::new(InMemoryPlanningStore::new());
    let planning = planning_with_minutes("c-1", offsets_minutes);
    store.insert(planning.clone()).await;
    (store, planning)
}

fn sweep_at(now: Timestamp) -> ExpireSessionsCommand {
    ExpireSessionsCommand { now }
}

/// Completes chosen sessions the moment they have been selected, before the
/// sweeper gets to write them.
struct CompletingStore {
    inner: Arc<InMemoryPlanningStore>,
    to_complete: Mutex<Vec<TrainingSessionId>>,
}

#[async_trait]
impl SessionStore for CompletingStore {
    async fn find_expirable(
        &self,
        cutoff: Timestamp,
        after: Option<SweepCursor>,
        limit: u32,
    ) -> Result<Vec<TrainingSession>, DomainError> {
        let page = self.inner.find_expirable(cutoff, after, limit).await?;
        let mut pending = self.to_complete.lock().await;
        for session in &page {
            if let Some(pos) = pending.iter().position(|id| id == session.id()) {
                let id = pending.remove(pos);
                self.inner
                    .compare_and_set_status(&id, SessionStatus::Scheduled, SessionStatus::Completed, cutoff)
                    .await?;
            }
        }
        Ok(page)
    }

    async fn compare_and_set_status(
        &self,
        id: &TrainingSessionId,
        expected: SessionStatus,
        target: SessionStatus,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        self.inner.compare_and_set_status(id, expected, target, at).await
    }
}

// =============================================================================
// Scenario
// =============================================================================

#[tokio::test]
async fn client_scenario_expires_past_and_keeps_future() {
    let (store, planning) = seeded(&[-120, 120]).await;
    let past = *planning.sessions()[0].id();
    let future = *planning.sessions()[1].id();

    let report = ExpireSessionsHandler::new(store.clone())
        .handle(sweep_at(t0()))
        .await
        .unwrap();

    assert_eq!(report.expired, 1);
    let fetched = GetClientPlanningsHandler::new(store.clone())
        .handle(GetClientPlanningsQuery::new(ClientId::new("c-1").unwrap()))
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].session(&past).unwrap().status(), SessionStatus::Expired);
    assert_eq!(fetched[0].session(&future).unwrap().status(), SessionStatus::Scheduled);
    assert_eq!(*fetched[0].session(&past).unwrap().updated_at(), t0());
}

#[tokio::test]
async fn session_starting_exactly_now_is_not_expired() {
    let (store, planning) = seeded(&[0]).await;
    let id = *planning.sessions()[0].id();

    let report = ExpireSessionsHandler::new(store.clone())
        .handle(sweep_at(t0()))
        .await
        .unwrap();

    assert!(report.is_noop());
    assert_eq!(store.session(&id).await.unwrap().status(), SessionStatus::Scheduled);
}

#[tokio::test]
async fn completed_and_cancelled_sessions_are_left_alone() {
    let (store, planning) = seeded(&[-90, -60, -30]).await;
    let completed = *planning.sessions()[0].id();
    let cancelled = *planning.sessions()[1].id();
    store
        .compare_and_set_status(&completed, SessionStatus::Scheduled, SessionStatus::Completed, t0().plus_minutes(-80))
        .await
        .unwrap();
    store
        .compare_and_set_status(&cancelled, SessionStatus::Scheduled, SessionStatus::Cancelled, t0().plus_minutes(-70))
        .await
        .unwrap();

    let report = ExpireSessionsHandler::new(store.clone())
        .handle(sweep_at(t0()))
        .await
        .unwrap();

    assert_eq!(report.expired, 1);
    assert_eq!(store.session(&completed).await.unwrap().status(), SessionStatus::Completed);
    assert_eq!(store.session(&cancelled).await.unwrap().status(), SessionStatus::Cancelled);
}

#[tokio::test]
async fn repeated_pass_changes_nothing() {
    let (store, planning) = seeded(&[-200, -100, 50, 300]).await;
    let handler = ExpireSessionsHandler::new(store.clone());

    handler.handle(sweep_at(t0())).await.unwrap();
    let after_first = store.planning(planning.id()).await.unwrap();
    let second = handler.handle(sweep_at(t0())).await.unwrap();
    let after_second = store.planning(planning.id()).await.unwrap();

    assert_eq!(second.expired, 0);
    assert_eq!(after_first, after_second);
}

// =============================================================================
// Races
// =============================================================================

#[tokio::test]
async fn completion_between_select_and_write_wins() {
    let (store, planning) = seeded(&[-45, -15]).await;
    let raced = *planning.sessions()[0].id();
    let other = *planning.sessions()[1].id();
    let racing = Arc::new(CompletingStore {
        inner: store.clone(),
        to_complete: Mutex::new(vec![raced]),
    });

    let report = ExpireSessionsHandler::new(racing)
        .handle(sweep_at(t0()))
        .await
        .unwrap();

    assert_eq!(report.expired, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(store.session(&raced).await.unwrap().status(), SessionStatus::Completed);
    assert_eq!(store.session(&other).await.unwrap().status(), SessionStatus::Expired);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_passes_never_double_count() {
    let offsets: Vec<i64> = (1..=120).map(|m| -m).collect();
    let (store, _) = seeded(&offsets).await;
    let settings = SweepSettings::default().with_page_size(7);

    let passes = (0..4).map(|_| {
        let handler = ExpireSessionsHandler::with_settings(store.clone(), settings.clone());
        tokio::spawn(async move { handler.handle(sweep_at(t0())).await })
    });
    let mut total = 0;
    for pass in passes.collect::<Vec<_>>() {
        total += pass.await.unwrap().unwrap().expired;
    }

    assert_eq!(total, 120);
    assert_eq!(store.count_with_status(SessionStatus::Expired).await, 120);
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn small_pages_still_reach_every_eligible_session() {
    let mut offsets: Vec<i64> = (1..=53).map(|m| -m * 3).collect();
    offsets.extend([10, 20, 30]);
    let (store, _) = seeded(&offsets).await;
    let handler =
        ExpireSessionsHandler::with_settings(store.clone(), SweepSettings::default().with_page_size(5));

    let report = handler.handle(sweep_at(t0())).await.unwrap();

    assert_eq!(report.expired, 53);
    assert_eq!(report.pages, 11);
    assert_eq!(store.count_with_status(SessionStatus::Scheduled).await, 3);
}

#[tokio::test]
async fn sessions_sharing_a_start_time_are_all_paged() {
    let (store, _) = seeded(&[-10; 9]).await;
    let handler =
        ExpireSessionsHandler::with_settings(store.clone(), SweepSettings::default().with_page_size(2));

    let report = handler.handle(sweep_at(t0())).await.unwrap();

    assert_eq!(report.expired, 9);
}

// =============================================================================
// Properties
// =============================================================================

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn sweep_expires_exactly_the_elapsed_scheduled_sessions(
        offsets in prop::collection::vec(-600i64..600, 0..40),
        page_size in 1u32..12,
    ) {
        let eligible = offsets.iter().filter(|m| **m < 0).count();
        let (expired_count, scheduled_left, report_expired) = run(async {
            let (store, _) = seeded(&offsets).await;
            let handler = ExpireSessionsHandler::with_settings(
                store.clone(),
                SweepSettings::default().with_page_size(page_size),
            );
            let report = handler.handle(sweep_at(t0())).await.unwrap();
            (
                store.count_with_status(SessionStatus::Expired).await,
                store.count_with_status(SessionStatus::Scheduled).await,
                report.expired,
            )
        });

        prop_assert_eq!(expired_count, eligible);
        prop_assert_eq!(report_expired as usize, eligible);
        prop_assert_eq!(scheduled_left, offsets.len() - eligible);
    }

    #[test]
    fn second_pass_is_always_a_noop(
        offsets in prop::collection::vec(-600i64..600, 0..40),
    ) {
        let (first, second) = run(async {
            let (store, planning) = seeded(&offsets).await;
            let handler = ExpireSessionsHandler::new(store.clone());
            handler.handle(sweep_at(t0())).await.unwrap();
            let first = store.planning(planning.id()).await.unwrap();
            let report = handler.handle(sweep_at(t0())).await.unwrap();
            prop_assert!(report.is_noop());
            Ok((first, store.planning(planning.id()).await.unwrap()))
        })?;

        prop_assert_eq!(first, second);
    }
}
