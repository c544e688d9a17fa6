#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use medicine_bot::database::{connection::DatabaseManager, models::*};
use medicine_bot::medicine::{HistoryAction, MedicineStatus, TakeOutcome};
use medicine_bot::services::medicine::MedicineStore;
use tempfile::{tempdir, TempDir};
use tokio_test::assert_ok;

const MAX: i64 = 28;

async fn setup_store(initial_remaining: i64) -> (MedicineStore, TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.to_string_lossy());

    let db = DatabaseManager::new(&db_url).await.unwrap();
    db.run_migrations().await.unwrap();
    (MedicineStore::new(db, MAX, initial_remaining), dir)
}

async fn set_status(store: &MedicineStore, status: MedicineStatus) {
    store.current().await.unwrap();
    MedicineStatusRow::update(&store.db().pool, &status).await.unwrap();
}

async fn history_actions(store: &MedicineStore) -> Vec<HistoryAction> {
    store
        .history(100)
        .await
        .unwrap()
        .iter()
        .rev()
        .filter_map(|e| e.action())
        .collect()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[tokio::test]
async fn test_first_access_seeds_initial_remaining() {
    let (store, _dir) = setup_store(20).await;

    let report = store.status(day(1)).await.unwrap();
    assert_eq!(report.remaining, 20);
    assert!(!report.taken_today);
    assert!(history_actions(&store).await.is_empty());
}

#[tokio::test]
async fn test_take_decrements_once_per_day() {
    let (store, _dir) = setup_store(MAX).await;

    let first = assert_ok!(store.take(day(1)).await);
    assert_eq!(first, TakeOutcome::Taken { remaining: 27 });

    let second = assert_ok!(store.take(day(1)).await);
    assert_eq!(second, TakeOutcome::AlreadyTakenToday { remaining: 27 });

    let report = store.status(day(1)).await.unwrap();
    assert_eq!(report.remaining, 27);
    assert!(report.taken_today);
    assert!(!store.status(day(2)).await.unwrap().taken_today);

    assert_eq!(history_actions(&store).await, vec![HistoryAction::Take]);
}

#[tokio::test]
async fn test_take_on_consecutive_days() {
    let (store, _dir) = setup_store(MAX).await;

    for d in 1..=5 {
        assert!(store.take(day(d)).await.unwrap().is_taken());
    }
    assert_eq!(store.current().await.unwrap().remaining, 23);
    assert_eq!(store.current().await.unwrap().last_taken_at, Some(day(5)));
}

#[tokio::test]
async fn test_take_last_pill_wraps_to_full_sheet() {
    let (store, _dir) = setup_store(MAX).await;
    set_status(&store, MedicineStatus { remaining: 1, last_taken_at: Some(day(1)) }).await;

    let outcome = store.take(day(2)).await.unwrap();
    assert_eq!(outcome, TakeOutcome::Taken { remaining: MAX });

    let status = store.current().await.unwrap();
    assert_eq!(status.remaining, MAX);
    assert_eq!(status.last_taken_at, Some(day(2)));
}

#[tokio::test]
async fn test_decrease_is_noop_at_zero() {
    let (store, _dir) = setup_store(0).await;

    assert_eq!(store.decrease().await.unwrap(), 0);
    assert_eq!(store.current().await.unwrap().remaining, 0);
    assert!(history_actions(&store).await.is_empty());
}

#[tokio::test]
async fn test_decrease_keeps_taken_day() {
    let (store, _dir) = setup_store(MAX).await;
    store.take(day(3)).await.unwrap();

    assert_eq!(store.decrease().await.unwrap(), 26);
    assert!(store.status(day(3)).await.unwrap().taken_today);
    assert_eq!(
        history_actions(&store).await,
        vec![HistoryAction::Take, HistoryAction::Decrease]
    );
}

#[tokio::test]
async fn test_decrease_from_one_wraps() {
    let (store, _dir) = setup_store(1).await;
    assert_eq!(store.decrease().await.unwrap(), MAX);
}

#[tokio::test]
async fn test_increase_is_noop_at_max() {
    let (store, _dir) = setup_store(MAX).await;

    assert_eq!(store.increase().await.unwrap(), MAX);
    assert!(history_actions(&store).await.is_empty());
}

#[tokio::test]
async fn test_increase_undoes_take() {
    let (store, _dir) = setup_store(MAX).await;
    store.take(day(4)).await.unwrap();

    assert_eq!(store.increase().await.unwrap(), MAX);
    let status = store.current().await.unwrap();
    assert_eq!(status.last_taken_at, None);

    // today's take is available again
    assert_eq!(
        store.take(day(4)).await.unwrap(),
        TakeOutcome::Taken { remaining: 27 }
    );
    assert_eq!(
        history_actions(&store).await,
        vec![HistoryAction::Take, HistoryAction::Increase, HistoryAction::Take]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_takes_record_one_dose() {
    let (store, _dir) = setup_store(MAX).await;
    store.current().await.unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.take(day(10)).await })
        })
        .collect();

    let mut taken = 0;
    for task in tasks {
        if task.await.unwrap().unwrap().is_taken() {
            taken += 1;
        }
    }

    assert_eq!(taken, 1);
    assert_eq!(store.current().await.unwrap().remaining, 27);
    assert_eq!(history_actions(&store).await, vec![HistoryAction::Take]);
}

#[tokio::test]
async fn test_take_respects_row_written_by_another_store() {
    let (store, _dir) = setup_store(MAX).await;
    // a second store has its own lock, like another process would
    let other = MedicineStore::new(store.db().clone(), MAX, MAX);

    assert!(other.take(day(11)).await.unwrap().is_taken());
    assert_eq!(
        store.take(day(11)).await.unwrap(),
        TakeOutcome::AlreadyTakenToday { remaining: 27 }
    );
}

#[tokio::test]
async fn test_lowered_max_clamps_stored_count() {
    let (store, _dir) = setup_store(MAX).await;
    store.current().await.unwrap();

    // same database reopened with a smaller sheet
    let smaller = MedicineStore::new(store.db().clone(), 10, 10);

    let report = smaller.status(day(12)).await.unwrap();
    assert_eq!(report.remaining, 10);
    let row = MedicineStatusRow::find(&store.db().pool).await.unwrap().unwrap();
    assert_eq!(row.remaining, 10);

    assert_eq!(
        smaller.take(day(12)).await.unwrap(),
        TakeOutcome::Taken { remaining: 9 }
    );
    assert_eq!(smaller.increase().await.unwrap(), 10);
    assert_eq!(
        history_actions(&smaller).await,
        vec![HistoryAction::Take, HistoryAction::Increase]
    );
}
