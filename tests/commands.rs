//! The tolerant command layer: one function per endpoint, safe to call
//! redundantly and out of order.

use stint::timer::commands;
use stint::{Database, TimerController, TimerStatus};
use tempfile::TempDir;

fn setup() -> (TempDir, Database, TimerController) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().expect("temp dir");
    let db = Database::new(dir.path().join("stint.db")).expect("open database");
    let controller = TimerController::new(db.clone());
    (dir, db, controller)
}

async fn timer_count(db: &Database) -> i64 {
    db.execute(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM timers", [], |row| row.get(0))?;
        Ok(count)
    })
    .await
    .expect("count timers")
}

#[tokio::test]
async fn full_lifecycle_through_commands() {
    let (_dir, db, controller) = setup();

    commands::start_timer(&controller, None).await.unwrap();
    assert_eq!(timer_count(&db).await, 1);

    let paused = commands::pause_timer(&controller, None).await.unwrap().unwrap();
    let segments = controller.segments(&paused.id).await.unwrap();
    assert!(!segments.last().unwrap().is_open());

    let resumed = commands::resume_timer(&controller, None).await.unwrap().unwrap();
    let segments = controller.segments(&resumed.id).await.unwrap();
    assert_eq!(segments.len(), 2);
    assert!(segments.last().unwrap().is_open());

    let stopped = commands::stop_timer(&controller, None).await.unwrap().unwrap();
    assert!(stopped.stopped());
}

#[tokio::test]
async fn start_twice_reuses_the_timer() {
    let (_dir, db, controller) = setup();

    let first = commands::start_timer(&controller, None).await.unwrap();
    let second = commands::start_timer(&controller, None).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(timer_count(&db).await, 1);
}

#[tokio::test]
async fn start_records_the_requesting_owner() {
    let (_dir, _db, controller) = setup();

    let timer = commands::start_timer(&controller, Some("alice")).await.unwrap();
    assert_eq!(timer.owner.as_deref(), Some("alice"));
}

#[tokio::test]
async fn redundant_submissions_never_error() {
    let (_dir, _db, controller) = setup();

    commands::start_timer(&controller, None).await.unwrap();
    commands::pause_timer(&controller, None).await.unwrap();

    commands::resume_timer(&controller, None).await.unwrap();
    // A second resume is the double-click case.
    let timer = commands::resume_timer(&controller, None).await.unwrap().unwrap();
    assert!(timer.running());

    commands::stop_timer(&controller, None).await.unwrap();
    // Pausing or resuming a stopped timer stays quiet too.
    let timer = commands::pause_timer(&controller, None).await.unwrap().unwrap();
    assert!(timer.stopped());
    let timer = commands::resume_timer(&controller, None).await.unwrap().unwrap();
    assert!(timer.stopped());
}

#[tokio::test]
async fn stop_twice_leaves_segments_untouched() {
    let (_dir, _db, controller) = setup();

    let timer = commands::start_timer(&controller, None).await.unwrap();
    commands::stop_timer(&controller, None).await.unwrap();
    let before = controller.segments(&timer.id).await.unwrap().len();

    let stopped = commands::stop_timer(&controller, None).await.unwrap().unwrap();
    assert!(stopped.stopped());
    assert_eq!(controller.segments(&timer.id).await.unwrap().len(), before);
}

#[tokio::test]
async fn commands_with_no_timer_are_noops() {
    let (_dir, db, controller) = setup();

    assert!(commands::pause_timer(&controller, None).await.unwrap().is_none());
    assert!(commands::resume_timer(&controller, None).await.unwrap().is_none());
    assert!(commands::stop_timer(&controller, None).await.unwrap().is_none());
    assert!(commands::timer_state(&controller, None).await.unwrap().is_none());
    assert_eq!(timer_count(&db).await, 0);
}

#[tokio::test]
async fn owners_do_not_touch_each_others_timers() {
    let (_dir, db, controller) = setup();

    commands::start_timer(&controller, Some("alice")).await.unwrap();
    commands::start_timer(&controller, Some("bob")).await.unwrap();
    assert_eq!(timer_count(&db).await, 2);

    commands::stop_timer(&controller, Some("alice")).await.unwrap();

    let bob = commands::timer_state(&controller, Some("bob")).await.unwrap().unwrap();
    assert_eq!(bob.timer.status, TimerStatus::Running);
}

#[tokio::test]
async fn timer_state_snapshot_serializes_for_the_frontend() {
    let (_dir, _db, controller) = setup();

    commands::start_timer(&controller, None).await.unwrap();
    let snapshot = commands::timer_state(&controller, None).await.unwrap().unwrap();
    assert!(snapshot.duration_ms >= 0);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["timer"]["status"], "running");
    assert!(json["durationMs"].is_i64());
}
