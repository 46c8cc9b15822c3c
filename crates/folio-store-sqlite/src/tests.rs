//! Integration tests for `SqliteStore`.

use folio_core::{
  store::SubmissionStore,
  submission::{ContactMessage, NewSubmission},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

fn submission(name: &str, email: &str, message: &str) -> NewSubmission {
  NewSubmission::parse(ContactMessage::new(name, email, message)).expect("valid submission")
}

fn ada() -> NewSubmission { submission("Ada", "ada@example.com", "Hello") }

// ─── Lazy connection ─────────────────────────────────────────────────────────

#[tokio::test]
async fn construction_does_not_connect() {
  let s = SqliteStore::in_memory();
  assert!(!s.is_connected());

  s.list().await.unwrap();
  assert!(s.is_connected());
}

#[tokio::test]
async fn clones_share_one_connection() {
  let a = SqliteStore::in_memory();
  let b = a.clone();

  a.create(ada()).await.unwrap();
  assert!(b.is_connected());
  assert_eq!(b.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unconfigured_store_reports_unavailable() {
  let s = SqliteStore::from_config(None);
  let err = s.create(ada()).await.unwrap_err();
  assert!(matches!(err, Error::Unconfigured), "got {err:?}");
  assert!(!s.is_connected());
}

#[tokio::test]
async fn failed_connect_is_not_cached() {
  let s = SqliteStore::new("/nonexistent-folio-dir/nested/contact.sqlite");

  let first = s.create(ada()).await.unwrap_err();
  assert!(matches!(first, Error::Database(_)), "got {first:?}");
  assert!(!s.is_connected());

  // Still failing, but attempted again rather than poisoned.
  let second = s.list().await.unwrap_err();
  assert!(matches!(second, Error::Database(_)), "got {second:?}");
}

#[tokio::test]
async fn file_store_persists_across_handles() {
  let path = std::env::temp_dir().join(format!("folio-{}.sqlite", Uuid::new_v4()));

  let stored = {
    let s = SqliteStore::new(&path);
    s.create(ada()).await.unwrap()
  };

  let reopened = SqliteStore::new(&path);
  let all = reopened.list().await.unwrap();
  assert_eq!(all, vec![stored]);

  drop(reopened);
  let _ = std::fs::remove_file(&path);
}

// ─── Create / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_timestamp() {
  let s = SqliteStore::in_memory();
  let before = chrono::Utc::now();

  let record = s.create(ada()).await.unwrap();
  assert_eq!(record.name, "Ada");
  assert_eq!(record.email, "ada@example.com");
  assert_eq!(record.message, "Hello");
  assert!(record.created_at >= before);
  assert!(!record.submission_id.is_nil());
}

#[tokio::test]
async fn create_stores_trimmed_values() {
  let s = SqliteStore::in_memory();
  s.create(submission("  Grace ", " grace@example.com ", "\n Hi there \n"))
    .await
    .unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(all[0].name, "Grace");
  assert_eq!(all[0].email, "grace@example.com");
  assert_eq!(all[0].message, "Hi there");
}

#[tokio::test]
async fn identical_submissions_are_distinct_records() {
  let s = SqliteStore::in_memory();
  let a = s.create(ada()).await.unwrap();
  let b = s.create(ada()).await.unwrap();

  assert_ne!(a.submission_id, b.submission_id);
  assert_eq!(s.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn list_returns_insertion_order_with_non_decreasing_timestamps() {
  let s = SqliteStore::in_memory();
  let mut created = Vec::new();
  for i in 0..20 {
    created.push(
      s.create(submission(&format!("User {i}"), "user@example.com", "Hello"))
        .await
        .unwrap(),
    );
  }

  let all = s.list().await.unwrap();
  assert_eq!(all, created);
  assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[tokio::test]
async fn concurrent_creates_all_persist() {
  let s = SqliteStore::in_memory();

  let handles: Vec<_> = (0..10)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.create(submission(&format!("User {i}"), "user@example.com", "Hi"))
          .await
      })
    })
    .collect();

  for h in handles {
    h.await.unwrap().unwrap();
  }

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 10);
  assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

// ─── Timestamp clamping ──────────────────────────────────────────────────────

fn temp_db() -> std::path::PathBuf {
  std::env::temp_dir().join(format!("folio-{}.sqlite", Uuid::new_v4()))
}

fn set_newest_created_at(path: &std::path::Path, value: &str) {
  let raw = rusqlite::Connection::open(path).unwrap();
  raw
    .execute(
      "UPDATE submissions SET created_at = ?1
       WHERE seq = (SELECT MAX(seq) FROM submissions)",
      [value],
    )
    .unwrap();
}

#[tokio::test]
async fn create_never_stamps_before_the_newest_record() {
  let path = temp_db();
  let s = SqliteStore::new(&path);
  s.create(ada()).await.unwrap();

  let future = "2999-01-01T00:00:00+00:00";
  set_newest_created_at(&path, future);

  let next = s.create(ada()).await.unwrap();
  let future = chrono::DateTime::parse_from_rfc3339(future)
    .unwrap()
    .with_timezone(&chrono::Utc);
  assert!(next.created_at >= future, "got {}", next.created_at);

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all[0].created_at <= all[1].created_at);

  drop(s);
  let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn unreadable_newest_timestamp_fails_the_write() {
  let path = temp_db();
  let s = SqliteStore::new(&path);
  s.create(ada()).await.unwrap();

  set_newest_created_at(&path, "not a timestamp");

  let err = s.create(ada()).await.unwrap_err();
  assert!(matches!(err, Error::DateParse(_)), "got {err:?}");

  // Nothing was inserted behind the corrupt row.
  let raw = rusqlite::Connection::open(&path).unwrap();
  let count: i64 = raw
    .query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))
    .unwrap();
  assert_eq!(count, 1);

  drop(s);
  let _ = std::fs::remove_file(&path);
}
