//! [`SqliteStore`], the SQLite implementation of [`SubmissionStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use tokio::sync::OnceCell;
use uuid::Uuid;

use folio_core::{
  store::SubmissionStore,
  submission::{ContactSubmission, NewSubmission},
};

use crate::{
  encode::{RawSubmission, decode_dt, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Location {
  File(PathBuf),
  Memory,
  Unconfigured,
}

/// A submission store backed by a single SQLite database.
///
/// Construction never touches the database. The connection is opened and the
/// schema applied on the first call that needs it; a failed attempt leaves the
/// store unconnected so a later call tries again. Once established the
/// connection is shared by every clone for the life of the process.
#[derive(Clone)]
pub struct SqliteStore {
  location: Arc<Location>,
  conn:     Arc<OnceCell<tokio_rusqlite::Connection>>,
}

impl SqliteStore {
  /// A store that will open (or create) the database at `path` on first use.
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self::with_location(Location::File(path.as_ref().to_path_buf()))
  }

  /// A store for an optional path. With `None`, every operation fails with
  /// [`Error::Unconfigured`].
  pub fn from_config(path: Option<PathBuf>) -> Self {
    Self::with_location(path.map_or(Location::Unconfigured, Location::File))
  }

  /// An in-memory store, useful for testing.
  pub fn in_memory() -> Self { Self::with_location(Location::Memory) }

  fn with_location(location: Location) -> Self {
    Self {
      location: Arc::new(location),
      conn:     Arc::new(OnceCell::new()),
    }
  }

  /// Whether the lazy connection has been established.
  pub fn is_connected(&self) -> bool { self.conn.initialized() }

  async fn connection(&self) -> Result<&tokio_rusqlite::Connection> {
    self.conn.get_or_try_init(|| self.connect()).await
  }

  async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    let conn = match &*self.location {
      Location::File(path) => tokio_rusqlite::Connection::open(path).await?,
      Location::Memory => tokio_rusqlite::Connection::open_in_memory().await?,
      Location::Unconfigured => return Err(Error::Unconfigured),
    };

    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;

    tracing::info!(location = ?self.location, "submission store connected");
    Ok(conn)
  }
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewSubmission) -> Result<ContactSubmission> {
    let conn = self.connection().await?;

    let submission_id = Uuid::new_v4();
    let id_str  = encode_uuid(submission_id);
    let name    = input.name().to_owned();
    let email   = input.email().to_owned();
    let message = input.message().to_owned();

    // Stamped on the connection thread inside the write transaction and
    // clamped to the newest stored value: `created_at` never decreases in
    // insertion order, even across a wall-clock step backwards. An
    // unreadable newest timestamp aborts the write.
    let created_at: DateTime<Utc> = conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let newest: Option<String> = tx
          .query_row(
            "SELECT created_at FROM submissions ORDER BY seq DESC LIMIT 1",
            [],
            |row| row.get(0),
          )
          .optional()?;
        let newest = match newest.as_deref().map(decode_dt).transpose() {
          Ok(newest) => newest,
          Err(e) => return Ok(Err(e)),
        };

        let now = Utc::now();
        let created_at = newest.filter(|newest| *newest > now).unwrap_or(now);

        tx.execute(
          "INSERT INTO submissions (submission_id, name, email, message, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, email, message, encode_dt(created_at)],
        )?;
        tx.commit()?;

        Ok(Ok(created_at))
      })
      .await??;

    Ok(input.into_record(submission_id, created_at))
  }

  async fn list(&self) -> Result<Vec<ContactSubmission>> {
    let conn = self.connection().await?;

    let raws: Vec<RawSubmission> = conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT submission_id, name, email, message, created_at
           FROM submissions ORDER BY seq",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawSubmission {
              submission_id: row.get(0)?,
              name:          row.get(1)?,
              email:         row.get(2)?,
              message:       row.get(3)?,
              created_at:    row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }
}

impl std::fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteStore")
      .field("location", &self.location)
      .field("connected", &self.is_connected())
      .finish()
  }
}

