//! Error type for `releasemate-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] releasemate_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("project not found: {0}")]
  ProjectNotFound(uuid::Uuid),

  /// Releases are append-only; the same record cannot be stored twice.
  #[error("release {0} is already stored")]
  DuplicateRelease(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
