//! Error types for `releasemate-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("project not found: {0}")]
  ProjectNotFound(Uuid),

  #[error("release not found: {0}")]
  ReleaseNotFound(Uuid),

  #[error("project name is required")]
  MissingProjectName,

  #[error("invalid date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  /// A deserialised release breaks the guardian invariant.
  #[error("release {0}: guardian consent does not match minor status")]
  GuardianMismatch(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
