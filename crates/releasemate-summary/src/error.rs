//! Error type for `releasemate-summary`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("summary service returned {0}")]
  Status(reqwest::StatusCode),

  #[error("no API key configured for the summary service")]
  MissingApiKey,

  #[error("summary service returned no text")]
  EmptyResponse,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
