//! The [`Summarizer`] seam and the placeholder policy around it.

use std::future::Future;

use crate::Result;

/// Shown instead of a summary when the device has no connectivity.
pub const OFFLINE_PLACEHOLDER: &str =
  "Offline: Legal summary unavailable. Please connect to the internet to use AI features.";

/// Shown instead of a summary when the service fails or returns nothing.
pub const ERROR_PLACEHOLDER: &str = "Could not generate summary at this time.";

/// Turns legal text into a short plain-language summary.
pub trait Summarizer: Send + Sync {
  fn summarize(&self, legal_text: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Summarise `legal_text`, never failing.
///
/// Offline requests skip the summarizer and return [`OFFLINE_PLACEHOLDER`].
/// Any error, and a blank summary, yields [`ERROR_PLACEHOLDER`].
pub async fn legal_summary<S: Summarizer>(summarizer: &S, online: bool, legal_text: &str) -> String {
  if !online {
    tracing::debug!("offline; legal summary skipped");
    return OFFLINE_PLACEHOLDER.to_owned();
  }

  match summarizer.summarize(legal_text).await {
    Ok(summary) if !summary.trim().is_empty() => summary,
    Ok(_) => {
      tracing::warn!("legal summary came back empty");
      ERROR_PLACEHOLDER.to_owned()
    }
    Err(e) => {
      tracing::warn!(error = %e, "legal summary failed");
      ERROR_PLACEHOLDER.to_owned()
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use crate::Error;

  /// Canned summarizer that counts its calls.
  pub(crate) struct Stub {
    pub reply: Option<String>,
    pub calls: AtomicUsize,
  }

  impl Stub {
    pub(crate) fn replying(text: &str) -> Self {
      Self { reply: Some(text.to_owned()), calls: AtomicUsize::new(0) }
    }

    pub(crate) fn failing() -> Self { Self { reply: None, calls: AtomicUsize::new(0) } }
  }

  impl Summarizer for Stub {
    async fn summarize(&self, _legal_text: &str) -> Result<String> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.reply.clone().ok_or(Error::EmptyResponse)
    }
  }

  #[tokio::test]
  async fn online_success_passes_the_summary_through() {
    let stub = Stub::replying("- You let the photographer use your pictures.");
    let out = legal_summary(&stub, true, "legal text").await;
    assert_eq!(out, "- You let the photographer use your pictures.");
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn offline_never_calls_the_service() {
    let stub = Stub::replying("unused");
    let out = legal_summary(&stub, false, "legal text").await;
    assert_eq!(out, OFFLINE_PLACEHOLDER);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn failure_becomes_the_error_placeholder() {
    let out = legal_summary(&Stub::failing(), true, "legal text").await;
    assert_eq!(out, ERROR_PLACEHOLDER);
  }

  #[tokio::test]
  async fn blank_summary_becomes_the_error_placeholder() {
    let out = legal_summary(&Stub::replying("  \n"), true, "legal text").await;
    assert_eq!(out, ERROR_PLACEHOLDER);
  }
}
