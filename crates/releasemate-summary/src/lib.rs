//! Plain-language summaries of release legal text.
//!
//! The summary is advisory. It is requested on demand, runs as its own task,
//! and its failure never blocks signing: every error becomes a fixed
//! placeholder string.

mod gemini;
mod panel;
mod summarize;

pub mod error;

pub use error::{Error, Result};
pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, GeminiSummarizer};
pub use panel::{PanelState, SummaryPanel};
pub use summarize::{ERROR_PLACEHOLDER, OFFLINE_PLACEHOLDER, Summarizer, legal_summary};
