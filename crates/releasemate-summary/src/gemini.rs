//! [`GeminiSummarizer`]: a [`Summarizer`] backed by the Gemini
//! `generateContent` REST endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, summarize::Summarizer};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const SYSTEM_INSTRUCTION: &str =
  "You are a legal assistant specializing in photography and creative media contracts.";

const PROMPT: &str = "Summarize the following model release legal text into simple, \
                      easy-to-understand bullet points for a model to read before signing. \
                      Focus on what rights they are giving away and what they get in return. \
                      Keep it friendly but accurate.";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
  pub api_key:  String,
  pub model:    String,
  pub base_url: String,
}

impl GeminiConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:  api_key.into(),
      model:    DEFAULT_MODEL.to_owned(),
      base_url: DEFAULT_BASE_URL.to_owned(),
    }
  }
}

/// Clones share the inner [`reqwest::Client`].
#[derive(Clone)]
pub struct GeminiSummarizer {
  client: Client,
  config: GeminiConfig,
}

impl GeminiSummarizer {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }
}

impl Summarizer for GeminiSummarizer {
  async fn summarize(&self, legal_text: &str) -> Result<String> {
    if self.config.api_key.is_empty() {
      return Err(Error::MissingApiKey);
    }

    let body = GenerateRequest::new(legal_text);
    let resp = self
      .client
      .post(self.url())
      .query(&[("key", self.config.api_key.as_str())])
      .json(&body)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let parsed: GenerateResponse = resp.json().await?;
    tracing::debug!(candidates = parsed.candidates.len(), "summary response received");
    parsed.text().ok_or(Error::EmptyResponse)
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
  system_instruction: Content,
  contents:           Vec<Content>,
}

impl GenerateRequest {
  fn new(legal_text: &str) -> Self {
    Self {
      system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
      contents:           vec![Content::text(
        Some("user"),
        &format!("{PROMPT} \n\nLegal Text: {legal_text}"),
      )],
    }
  }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  role:  Option<String>,
  #[serde(default)]
  parts: Vec<Part>,
}

impl Content {
  fn text(role: Option<&str>, text: &str) -> Self {
    Self {
      role:  role.map(str::to_owned),
      parts: vec![Part { text: Some(text.to_owned()) }],
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Content,
}

impl GenerateResponse {
  /// Concatenated text parts of the first candidate.
  fn text(&self) -> Option<String> {
    let parts = &self.candidates.first()?.content.parts;
    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    (!text.is_empty()).then_some(text)
  }
}
