//! Layered configuration: defaults, then `releasemate.toml`, then
//! `RELEASEMATE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use releasemate_pad::EncodeOptions;
use releasemate_summary::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use serde::Deserialize;

/// Read from the working directory when no `--config` is given.
const DEFAULT_CONFIG_FILE: &str = "releasemate.toml";
const DEFAULT_STORE_PATH: &str = "~/.local/share/releasemate/releasemate.db";
const DEFAULT_SIGNATURE_QUALITY: u8 = 80;

/// Image format for captured signatures.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureFormat {
  #[default]
  Jpeg,
  Png,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub store_path:        PathBuf,
  pub gemini_api_key:    String,
  pub gemini_model:      String,
  pub gemini_base_url:   String,
  /// Skip the network entirely; summaries show the offline placeholder.
  pub offline:           bool,
  pub signature_format:  SignatureFormat,
  /// JPEG quality, 1–100. Ignored for PNG.
  pub signature_quality: u8,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:        PathBuf::from(DEFAULT_STORE_PATH),
      gemini_api_key:    String::new(),
      gemini_model:      DEFAULT_MODEL.to_owned(),
      gemini_base_url:   DEFAULT_BASE_URL.to_owned(),
      offline:           false,
      signature_format:  SignatureFormat::Jpeg,
      signature_quality: DEFAULT_SIGNATURE_QUALITY,
    }
  }
}

impl Settings {
  /// Load settings layered under the environment.
  ///
  /// An explicit `path` must exist. Without one, `releasemate.toml` in the
  /// working directory is read if present.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = match path {
      Some(path) => config::File::from(path).required(true),
      None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };
    let settings = config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("RELEASEMATE").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// Store path with a leading `~/` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn encode_options(&self) -> EncodeOptions {
    match self.signature_format {
      SignatureFormat::Jpeg => EncodeOptions::jpeg(self.signature_quality),
      SignatureFormat::Png => EncodeOptions::png(),
    }
  }

  pub fn gemini(&self) -> GeminiConfig {
    GeminiConfig {
      api_key:  self.gemini_api_key.clone(),
      model:    self.gemini_model.clone(),
      base_url: self.gemini_base_url.clone(),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
