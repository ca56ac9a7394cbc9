//! Encoded signature images.
//!
//! A [`Signature`] is the opaque image string produced by a signature surface:
//! a base64 `data:` URL that document exporters can use directly as an image
//! source. The empty string is the "no signature" sentinel and must never be
//! rendered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who a signature belongs to on a release form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signer {
  Model,
  Guardian,
}

/// An encoded signature image, or the empty sentinel.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
  /// The "absent" sentinel.
  pub const fn empty() -> Self { Self(String::new()) }

  /// Wrap an already-encoded image string.
  pub fn from_encoded(encoded: impl Into<String>) -> Self {
    Self(encoded.into())
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The MIME type declared by the `data:` URL prefix, if any.
  pub fn media_type(&self) -> Option<&str> {
    let rest = self.0.strip_prefix("data:")?;
    rest.split_once(';').map(|(media, _)| media)
  }

  pub fn into_string(self) -> String { self.0 }
}

// Encoded images run to tens of kilobytes; keep debug output readable.
impl fmt::Debug for Signature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0.is_empty() {
      f.write_str("Signature(<empty>)")
    } else {
      write!(
        f,
        "Signature({}, {} bytes)",
        self.media_type().unwrap_or("unknown"),
        self.0.len()
      )
    }
  }
}
