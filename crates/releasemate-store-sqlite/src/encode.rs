//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 UTC strings with fixed microsecond precision, so
//! they sort lexically. Calendar dates are `YYYY-MM-DD`. UUIDs are hyphenated
//! lowercase strings. A release is stored whole as JSON; its indexed columns
//! are copies.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use releasemate_core::{project::Project, release::ReleaseRecord};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── ReleaseRecord ────────────────────────────────────────────────────────────

pub fn encode_release(record: &ReleaseRecord) -> Result<String> {
  Ok(serde_json::to_string(record)?)
}

/// Deserialisation re-checks the guardian invariant.
pub fn decode_release(s: &str) -> Result<ReleaseRecord> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `projects` row.
pub struct RawProject {
  pub project_id:  String,
  pub name:        String,
  pub description: String,
  pub client_name: String,
  pub location:    String,
  pub shoot_date:  String,
  pub legal_text:  String,
  pub created_at:  String,
}

/// Column list matching [`RawProject::from_row`].
pub const PROJECT_COLUMNS: &str = "project_id, name, description, client_name, \
                                   location, shoot_date, legal_text, created_at";

impl RawProject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      project_id:  row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      client_name: row.get(3)?,
      location:    row.get(4)?,
      shoot_date:  row.get(5)?,
      legal_text:  row.get(6)?,
      created_at:  row.get(7)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      project_id:  decode_uuid(&self.project_id)?,
      name:        self.name,
      description: self.description,
      client_name: self.client_name,
      location:    self.location,
      shoot_date:  decode_date(&self.shoot_date)?,
      legal_text:  self.legal_text,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
