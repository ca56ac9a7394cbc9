//! Finalised release records.
//!
//! A [`ReleaseRecord`] is immutable once built. Fields are private and there
//! are no setters; an amendment is a new record. New records come only from
//! [`ReleaseForm::submit`](crate::form::ReleaseForm::submit); storage backends
//! rehydrate persisted ones through `Deserialize`, which re-checks the
//! guardian invariant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  signature::Signature,
  subject::{ConsentSubject, GuardianConsent},
};

/// A signed model release, owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRelease")]
pub struct ReleaseRecord {
  release_id:     Uuid,
  project_id:     Uuid,
  subject:        ConsentSubject,
  age:            i32,
  is_minor:       bool,
  /// The binding signing date: the day the form was opened.
  execution_date: NaiveDate,
  signature:      Signature,
  /// Present iff `is_minor`.
  guardian:       Option<GuardianConsent>,
  created_at:     DateTime<Utc>,
}

/// Everything a finished form hands over when building a record.
pub(crate) struct Finalized {
  pub project_id:     Uuid,
  pub subject:        ConsentSubject,
  pub age:            i32,
  pub is_minor:       bool,
  pub execution_date: NaiveDate,
  pub signature:      Signature,
  pub guardian:       GuardianConsent,
  pub created_at:     DateTime<Utc>,
}

impl ReleaseRecord {
  pub(crate) fn finalize(input: Finalized) -> Self {
    Self {
      release_id:     Uuid::new_v4(),
      project_id:     input.project_id,
      subject:        input.subject,
      age:            input.age,
      is_minor:       input.is_minor,
      execution_date: input.execution_date,
      signature:      input.signature,
      guardian:       input.is_minor.then_some(input.guardian),
      created_at:     input.created_at,
    }
  }

  pub fn release_id(&self) -> Uuid { self.release_id }

  pub fn project_id(&self) -> Uuid { self.project_id }

  pub fn subject(&self) -> &ConsentSubject { &self.subject }

  pub fn model_name(&self) -> &str { self.subject.full_name() }

  pub fn age(&self) -> i32 { self.age }

  pub fn is_minor(&self) -> bool { self.is_minor }

  pub fn execution_date(&self) -> NaiveDate { self.execution_date }

  pub fn signature(&self) -> &Signature { &self.signature }

  pub fn guardian(&self) -> Option<&GuardianConsent> { self.guardian.as_ref() }

  pub fn guardian_name(&self) -> Option<&str> {
    self.guardian.as_ref().map(|g| g.name.as_str())
  }

  pub fn guardian_signature(&self) -> Option<&Signature> {
    self.guardian.as_ref().map(|g| &g.signature)
  }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

// ─── Rehydration ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct UncheckedRelease {
  release_id:     Uuid,
  project_id:     Uuid,
  subject:        ConsentSubject,
  age:            i32,
  is_minor:       bool,
  execution_date: NaiveDate,
  signature:      Signature,
  guardian:       Option<GuardianConsent>,
  created_at:     DateTime<Utc>,
}

impl TryFrom<UncheckedRelease> for ReleaseRecord {
  type Error = Error;

  fn try_from(raw: UncheckedRelease) -> Result<Self, Error> {
    let guardian_ok = match (&raw.guardian, raw.is_minor) {
      (Some(g), true) => g.is_complete(),
      (None, false) => true,
      _ => false,
    };
    if !guardian_ok {
      return Err(Error::GuardianMismatch(raw.release_id));
    }
    Ok(Self {
      release_id:     raw.release_id,
      project_id:     raw.project_id,
      subject:        raw.subject,
      age:            raw.age,
      is_minor:       raw.is_minor,
      execution_date: raw.execution_date,
      signature:      raw.signature,
      guardian:       raw.guardian,
      created_at:     raw.created_at,
    })
  }
}
