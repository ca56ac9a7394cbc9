//! A release form session: field state for one signing, from opening to
//! submission.
//!
//! The execution date is captured once, when the form is opened. A form left
//! open across midnight still reports its opening date.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
  Result,
  consent::{Classification, ConsentState, Reason, classify},
  release::{Finalized, ReleaseRecord},
  signature::{Signature, Signer},
  subject::{ConsentSubject, GuardianConsent},
};

/// Field state of an open release form.
#[derive(Debug, Clone)]
pub struct ReleaseForm {
  project_id: Uuid,
  opened_on:  NaiveDate,
  subject:    ConsentSubject,
  signature:  Signature,
  guardian:   GuardianConsent,
}

/// A submission that did not pass validation.
///
/// Carries the form back unchanged so no entered value or captured signature
/// is lost.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct Rejected {
  pub reason: Reason,
  form:       Box<ReleaseForm>,
}

impl Rejected {
  pub fn state(&self) -> ConsentState { self.reason.state() }

  pub fn form(&self) -> &ReleaseForm { &self.form }

  pub fn into_form(self) -> ReleaseForm { *self.form }
}

impl ReleaseForm {
  /// Open a blank form for `project_id`. `opened_on` becomes the execution
  /// date of the resulting release.
  pub fn open(project_id: Uuid, opened_on: NaiveDate) -> Self {
    Self {
      project_id,
      opened_on,
      subject: ConsentSubject::default(),
      signature: Signature::empty(),
      guardian: GuardianConsent::default(),
    }
  }

  pub fn project_id(&self) -> Uuid { self.project_id }

  pub fn opened_on(&self) -> NaiveDate { self.opened_on }

  pub fn subject(&self) -> &ConsentSubject { &self.subject }

  pub fn guardian(&self) -> &GuardianConsent { &self.guardian }

  // ── Field setters ─────────────────────────────────────────────────────────

  pub fn set_model_name(&mut self, name: impl Into<String>) {
    self.subject.set_full_name(name);
  }

  pub fn set_date_of_birth(&mut self, input: &str) -> Result<()> {
    self.subject.set_date_of_birth(input)
  }

  pub fn set_address(&mut self, address: impl Into<String>) {
    self.subject.set_address(address);
  }

  pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
    self.subject.set_email(email)
  }

  pub fn set_guardian_name(&mut self, name: impl Into<String>) {
    self.guardian.name = name.into();
  }

  /// Store the latest output of a signature surface. An empty signature
  /// (from a cleared surface) removes the previous one.
  pub fn capture_signature(&mut self, signer: Signer, signature: Signature) {
    match signer {
      Signer::Model => self.signature = signature,
      Signer::Guardian => self.guardian.signature = signature,
    }
  }

  pub fn signature(&self, signer: Signer) -> &Signature {
    match signer {
      Signer::Model => &self.signature,
      Signer::Guardian => &self.guardian.signature,
    }
  }

  // ── Derived values ────────────────────────────────────────────────────────

  pub fn age(&self, today: NaiveDate) -> i32 { self.subject.age(today) }

  /// Whether the guardian section must be shown and completed.
  pub fn is_minor(&self, today: NaiveDate) -> bool { self.subject.is_minor(today) }

  pub fn classify(&self, today: NaiveDate) -> Classification {
    classify(&self.subject, &self.signature, &self.guardian, today)
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Validate and finalise the form.
  ///
  /// Age is computed against `now`'s date. On success the form is consumed
  /// and exactly one [`ReleaseRecord`] comes out; on failure nothing is built
  /// and the form is handed back inside [`Rejected`].
  pub fn submit(self, now: DateTime<Utc>) -> Result<ReleaseRecord, Rejected> {
    let (age, is_minor) = match self.classify(now.date_naive()) {
      Classification::Valid { age, is_minor } => (age, is_minor),
      Classification::Rejected(reason) => {
        tracing::debug!(
          project_id = %self.project_id,
          ?reason,
          "release submission rejected"
        );
        return Err(Rejected { reason, form: Box::new(self) });
      }
    };

    let record = ReleaseRecord::finalize(Finalized {
      project_id: self.project_id,
      subject: self.subject,
      age,
      is_minor,
      execution_date: self.opened_on,
      signature: self.signature,
      guardian: self.guardian,
      created_at: now,
    });

    tracing::info!(
      release_id = %record.release_id(),
      project_id = %record.project_id(),
      is_minor,
      "release finalised"
    );
    Ok(record)
  }
}
