//! The consent state machine.
//!
//! Validity is re-derived from the current field values on every submit
//! attempt. Guardian requirements depend on the age, which depends on a date
//! of birth the user may change at any time, so no state is carried between
//! attempts.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  signature::Signature,
  subject::{ConsentSubject, GuardianConsent, is_minor_age},
};

/// The three conceptual states of a release form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
  /// Subject name or primary signature missing.
  Incomplete,
  /// Subject is a minor and guardian name or signature is missing.
  MinorIncomplete,
  /// Everything required for the subject's minor status is present.
  Valid,
}

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
  NameAndSignatureRequired,
  GuardianNameRequired,
  GuardianSignatureRequired,
}

impl Reason {
  /// The user-facing message for this rejection.
  pub fn message(self) -> &'static str {
    match self {
      Self::NameAndSignatureRequired => {
        "Please provide the model's name and signature."
      }
      Self::GuardianNameRequired => {
        "As the model is under 18, a legal guardian's name is required."
      }
      Self::GuardianSignatureRequired => {
        "As the model is under 18, a legal guardian's signature is required."
      }
    }
  }

  pub fn state(self) -> ConsentState {
    match self {
      Self::NameAndSignatureRequired => ConsentState::Incomplete,
      Self::GuardianNameRequired | Self::GuardianSignatureRequired => {
        ConsentState::MinorIncomplete
      }
    }
  }
}

impl fmt::Display for Reason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
  Valid { age: i32, is_minor: bool },
  Rejected(Reason),
}

impl Classification {
  pub fn state(&self) -> ConsentState {
    match self {
      Self::Valid { .. } => ConsentState::Valid,
      Self::Rejected(reason) => reason.state(),
    }
  }

  pub fn is_valid(&self) -> bool { matches!(self, Self::Valid { .. }) }
}

/// Classify a form's fields as of `reference`.
///
/// Checks run in a fixed order and stop at the first failure:
/// base fields, then guardian name, then guardian signature.
pub fn classify(
  subject: &ConsentSubject,
  signature: &Signature,
  guardian: &GuardianConsent,
  reference: NaiveDate,
) -> Classification {
  if subject.full_name().is_empty() || signature.is_empty() {
    return Classification::Rejected(Reason::NameAndSignatureRequired);
  }

  let age = subject.age(reference);
  let is_minor = is_minor_age(age);

  if is_minor {
    if !guardian.has_name() {
      return Classification::Rejected(Reason::GuardianNameRequired);
    }
    if guardian.signature.is_empty() {
      return Classification::Rejected(Reason::GuardianSignatureRequired);
    }
  }

  Classification::Valid { age, is_minor }
}

#[cfg(test)]
mod tests {
  use chrono::Months;

  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 19).unwrap() }

  fn years_ago(years: u32) -> NaiveDate {
    today().checked_sub_months(Months::new(years * 12)).unwrap()
  }

  fn signed() -> Signature {
    Signature::from_encoded("data:image/jpeg;base64,/9j/4AAQ")
  }

  fn subject(name: &str, dob: Option<NaiveDate>) -> ConsentSubject {
    let mut s = ConsentSubject::default();
    s.set_full_name(name);
    s.set_birth_date(dob);
    s
  }

  #[test]
  fn missing_name_is_incomplete_regardless_of_other_fields() {
    let result = classify(
      &subject("", None),
      &signed(),
      &GuardianConsent::default(),
      today(),
    );
    assert_eq!(result, Classification::Rejected(Reason::NameAndSignatureRequired));
    assert_eq!(result.state(), ConsentState::Incomplete);
  }

  #[test]
  fn missing_signature_is_incomplete() {
    let result = classify(
      &subject("Jane Doe", Some(years_ago(30))),
      &Signature::empty(),
      &GuardianConsent::default(),
      today(),
    );
    assert_eq!(result.state(), ConsentState::Incomplete);
  }

  #[test]
  fn base_fields_are_checked_before_guardian_fields() {
    let result = classify(
      &subject("", Some(years_ago(10))),
      &Signature::empty(),
      &GuardianConsent::default(),
      today(),
    );
    assert_eq!(result, Classification::Rejected(Reason::NameAndSignatureRequired));
  }

  #[test]
  fn minor_with_blank_guardian_name_is_rejected() {
    let guardian = GuardianConsent { name: String::new(), signature: signed() };
    let result =
      classify(&subject("Sam", Some(years_ago(10))), &signed(), &guardian, today());
    assert_eq!(result, Classification::Rejected(Reason::GuardianNameRequired));
    assert_eq!(result.state(), ConsentState::MinorIncomplete);
  }

  #[test]
  fn minor_with_whitespace_guardian_name_is_rejected() {
    let guardian = GuardianConsent { name: "   ".into(), signature: signed() };
    let result =
      classify(&subject("Sam", Some(years_ago(12))), &signed(), &guardian, today());
    assert_eq!(result, Classification::Rejected(Reason::GuardianNameRequired));
  }

  #[test]
  fn minor_without_guardian_signature_is_rejected() {
    let guardian = GuardianConsent {
      name:      "Pat Parent".into(),
      signature: Signature::empty(),
    };
    let result =
      classify(&subject("Sam", Some(years_ago(15))), &signed(), &guardian, today());
    assert_eq!(result, Classification::Rejected(Reason::GuardianSignatureRequired));
  }

  #[test]
  fn adult_needs_no_guardian() {
    let result = classify(
      &subject("Jane Doe", Some(years_ago(30))),
      &signed(),
      &GuardianConsent::default(),
      today(),
    );
    assert_eq!(result, Classification::Valid { age: 30, is_minor: false });
  }

  #[test]
  fn complete_minor_is_valid() {
    let guardian = GuardianConsent { name: "Pat Parent".into(), signature: signed() };
    let result =
      classify(&subject("Sam", Some(years_ago(15))), &signed(), &guardian, today());
    assert_eq!(result, Classification::Valid { age: 15, is_minor: true });
  }

  #[test]
  fn unknown_age_is_treated_as_adult() {
    let result = classify(
      &subject("No Birthday", None),
      &signed(),
      &GuardianConsent::default(),
      today(),
    );
    assert_eq!(result, Classification::Valid { age: 0, is_minor: false });
  }

  #[test]
  fn reasons_map_to_states() {
    assert_eq!(Reason::NameAndSignatureRequired.state(), ConsentState::Incomplete);
    assert_eq!(Reason::GuardianNameRequired.state(), ConsentState::MinorIncomplete);
    assert_eq!(
      Reason::GuardianSignatureRequired.to_string(),
      "As the model is under 18, a legal guardian's signature is required."
    );
  }
}
