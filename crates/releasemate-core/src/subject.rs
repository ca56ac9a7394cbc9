//! The consent subject (the model being photographed) and guardian consent.
//!
//! Fields are private and changed only through validated setters, so a form
//! never holds a half-parsed date or a malformed email address.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, signature::Signature};

/// Ages below this are minors (when the age is known and positive).
pub const AGE_OF_MAJORITY: i32 = 18;

// ─── Age arithmetic ──────────────────────────────────────────────────────────

/// Whole years between `date_of_birth` and `reference`.
///
/// The naive year difference is reduced by one when the reference month/day
/// falls before the birth month/day. An unset date of birth yields `0`; a
/// birth date after `reference` yields a negative age.
pub fn age_on(date_of_birth: Option<NaiveDate>, reference: NaiveDate) -> i32 {
  let Some(dob) = date_of_birth else {
    return 0;
  };
  let mut age = reference.year() - dob.year();
  if (reference.month(), reference.day()) < (dob.month(), dob.day()) {
    age -= 1;
  }
  age
}

/// `true` iff `0 < age < 18`. An unknown (zero) age is never a minor.
pub fn is_minor_age(age: i32) -> bool { age > 0 && age < AGE_OF_MAJORITY }

/// Parse an ISO `YYYY-MM-DD` form value. Empty input means "unset".
pub fn parse_form_date(input: &str) -> Result<Option<NaiveDate>> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    .map(Some)
    .map_err(|_| Error::InvalidDate(input.to_owned()))
}

// ─── ConsentSubject ──────────────────────────────────────────────────────────

/// The model giving consent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentSubject {
  full_name:     String,
  date_of_birth: Option<NaiveDate>,
  address:       Option<String>,
  email:         String,
}

impl ConsentSubject {
  pub fn full_name(&self) -> &str { &self.full_name }

  pub fn date_of_birth(&self) -> Option<NaiveDate> { self.date_of_birth }

  pub fn address(&self) -> Option<&str> { self.address.as_deref() }

  pub fn email(&self) -> &str { &self.email }

  pub fn set_full_name(&mut self, name: impl Into<String>) {
    self.full_name = name.into();
  }

  /// Set the date of birth from a form value. On error the previous value is
  /// kept.
  pub fn set_date_of_birth(&mut self, input: &str) -> Result<()> {
    self.date_of_birth = parse_form_date(input)?;
    Ok(())
  }

  pub fn set_birth_date(&mut self, date: Option<NaiveDate>) {
    self.date_of_birth = date;
  }

  /// Blank addresses are stored as absent.
  pub fn set_address(&mut self, address: impl Into<String>) {
    let address = address.into();
    self.address = (!address.trim().is_empty()).then_some(address);
  }

  /// Set the email address. A non-empty value must contain `@`; on error the
  /// previous value is kept.
  pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
    let email = email.into();
    let trimmed = email.trim();
    if !trimmed.is_empty() && !looks_like_email(trimmed) {
      return Err(Error::InvalidEmail(email));
    }
    self.email = trimmed.to_owned();
    Ok(())
  }

  pub fn age(&self, reference: NaiveDate) -> i32 {
    age_on(self.date_of_birth, reference)
  }

  pub fn is_minor(&self, reference: NaiveDate) -> bool {
    is_minor_age(self.age(reference))
  }
}

fn looks_like_email(s: &str) -> bool {
  match s.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    }
    None => false,
  }
}

// ─── GuardianConsent ─────────────────────────────────────────────────────────

/// Name and signature of a parent or legal guardian.
///
/// Both are required when the subject is a minor and dropped otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianConsent {
  pub name:      String,
  pub signature: Signature,
}

impl GuardianConsent {
  /// Whitespace-only names count as missing.
  pub fn has_name(&self) -> bool { !self.name.trim().is_empty() }

  pub fn is_complete(&self) -> bool {
    self.has_name() && !self.signature.is_empty()
  }
}
