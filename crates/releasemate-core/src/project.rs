//! Projects (shoots) and their release collections.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, release::ReleaseRecord};

/// Release wording used when a project does not supply its own.
pub const DEFAULT_LEGAL_TEXT: &str = "I hereby irrevocably grant to the Photographer and those acting with his/her permission and authority, the right and license to use, reuse, publish, and republish photographic pictures of me or in which I may be included, in whole or in part, in conjunction with my own or a fictitious name, or reproductions thereof in color or otherwise, made through any medium at his/her studios or elsewhere, and in any and all media now or hereafter known, for illustration, promotion, art, editorial, advertising, trade, or any other purpose whatsoever. I also consent to the use of any published matter in conjunction therewith.

I hereby waive any right that I may have to inspect or approve the finished product or products and the advertising copy or other matter that may be used in connection therewith or the use to which it may be applied.

I hereby release, discharge and agree to save harmless the Photographer and those acting with his/her permission and authority from any liability by virtue of any blurring, distortion, alteration, optical illusion, or use in composite form, whether intentional or otherwise, that may occur or be produced in the taking of said picture or in any subsequent processing thereof, as well as any publication thereof, including without limitation any claims for libel or invasion of privacy.";

/// A photo shoot with its own release wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub project_id:  Uuid,
  pub name:        String,
  pub description: String,
  pub client_name: String,
  pub location:    String,
  pub shoot_date:  NaiveDate,
  /// The text every release in this project agrees to.
  pub legal_text:  String,
  pub created_at:  DateTime<Utc>,
}

/// A project together with its releases, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectView {
  pub project:  Project,
  pub releases: Vec<ReleaseRecord>,
}

// ─── NewProject ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ProjectStore::create_project`].
/// `project_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewProject {
  pub name:        String,
  pub description: String,
  pub client_name: String,
  pub location:    String,
  pub shoot_date:  NaiveDate,
  pub legal_text:  String,
}

impl NewProject {
  /// Convenience constructor: blank optional fields and the default wording.
  pub fn new(name: impl Into<String>, shoot_date: NaiveDate) -> Self {
    Self {
      name: name.into(),
      description: String::new(),
      client_name: String::new(),
      location: String::new(),
      shoot_date,
      legal_text: DEFAULT_LEGAL_TEXT.to_owned(),
    }
  }

  /// A project needs a non-blank name.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::MissingProjectName);
    }
    Ok(())
  }
}

// ─── ProjectPatch ────────────────────────────────────────────────────────────

/// Edits to an existing project. `None` leaves a field unchanged.
/// Identity, creation time, and releases are never editable.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub client_name: Option<String>,
  pub location:    Option<String>,
  pub shoot_date:  Option<NaiveDate>,
  pub legal_text:  Option<String>,
}

impl ProjectPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.description.is_none()
      && self.client_name.is_none()
      && self.location.is_none()
      && self.shoot_date.is_none()
      && self.legal_text.is_none()
  }

  /// Apply to `project`, refusing to blank its name.
  pub fn apply(self, project: &mut Project) -> Result<()> {
    if let Some(name) = &self.name
      && name.trim().is_empty()
    {
      return Err(Error::MissingProjectName);
    }
    if let Some(v) = self.name {
      project.name = v;
    }
    if let Some(v) = self.description {
      project.description = v;
    }
    if let Some(v) = self.client_name {
      project.client_name = v;
    }
    if let Some(v) = self.location {
      project.location = v;
    }
    if let Some(v) = self.shoot_date {
      project.shoot_date = v;
    }
    if let Some(v) = self.legal_text {
      project.legal_text = v;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn shoot() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 6, 1).unwrap() }

  fn project() -> Project {
    Project {
      project_id:  Uuid::new_v4(),
      name:        "Summer Collection".into(),
      description: String::new(),
      client_name: "Acme".into(),
      location:    "Studio B".into(),
      shoot_date:  shoot(),
      legal_text:  DEFAULT_LEGAL_TEXT.into(),
      created_at:  Utc::now(),
    }
  }

  #[test]
  fn new_project_uses_default_wording() {
    let p = NewProject::new("Lookbook", shoot());
    assert_eq!(p.legal_text, DEFAULT_LEGAL_TEXT);
    assert!(p.validate().is_ok());
    assert!(NewProject::new("  ", shoot()).validate().is_err());
  }

  #[test]
  fn patch_updates_only_given_fields() {
    let mut p = project();
    let before = p.clone();
    ProjectPatch { location: Some("Beach".into()), ..Default::default() }
      .apply(&mut p)
      .unwrap();
    assert_eq!(p.location, "Beach");
    assert_eq!(p.name, before.name);
    assert_eq!(p.project_id, before.project_id);
  }

  #[test]
  fn patch_cannot_blank_the_name() {
    let mut p = project();
    let err = ProjectPatch {
      name: Some(String::new()),
      location: Some("Beach".into()),
      ..Default::default()
    }
    .apply(&mut p)
    .unwrap_err();
    assert!(matches!(err, Error::MissingProjectName));
    assert_eq!(p.location, "Studio B");
  }
}
