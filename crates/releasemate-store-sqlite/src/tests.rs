//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, TimeZone as _, Utc};
use releasemate_core::{
  project::{DEFAULT_LEGAL_TEXT, NewProject, ProjectPatch},
  release::ReleaseRecord,
  signature::{Signature, Signer},
  form::ReleaseForm,
  store::ProjectStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn shoot_date() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 19).unwrap() }

fn ink() -> Signature { Signature::from_encoded("data:image/jpeg;base64,/9j/AA==") }

/// A valid adult release for `project_id`.
fn adult_release(project_id: Uuid, name: &str) -> ReleaseRecord {
  let mut form = ReleaseForm::open(project_id, shoot_date());
  form.set_model_name(name);
  form.set_date_of_birth("1990-05-14").unwrap();
  form.set_email("model@example.com").unwrap();
  form.capture_signature(Signer::Model, ink());
  form
    .submit(Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap())
    .unwrap()
}

/// A valid minor release with guardian consent.
fn minor_release(project_id: Uuid) -> ReleaseRecord {
  let mut form = ReleaseForm::open(project_id, shoot_date());
  form.set_model_name("Sam Young");
  form.set_date_of_birth("2014-03-02").unwrap();
  form.set_guardian_name("Pat Young");
  form.capture_signature(Signer::Model, ink());
  form.capture_signature(Signer::Guardian, ink());
  form
    .submit(Utc.with_ymd_and_hms(2026, 10, 19, 11, 0, 0).unwrap())
    .unwrap()
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_project() {
  let s = store().await;

  let mut input = NewProject::new("Autumn Lookbook", shoot_date());
  input.client_name = "Maple & Co".into();
  input.location = "Studio 4".into();
  let project = s.create_project(input).await.unwrap();
  assert_eq!(project.legal_text, DEFAULT_LEGAL_TEXT);

  let fetched = s.get_project(project.project_id).await.unwrap().unwrap();
  assert_eq!(fetched, project);
}

#[tokio::test]
async fn create_project_requires_a_name() {
  let s = store().await;
  let err = s
    .create_project(NewProject::new("   ", shoot_date()))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(releasemate_core::Error::MissingProjectName)));
  assert!(s.list_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_project_missing_returns_none() {
  let s = store().await;
  assert!(s.get_project(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.project_view(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_projects_newest_first() {
  let s = store().await;
  let a = s.create_project(NewProject::new("A", shoot_date())).await.unwrap();
  let b = s.create_project(NewProject::new("B", shoot_date())).await.unwrap();
  let c = s.create_project(NewProject::new("C", shoot_date())).await.unwrap();

  let ids: Vec<_> = s
    .list_projects()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.project_id)
    .collect();
  assert_eq!(ids, vec![c.project_id, b.project_id, a.project_id]);
}

#[tokio::test]
async fn update_project_applies_patch() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Draft", shoot_date())).await.unwrap();

  let patch = ProjectPatch {
    name: Some("Final".into()),
    location: Some("Beach".into()),
    ..Default::default()
  };
  let updated = s.update_project(project.project_id, patch).await.unwrap();
  assert_eq!(updated.name, "Final");
  assert_eq!(updated.location, "Beach");
  assert_eq!(updated.created_at, project.created_at);

  let fetched = s.get_project(project.project_id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_project_refuses_blank_name() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Keep", shoot_date())).await.unwrap();

  let patch = ProjectPatch { name: Some(String::new()), ..Default::default() };
  assert!(s.update_project(project.project_id, patch).await.is_err());

  let fetched = s.get_project(project.project_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Keep");
}

#[tokio::test]
async fn update_missing_project_is_an_error() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s.update_project(id, ProjectPatch::default()).await.unwrap_err();
  assert!(matches!(err, Error::ProjectNotFound(missing) if missing == id));
}

// ─── Releases ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_get_release() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Shoot", shoot_date())).await.unwrap();

  let record = adult_release(project.project_id, "Jane Doe");
  s.append_release(record.clone()).await.unwrap();

  let fetched = s.get_release(record.release_id()).await.unwrap().unwrap();
  assert_eq!(fetched, record);
  assert_eq!(fetched.model_name(), "Jane Doe");
  assert!(fetched.guardian().is_none());
}

#[tokio::test]
async fn minor_release_keeps_guardian_consent() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Shoot", shoot_date())).await.unwrap();

  let record = minor_release(project.project_id);
  s.append_release(record.clone()).await.unwrap();

  let fetched = s.get_release(record.release_id()).await.unwrap().unwrap();
  assert!(fetched.is_minor());
  assert_eq!(fetched.age(), 12);
  assert_eq!(fetched.guardian_name(), Some("Pat Young"));
  assert_eq!(fetched.guardian_signature(), Some(&ink()));
}

#[tokio::test]
async fn append_release_to_missing_project_fails() {
  let s = store().await;
  let orphan = adult_release(Uuid::new_v4(), "Nobody");

  let err = s.append_release(orphan.clone()).await.unwrap_err();
  assert!(matches!(err, Error::ProjectNotFound(id) if id == orphan.project_id()));
  assert!(s.get_release(orphan.release_id()).await.unwrap().is_none());
}

#[tokio::test]
async fn append_release_twice_fails() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Shoot", shoot_date())).await.unwrap();
  let record = adult_release(project.project_id, "Jane Doe");

  s.append_release(record.clone()).await.unwrap();
  let err = s.append_release(record.clone()).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateRelease(id) if id == record.release_id()));
  assert_eq!(s.list_releases(project.project_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_releases_newest_first_per_project() {
  let s = store().await;
  let first = s.create_project(NewProject::new("One", shoot_date())).await.unwrap();
  let second = s.create_project(NewProject::new("Two", shoot_date())).await.unwrap();

  let a = adult_release(first.project_id, "A");
  let b = minor_release(first.project_id);
  let other = adult_release(second.project_id, "Other");
  for r in [&a, &b, &other] {
    s.append_release(r.clone()).await.unwrap();
  }

  // `b` was created an hour after `a`.
  let ids: Vec<_> = s
    .list_releases(first.project_id)
    .await
    .unwrap()
    .iter()
    .map(ReleaseRecord::release_id)
    .collect();
  assert_eq!(ids, vec![b.release_id(), a.release_id()]);

  let err = s.list_releases(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::ProjectNotFound(_)));
}

#[tokio::test]
async fn releases_cannot_be_updated_in_place() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Shoot", shoot_date())).await.unwrap();
  let record = adult_release(project.project_id, "Jane Doe");
  s.append_release(record.clone()).await.unwrap();

  let id_str = record.release_id().hyphenated().to_string();
  let result = s
    .conn_for_tests()
    .call(move |conn| {
      conn.execute(
        "UPDATE releases SET model_name = 'Someone Else' WHERE release_id = ?1",
        rusqlite::params![id_str],
      )?;
      Ok(())
    })
    .await;
  assert!(result.is_err());

  let fetched = s.get_release(record.release_id()).await.unwrap().unwrap();
  assert_eq!(fetched.model_name(), "Jane Doe");
}

// ─── Views and deletion ──────────────────────────────────────────────────────

#[tokio::test]
async fn project_view_bundles_releases() {
  let s = store().await;
  let project = s.create_project(NewProject::new("Shoot", shoot_date())).await.unwrap();
  s.append_release(adult_release(project.project_id, "Jane Doe")).await.unwrap();
  s.append_release(minor_release(project.project_id)).await.unwrap();

  let view = s.project_view(project.project_id).await.unwrap().unwrap();
  assert_eq!(view.project, project);
  assert_eq!(view.releases.len(), 2);
  assert!(view.releases.iter().all(|r| r.project_id() == project.project_id));
}

#[tokio::test]
async fn delete_project_cascades_to_releases() {
  let s = store().await;
  let doomed = s.create_project(NewProject::new("Doomed", shoot_date())).await.unwrap();
  let kept = s.create_project(NewProject::new("Kept", shoot_date())).await.unwrap();

  let gone = adult_release(doomed.project_id, "Gone");
  let stays = adult_release(kept.project_id, "Stays");
  s.append_release(gone.clone()).await.unwrap();
  s.append_release(stays.clone()).await.unwrap();

  s.delete_project(doomed.project_id).await.unwrap();

  assert!(s.get_project(doomed.project_id).await.unwrap().is_none());
  assert!(s.get_release(gone.release_id()).await.unwrap().is_none());
  assert!(s.get_release(stays.release_id()).await.unwrap().is_some());

  let err = s.delete_project(doomed.project_id).await.unwrap_err();
  assert!(matches!(err, Error::ProjectNotFound(_)));
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!("releasemate-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("store.db");

  let project_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let project = s.create_project(NewProject::new("Persisted", shoot_date())).await.unwrap();
    s.append_release(adult_release(project.project_id, "Jane Doe")).await.unwrap();
    project.project_id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let view = s.project_view(project_id).await.unwrap().unwrap();
  assert_eq!(view.project.name, "Persisted");
  assert_eq!(view.releases.len(), 1);

  drop(s);
  let _ = std::fs::remove_dir_all(dir);
}
