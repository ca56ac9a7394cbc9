//! The `ProjectStore` trait.
//!
//! Implemented by storage backends (e.g. `releasemate-store-sqlite`). The CLI
//! and any other front end depend on this abstraction, not on a concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  project::{NewProject, Project, ProjectPatch, ProjectView},
  release::ReleaseRecord,
};

/// Abstraction over on-device project and release storage.
///
/// Releases are append-only: there is no update path, and they leave the
/// store only when their project is deleted.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait ProjectStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Projects ──────────────────────────────────────────────────────────

  /// Validate and persist a new project. Id and creation time are assigned
  /// by the store.
  fn create_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  /// Apply `patch` to an existing project and return the updated value.
  fn update_project(
    &self,
    id: Uuid,
    patch: ProjectPatch,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  /// Retrieve a project by UUID. Returns `None` if not found.
  fn get_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// All projects, most recently created first.
  fn list_projects(
    &self,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  /// Delete a project and every release it owns.
  fn delete_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Releases (append-only) ────────────────────────────────────────────

  /// Append a finalised release to its project's collection.
  ///
  /// Returns an error if the owning project does not exist or a release with
  /// the same id is already stored.
  fn append_release(
    &self,
    record: ReleaseRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a release by UUID. Returns `None` if not found.
  fn get_release(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ReleaseRecord>, Self::Error>> + Send + '_;

  /// Releases of one project, most recently created first.
  fn list_releases(
    &self,
    project_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ReleaseRecord>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// A project with its releases. Returns `None` if the project does not
  /// exist.
  fn project_view(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ProjectView>, Self::Error>> + Send + '_;
}
