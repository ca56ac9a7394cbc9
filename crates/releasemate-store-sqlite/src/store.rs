//! [`SqliteStore`], the SQLite implementation of [`ProjectStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use releasemate_core::{
  project::{NewProject, Project, ProjectPatch, ProjectView},
  release::ReleaseRecord,
  store::ProjectStore,
};

use crate::{
  Error, Result,
  encode::{
    PROJECT_COLUMNS, RawProject, decode_release, encode_date, encode_dt, encode_release,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ReleaseMate store backed by a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Outcome of the existence checks done before inserting a release.
enum Append {
  Stored,
  NoProject,
  Duplicate,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Write every column of `project` into its row.
  async fn write_project(&self, project: &Project) -> Result<()> {
    let id_str      = encode_uuid(project.project_id);
    let name        = project.name.clone();
    let description = project.description.clone();
    let client_name = project.client_name.clone();
    let location    = project.location.clone();
    let shoot_str   = encode_date(project.shoot_date);
    let legal_text  = project.legal_text.clone();
    let at_str      = encode_dt(project.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO projects
             (project_id, name, description, client_name, location,
              shoot_date, legal_text, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT(project_id) DO UPDATE SET
             name        = excluded.name,
             description = excluded.description,
             client_name = excluded.client_name,
             location    = excluded.location,
             shoot_date  = excluded.shoot_date,
             legal_text  = excluded.legal_text",
          rusqlite::params![
            id_str,
            name,
            description,
            client_name,
            location,
            shoot_str,
            legal_text,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_releases(&self, project_id: Uuid) -> Result<Vec<ReleaseRecord>> {
    let id_str = encode_uuid(project_id);

    let rows: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT record_json FROM releases
           WHERE project_id = ?1
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    rows.iter().map(|json| decode_release(json)).collect()
  }
}

// ─── ProjectStore impl ───────────────────────────────────────────────────────

impl ProjectStore for SqliteStore {
  type Error = Error;

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn create_project(&self, input: NewProject) -> Result<Project> {
    input.validate()?;

    let project = Project {
      project_id:  Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      client_name: input.client_name,
      location:    input.location,
      shoot_date:  input.shoot_date,
      legal_text:  input.legal_text,
      // Stored with microsecond precision.
      created_at:  Utc::now().trunc_subsecs(6),
    };

    self.write_project(&project).await?;
    tracing::info!(project_id = %project.project_id, name = %project.name, "project created");
    Ok(project)
  }

  async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Project> {
    let mut project = self.get_project(id).await?.ok_or(Error::ProjectNotFound(id))?;
    if patch.is_empty() {
      return Ok(project);
    }

    patch.apply(&mut project)?;
    self.write_project(&project).await?;
    tracing::info!(project_id = %id, "project updated");
    Ok(project)
  }

  async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = ?1"),
            rusqlite::params![id_str],
            RawProject::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawProject::into_project).transpose()
  }

  async fn list_projects(&self) -> Result<Vec<Project>> {
    let raws: Vec<RawProject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawProject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  async fn delete_project(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM projects WHERE project_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::ProjectNotFound(id));
    }
    tracing::info!(project_id = %id, "project deleted with its releases");
    Ok(())
  }

  // ── Releases (append-only) ────────────────────────────────────────────────

  async fn append_release(&self, record: ReleaseRecord) -> Result<()> {
    let release_id = record.release_id();
    let project_id = record.project_id();

    let release_str = encode_uuid(release_id);
    let project_str = encode_uuid(project_id);
    let model_name  = record.model_name().to_owned();
    let is_minor    = record.is_minor();
    let exec_str    = encode_date(record.execution_date());
    let at_str      = encode_dt(record.created_at());
    let json        = encode_release(&record)?;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let project_exists = tx
          .query_row(
            "SELECT 1 FROM projects WHERE project_id = ?1",
            rusqlite::params![project_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !project_exists {
          return Ok(Append::NoProject);
        }

        let already_stored = tx
          .query_row(
            "SELECT 1 FROM releases WHERE release_id = ?1",
            rusqlite::params![release_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if already_stored {
          return Ok(Append::Duplicate);
        }

        tx.execute(
          "INSERT INTO releases
             (release_id, project_id, model_name, is_minor,
              execution_date, created_at, record_json)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            release_str,
            project_str,
            model_name,
            is_minor,
            exec_str,
            at_str,
            json,
          ],
        )?;
        tx.commit()?;
        Ok(Append::Stored)
      })
      .await?;

    match outcome {
      Append::Stored => {
        tracing::info!(%release_id, %project_id, is_minor, "release appended");
        Ok(())
      }
      Append::NoProject => Err(Error::ProjectNotFound(project_id)),
      Append::Duplicate => Err(Error::DuplicateRelease(release_id)),
    }
  }

  async fn get_release(&self, id: Uuid) -> Result<Option<ReleaseRecord>> {
    let id_str = encode_uuid(id);

    let json: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT record_json FROM releases WHERE release_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    json.as_deref().map(decode_release).transpose()
  }

  async fn list_releases(&self, project_id: Uuid) -> Result<Vec<ReleaseRecord>> {
    if self.get_project(project_id).await?.is_none() {
      return Err(Error::ProjectNotFound(project_id));
    }
    self.query_releases(project_id).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn project_view(&self, id: Uuid) -> Result<Option<ProjectView>> {
    let Some(project) = self.get_project(id).await? else {
      return Ok(None);
    };
    let releases = self.query_releases(id).await?;
    Ok(Some(ProjectView { project, releases }))
  }
}
