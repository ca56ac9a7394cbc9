//! `releasemate project ...`

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use releasemate_core::{
  project::{NewProject, Project, ProjectPatch},
  store::ProjectStore,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ProjectCommand {
  /// Create a project.
  New(NewArgs),
  /// List projects, newest first.
  List,
  /// Show a project with its releases.
  Show { id: Uuid },
  /// Change project details. Releases are never touched.
  Edit(EditArgs),
  /// Delete a project and every release it holds.
  Delete { id: Uuid },
}

#[derive(Args)]
pub struct NewArgs {
  #[arg(long)]
  name:            String,
  #[arg(long, default_value = "")]
  client:          String,
  #[arg(long, default_value = "")]
  location:        String,
  #[arg(long, default_value = "")]
  description:     String,
  /// Shoot date (YYYY-MM-DD); defaults to today.
  #[arg(long)]
  shoot_date:      Option<NaiveDate>,
  /// Replace the standard release wording with the contents of this file.
  #[arg(long, value_name = "FILE")]
  legal_text_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct EditArgs {
  id:              Uuid,
  #[arg(long)]
  name:            Option<String>,
  #[arg(long)]
  client:          Option<String>,
  #[arg(long)]
  location:        Option<String>,
  #[arg(long)]
  description:     Option<String>,
  #[arg(long)]
  shoot_date:      Option<NaiveDate>,
  #[arg(long, value_name = "FILE")]
  legal_text_file: Option<PathBuf>,
}

pub async fn run<S: ProjectStore>(store: &S, cmd: ProjectCommand) -> Result<()> {
  match cmd {
    ProjectCommand::New(args) => {
      let mut input = NewProject::new(
        args.name,
        args.shoot_date.unwrap_or_else(|| Utc::now().date_naive()),
      );
      input.client_name = args.client;
      input.location = args.location;
      input.description = args.description;
      if let Some(path) = &args.legal_text_file {
        input.legal_text = read_legal_text(path)?;
      }

      let project = store.create_project(input).await?;
      println!("Created project {} ({})", project.name, project.project_id);
    }

    ProjectCommand::List => {
      let projects = store.list_projects().await?;
      if projects.is_empty() {
        println!("No projects yet.");
      }
      for p in projects {
        println!(
          "{}  {}  {:<30}  {}",
          p.project_id,
          p.shoot_date,
          p.name,
          p.client_name
        );
      }
    }

    ProjectCommand::Show { id } => {
      let view = store
        .project_view(id)
        .await?
        .ok_or_else(|| anyhow!("project {id} not found"))?;

      print_project(&view.project);
      println!();
      println!("Releases ({}):", view.releases.len());
      for r in &view.releases {
        println!(
          "  {}  {}  {:<30}  age {}{}",
          r.release_id(),
          r.execution_date(),
          r.model_name(),
          r.age(),
          if r.is_minor() { "  (minor)" } else { "" }
        );
      }
    }

    ProjectCommand::Edit(args) => {
      let patch = ProjectPatch {
        name:        args.name,
        description: args.description,
        client_name: args.client,
        location:    args.location,
        shoot_date:  args.shoot_date,
        legal_text:  args.legal_text_file.as_deref().map(read_legal_text).transpose()?,
      };
      if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
      }
      let project = store.update_project(args.id, patch).await?;
      println!("Updated project {} ({})", project.name, project.project_id);
    }

    ProjectCommand::Delete { id } => {
      store.delete_project(id).await?;
      println!("Deleted project {id} and its releases.");
    }
  }
  Ok(())
}

fn read_legal_text(path: &Path) -> Result<String> {
  std::fs::read_to_string(path)
    .with_context(|| format!("reading legal text from {}", path.display()))
}

fn print_project(p: &Project) {
  println!("{}", p.name);
  println!("  id:         {}", p.project_id);
  println!("  client:     {}", p.client_name);
  println!("  location:   {}", p.location);
  println!("  shoot date: {}", p.shoot_date);
  if !p.description.is_empty() {
    println!("  {}", p.description);
  }
  println!();
  println!("{}", p.legal_text);
}
