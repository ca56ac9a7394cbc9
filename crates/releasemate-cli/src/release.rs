//! `releasemate release ...`
//!
//! Signatures come from recorded input traces (see [`Trace`]): the trace is
//! replayed through a fresh signature surface and whatever it last emitted is
//! captured into the form.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use chrono::Utc;
use clap::{Args, Subcommand};
use releasemate_core::{
  form::ReleaseForm,
  release::ReleaseRecord,
  signature::{Signature, Signer},
  store::ProjectStore,
};
use releasemate_pad::{EncodeOptions, Trace};
use uuid::Uuid;

use crate::settings::Settings;

#[derive(Subcommand)]
pub enum ReleaseCommand {
  /// Fill in and submit a release form.
  Sign(SignArgs),
  /// List a project's releases, newest first.
  List { project: Uuid },
  /// Show one release.
  Show {
    id:            Uuid,
    /// Write the model's signature image to this file.
    #[arg(long, value_name = "FILE")]
    signature_out: Option<PathBuf>,
  },
}

#[derive(Args)]
pub struct SignArgs {
  #[arg(long)]
  project:            Uuid,
  /// Model's full name.
  #[arg(long)]
  name:               String,
  #[arg(long, value_parser = non_blank)]
  email:              String,
  /// Date of birth (YYYY-MM-DD).
  #[arg(long)]
  dob:                Option<String>,
  #[arg(long)]
  address:            Option<String>,
  /// Trace file holding the model's signature strokes.
  #[arg(long, value_name = "TRACE")]
  signature:          PathBuf,
  /// Required when the model is a minor.
  #[arg(long)]
  guardian_name:      Option<String>,
  #[arg(long, value_name = "TRACE")]
  guardian_signature: Option<PathBuf>,
}

pub async fn run<S: ProjectStore>(
  store: &S,
  settings: &Settings,
  cmd: ReleaseCommand,
) -> Result<()> {
  match cmd {
    ReleaseCommand::Sign(args) => sign(store, settings.encode_options(), args).await,

    ReleaseCommand::List { project } => {
      let releases = store.list_releases(project).await?;
      if releases.is_empty() {
        println!("No releases yet.");
      }
      for r in &releases {
        println!(
          "{}  {}  {:<30}  {}",
          r.release_id(),
          r.execution_date(),
          r.model_name(),
          if r.is_minor() { "minor" } else { "adult" }
        );
      }
      Ok(())
    }

    ReleaseCommand::Show { id, signature_out } => {
      let record = store
        .get_release(id)
        .await?
        .ok_or_else(|| anyhow!("release {id} not found"))?;
      print_release(&record);

      if let Some(path) = signature_out {
        let bytes = signature_bytes(record.signature())?;
        std::fs::write(&path, bytes)
          .with_context(|| format!("writing signature to {}", path.display()))?;
        println!("Signature written to {}", path.display());
      }
      Ok(())
    }
  }
}

async fn sign<S: ProjectStore>(store: &S, encoding: EncodeOptions, args: SignArgs) -> Result<()> {
  let project = store
    .get_project(args.project)
    .await?
    .ok_or_else(|| anyhow!("project {} not found", args.project))?;

  let now = Utc::now();
  let mut form = ReleaseForm::open(project.project_id, now.date_naive());

  form.set_model_name(args.name);
  form.set_email(args.email).context("invalid --email")?;
  if let Some(dob) = &args.dob {
    form.set_date_of_birth(dob).context("invalid --dob")?;
  }
  if let Some(address) = args.address {
    form.set_address(address);
  }
  if let Some(name) = args.guardian_name {
    form.set_guardian_name(name);
  }

  form.capture_signature(Signer::Model, replay(&args.signature, encoding)?);
  if let Some(path) = &args.guardian_signature {
    form.capture_signature(Signer::Guardian, replay(path, encoding)?);
  }

  let record = form
    .submit(now)
    .map_err(|rejected| anyhow!("release not saved: {rejected}"))?;

  let release_id = record.release_id();
  let is_minor = record.is_minor();
  store.append_release(record).await?;

  println!(
    "Saved release {release_id} for project {}{}",
    project.name,
    if is_minor { " (minor, guardian consent recorded)" } else { "" }
  );
  Ok(())
}

/// Reject values that are empty once trimmed.
fn non_blank(value: &str) -> Result<String, String> {
  if value.trim().is_empty() {
    return Err("must not be blank".to_owned());
  }
  Ok(value.to_owned())
}

/// Replay a trace file into a signature.
fn replay(path: &Path, encoding: EncodeOptions) -> Result<Signature> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading trace {}", path.display()))?;
  let trace: Trace = serde_json::from_str(&raw)
    .with_context(|| format!("parsing trace {}", path.display()))?;
  let signature = trace
    .replay(encoding)
    .with_context(|| format!("encoding signature from {}", path.display()))?;
  if signature.is_empty() {
    tracing::warn!(path = %path.display(), "trace produced no signature");
  }
  Ok(signature)
}

/// Decode a `data:` URL signature into raw image bytes.
fn signature_bytes(signature: &Signature) -> Result<Vec<u8>> {
  let (_, payload) = signature
    .as_str()
    .split_once(";base64,")
    .ok_or_else(|| anyhow!("release has no signature image"))?;
  B64.decode(payload).context("decoding signature")
}

fn print_release(r: &ReleaseRecord) {
  let s = r.subject();
  println!("Release {}", r.release_id());
  println!("  project:        {}", r.project_id());
  println!("  model:          {}", s.full_name());
  println!("  email:          {}", s.email());
  if let Some(address) = s.address() {
    println!("  address:        {address}");
  }
  if let Some(dob) = s.date_of_birth() {
    println!("  date of birth:  {dob}");
  }
  println!("  age:            {}", r.age());
  println!("  executed:       {}", r.execution_date());
  println!(
    "  signature:      {}",
    r.signature().media_type().unwrap_or("none")
  );
  if let Some(guardian) = r.guardian() {
    println!("  guardian:       {}", guardian.name);
    println!(
      "  guardian sig.:  {}",
      guardian.signature.media_type().unwrap_or("none")
    );
  }
}
