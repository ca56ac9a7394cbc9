//! `releasemate summary <project>`

use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow, bail};
use releasemate_core::store::ProjectStore;
use releasemate_summary::{GeminiSummarizer, PanelState, SummaryPanel};
use tokio::{sync::watch, task::JoinHandle};
use uuid::Uuid;

use crate::settings::Settings;

pub async fn run<S: ProjectStore>(store: &S, settings: &Settings, id: Uuid) -> Result<()> {
  let project = store
    .get_project(id)
    .await?
    .ok_or_else(|| anyhow!("project {id} not found"))?;

  let summarizer = GeminiSummarizer::new(settings.gemini()).context("building HTTP client")?;
  let panel = SummaryPanel::new(Arc::new(summarizer), !settings.offline);
  let rx = panel.subscribe();
  let task = panel
    .request(project.legal_text)
    .ok_or_else(|| anyhow!("a summary is already loading"))?;

  println!("{}", wait_for_summary(rx, task).await?);
  Ok(())
}

/// Follow the panel until it shows a summary, or fail if the task dies
/// first.
async fn wait_for_summary(
  mut rx: watch::Receiver<PanelState>,
  mut task: JoinHandle<()>,
) -> Result<String> {
  loop {
    let state = rx.borrow_and_update().clone();
    match state {
      PanelState::Hidden => {}
      PanelState::Loading => eprintln!("Summarizing legal text..."),
      PanelState::Ready(summary) => return Ok(summary),
    }

    tokio::select! {
      changed = rx.changed() => changed.context("summary panel closed")?,
      joined = &mut task => {
        joined.context("summary task failed")?;
        if let PanelState::Ready(summary) = rx.borrow_and_update().clone() {
          return Ok(summary);
        }
        bail!("summary task ended without a result");
      }
    }
  }
}
