//! Display state for the legal-summary panel.
//!
//! The panel is fire-and-forget: [`SummaryPanel::request`] starts a task and
//! returns immediately, and observers watch the state change. Nothing on the
//! signing path awaits it.

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

use tokio::{sync::watch, task::JoinHandle};

use crate::summarize::{Summarizer, legal_summary};

/// What the panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelState {
  /// The full legal text is shown, no summary.
  #[default]
  Hidden,
  Loading,
  /// A summary or a placeholder.
  Ready(String),
}

pub struct SummaryPanel<S> {
  summarizer: Arc<S>,
  online:     bool,
  state:      Arc<watch::Sender<PanelState>>,
  /// Bumped by every request and dismissal; a task only publishes its
  /// result while its own generation is still current.
  generation: Arc<AtomicU64>,
}

impl<S: Summarizer + 'static> SummaryPanel<S> {
  pub fn new(summarizer: Arc<S>, online: bool) -> Self {
    Self {
      summarizer,
      online,
      state: Arc::new(watch::channel(PanelState::Hidden).0),
      generation: Arc::new(AtomicU64::new(0)),
    }
  }

  pub fn subscribe(&self) -> watch::Receiver<PanelState> { self.state.subscribe() }

  pub fn state(&self) -> PanelState { self.state.borrow().clone() }

  /// Start summarising `legal_text` in the background.
  ///
  /// The panel moves to `Loading` at once and to `Ready` when the task ends.
  /// While a summary is already loading this does nothing and returns `None`.
  /// There is no timeout and no cancellation; the handle is only for callers
  /// that want to wait.
  pub fn request(&self, legal_text: impl Into<String>) -> Option<JoinHandle<()>> {
    if *self.state.borrow() == PanelState::Loading {
      tracing::debug!("legal summary already loading; request ignored");
      return None;
    }

    let legal_text = legal_text.into();
    let summarizer = Arc::clone(&self.summarizer);
    let online = self.online;
    let state = Arc::clone(&self.state);
    let generation = Arc::clone(&self.generation);
    let current = generation.fetch_add(1, Ordering::SeqCst) + 1;

    state.send_replace(PanelState::Loading);
    Some(tokio::spawn(async move {
      let summary = legal_summary(summarizer.as_ref(), online, &legal_text).await;
      state.send_if_modified(|shown| {
        if generation.load(Ordering::SeqCst) != current {
          tracing::debug!("legal summary arrived after dismissal; dropped");
          return false;
        }
        *shown = PanelState::Ready(summary);
        true
      });
    }))
  }

  /// Hide the summary and show the full legal text again. A summary still
  /// loading is discarded when it arrives.
  pub fn dismiss(&self) {
    self.generation.fetch_add(1, Ordering::SeqCst);
    self.state.send_replace(PanelState::Hidden);
  }
}
