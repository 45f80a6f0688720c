//! Per-view state carried between renders.
use chrono::{DateTime, Local};

/// Whether the news popup already has content for this session.
#[derive(Debug, Clone, Default)]
pub struct NewsState {
    loaded_at: Option<DateTime<Local>>,
}

impl NewsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the news should be fetched: never loaded yet, or `force`.
    pub fn needs_fetch(&self, force: bool) -> bool {
        force || self.loaded_at.is_none()
    }

    pub fn mark_loaded(&mut self) {
        self.loaded_at = Some(Local::now());
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }
}
