use serde::{Deserialize, Serialize};

use crate::db::PersonaDraft;

/// Per-window UI state: which persona card is open and the unsaved form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSession {
    pub selected_persona: Option<String>,
    pub draft: PersonaDraft,
}

impl JournalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switching persona discards whatever was typed for the previous one.
    pub fn select_persona(&mut self, name: Option<String>) {
        self.selected_persona = name.filter(|name| !name.trim().is_empty());
        self.draft = PersonaDraft::default();
    }

    pub fn update_draft(&mut self, draft: PersonaDraft) {
        self.draft = draft;
    }

    pub fn clear_draft(&mut self) {
        self.draft = PersonaDraft::default();
    }
}
