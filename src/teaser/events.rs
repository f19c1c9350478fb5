use serde::Serialize;
use uuid::Uuid;

use crate::narrative::NarrativeResult;

pub const TEASER_EVENT: &str = "crew-teaser";
pub const TEASER_CLEARED_EVENT: &str = "crew-teaser-cleared";
pub const LOGS_READY_EVENT: &str = "crew-logs-ready";
pub const LOGS_FAILED_EVENT: &str = "crew-logs-failed";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum RetrievalEvent {
    Teaser {
        run_id: Uuid,
        message: String,
    },
    TeaserCleared {
        run_id: Uuid,
    },
    LogsReady {
        run_id: Uuid,
        result: NarrativeResult,
    },
    LogsFailed {
        run_id: Uuid,
        message: String,
    },
}

impl RetrievalEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RetrievalEvent::Teaser { .. } => TEASER_EVENT,
            RetrievalEvent::TeaserCleared { .. } => TEASER_CLEARED_EVENT,
            RetrievalEvent::LogsReady { .. } => LOGS_READY_EVENT,
            RetrievalEvent::LogsFailed { .. } => LOGS_FAILED_EVENT,
        }
    }
}

/// Where retrieval progress is published. The desktop shell forwards to the webview.
pub trait StatusSink: Send + Sync + 'static {
    fn publish(&self, event: &RetrievalEvent);
}

#[cfg(feature = "desktop")]
impl StatusSink for tauri::AppHandle {
    fn publish(&self, event: &RetrievalEvent) {
        use tauri::Emitter;

        if let Err(err) = self.emit(event.name(), event) {
            log::error!("Failed to emit {}: {err}", event.name());
        }
    }
}
