use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::JournalError;
use crate::narrative::NarrativeResult;

/// Rotating status lines shown while crew entries are generated.
pub const TEASERS: [&str; 10] = [
    "📡 Intercepting whispers from the botanical network...",
    "🌱 Decoding chlorophyll-encoded messages...",
    "🎭 Gathering tales from the wandering flora...",
    "🌟 Translating photosynthetic poetry...",
    "🎨 Illuminating stories of sunlit adventures...",
    "🌿 Unraveling leafy chronicles...",
    "🚀 Collecting dispatches from green voyagers...",
    "📖 Composing the day's botanical ballad...",
    "🎪 Assembling the garden's grand narrative...",
    "🎭 Channeling voices of the verdant crew...",
];

/// What a retrieval trigger hands back: a run to follow, or a notice explaining why
/// nothing was started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalStart {
    pub run_id: Option<Uuid>,
    pub notice: Option<String>,
}

impl RetrievalStart {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            run_id: None,
            notice: Some(message.into()),
        }
    }

    /// Informational errors become a notice; anything else stays an error.
    pub fn from_trigger(result: Result<Uuid, JournalError>) -> Result<Self, JournalError> {
        match result {
            Ok(run_id) => Ok(Self {
                run_id: Some(run_id),
                notice: None,
            }),
            Err(err) if err.is_informational() => Ok(Self::notice(err.to_string())),
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum RetrievalStatus {
    #[default]
    Idle,
    Pending,
    Completed,
    Failed,
}

/// Controller-owned retrieval state; the only place the pending flag lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalState {
    pub status: RetrievalStatus,
    pub run_id: Option<Uuid>,
    pub teaser: Option<String>,
    pub result: Option<NarrativeResult>,
    pub error: Option<String>,
}

impl RetrievalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.status == RetrievalStatus::Pending
    }

    pub fn begin(&mut self, run_id: Uuid) {
        *self = Self {
            status: RetrievalStatus::Pending,
            run_id: Some(run_id),
            ..Self::default()
        };
    }

    pub fn show_teaser(&mut self, teaser: &str) {
        self.teaser = Some(teaser.to_string());
    }

    /// Store the outcome first, then leave the pending state.
    pub fn finish(&mut self, outcome: Result<NarrativeResult, String>) {
        self.teaser = None;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.status = RetrievalStatus::Completed;
            }
            Err(message) => {
                self.error = Some(message);
                self.status = RetrievalStatus::Failed;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_clears_teaser_and_pending_flag() {
        let mut state = RetrievalState::new();
        let run_id = Uuid::new_v4();
        state.begin(run_id);
        assert!(state.is_pending());

        state.show_teaser(TEASERS[0]);
        assert_eq!(state.teaser.as_deref(), Some(TEASERS[0]));

        state.finish(Err("boom".into()));
        assert!(!state.is_pending());
        assert_eq!(state.status, RetrievalStatus::Failed);
        assert_eq!(state.teaser, None);
        assert_eq!(state.run_id, Some(run_id));
        assert_eq!(state.error.as_deref(), Some("boom"));

        state.begin(Uuid::new_v4());
        assert_eq!(state.error, None);
    }

    #[test]
    fn unavailable_data_is_a_notice_and_duplicates_stay_errors() {
        let run_id = Uuid::new_v4();
        assert_eq!(
            RetrievalStart::from_trigger(Ok(run_id)),
            Ok(RetrievalStart {
                run_id: Some(run_id),
                notice: None,
            })
        );

        let start = RetrievalStart::from_trigger(Err(JournalError::DataUnavailable {
            reason: "no crew members to write about".into(),
        }))
        .unwrap();
        assert_eq!(start.run_id, None);
        assert!(start.notice.unwrap().contains("no crew members"));

        assert_eq!(
            RetrievalStart::from_trigger(Err(JournalError::DuplicateTrigger)),
            Err(JournalError::DuplicateTrigger)
        );
    }
}
