use std::{collections::BTreeMap, sync::Arc};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::db::models::Persona;
use crate::error::JournalError;
use crate::movement::PersonaStats;

use super::{
    client::TextGenerator,
    prompts::{log_placeholder, log_prompt, summary_prompt, weather_label},
};

/// A persona taking part in today's run, with its movement statistics.
#[derive(Debug, Clone)]
pub struct CrewMember {
    pub persona: Persona,
    pub stats: PersonaStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewLog {
    pub title: String,
    pub text: String,
    /// True when `text` is a placeholder standing in for a failed generation.
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResult {
    pub weather: String,
    pub summary: String,
    pub logs: BTreeMap<String, CrewLog>,
}

/// Builds the crew summary and per-persona logs from one text generator.
pub struct NarrativeGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl NarrativeGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One summary call, then one call per member. The summary failing fails the run;
    /// a failed log only replaces that member's entry with a placeholder.
    pub async fn generate_crew_logs(
        &self,
        crew: &[CrewMember],
    ) -> Result<NarrativeResult, JournalError> {
        if crew.is_empty() {
            return Err(JournalError::DataUnavailable {
                reason: "no crew members to write about".into(),
            });
        }

        let weather = weather_label(crew);
        info!(
            "Generating crew logs for {} members on a {weather} day with {}",
            crew.len(),
            self.generator.model_name()
        );

        let summary = self
            .generator
            .generate(&summary_prompt(crew, weather))
            .await
            .map_err(|err| JournalError::generation("the journey summary", err))?;

        let mut logs = BTreeMap::new();
        for member in crew {
            let persona = &member.persona;
            let log = match self.generator.generate(&log_prompt(member, crew)).await {
                Ok(text) => CrewLog {
                    title: persona.display_title().to_string(),
                    text: text.trim().to_string(),
                    failed: false,
                },
                Err(err) => {
                    warn!(
                        "{}",
                        JournalError::generation(format!("{}'s log", persona.name), err)
                    );
                    CrewLog {
                        title: persona.display_title().to_string(),
                        text: log_placeholder(persona),
                        failed: true,
                    }
                }
            };
            logs.insert(persona.name.clone(), log);
        }

        Ok(NarrativeResult {
            weather: weather.to_string(),
            summary: summary.trim().to_string(),
            logs,
        })
    }
}
