use std::sync::Arc;

use log::info;

use crate::db::models::{PersonaDraft, PersonaField};
use crate::error::JournalError;

use super::{client::TextGenerator, prompts::autofill_prompt};

const FILL_ORDER: [PersonaField; 5] = [
    PersonaField::Personality,
    PersonaField::Vocation,
    PersonaField::Vessel,
    PersonaField::Adventure,
    PersonaField::Title,
];

/// Invents values for the blank fields of a persona draft.
pub struct PersonaAutofill {
    generator: Arc<dyn TextGenerator>,
}

impl PersonaAutofill {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Fill blank fields one call at a time, each prompt seeing everything filled so
    /// far. Returns the completed draft and the fields that were generated.
    pub async fn fill_blanks(
        &self,
        mut draft: PersonaDraft,
    ) -> Result<(PersonaDraft, Vec<PersonaField>), JournalError> {
        let mut generated = Vec::new();

        for field in FILL_ORDER {
            if !draft.is_blank(field) {
                continue;
            }

            let raw = self
                .generator
                .generate(&autofill_prompt(&draft, field))
                .await
                .map_err(|err| JournalError::generation(format!("the {}", field.as_str()), err))?;

            let value = clean_value(&raw);
            if value.is_empty() {
                return Err(JournalError::generation(
                    format!("the {}", field.as_str()),
                    "the model returned an empty answer",
                ));
            }

            draft.set(field, value);
            generated.push(field);
        }

        if !generated.is_empty() {
            info!(
                "Auto-filled {} field(s) for '{}'",
                generated.len(),
                draft.name.trim()
            );
        }

        Ok((draft, generated))
    }
}

/// First non-empty line of a model answer, without wrapping quotes or list markers.
fn clean_value(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_start_matches(['-', '*'])
        .trim()
        .trim_matches(['"', '\'', '“', '”'])
        .trim()
        .to_string()
}
