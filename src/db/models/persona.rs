//! Plant persona data models.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Wandering Plant";

/// A stored plant persona. Profile fields are optional because the placeholder row and
/// rows written before titles existed leave them NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: i64,
    pub name: String,
    pub personality: Option<String>,
    pub vocation: Option<String>,
    pub adventure: Option<String>,
    pub vessel: Option<String>,
    pub title: Option<String>,
    pub image_path: Option<String>,
}

impl Persona {
    /// Profile used when a crew member in the readings has no stored persona.
    pub fn wanderer(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            personality: Some("mysterious".into()),
            vocation: Some("wanderer".into()),
            adventure: Some("exploring new horizons".into()),
            vessel: Some("unknown vessel".into()),
            title: Some(DEFAULT_TITLE.into()),
            image_path: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

/// Editable profile fields, in the order the auto-fill walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonaField {
    Personality,
    Vocation,
    Vessel,
    Adventure,
    Title,
}

impl PersonaField {
    /// Fields a saved persona must have.
    pub const REQUIRED: [PersonaField; 4] = [
        PersonaField::Personality,
        PersonaField::Vocation,
        PersonaField::Vessel,
        PersonaField::Adventure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaField::Personality => "personality",
            PersonaField::Vocation => "vocation",
            PersonaField::Vessel => "vessel",
            PersonaField::Adventure => "adventure",
            PersonaField::Title => "title",
        }
    }

    /// How the field reads inside a generation prompt.
    pub fn prompt_phrase(&self) -> &'static str {
        match self {
            PersonaField::Personality => "personality",
            PersonaField::Vocation => "vocation or hustle (a sailor, explorer, librarian...)",
            PersonaField::Vessel => "vessel, the sweet ride they travel in (a ship, a balloon...)",
            PersonaField::Adventure => "ideal adventure, one that would make them smile",
            PersonaField::Title => "grand title",
        }
    }
}

/// Unsaved form values. Empty strings mean "not filled in yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaDraft {
    pub name: String,
    pub personality: String,
    pub vocation: String,
    pub vessel: String,
    pub adventure: String,
    pub title: String,
    pub image_path: Option<String>,
}

impl PersonaDraft {
    pub fn get(&self, field: PersonaField) -> &str {
        match field {
            PersonaField::Personality => &self.personality,
            PersonaField::Vocation => &self.vocation,
            PersonaField::Vessel => &self.vessel,
            PersonaField::Adventure => &self.adventure,
            PersonaField::Title => &self.title,
        }
    }

    pub fn set(&mut self, field: PersonaField, value: String) {
        let slot = match field {
            PersonaField::Personality => &mut self.personality,
            PersonaField::Vocation => &mut self.vocation,
            PersonaField::Vessel => &mut self.vessel,
            PersonaField::Adventure => &mut self.adventure,
            PersonaField::Title => &mut self.title,
        };
        *slot = value;
    }

    pub fn is_blank(&self, field: PersonaField) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Names of required fields that are still blank, the name included.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        missing.extend(
            PersonaField::REQUIRED
                .iter()
                .filter(|field| self.is_blank(**field))
                .map(|field| field.as_str().to_string()),
        );
        missing
    }
}
