use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "KEY";
pub const DEBUG_ENV: &str = "PLANT_CREW_DEBUG";
pub const DEFAULT_READINGS_FILE: &str = "plant_movements.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalSettings {
    /// Model used for the crew summary and logs.
    pub summary_model: String,
    /// Model used to invent missing persona fields.
    pub autofill_model: String,
    /// Movement CSV; `None` means `plant_movements.csv` beside the database.
    pub readings_path: Option<PathBuf>,
    pub teaser_cadence_ms: u64,
    pub max_wait_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            summary_model: "gemini-1.5-pro".into(),
            autofill_model: "gemini-1.5-flash".into(),
            readings_path: None,
            teaser_cadence_ms: 500,
            max_wait_secs: 180,
            request_timeout_secs: 60,
        }
    }
}

impl JournalSettings {
    pub fn teaser_cadence(&self) -> Duration {
        Duration::from_millis(self.teaser_cadence_ms.max(1))
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolve_readings_path(&self, data_dir: &Path) -> PathBuf {
        self.readings_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_READINGS_FILE))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    #[serde(default)]
    journal: JournalSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn journal(&self) -> JournalSettings {
        match self.data.read() {
            Ok(guard) => guard.journal.clone(),
            Err(poisoned) => poisoned.into_inner().journal.clone(),
        }
    }

    pub fn update_journal(&self, settings: JournalSettings) -> Result<()> {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.journal = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

/// Model API key from the environment, after loading any `.env` file.
pub fn api_key_from_env() -> Option<String> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            log::warn!("Failed to load .env file: {err}");
        }
    }
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
