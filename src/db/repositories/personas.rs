use anyhow::{anyhow, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    helpers::{is_unique_violation, non_empty},
    models::{Persona, PersonaDraft},
    Database,
};
use crate::error::JournalError;

/// Row that always exists and backs the "add a plant" card.
pub const PLACEHOLDER_PERSONA: &str = "New";
pub const STOCK_IMAGE_PATH: &str = "plants_images/stock.jpg";

const PERSONA_COLUMNS: &str =
    "id, name, personality, vocation, adventure, vessel, title, image_path";

fn row_to_persona(row: &Row) -> rusqlite::Result<Persona> {
    Ok(Persona {
        id: row.get("id")?,
        name: row.get("name")?,
        personality: non_empty(row.get("personality")?),
        vocation: non_empty(row.get("vocation")?),
        adventure: non_empty(row.get("adventure")?),
        vessel: non_empty(row.get("vessel")?),
        title: non_empty(row.get("title")?),
        image_path: non_empty(row.get("image_path")?),
    })
}

impl Database {
    pub async fn get_persona(&self, name: &str) -> Result<Option<Persona>> {
        let name = name.to_string();
        self.execute(move |conn| {
            let persona = conn
                .query_row(
                    &format!("SELECT {PERSONA_COLUMNS} FROM plants WHERE name = ?1"),
                    params![name],
                    row_to_persona,
                )
                .optional()?;
            Ok(persona)
        })
        .await
    }

    /// Every persona by name, with the placeholder card last.
    pub async fn list_personas(&self) -> Result<Vec<Persona>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PERSONA_COLUMNS}
                 FROM plants
                 ORDER BY CASE WHEN name = ?1 THEN 1 ELSE 0 END, name ASC"
            ))?;

            let mut rows = stmt.query(params![PLACEHOLDER_PERSONA])?;
            let mut personas = Vec::new();
            while let Some(row) = rows.next()? {
                personas.push(row_to_persona(row)?);
            }

            Ok(personas)
        })
        .await
    }

    /// Insert a complete draft. Incomplete drafts and taken names are rejected with a
    /// `JournalError` inside the returned error.
    pub async fn insert_persona(&self, draft: &PersonaDraft) -> Result<Persona> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(JournalError::IncompletePersona { missing }.into());
        }

        let record = draft.clone();
        self.execute(move |conn| {
            let name = record.name.trim().to_string();
            let image_path = record
                .image_path
                .clone()
                .filter(|path| !path.trim().is_empty())
                .unwrap_or_else(|| STOCK_IMAGE_PATH.to_string());
            let title = Some(record.title.trim().to_string()).filter(|t| !t.is_empty());

            let inserted = conn.execute(
                "INSERT INTO plants (name, personality, vocation, adventure, vessel, title, image_path)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    name,
                    record.personality.trim(),
                    record.vocation.trim(),
                    record.adventure.trim(),
                    record.vessel.trim(),
                    title,
                    image_path,
                ],
            );

            match inserted {
                Ok(_) => {}
                Err(err) if is_unique_violation(&err) => {
                    return Err(JournalError::DuplicatePersona { name }.into());
                }
                Err(err) => return Err(anyhow::Error::new(err).context("failed to insert persona")),
            }

            let persona_id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {PERSONA_COLUMNS} FROM plants WHERE id = ?1"),
                params![persona_id],
                row_to_persona,
            )
            .optional()?
            .ok_or_else(|| anyhow!("persona not found after insert"))
        })
        .await
    }
}
