use tauri::State;

use crate::{
    db::{Persona, PersonaDraft},
    personas,
    session::JournalSession,
    AppState,
};

#[tauri::command]
pub async fn list_personas(state: State<'_, AppState>) -> Result<Vec<Persona>, String> {
    state.db.list_personas().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_persona(
    state: State<'_, AppState>,
    name: String,
) -> Result<Option<Persona>, String> {
    state.db.get_persona(&name).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_persona(
    state: State<'_, AppState>,
    draft: PersonaDraft,
    autofill: bool,
) -> Result<Persona, String> {
    let filler = if autofill {
        Some(
            state
                .autofill
                .as_ref()
                .ok_or_else(|| "Auto-fill needs a model API key in KEY".to_string())?,
        )
    } else {
        None
    };

    let persona = personas::save_persona(&state.db, draft, filler)
        .await
        .map_err(|e| e.to_string())?;

    state.with_session(|session| session.clear_draft());
    Ok(persona)
}

#[tauri::command]
pub fn select_persona(
    state: State<'_, AppState>,
    name: Option<String>,
) -> Result<JournalSession, String> {
    Ok(state.with_session(|session| {
        session.select_persona(name);
        session.clone()
    }))
}

#[tauri::command]
pub fn update_draft(
    state: State<'_, AppState>,
    draft: PersonaDraft,
) -> Result<JournalSession, String> {
    Ok(state.with_session(|session| {
        session.update_draft(draft);
        session.clone()
    }))
}
