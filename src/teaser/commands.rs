use tauri::State;

use crate::{
    movement::MovementPlot,
    personas::build_crew,
    teaser::{RetrievalStart, RetrievalState, TeaserController},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> Result<TeaserController, String> {
    state
        .teaser
        .clone()
        .ok_or_else(|| "Crew logs need a model API key in KEY".to_string())
}

/// Kick off a retrieval; progress arrives as events. Missing readings come back as a
/// notice rather than an error.
#[tauri::command]
pub async fn retrieve_crew_logs(state: State<'_, AppState>) -> Result<RetrievalStart, String> {
    let controller = controller_from_state(&state)?;

    let path = state.readings_path();
    let plot = tauri::async_runtime::spawn_blocking(move || MovementPlot::load(&path))
        .await
        .map_err(|e| e.to_string())?;
    if let Some(notice) = plot.notice {
        return Ok(RetrievalStart::notice(notice));
    }

    let crew = build_crew(&state.db, &plot)
        .await
        .map_err(|e| e.to_string())?;

    RetrievalStart::from_trigger(controller.start_retrieval(crew).await)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_retrieval_state(state: State<'_, AppState>) -> Result<RetrievalState, String> {
    match state.teaser.as_ref() {
        Some(controller) => Ok(controller.get_state().await),
        None => Ok(RetrievalState::new()),
    }
}
