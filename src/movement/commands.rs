use tauri::State;

use crate::{movement::MovementPlot, AppState};

#[tauri::command]
pub async fn get_movement_plot(state: State<'_, AppState>) -> Result<MovementPlot, String> {
    let path = state.readings_path();
    tauri::async_runtime::spawn_blocking(move || MovementPlot::load(&path))
        .await
        .map_err(|e| e.to_string())
}
