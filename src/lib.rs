pub mod db;
pub mod error;
pub mod movement;
pub mod narrative;
pub mod personas;
pub mod session;
pub mod settings;
pub mod teaser;
pub mod utils;

pub use error::JournalError;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::{
        path::PathBuf,
        sync::{Arc, Mutex},
    };

    use log::warn;
    use tauri::{Manager, RunEvent};

    use crate::{
        db::Database,
        movement::commands::get_movement_plot,
        narrative::{GeminiClient, NarrativeGenerator, PersonaAutofill, TextGenerator},
        personas::commands::{
            get_persona, list_personas, save_persona, select_persona, update_draft,
        },
        session::JournalSession,
        settings::{api_key_from_env, debug_enabled, SettingsStore, API_KEY_ENV},
        teaser::{
            commands::{get_retrieval_state, retrieve_crew_logs},
            StatusSink, TeaserController,
        },
    };

    pub(crate) struct AppState {
        pub(crate) db: Database,
        pub(crate) settings: SettingsStore,
        pub(crate) session: Mutex<JournalSession>,
        pub(crate) teaser: Option<TeaserController>,
        pub(crate) autofill: Option<PersonaAutofill>,
        pub(crate) data_dir: PathBuf,
    }

    impl AppState {
        pub(crate) fn with_session<T>(&self, f: impl FnOnce(&mut JournalSession) -> T) -> T {
            let mut guard = match self.session.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            f(&mut guard)
        }

        pub(crate) fn readings_path(&self) -> PathBuf {
            self.settings.journal().resolve_readings_path(&self.data_dir)
        }
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        // RUST_LOG still wins over the default level.
        let level = if debug_enabled() {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .init();

        log::info!("Plant Crew starting up...");

        let app = tauri::Builder::default()
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    std::fs::create_dir_all(&app_data_dir)?;

                    let database = Database::new(app_data_dir.join("plant_crew.sqlite3"))?;
                    let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;
                    let journal = settings_store.journal();

                    let (teaser, autofill) = match api_key_from_env() {
                        Some(key) => {
                            let summary: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
                                key.clone(),
                                journal.summary_model.clone(),
                                journal.request_timeout(),
                            )?);
                            let filler: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
                                key,
                                journal.autofill_model.clone(),
                                journal.request_timeout(),
                            )?);
                            let sink: Arc<dyn StatusSink> = Arc::new(app.handle().clone());
                            let controller = TeaserController::new(
                                Arc::new(NarrativeGenerator::new(summary)),
                                sink,
                                journal.teaser_cadence(),
                                journal.max_wait(),
                            );
                            (Some(controller), Some(PersonaAutofill::new(filler)))
                        }
                        None => {
                            warn!("{API_KEY_ENV} is not set; crew logs and auto-fill are disabled");
                            (None, None)
                        }
                    };

                    app.manage(AppState {
                        db: database,
                        settings: settings_store,
                        session: Mutex::new(JournalSession::new()),
                        teaser,
                        autofill,
                        data_dir: app_data_dir,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                list_personas,
                get_persona,
                save_persona,
                select_persona,
                update_draft,
                get_movement_plot,
                retrieve_crew_logs,
                get_retrieval_state,
            ])
            .build(tauri::generate_context!());

        let app = match app {
            Ok(app) => app,
            Err(err) => {
                log::error!("Failed to build the application: {err}");
                return;
            }
        };

        app.run(|handle, event| {
            if let RunEvent::Exit = event {
                if let Some(controller) = handle
                    .try_state::<AppState>()
                    .and_then(|state| state.teaser.clone())
                {
                    tauri::async_runtime::block_on(controller.shutdown());
                }
            }
        });
    }
}

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
