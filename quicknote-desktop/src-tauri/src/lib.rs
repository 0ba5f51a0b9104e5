pub mod settings;
pub mod surfaces;

// Re-export core library
pub use quicknote_core::*;

use std::sync::Arc;
use surfaces::TauriSurfaces;
use tauri::{Manager, State};

type CommandResult<T> = std::result::Result<T, String>;

pub struct AppState {
    pub handler: Arc<RequestHandler<TauriSurfaces>>,
}

fn to_message(e: QuickNoteError) -> String {
    log::warn!("Command failed: {e}");
    e.user_message()
}

#[tauri::command]
async fn list_notes(state: State<'_, AppState>) -> CommandResult<Vec<Note>> {
    state.handler.list_notes().await.map_err(to_message)
}

#[tauri::command]
async fn create_note(state: State<'_, AppState>, text: String) -> CommandResult<Note> {
    state.handler.create_note(&text).await.map_err(to_message)
}

/// Returns `null` to the frontend when the note no longer exists.
#[tauri::command]
async fn update_note(
    state: State<'_, AppState>,
    id: String,
    text: String,
) -> CommandResult<Option<Note>> {
    state.handler.update_note(&id, &text).await.map_err(to_message)
}

#[tauri::command]
async fn delete_note(state: State<'_, AppState>, id: String) -> CommandResult<bool> {
    state.handler.delete_note(&id).await.map_err(to_message)
}

#[tauri::command]
async fn search_notes(state: State<'_, AppState>, query: String) -> CommandResult<Vec<Note>> {
    state.handler.search_notes(&query).await.map_err(to_message)
}

#[tauri::command]
async fn list_tags(state: State<'_, AppState>) -> CommandResult<Vec<String>> {
    state.handler.list_tags().await.map_err(to_message)
}

#[tauri::command]
async fn hide_window(state: State<'_, AppState>) -> CommandResult<()> {
    state.handler.hide_surfaces().map_err(to_message)
}

#[tauri::command]
async fn open_history(state: State<'_, AppState>) -> CommandResult<()> {
    state.handler.open_history().map_err(to_message)
}

#[tauri::command]
async fn open_new_note(state: State<'_, AppState>) -> CommandResult<()> {
    state.handler.toggle_composer().map_err(to_message)
}

#[tauri::command]
fn get_settings() -> settings::AppSettings {
    settings::load_settings()
}

/// Persists `settings`; they take effect on the next launch.
#[tauri::command]
fn update_settings(settings: settings::AppSettings) -> CommandResult<()> {
    settings::save_settings(&settings).inspect_err(|e| log::warn!("Command failed: {e}"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            let settings = settings::load_settings();
            let config = settings.store_config();
            log::info!("Using note store at {}", config.notes_file.display());

            let notifier = Arc::new(ChangeNotifier::new());
            let surfaces = TauriSurfaces::new(app.handle().clone(), Arc::clone(&notifier));
            let handler = RequestHandler::new(NoteStore::new(config), notifier, surfaces.clone());

            // Create the store file up front so the first window never races it.
            tauri::async_runtime::block_on(handler.store().load_all())?;

            // Keep the composer ready but hidden until it is summoned.
            surfaces.ensure(Surface::Composer)?;
            if !settings.start_hidden {
                handler.toggle_composer()?;
            }

            app.manage(AppState {
                handler: Arc::new(handler),
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            list_notes,
            create_note,
            update_note,
            delete_note,
            search_notes,
            list_tags,
            hide_window,
            open_history,
            open_new_note,
            get_settings,
            update_settings
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
