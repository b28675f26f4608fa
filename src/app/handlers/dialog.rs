//! Handler für Anwendungssteuerung und Optionen.

use crate::app::AppState;
use crate::shared::EditorOptions;

/// Markiert die Anwendung zum Beenden.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}

/// Übernimmt neue Optionen und persistiert sie in der Konfigurationsdatei.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    state.diagram.set_options(options.clone());
    state.options = options;
    let path = EditorOptions::config_path();
    state.options.save_to_file(&path)
}
