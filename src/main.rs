//! State Diagram Editor (Kommandozeile).
//!
//! Lädt ein Diagramm, prüft es gegen die Modell-Invarianten und schreibt es
//! optional normalisiert wieder heraus.

use state_diagram_editor::{AppController, AppIntent, AppState, EditorOptions};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "State Diagram Editor v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let mut args = std::env::args().skip(1);
        let Some(input) = args.next().map(PathBuf::from) else {
            anyhow::bail!("Aufruf: state-diagram-editor <diagramm.json> [ausgabe.json]");
        };
        let output = args.next().map(PathBuf::from);

        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let mut state = AppState::with_options(EditorOptions::load_from_file(&config_path));
        let mut controller = AppController::new();

        controller.handle_intent(&mut state, AppIntent::OpenFileRequested { path: input })?;
        Self::log_summary(&state);

        if let Some(path) = output {
            controller.handle_intent(&mut state, AppIntent::SaveRequested { path: Some(path) })?;
        }

        controller.handle_intent(&mut state, AppIntent::ExitRequested)?;
        Ok(())
    }

    fn log_summary(state: &AppState) {
        let model = state.diagram.model();
        log::info!(
            "{} Zustände, {} Transitionen, {} Komponenten, {} Notizen",
            model.state_count(),
            model.transition_count(),
            model.component_count(),
            model.note_count()
        );
        match model.initial_state() {
            Some(id) => log::info!("Anfangszustand: {}", id),
            None => log::warn!("Kein Anfangszustand gesetzt"),
        }
        if let Some(message) = &state.status_message {
            log::info!("{}", message);
        }
    }
}
