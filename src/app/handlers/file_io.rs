//! Handler für Datei-Operationen (Neu, Öffnen, Speichern).

use crate::app::AppState;
use anyhow::{bail, Context};
use std::path::PathBuf;

/// Beginnt ein leeres Dokument für die angegebene Plattform.
pub fn new_document(state: &mut AppState, platform: &str) -> anyhow::Result<()> {
    state.diagram.new_document(platform)?;
    state.current_file_path = None;
    state.status_message = None;
    log::info!("Neues Dokument für Plattform '{}'", platform);
    Ok(())
}

/// Lädt ein Dokument aus dem übergebenen Pfad.
///
/// Bei einem Fehler bleibt das bisherige Dokument unverändert.
pub fn load(state: &mut AppState, path: PathBuf) -> anyhow::Result<()> {
    let elements = crate::json::read_elements_file(&path)?;
    state
        .diagram
        .load_from(elements)
        .with_context(|| format!("Dokument {} verletzt Modell-Invarianten", path.display()))?;

    state.diagram.center_on_content();
    state.status_message = Some(format!(
        "{} geladen: {} Zustände, {} Transitionen",
        path.display(),
        state.state_count(),
        state.transition_count()
    ));
    state.current_file_path = Some(path);
    Ok(())
}

/// Speichert das Dokument.
///
/// `None` speichert unter dem aktuell bekannten Pfad, `Some(p)` unter dem neuen Pfad `p`.
pub fn save(state: &mut AppState, path: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path.or_else(|| state.current_file_path.clone()) else {
        bail!("Kein Speicherpfad bekannt");
    };

    crate::json::write_elements_file(&state.diagram.to_elements(), &path)?;
    state.status_message = Some(format!("Gespeichert: {}", path.display()));
    state.current_file_path = Some(path);
    Ok(())
}
