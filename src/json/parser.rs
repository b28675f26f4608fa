//! Parser für Diagramm-Dokumente.

use crate::core::Elements;
use anyhow::{Context, Result};
use std::path::Path;

/// Parsed ein Dokument aus einem JSON-String
pub fn parse_elements(json_content: &str) -> Result<Elements> {
    let elements: Elements =
        serde_json::from_str(json_content).context("Diagramm-JSON ist ungültig")?;

    log::debug!(
        "Dokument gelesen: {} Zustände, {} Transitionen, {} Komponenten",
        elements.states.len(),
        elements.transitions.len(),
        elements.components.len()
    );

    Ok(elements)
}

/// Liest und parsed eine Dokument-Datei
pub fn read_elements_file(path: &Path) -> Result<Elements> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei {} konnte nicht gelesen werden", path.display()))?;
    parse_elements(&content).with_context(|| format!("Fehler in {}", path.display()))
}
