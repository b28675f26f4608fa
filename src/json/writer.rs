//! Writer für Diagramm-Dokumente.

use crate::core::Elements;
use anyhow::{Context, Result};
use std::path::Path;

/// Schreibt ein Dokument als formatiertes JSON
pub fn write_elements(elements: &Elements) -> Result<String> {
    let mut output =
        serde_json::to_string_pretty(elements).context("Dokument nicht serialisierbar")?;
    output.push('\n');
    Ok(output)
}

/// Schreibt ein Dokument in eine Datei
pub fn write_elements_file(elements: &Elements, path: &Path) -> Result<()> {
    let content = write_elements(elements)?;
    std::fs::write(path, content)
        .with_context(|| format!("Datei {} konnte nicht geschrieben werden", path.display()))?;
    log::info!("Dokument gespeichert: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Note, Point};

    #[test]
    fn test_write_uses_camel_case_keys() {
        let mut elements = Elements::empty("test");
        elements.initial_state = String::new();
        let json = write_elements(&elements).expect("serialisierbar");

        assert!(json.contains("\"initialState\""));
        assert!(json.contains("\"platform\": \"test\""));
        // Leere Notizen werden nicht geschrieben
        assert!(!json.contains("\"notes\""));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_write_includes_notes() {
        let mut elements = Elements::empty("test");
        elements.notes.insert(
            "note-1".to_string(),
            Note {
                position: Point::new(3.0, 4.0),
                text: "Hinweis".to_string(),
            },
        );
        let json = write_elements(&elements).expect("serialisierbar");
        assert!(json.contains("\"note-1\""));
        assert!(json.contains("Hinweis"));
    }
}
