//! Application State: zentrale Datenhaltung.

use super::{CommandLog, DiagramController};
use crate::core::{AnyPlatform, PlatformInfo};
use crate::shared::EditorOptions;
use std::path::PathBuf;
use std::rc::Rc;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Das geöffnete Diagramm samt Verlauf, Auswahl und Kamera
    pub diagram: DiagramController,
    /// Pfad der zuletzt geladenen bzw. gespeicherten Datei
    pub current_file_path: Option<PathBuf>,
    /// Letzte Statusmeldung für die Statusleiste
    pub status_message: Option<String>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Signalisiert dem Host, die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen App-State mit geladenen Optionen, ohne Plattform-Prüfung
    pub fn with_options(options: EditorOptions) -> Self {
        Self::with_platform(Rc::new(AnyPlatform), options)
    }

    /// Erstellt einen App-State, der Komponenten gegen `platform` prüft
    pub fn with_platform(platform: Rc<dyn PlatformInfo>, options: EditorOptions) -> Self {
        Self {
            diagram: DiagramController::new(platform, options.clone()),
            current_file_path: None,
            status_message: None,
            command_log: CommandLog::new(),
            options,
            should_exit: false,
        }
    }

    /// Gibt die Anzahl der Zustände zurück (für UI-Anzeige)
    pub fn state_count(&self) -> usize {
        self.diagram.model().state_count()
    }

    /// Gibt die Anzahl der Transitionen zurück (für UI-Anzeige)
    pub fn transition_count(&self) -> usize {
        self.diagram.model().transition_count()
    }

    pub fn can_undo(&self) -> bool {
        self.diagram.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.diagram.can_redo()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
