//! Zentrale Konfiguration für den State-Diagram-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kamera ──────────────────────────────────────────────────────────

/// Minimaler Zoom-Faktor.
pub const CAMERA_ZOOM_MIN: f32 = 0.1;
/// Maximaler Zoom-Faktor.
pub const CAMERA_ZOOM_MAX: f32 = 10.0;
/// Zoom-Schritt bei stufenweisem Zoom (Menü-Buttons / Shortcuts).
pub const CAMERA_ZOOM_STEP: f32 = 1.2;
/// Rand in Screen-Pixeln beim Zentrieren auf den Inhalt.
pub const CENTER_PADDING_PX: f32 = 40.0;

// ── Bearbeitung ─────────────────────────────────────────────────────

/// Versatz pro Einfügen derselben Zwischenablage (Canvas-Einheiten).
pub const PASTE_OFFSET: f32 = 20.0;
/// Standardgröße neu erstellter Zustände [Breite, Höhe].
pub const DEFAULT_STATE_SIZE: [f32; 2] = [450.0, 100.0];
/// Maximale Anzahl Verlaufseinträge (0 = unbegrenzt).
pub const HISTORY_LIMIT: usize = 200;

/// Dateiname der Optionen-Datei neben der Binary.
const CONFIG_FILE_NAME: &str = "state_diagram_editor.toml";

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `state_diagram_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Kamera ──────────────────────────────────────────────────
    /// Minimaler Zoom-Faktor (konfigurierbar)
    pub camera_zoom_min: f32,
    /// Maximaler Zoom-Faktor (konfigurierbar)
    pub camera_zoom_max: f32,
    /// Zoom-Schritt bei Menü-Buttons / Shortcuts
    pub camera_zoom_step: f32,
    /// Rand beim Zentrieren auf den Diagramminhalt
    #[serde(default = "default_center_padding")]
    pub center_padding: f32,

    // ── Bearbeitung ─────────────────────────────────────────────
    /// Versatz pro Einfügen
    pub paste_offset: f32,
    /// Größe neu erstellter Zustände
    pub default_state_size: [f32; 2],
    /// Verlaufstiefe (0 = unbegrenzt)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            camera_zoom_min: CAMERA_ZOOM_MIN,
            camera_zoom_max: CAMERA_ZOOM_MAX,
            camera_zoom_step: CAMERA_ZOOM_STEP,
            center_padding: CENTER_PADDING_PX,
            paste_offset: PASTE_OFFSET,
            default_state_size: DEFAULT_STATE_SIZE,
            history_limit: HISTORY_LIMIT,
        }
    }
}

/// Serde-Default für `center_padding` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_center_padding() -> f32 {
    CENTER_PADDING_PX
}

/// Serde-Default für `history_limit` (Abwärtskompatibilität).
fn default_history_limit() -> usize {
    HISTORY_LIMIT
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("state-diagram-editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }
}
