//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und ein Renderer sie nur liest.

use crate::core::{Camera2D, EntityRef, Point, Rectangle};

/// Was der Renderer für ein Element zeichnet
#[derive(Debug, Clone, PartialEq)]
pub enum RenderShape {
    State {
        bounds: Rectangle,
        name: String,
        parent: Option<String>,
    },
    Transition {
        source: String,
        target: String,
        /// Position der Beschriftung
        label: Point,
        color: String,
    },
    Component {
        position: Option<Point>,
        kind: String,
    },
    Note {
        position: Point,
        text: String,
    },
}

/// Read-only Abbild eines Schattens für einen Render-Frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub entity: EntityRef,
    pub shape: RenderShape,
    pub selected: bool,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Alle Elemente in Zeichenreihenfolge (Zustände, Transitionen, Komponenten, Notizen)
    pub items: Vec<RenderItem>,
    /// Kamera-Zustand für diesen Frame
    pub camera: Camera2D,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    /// Aktuell ausgewähltes Element
    pub selection: Option<EntityRef>,
    /// Gesetzt, wenn sich seit dem letzten Frame etwas geändert hat
    pub dirty: bool,
}

impl RenderScene {
    /// Gibt zurück, ob überhaupt etwas zu zeichnen ist.
    pub fn has_content(&self) -> bool {
        !self.items.is_empty()
    }
}
