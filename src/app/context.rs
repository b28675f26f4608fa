//! Expliziter Editor-Kontext, der an alle Controller übergeben wird.

use super::history::EditHistory;
use crate::core::{Camera2D, DiagramModel};

/// View-Zustand: Kamera, Viewport und Dirty-Flag für den Renderer
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub camera: Camera2D,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    dirty: bool,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markiert die Darstellung als neu zu zeichnen
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Liest und setzt das Dirty-Flag zurück (einmal pro Render-Frame)
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Modell, Verlauf und View, gemeinsam von allen Controllern verändert.
#[derive(Debug, Default)]
pub struct EditorContext {
    pub model: DiagramModel,
    pub history: EditHistory,
    pub view: ViewContext,
}

impl EditorContext {
    pub fn new(model: DiagramModel, history_limit: usize) -> Self {
        Self {
            model,
            history: EditHistory::new_with_capacity(history_limit),
            view: ViewContext::new(),
        }
    }
}
