//! Handler für Kamera und Viewport.

use crate::app::AppState;

/// Aktualisiert die Viewport-Größe.
pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    state.diagram.set_viewport_size(size);
}

/// Verschiebt die Kamera um ein Delta in Screen-Pixeln.
pub fn pan(state: &mut AppState, delta: glam::Vec2) {
    state.diagram.pan(delta);
}

/// Zoomt mit optionalem Fokuspunkt im Canvas-Koordinatensystem.
pub fn zoom_towards(state: &mut AppState, factor: f32, focus_world: Option<glam::Vec2>) {
    state.diagram.zoom(factor, focus_world);
}

/// Richtet die Kamera auf den gesamten Diagramminhalt aus.
pub fn center_camera(state: &mut AppState) {
    state.diagram.center_on_content();
}
