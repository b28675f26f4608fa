//! Handler für Undo/Redo-Operationen.

use crate::app::AppState;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut AppState) {
    if state.diagram.undo() {
        log::info!("Undo ausgeführt");
    } else {
        log::debug!("Undo: nichts zu tun");
    }
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut AppState) {
    if state.diagram.redo() {
        log::info!("Redo ausgeführt");
    } else {
        log::debug!("Redo: nichts zu tun");
    }
}
