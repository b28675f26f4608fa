//! Handler für das Anlegen, Löschen, Kopieren und Einfügen von Elementen.

use crate::app::clipboard::CopyData;
use crate::app::controllers::{
    CreateComponentParams, CreateNoteParams, CreateStateParams, CreateTransitionParams,
};
use crate::app::mouse_events::{MouseEvent, MouseEventKind};
use crate::app::AppState;
use crate::core::EntityRef;

/// Legt einen Zustand an und wählt ihn aus.
pub fn create_state(state: &mut AppState, params: CreateStateParams) -> anyhow::Result<()> {
    let id = state.diagram.create_state(params)?;
    log::info!("Zustand '{}' angelegt", id);
    state.diagram.select(EntityRef::State(id));
    Ok(())
}

/// Legt eine Transition an und wählt sie aus.
pub fn create_transition(
    state: &mut AppState,
    params: CreateTransitionParams,
) -> anyhow::Result<()> {
    let id = state.diagram.create_transition(params)?;
    log::info!("Transition '{}' angelegt", id);
    state.diagram.select(EntityRef::Transition(id));
    Ok(())
}

/// Legt eine Komponente an.
pub fn create_component(
    state: &mut AppState,
    params: CreateComponentParams,
) -> anyhow::Result<()> {
    let name = state.diagram.create_component(params)?;
    log::info!("Komponente '{}' angelegt", name);
    Ok(())
}

/// Legt eine Notiz an und wählt sie aus.
pub fn create_note(state: &mut AppState, params: CreateNoteParams) -> anyhow::Result<()> {
    let id = state.diagram.create_note(params)?;
    state.diagram.select(EntityRef::Note(id));
    Ok(())
}

/// Löscht das ausgewählte Element samt abhängiger Elemente.
pub fn delete_selected(state: &mut AppState) -> anyhow::Result<()> {
    if state.diagram.delete_selected()? {
        log::info!("Auswahl gelöscht");
    }
    Ok(())
}

/// Kopiert das ausgewählte Element in die Zwischenablage.
pub fn copy_selected(state: &mut AppState) {
    if state.diagram.copy_selected() {
        state.status_message = Some("In Zwischenablage kopiert".to_string());
    }
}

/// Fügt den Inhalt der Zwischenablage versetzt ein.
pub fn paste(state: &mut AppState) -> anyhow::Result<()> {
    if let Some(pasted) = state.diagram.paste()? {
        log::info!("Eingefügt: {:?}", pasted);
    }
    Ok(())
}

/// Ersetzt die Zwischenablage, z.B. mit Text aus der System-Zwischenablage.
pub fn set_clipboard(state: &mut AppState, data: CopyData) {
    state.diagram.set_clipboard(data);
}

/// Leitet ein Maus-Ereignis an ein Element weiter.
pub fn dispatch_entity_mouse(
    state: &mut AppState,
    target: &EntityRef,
    kind: MouseEventKind,
    mut event: MouseEvent,
) {
    state.diagram.dispatch_mouse(target, kind, &mut event);
}

/// Leitet ein Maus-Ereignis an die leere Fläche weiter.
pub fn dispatch_canvas_mouse(state: &mut AppState, kind: MouseEventKind, mut event: MouseEvent) {
    state.diagram.dispatch_canvas_mouse(kind, &mut event);
}
