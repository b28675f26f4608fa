//! Mapping von UI-Intents auf mutierende App-Commands.

use super::clipboard::CopyData;
use super::controllers::{CreateNoteParams, CreateStateParams, CreateTransitionParams};
use super::{AppCommand, AppIntent, AppState};
use crate::core::Rectangle;

/// Name neu eingefügter Zustände
const NEW_STATE_NAME: &str = "Zustand";

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let diagram = &state.diagram;
    match intent {
        AppIntent::NewDocumentRequested { platform } => vec![AppCommand::NewDocument { platform }],
        AppIntent::OpenFileRequested { path } => vec![AppCommand::LoadFile { path }],
        AppIntent::SaveRequested { path } => vec![AppCommand::SaveFile { path }],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],

        AppIntent::EntityPointer {
            target,
            kind,
            event,
        } => vec![AppCommand::DispatchEntityMouse {
            target,
            kind,
            event,
        }],
        AppIntent::CanvasPointer { kind, event } => {
            vec![AppCommand::DispatchCanvasMouse { kind, event }]
        }

        AppIntent::InsertStateRequested { name, position } => {
            let [width, height] = state.options.default_state_size;
            let name = if name.trim().is_empty() {
                NEW_STATE_NAME.to_string()
            } else {
                name
            };
            vec![AppCommand::CreateState {
                params: CreateStateParams {
                    name,
                    bounds: Rectangle::new(position.x, position.y, width, height),
                    place_in_center: true,
                    ..Default::default()
                },
            }]
        }
        AppIntent::ConnectStatesRequested { source, target } => {
            vec![AppCommand::CreateTransition {
                params: CreateTransitionParams::between(source, target),
            }]
        }
        AppIntent::AddComponentRequested { mut params } => {
            // Leerer Name: vom Typ ableiten und eindeutig machen
            let base = if params.name.trim().is_empty() {
                params.kind.to_lowercase()
            } else {
                params.name.clone()
            };
            params.name = diagram.model().unique_component_name(&base);
            vec![AppCommand::CreateComponent { params }]
        }
        AppIntent::InsertNoteRequested { position } => vec![AppCommand::CreateNote {
            params: CreateNoteParams {
                position,
                ..Default::default()
            },
        }],

        AppIntent::DeleteSelectedRequested if diagram.selection().is_some() => {
            vec![AppCommand::DeleteSelected]
        }
        AppIntent::CopyRequested if diagram.selection().is_some() => {
            vec![AppCommand::CopySelected]
        }
        AppIntent::PasteRequested if diagram.clipboard().is_some() => vec![AppCommand::Paste],
        AppIntent::ClipboardTextReceived { text } => match CopyData::from_json(&text) {
            Ok(data) => vec![AppCommand::SetClipboard { data }],
            Err(e) => {
                log::debug!("Zwischenablage enthält kein Diagramm-Element: {}", e);
                vec![]
            }
        },
        AppIntent::UndoRequested if diagram.can_undo() => vec![AppCommand::Undo],
        AppIntent::RedoRequested if diagram.can_redo() => vec![AppCommand::Redo],
        AppIntent::DeleteSelectedRequested
        | AppIntent::CopyRequested
        | AppIntent::PasteRequested
        | AppIntent::UndoRequested
        | AppIntent::RedoRequested => vec![],

        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraPan { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::CameraZoom {
            factor,
            focus_world,
        } => vec![AppCommand::ZoomCamera {
            factor,
            focus_world,
        }],
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomCamera {
            factor: state.options.camera_zoom_step,
            focus_world: None,
        }],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomCamera {
            factor: 1.0 / state.options.camera_zoom_step,
            focus_world: None,
        }],
        AppIntent::CenterCameraRequested => vec![AppCommand::CenterCamera],

        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}
