//! Application-Layer: Controller, State, Events und Handler.

pub mod clipboard;
pub mod command_log;
pub mod context;
pub mod controller;
/// Typ-spezifische Controller für Zustände, Transitionen, Komponenten und Notizen
pub mod controllers;
pub mod diagram_controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod mouse_events;
pub mod render_scene;
pub mod shadow;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Diagramm, Datei, Optionen).
pub mod state;

pub use crate::core::Camera2D;
pub use clipboard::{Copied, CopyData};
pub use command_log::CommandLog;
pub use context::{EditorContext, ViewContext};
pub use controller::AppController;
pub use controllers::{
    ComponentsController, CreateComponentParams, CreateNoteParams, CreateStateParams,
    CreateTransitionParams, NotesController, StateDependents, StatesController,
    TransitionsController,
};
pub use diagram_controller::{DiagramController, DiagramEvent};
pub use events::{AppCommand, AppIntent};
pub use history::{EditHistory, HistoryAction, HistoryEntry};
pub use mouse_events::{DragInfo, MouseEvent, MouseEventEmitter, MouseEventKind, MouseHandler};
pub use render_scene::build as build_render_scene;
pub use shadow::{ControllerSignal, Shadow};
pub use state::AppState;
