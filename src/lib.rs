//! State Diagram Editor Library.
//! Editier-Engine für hierarchische Zustandsdiagramme, als Library exportiert
//! für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod json;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, DiagramController, DiagramEvent, EditHistory,
    MouseEvent, MouseEventKind,
};
pub use core::{
    Camera2D, Component, DiagramModel, Elements, EntityKind, EntityRef, ModelInvariantError,
    Note, PlatformInfo, Point, Rectangle, State, Transition,
};
pub use json::{parse_elements, write_elements};
pub use shared::{EditorOptions, RenderScene};
