//! Core-Domänentypen: Zustände, Transitionen, Komponenten, Notizen, Modell, Kamera.

pub mod camera;
pub mod component;
/// Das zentrale Entity-Modell
///
/// Hält alle Diagramm-Elemente und prüft bei jeder Mutation die Invarianten
/// (keine hängenden Referenzen, keine Eltern-Zyklen, eindeutige Namen).
pub mod diagram_model;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod state;
pub mod transition;

pub use camera::Camera2D;
pub use component::{Component, Note};
pub use diagram_model::{DiagramModel, EntityKind, EntityRef};
pub use elements::Elements;
pub use error::ModelInvariantError;
pub use geometry::{Point, Rectangle};
pub use platform::{AnyPlatform, PlatformInfo, StaticPlatform};
pub use state::{Action, ComponentCall, Event, EventData, State, Variable};
pub use transition::{Condition, ConditionValue, Transition};
