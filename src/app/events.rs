//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

use super::clipboard::CopyData;
use super::controllers::{
    CreateComponentParams, CreateNoteParams, CreateStateParams, CreateTransitionParams,
};
use super::mouse_events::{MouseEvent, MouseEventKind};
use crate::core::{EntityRef, Point};
use crate::shared::EditorOptions;
use std::path::PathBuf;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Leeres Dokument für eine Plattform beginnen
    NewDocumentRequested { platform: String },
    /// Dokument aus Datei laden
    OpenFileRequested { path: PathBuf },
    /// Speichern (unter aktuellem Pfad oder dem angegebenen)
    SaveRequested { path: Option<PathBuf> },
    /// Anwendung beenden
    ExitRequested,

    /// Maus-Ereignis über einem Element
    EntityPointer {
        target: EntityRef,
        kind: MouseEventKind,
        event: MouseEvent,
    },
    /// Maus-Ereignis auf der leeren Fläche
    CanvasPointer {
        kind: MouseEventKind,
        event: MouseEvent,
    },

    /// Zustand an einer Canvas-Position einfügen (Kontextmenü)
    InsertStateRequested { name: String, position: Point },
    /// Transition zwischen zwei Zuständen ziehen
    ConnectStatesRequested { source: String, target: String },
    /// Komponente hinzufügen
    AddComponentRequested { params: CreateComponentParams },
    /// Notiz an einer Canvas-Position einfügen
    InsertNoteRequested { position: Point },

    /// Ausgewähltes Element löschen (Entf)
    DeleteSelectedRequested,
    /// Ausgewähltes Element kopieren (Strg+C)
    CopyRequested,
    /// Zwischenablage einfügen (Strg+V)
    PasteRequested,
    /// Zwischenablage aus Text des Systems übernehmen
    ClipboardTextReceived { text: String },
    /// Rückgängig (Strg+Z)
    UndoRequested,
    /// Wiederherstellen (Strg+Y)
    RedoRequested,

    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Kamera um Delta verschieben (Screen-Pixel)
    CameraPan { delta: glam::Vec2 },
    /// Kamera zoomen (optional auf einen Fokuspunkt)
    CameraZoom {
        factor: f32,
        focus_world: Option<glam::Vec2>,
    },
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Kamera auf den Inhalt zentrieren
    CenterCameraRequested,

    /// Optionen übernehmen
    OptionsChanged { options: EditorOptions },
}

/// Mutierende Befehle, die vom Controller zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    NewDocument { platform: String },
    LoadFile { path: PathBuf },
    SaveFile { path: Option<PathBuf> },
    RequestExit,

    DispatchEntityMouse {
        target: EntityRef,
        kind: MouseEventKind,
        event: MouseEvent,
    },
    DispatchCanvasMouse {
        kind: MouseEventKind,
        event: MouseEvent,
    },

    CreateState { params: CreateStateParams },
    CreateTransition { params: CreateTransitionParams },
    CreateComponent { params: CreateComponentParams },
    CreateNote { params: CreateNoteParams },

    DeleteSelected,
    CopySelected,
    Paste,
    SetClipboard { data: CopyData },
    Undo,
    Redo,

    SetViewportSize { size: [f32; 2] },
    PanCamera { delta: glam::Vec2 },
    ZoomCamera {
        factor: f32,
        focus_world: Option<glam::Vec2>,
    },
    CenterCamera,

    ApplyOptions { options: EditorOptions },
}
