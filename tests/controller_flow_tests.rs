use state_diagram_editor::app::{CopyData, CreateComponentParams};
use state_diagram_editor::core::StaticPlatform;
use state_diagram_editor::{
    AppCommand, AppController, AppIntent, AppState, EditorOptions, EntityRef, Point,
};
use std::path::PathBuf;
use std::rc::Rc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_elements.json")
}

fn loaded_state() -> (AppController, AppState) {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::OpenFileRequested {
                path: fixture_path(),
            },
        )
        .expect("Fixture sollte ladbar sein");
    (controller, state)
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sde_{}_{}", std::process::id(), name))
}

#[test]
fn test_open_file_loads_document_and_logs_command() {
    let (_, state) = loaded_state();

    assert_eq!(state.state_count(), 3);
    assert_eq!(state.transition_count(), 2);
    assert_eq!(state.diagram.model().component_count(), 3);
    assert_eq!(state.diagram.model().initial_state(), Some("idle"));
    assert_eq!(state.current_file_path.as_deref(), Some(fixture_path().as_path()));
    assert!(!state.can_undo());

    match state.command_log.entries().last() {
        Some(AppCommand::LoadFile { path }) => assert_eq!(path, &fixture_path()),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_open_missing_file_keeps_previous_document() {
    let (mut controller, mut state) = loaded_state();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::OpenFileRequested {
            path: PathBuf::from("/nicht/vorhanden.json"),
        },
    );

    assert!(result.is_err());
    assert_eq!(state.state_count(), 3);
    assert_eq!(state.current_file_path.as_deref(), Some(fixture_path().as_path()));
}

#[test]
fn test_open_document_with_dangling_transition_is_rejected() {
    let path = temp_file("dangling.json");
    std::fs::write(
        &path,
        r##"{
            "states": {"a": {"name": "A", "bounds": {"x": 0, "y": 0, "width": 10, "height": 10}}},
            "transitions": [{
                "source": "a", "target": "fehlt", "color": "#FFFFFF",
                "position": {"x": 0, "y": 0},
                "trigger": {"component": "c", "method": "m"}
            }],
            "components": {"c": {"type": "T"}},
            "initialState": "a",
            "platform": "test"
        }"##,
    )
    .expect("Temp-Datei schreibbar");

    let (mut controller, mut state) = loaded_state();
    let result = controller.handle_intent(
        &mut state,
        AppIntent::OpenFileRequested { path: path.clone() },
    );
    let _ = std::fs::remove_file(&path);

    assert!(result.is_err());
    assert_eq!(state.state_count(), 3, "altes Dokument bleibt erhalten");
}

#[test]
fn test_save_and_reopen_yields_identical_document() {
    let (mut controller, mut state) = loaded_state();
    let path = temp_file("roundtrip.json");

    controller
        .handle_intent(
            &mut state,
            AppIntent::SaveRequested {
                path: Some(path.clone()),
            },
        )
        .expect("Speichern sollte funktionieren");
    assert_eq!(state.current_file_path.as_deref(), Some(path.as_path()));

    let mut reopened = AppState::new();
    controller
        .handle_intent(
            &mut reopened,
            AppIntent::OpenFileRequested { path: path.clone() },
        )
        .expect("Gespeicherte Datei sollte ladbar sein");
    let _ = std::fs::remove_file(&path);

    assert_eq!(reopened.diagram.to_elements(), state.diagram.to_elements());
}

#[test]
fn test_save_without_known_path_fails() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(&mut state, AppIntent::SaveRequested { path: None });
    assert!(result.is_err());
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::SaveFile { path: None })
    ));
}

#[test]
fn test_exit_requested_sets_exit_flag_and_logs_command() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    assert!(!state.should_exit);
    controller
        .handle_intent(&mut state, AppIntent::ExitRequested)
        .expect("ExitRequested sollte ohne Fehler durchlaufen");

    assert!(state.should_exit);
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::RequestExit)
    ));
}

#[test]
fn test_insert_state_delete_and_undo_via_intents() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(
            &mut state,
            AppIntent::InsertStateRequested {
                name: "Neu".to_string(),
                position: Point::new(100.0, 100.0),
            },
        )
        .expect("Einfügen");
    assert_eq!(state.state_count(), 1);
    assert!(matches!(state.diagram.selection(), Some(EntityRef::State(_))));

    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .expect("Löschen");
    assert_eq!(state.state_count(), 0);
    assert!(state.diagram.selection().is_none());

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert_eq!(state.state_count(), 1);

    controller
        .handle_intent(&mut state, AppIntent::RedoRequested)
        .expect("Redo");
    assert_eq!(state.state_count(), 0);
}

#[test]
fn test_undo_without_history_does_not_log_command() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo ohne Verlauf ist kein Fehler");
    assert!(state.command_log.is_empty());
}

#[test]
fn test_connect_states_then_delete_source_and_undo() {
    let (mut controller, mut state) = loaded_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::ConnectStatesRequested {
                source: "idle".to_string(),
                target: "blink".to_string(),
            },
        )
        .expect("Verbinden");
    assert_eq!(state.transition_count(), 3);

    state.diagram.select(EntityRef::State("idle".to_string()));
    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .expect("Löschen");
    assert!(state.diagram.model().state("idle").is_none());
    assert_eq!(state.transition_count(), 0);
    assert_eq!(state.diagram.model().initial_state(), None);

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert_eq!(state.transition_count(), 3);
    assert_eq!(state.diagram.model().initial_state(), Some("idle"));
}

#[test]
fn test_connect_to_unknown_state_returns_error() {
    let (mut controller, mut state) = loaded_state();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::ConnectStatesRequested {
            source: "idle".to_string(),
            target: "fehlt".to_string(),
        },
    );
    assert!(result.is_err());
    assert_eq!(state.transition_count(), 2);
}

#[test]
fn test_copy_and_paste_state_via_intents() {
    let (mut controller, mut state) = loaded_state();

    state.diagram.select(EntityRef::State("idle".to_string()));
    controller
        .handle_intent(&mut state, AppIntent::CopyRequested)
        .expect("Kopieren");
    controller
        .handle_intent(&mut state, AppIntent::PasteRequested)
        .expect("Einfügen");

    assert_eq!(state.state_count(), 4);
    let Some(EntityRef::State(pasted)) = state.diagram.selection().cloned() else {
        panic!("eingefügter Zustand sollte angewählt sein");
    };
    assert_ne!(pasted, "idle");
    let copy = state.diagram.model().state(&pasted).expect("existiert");
    let offset = state.options.paste_offset;
    assert_eq!(copy.name, "Idle");
    assert!((copy.bounds.x - offset).abs() < f32::EPSILON);
}

#[test]
fn test_clipboard_text_is_pasted_as_component() {
    let (mut controller, mut state) = loaded_state();

    let text = CopyData::Component(state_diagram_editor::app::Copied {
        id: "led".to_string(),
        data: state
            .diagram
            .model()
            .component("led")
            .cloned()
            .expect("led existiert"),
    })
    .to_json()
    .expect("serialisierbar");

    controller
        .handle_intent(&mut state, AppIntent::ClipboardTextReceived { text })
        .expect("Zwischenablage");
    controller
        .handle_intent(&mut state, AppIntent::PasteRequested)
        .expect("Einfügen");

    assert!(state.diagram.model().component("led_1").is_some());
}

#[test]
fn test_add_component_with_empty_name_uses_type() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    for _ in 0..2 {
        controller
            .handle_intent(
                &mut state,
                AppIntent::AddComponentRequested {
                    params: CreateComponentParams {
                        kind: "Timer".to_string(),
                        ..Default::default()
                    },
                },
            )
            .expect("Komponente");
    }

    let names: Vec<&String> = state.diagram.model().components().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["timer", "timer_1"]);
}

#[test]
fn test_zoom_in_and_center_camera() {
    let (mut controller, mut state) = loaded_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::ViewportResized {
                size: [1280.0, 720.0],
            },
        )
        .expect("Viewport");
    controller
        .handle_intent(&mut state, AppIntent::CenterCameraRequested)
        .expect("Zentrieren");
    let zoom_before = state.diagram.context().view.camera.zoom;

    controller
        .handle_intent(&mut state, AppIntent::ZoomInRequested)
        .expect("Zoom");
    let zoom_after = state.diagram.context().view.camera.zoom;

    let expected =
        (zoom_before * state.options.camera_zoom_step).min(state.options.camera_zoom_max);
    assert!((zoom_after - expected).abs() < 1e-4);
}

#[test]
fn test_new_document_resets_everything() {
    let (mut controller, mut state) = loaded_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::NewDocumentRequested {
                platform: "board-x".to_string(),
            },
        )
        .expect("Neues Dokument");

    assert_eq!(state.state_count(), 0);
    assert_eq!(state.diagram.model().platform_name(), "board-x");
    assert!(state.current_file_path.is_none());
    assert!(!state.can_undo());
}

#[test]
fn test_render_scene_reflects_document() {
    let (controller, mut state) = loaded_state();

    let scene = controller.build_render_scene(&mut state);
    assert!(scene.dirty);
    // 3 Zustände, 2 Transitionen, 3 Komponenten, 1 Notiz
    assert_eq!(scene.items.len(), 9);
}

#[test]
fn test_app_state_with_platform_validates_component_types() {
    let platform = StaticPlatform::new()
        .with_component("Button", ["pressed"])
        .with_component("Led", ["on", "off", "toggle"]);
    let mut state = AppState::with_platform(Rc::new(platform), EditorOptions::default());
    let mut controller = AppController::new();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::OpenFileRequested {
            path: fixture_path(),
        },
    );
    assert!(result.is_err(), "Timer wird von der Plattform nicht angeboten");
    assert_eq!(state.state_count(), 0);

    let result = controller.handle_intent(
        &mut state,
        AppIntent::AddComponentRequested {
            params: CreateComponentParams {
                kind: "Timer".to_string(),
                ..Default::default()
            },
        },
    );
    assert!(result.is_err());
    assert_eq!(state.diagram.model().component_count(), 0);
}
