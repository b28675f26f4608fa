use state_diagram_editor::app::{CreateNoteParams, CreateStateParams};
use state_diagram_editor::json::read_elements_file;
use state_diagram_editor::{DiagramController, Elements, Point, Rectangle};
use std::path::PathBuf;

fn sample_elements() -> Elements {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_elements.json");
    read_elements_file(&path).expect("Fixture sollte lesbar sein")
}

fn loaded_diagram() -> DiagramController {
    let mut diagram = DiagramController::default();
    diagram
        .load_from(sample_elements())
        .expect("Fixture sollte gültig sein");
    diagram
}

fn state_ids(diagram: &DiagramController) -> Vec<String> {
    diagram.model().states().map(|(id, _)| id.clone()).collect()
}

#[test]
fn test_delete_parent_state_is_one_undo_group() {
    let mut diagram = loaded_diagram();
    let before = diagram.to_elements();

    assert!(diagram.delete_state("running").expect("Löschen"));
    assert_eq!(state_ids(&diagram), vec!["idle"]);
    assert_eq!(diagram.model().transition_count(), 0);

    // 2 Transitionen + 2 Zustände in einer Gruppe
    let entries = diagram.context().history.entries();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3].connected, 3);

    assert!(diagram.undo());
    assert_eq!(diagram.to_elements(), before);
    assert!(!diagram.can_undo());

    assert!(diagram.redo());
    assert_eq!(state_ids(&diagram), vec!["idle"]);
    assert!(!diagram.can_redo());
}

#[test]
fn test_undo_restores_document_order_of_middle_state() {
    let mut diagram = loaded_diagram();
    let order = state_ids(&diagram);

    diagram.delete_state("running").expect("Löschen");
    diagram.undo();

    assert_eq!(state_ids(&diagram), order);
}

#[test]
fn test_deleting_initial_state_clears_it_in_same_group() {
    let mut diagram = loaded_diagram();

    diagram.delete_state("idle").expect("Löschen");
    assert_eq!(diagram.model().initial_state(), None);

    diagram.undo();
    assert_eq!(diagram.model().initial_state(), Some("idle"));
    assert!(!diagram.can_undo());
}

#[test]
fn test_new_action_discards_redo_tail() {
    let mut diagram = loaded_diagram();

    diagram.move_state("idle", Point::new(10.0, 10.0));
    diagram.undo();
    assert!(diagram.can_redo());

    diagram
        .create_note(CreateNoteParams {
            position: Point::new(0.0, 0.0),
            text: "neu".to_string(),
            ..Default::default()
        })
        .expect("Notiz");
    assert!(!diagram.can_redo());
}

#[test]
fn test_move_undo_redo_restores_positions() {
    let mut diagram = loaded_diagram();

    diagram.move_state("blink", Point::new(700.0, 80.0));
    diagram.move_state("blink", Point::new(750.0, 90.0));

    diagram.undo();
    let bounds = diagram.model().state("blink").expect("existiert").bounds;
    assert_eq!((bounds.x, bounds.y), (700.0, 80.0));

    diagram.undo();
    let bounds = diagram.model().state("blink").expect("existiert").bounds;
    assert_eq!((bounds.x, bounds.y), (620.0, 40.0));

    diagram.redo();
    diagram.redo();
    let bounds = diagram.model().state("blink").expect("existiert").bounds;
    assert_eq!((bounds.x, bounds.y), (750.0, 90.0));
}

#[test]
fn test_purging_component_is_undone_in_one_step() {
    let mut diagram = loaded_diagram();
    let before = diagram.to_elements();

    assert!(diagram.delete_component("led", false).is_err());
    assert!(diagram.delete_component("led", true).expect("Bereinigen"));

    let model = diagram.model();
    assert!(model.component("led").is_none());
    assert!(model.transitions_referencing_component("led").is_empty());
    assert!(model.states_referencing_component("led").is_empty());

    assert!(diagram.undo());
    assert_eq!(diagram.to_elements(), before);
}

#[test]
fn test_history_limit_keeps_newest_actions() {
    let mut options = state_diagram_editor::EditorOptions::default();
    options.history_limit = 3;
    let mut diagram = DiagramController::new(
        std::rc::Rc::new(state_diagram_editor::core::AnyPlatform),
        options,
    );

    for i in 0..5 {
        diagram
            .create_state(CreateStateParams {
                name: format!("S{i}"),
                bounds: Rectangle::new(0.0, 0.0, 10.0, 10.0),
                ..Default::default()
            })
            .expect("Zustand");
    }

    let mut undone = 0;
    while diagram.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(diagram.model().state_count(), 2);
}

#[test]
fn test_load_clears_history() {
    let mut diagram = loaded_diagram();
    diagram.delete_state("running").expect("Löschen");
    assert!(diagram.can_undo());

    diagram.load_from(sample_elements()).expect("Laden");
    assert!(!diagram.can_undo());
    assert!(!diagram.can_redo());
}
