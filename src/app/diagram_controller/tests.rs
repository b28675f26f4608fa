use super::*;
use crate::core::{ComponentCall, Condition, ConditionValue, StaticPlatform};
use approx::assert_relative_eq;

fn state_params(id: &str, x: f32) -> CreateStateParams {
    CreateStateParams {
        id: Some(id.to_string()),
        name: id.to_string(),
        bounds: Rectangle::new(x, 0.0, 100.0, 50.0),
        ..Default::default()
    }
}

fn controller_a_b() -> (DiagramController, String) {
    let mut diagram = DiagramController::default();
    diagram.create_state(state_params("A", 0.0)).expect("A");
    diagram.create_state(state_params("B", 300.0)).expect("B");
    let t = diagram
        .create_transition(CreateTransitionParams::between("A", "B"))
        .expect("A→B");
    (diagram, t)
}

#[test]
fn test_delete_state_undo_redo_scenario() {
    let (mut diagram, t) = controller_a_b();
    let before = diagram.to_elements();

    assert!(diagram.delete_state("A").expect("Kaskade"));
    assert!(diagram.model().state("A").is_none());
    assert!(diagram.model().transition(&t).is_none());
    assert!(diagram.states().shadows().get("A").is_none());
    assert!(diagram.transitions().shadows().is_empty());

    assert!(diagram.undo());
    assert_eq!(diagram.to_elements(), before);
    assert!(diagram.states().shadows().contains("A"));
    assert!(diagram.transitions().shadows().contains(&t));

    assert!(diagram.redo());
    assert!(diagram.model().state("A").is_none());
    assert!(diagram.model().transition(&t).is_none());
    assert!(!diagram.can_redo());
}

#[test]
fn test_undo_restores_document_order() {
    let mut diagram = DiagramController::default();
    for (i, id) in ["A", "B", "C"].iter().enumerate() {
        diagram
            .create_state(state_params(id, i as f32 * 200.0))
            .expect("Zustand");
    }
    let before = diagram.to_elements();

    diagram.delete_state("B").expect("B");
    diagram.undo();

    let order: Vec<_> = diagram.to_elements().states.keys().cloned().collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    assert_eq!(diagram.to_elements(), before);
}

#[test]
fn test_initial_state_cleared_on_delete_and_restored_on_undo() {
    let (mut diagram, _) = controller_a_b();
    diagram.set_initial_state(Some("A")).expect("A Top-Level");

    diagram.delete_state("A").expect("Kaskade");
    assert_eq!(diagram.model().initial_state(), None);

    diagram.undo();
    assert_eq!(diagram.model().initial_state(), Some("A"));
}

#[test]
fn test_link_initial_state_clears_it_in_one_group() {
    let (mut diagram, _) = controller_a_b();
    diagram.set_initial_state(Some("B")).expect("B Top-Level");

    assert!(diagram.link_state("B", "A").expect("gültig"));
    assert_eq!(diagram.model().initial_state(), None);
    assert_eq!(
        diagram.model().state("B").and_then(|s| s.parent.as_deref()),
        Some("A")
    );

    diagram.undo();
    assert_eq!(diagram.model().initial_state(), Some("B"));
    assert_eq!(diagram.model().state("B").and_then(|s| s.parent.clone()), None);
}

#[test]
fn test_link_rejects_cycle_and_records_nothing() {
    let (mut diagram, _) = controller_a_b();
    diagram.link_state("B", "A").expect("B unter A");
    let depth = diagram.context().history.len();

    let err = diagram.link_state("A", "B").expect_err("Zyklus");
    assert!(matches!(err, ModelInvariantError::ParentCycle { .. }));
    assert_eq!(diagram.context().history.len(), depth);
}

#[test]
fn test_paste_twice_uses_fresh_ids_and_growing_offset() {
    let mut diagram = DiagramController::default();
    diagram.create_state(state_params("A", 0.0)).expect("A");
    assert!(diagram.copy(&EntityRef::State("A".to_string())));

    let first = diagram.paste().expect("gültig").expect("eingefügt");
    let second = diagram.paste().expect("gültig").expect("eingefügt");
    assert_ne!(first, second);
    assert_ne!(first.id(), "A");
    assert_eq!(diagram.model().state_count(), 3);

    let offset = diagram.options().paste_offset;
    let pos = |e: &EntityRef| {
        diagram
            .model()
            .state(e.id())
            .map(|s| s.bounds.position())
            .expect("vorhanden")
    };
    assert_relative_eq!(pos(&first).x, offset);
    assert_relative_eq!(pos(&second).x, 2.0 * offset);
    assert_eq!(diagram.selection(), Some(&second));
}

#[test]
fn test_paste_component_gets_unique_name() {
    let mut diagram = DiagramController::default();
    diagram
        .create_component(CreateComponentParams {
            name: "timer".to_string(),
            kind: "Timer".to_string(),
            ..Default::default()
        })
        .expect("neu");
    diagram.copy(&EntityRef::Component("timer".to_string()));

    let pasted = diagram.paste().expect("gültig").expect("eingefügt");
    assert_eq!(pasted, EntityRef::Component("timer_1".to_string()));
}

#[test]
fn test_paste_without_clipboard_is_noop() {
    let mut diagram = DiagramController::default();
    assert_eq!(diagram.paste().expect("kein Fehler"), None);
    assert!(!diagram.can_undo());
}

fn with_component_references() -> DiagramController {
    let (mut diagram, t) = controller_a_b();
    diagram
        .create_component(CreateComponentParams {
            name: "led".to_string(),
            kind: "LED".to_string(),
            ..Default::default()
        })
        .expect("led");
    let mut transition = diagram.model().transition(&t).cloned().expect("t");
    transition.conditions = Some(Condition {
        kind: "equals".to_string(),
        value: ConditionValue::List(vec![
            Condition {
                kind: "value".to_string(),
                value: ConditionValue::Variable(ComponentCall::new("led", "isOn")),
            },
            Condition {
                kind: "value".to_string(),
                value: ConditionValue::Number(1.0),
            },
        ]),
    });
    diagram.change_transition(&t, transition).expect("gültig");
    diagram.set_state_events(
        "A",
        vec![
            EventData {
                trigger: ComponentCall::new("led", "toggled"),
                actions: Vec::new(),
            },
            EventData {
                trigger: ComponentCall::new("System", "onEnter"),
                actions: Vec::new(),
            },
        ],
    );
    diagram
}

#[test]
fn test_delete_referenced_component_without_purge_is_rejected() {
    let mut diagram = with_component_references();
    let err = diagram
        .delete_component("led", false)
        .expect_err("referenziert");
    assert_eq!(
        err,
        ModelInvariantError::ComponentInUse {
            name: "led".to_string(),
            count: 2,
        }
    );
    assert!(diagram.model().component("led").is_some());
}

#[test]
fn test_delete_component_with_purge_is_one_undo_step() {
    let mut diagram = with_component_references();
    let before = diagram.to_elements();

    assert!(diagram.delete_component("led", true).expect("bereinigt"));
    assert!(diagram.model().component("led").is_none());
    assert_eq!(diagram.model().transition_count(), 0);
    assert_eq!(diagram.model().state("A").map(|s| s.events.len()), Some(1));

    assert!(diagram.undo());
    assert_eq!(diagram.to_elements(), before);
}

#[test]
fn test_change_component_rename_follows_selection() {
    let mut diagram = with_component_references();
    diagram.select(EntityRef::Component("led".to_string()));

    diagram
        .change_component("led", "status", IndexMap::new())
        .expect("gültig");
    assert_eq!(
        diagram.selection(),
        Some(&EntityRef::Component("status".to_string()))
    );
    assert!(diagram
        .model()
        .state("A")
        .is_some_and(|s| s.references_component("status")));

    diagram.undo();
    assert!(diagram.model().component("led").is_some());
    assert!(diagram
        .model()
        .state("A")
        .is_some_and(|s| s.references_component("led")));
}

#[test]
fn test_selection_is_exclusive() {
    let (mut diagram, _) = controller_a_b();
    diagram.select(EntityRef::State("A".to_string()));
    diagram.select(EntityRef::State("B".to_string()));

    let selected: Vec<_> = diagram
        .render_items()
        .into_iter()
        .filter(|item| item.selected)
        .map(|item| item.entity)
        .collect();
    assert_eq!(selected, vec![EntityRef::State("B".to_string())]);
}

#[test]
fn test_selection_is_pruned_after_delete() {
    let (mut diagram, _) = controller_a_b();
    diagram.select(EntityRef::State("A".to_string()));
    diagram.delete_selected().expect("gültig");
    assert_eq!(diagram.selection(), None);
}

#[test]
fn test_mouse_down_selects_and_canvas_clears() {
    let (mut diagram, _) = controller_a_b();
    let target = EntityRef::State("A".to_string());
    let mut event = MouseEvent::at(Point::new(10.0, 10.0));

    assert!(diagram.dispatch_mouse(&target, MouseEventKind::MouseDown, &mut event));
    assert_eq!(diagram.selection(), Some(&target));

    diagram.dispatch_canvas_mouse(MouseEventKind::MouseDown, &mut event);
    assert_eq!(diagram.selection(), None);
}

#[test]
fn test_drag_end_moves_state_and_is_undoable() {
    let (mut diagram, _) = controller_a_b();
    let target = EntityRef::State("B".to_string());
    let mut event = MouseEvent::drag_end(Point::new(310.0, 10.0), Point::new(330.0, 50.0));

    diagram.dispatch_mouse(&target, MouseEventKind::DragEnd, &mut event);
    assert_eq!(
        diagram.model().state("B").map(|s| s.bounds.position()),
        Some(Point::new(320.0, 40.0))
    );

    diagram.undo();
    assert_eq!(
        diagram.model().state("B").map(|s| s.bounds.position()),
        Some(Point::new(300.0, 0.0))
    );
}

#[test]
fn test_double_click_and_context_menu_reach_host() {
    let (mut diagram, t) = controller_a_b();
    let target = EntityRef::Transition(t);
    let mut event = MouseEvent::at(Point::new(1.0, 1.0)).with_screen_position(Point::new(5.0, 6.0));

    diagram.dispatch_mouse(&target, MouseEventKind::DoubleClick, &mut event);
    diagram.dispatch_mouse(&target, MouseEventKind::ContextMenu, &mut event);
    diagram.dispatch_canvas_mouse(MouseEventKind::ContextMenu, &mut event);

    assert_eq!(
        diagram.take_events(),
        vec![
            DiagramEvent::Change(target.clone()),
            DiagramEvent::ContextMenu {
                entity: target,
                screen_position: Point::new(5.0, 6.0),
            },
            DiagramEvent::CanvasContextMenu {
                position: Point::new(1.0, 1.0),
                screen_position: Point::new(5.0, 6.0),
            },
        ]
    );
    assert!(diagram.take_events().is_empty());
}

#[test]
fn test_dispatch_to_deleted_entity_is_ignored() {
    let (mut diagram, _) = controller_a_b();
    diagram.delete_state("B").expect("gültig");
    let mut event = MouseEvent::at(Point::default());
    assert!(!diagram.dispatch_mouse(
        &EntityRef::State("B".to_string()),
        MouseEventKind::MouseDown,
        &mut event
    ));
}

#[test]
fn test_load_from_invalid_document_keeps_current_state() {
    let (mut diagram, _) = controller_a_b();
    let mut broken = diagram.to_elements();
    broken.initial_state = "X".to_string();

    let err = diagram.load_from(broken).expect_err("X unbekannt");
    assert_eq!(err, ModelInvariantError::InvalidInitialState("X".to_string()));
    assert_eq!(diagram.model().state_count(), 2);
    assert!(diagram.can_undo());
}

#[test]
fn test_load_from_resets_history_selection_and_clipboard() {
    let (mut diagram, _) = controller_a_b();
    diagram.select(EntityRef::State("A".to_string()));
    diagram.copy_selected();

    let elements = diagram.to_elements();
    diagram.load_from(elements).expect("gültig");

    assert!(!diagram.can_undo());
    assert_eq!(diagram.selection(), None);
    assert!(diagram.clipboard().is_none());
    assert_eq!(diagram.states().shadows().len(), 2);
    assert_eq!(diagram.transitions().shadows().len(), 1);
}

#[test]
fn test_platform_rejects_unknown_component_type() {
    let platform = StaticPlatform::default().with_component("LED", ["on", "off"]);
    let mut diagram = DiagramController::new(Rc::new(platform), EditorOptions::default());
    let err = diagram
        .create_component(CreateComponentParams {
            name: "motor".to_string(),
            kind: "Motor".to_string(),
            ..Default::default()
        })
        .expect_err("Typ unbekannt");
    assert!(matches!(err, ModelInvariantError::UnknownComponentType { .. }));
}

#[test]
fn test_center_on_content_fits_states() {
    let (mut diagram, _) = controller_a_b();
    diagram.set_viewport_size([800.0, 600.0]);
    diagram.center_on_content();

    let camera = &diagram.context().view.camera;
    assert_relative_eq!(camera.position.x, 200.0);
    assert_relative_eq!(camera.position.y, 25.0);
    assert!(diagram.take_dirty());
    assert!(!diagram.take_dirty());
}

#[test]
fn test_history_limit_from_options() {
    let mut options = EditorOptions::default();
    options.history_limit = 2;
    let mut diagram = DiagramController::new(Rc::new(AnyPlatform), options);
    for (i, id) in ["A", "B", "C"].iter().enumerate() {
        diagram
            .create_state(state_params(id, i as f32 * 200.0))
            .expect("Zustand");
    }
    assert!(diagram.undo());
    assert!(diagram.undo());
    assert!(!diagram.undo());
    assert_eq!(diagram.model().state_count(), 1);
}

#[test]
fn test_cascade_larger_than_history_limit_stays_undoable() {
    let mut options = EditorOptions::default();
    options.history_limit = 3;
    let mut diagram = DiagramController::new(Rc::new(AnyPlatform), options);
    for (i, id) in ["A", "B", "C", "D"].iter().enumerate() {
        diagram
            .create_state(state_params(id, i as f32 * 200.0))
            .expect("Zustand");
    }
    for target in ["B", "C", "D"] {
        diagram
            .create_transition(CreateTransitionParams::between("A", target))
            .expect("Transition");
    }
    let before = diagram.to_elements();

    assert!(diagram.delete_state("A").expect("Kaskade"));
    assert_eq!(diagram.model().transition_count(), 0);
    assert!(diagram.can_undo());

    assert!(diagram.undo());
    assert_eq!(diagram.to_elements(), before);
}

#[test]
fn test_drag_end_places_unplaced_component_at_drag_end() {
    let mut diagram = DiagramController::default();
    diagram
        .create_component(CreateComponentParams {
            name: "led".to_string(),
            kind: "LED".to_string(),
            ..Default::default()
        })
        .expect("led");
    let target = EntityRef::Component("led".to_string());
    let mut event = MouseEvent::drag_end(Point::new(500.0, 400.0), Point::new(520.0, 410.0));

    diagram.dispatch_mouse(&target, MouseEventKind::DragEnd, &mut event);
    assert_eq!(
        diagram.model().component("led").and_then(|c| c.position),
        Some(Point::new(520.0, 410.0))
    );

    // Ein platziertes Element wandert weiter um das Delta
    let mut event = MouseEvent::drag_end(Point::new(520.0, 410.0), Point::new(530.0, 430.0));
    diagram.dispatch_mouse(&target, MouseEventKind::DragEnd, &mut event);
    assert_eq!(
        diagram.model().component("led").and_then(|c| c.position),
        Some(Point::new(530.0, 430.0))
    );

    diagram.undo();
    diagram.undo();
    assert_eq!(diagram.model().component("led").and_then(|c| c.position), None);
}

#[test]
fn test_failed_undo_leaves_group_and_model_untouched() {
    let mut diagram = DiagramController::default();
    diagram.create_state(state_params("A", 0.0)).expect("A");

    // Gruppe mit einer Aktion, deren Umkehrung am Modell scheitert
    diagram.ctx.history.begin_group();
    diagram.ctx.history.record(HistoryAction::DeleteTransition {
        id: "t-fehlt".to_string(),
        transition: Transition {
            source: "X".to_string(),
            target: "Y".to_string(),
            color: "#FFFFFF".to_string(),
            position: Point::default(),
            trigger: ComponentCall::new("c", "m"),
            conditions: None,
            actions: None,
        },
        index: 0,
    });
    let note = diagram
        .create_note(CreateNoteParams {
            text: "bleibt".to_string(),
            ..Default::default()
        })
        .expect("Notiz");
    diagram.ctx.history.end_group();
    let cursor = diagram.ctx.history.cursor();

    assert!(!diagram.undo());
    assert_eq!(
        diagram.model().note(&note).map(|n| n.text.as_str()),
        Some("bleibt")
    );
    assert_eq!(diagram.model().transition_count(), 0);
    assert_eq!(diagram.ctx.history.cursor(), cursor);
    assert!(diagram.can_undo());
}
