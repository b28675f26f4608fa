//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::shared::RenderScene;

/// Baut eine RenderScene aus dem aktuellen AppState.
///
/// Setzt dabei das Dirty-Flag des Diagramms zurück.
pub fn build(state: &mut AppState) -> RenderScene {
    let dirty = state.diagram.take_dirty();
    let view = &state.diagram.context().view;

    RenderScene {
        items: state.diagram.render_items(),
        camera: view.camera.clone(),
        viewport_size: view.viewport_size,
        selection: state.diagram.selection().cloned(),
        dirty,
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::controllers::CreateStateParams;
    use crate::app::AppState;
    use crate::core::{EntityRef, Rectangle};
    use crate::shared::RenderShape;

    #[test]
    fn build_collects_items_and_consumes_dirty_flag() {
        let mut state = AppState::new();
        state.diagram.set_viewport_size([800.0, 600.0]);
        let id = state
            .diagram
            .create_state(CreateStateParams {
                name: "A".to_string(),
                bounds: Rectangle::new(0.0, 0.0, 100.0, 50.0),
                ..Default::default()
            })
            .expect("Zustand anlegbar");
        state.diagram.select(EntityRef::State(id.clone()));

        let scene = build(&mut state);
        assert!(scene.dirty);
        assert!(scene.has_content());
        assert_eq!(scene.viewport_size, [800.0, 600.0]);
        assert_eq!(scene.selection, Some(EntityRef::State(id)));
        assert!(scene.items[0].selected);
        assert!(matches!(&scene.items[0].shape, RenderShape::State { name, .. } if name == "A"));

        let scene = build(&mut state);
        assert!(!scene.dirty);
    }

    #[test]
    fn build_empty_document_has_no_content() {
        let mut state = AppState::new();
        assert!(!build(&mut state).has_content());
    }
}
