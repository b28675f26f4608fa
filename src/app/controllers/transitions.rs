//! Controller für Transitionen zwischen Zuständen.

use super::{ShadowSet, StateDependents};
use crate::app::context::EditorContext;
use crate::app::history::HistoryAction;
use crate::app::shadow::{watch_common, Shadow};
use crate::core::{
    Action, Condition, EntityKind, EntityRef, Event, ModelInvariantError, Point, Transition,
};
use crate::shared::RenderShape;

/// Standardfarbe neuer Transitionen
pub const DEFAULT_TRANSITION_COLOR: &str = "#FFFFFF";

/// Parameter für eine neue Transition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTransitionParams {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// `None` = `DEFAULT_TRANSITION_COLOR`
    pub color: Option<String>,
    /// `None` = Mitte zwischen den Zuständen
    pub position: Option<Point>,
    pub trigger: Event,
    pub conditions: Option<Condition>,
    pub actions: Option<Vec<Action>>,
}

impl CreateTransitionParams {
    /// Transition ohne Trigger und Bedingungen
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }
}

/// Verwaltet die Schatten aller Transitionen.
#[derive(Default)]
pub struct TransitionsController {
    shadows: ShadowSet,
}

fn shape_of(transition: &Transition) -> RenderShape {
    RenderShape::Transition {
        source: transition.source.clone(),
        target: transition.target.clone(),
        label: transition.position,
        color: transition.color.clone(),
    }
}

/// Mittelpunkt zwischen den Zentren von Quell- und Zielzustand
fn label_position(ctx: &EditorContext, source: &str, target: &str) -> Point {
    let center = |id: &str| {
        ctx.model.state(id).map(|s| {
            Point::new(
                s.bounds.x + s.bounds.width / 2.0,
                s.bounds.y + s.bounds.height / 2.0,
            )
        })
    };
    match (center(source), center(target)) {
        (Some(a), Some(b)) => Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
        (Some(p), None) | (None, Some(p)) => p,
        (None, None) => Point::default(),
    }
}

impl TransitionsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shadows(&self) -> &ShadowSet {
        &self.shadows
    }

    pub(crate) fn shadows_mut(&mut self) -> &mut ShadowSet {
        &mut self.shadows
    }

    pub fn rebuild(&mut self, ctx: &EditorContext) {
        self.shadows.clear();
        for (id, transition) in ctx.model.transitions() {
            self.attach(id, transition);
        }
    }

    fn attach(&mut self, id: &str, transition: &Transition) {
        let mut shadow = Shadow::new(EntityRef::Transition(id.to_string()), shape_of(transition));
        watch_common(&mut shadow);
        self.shadows.insert(id, shadow);
    }

    fn sync(&mut self, ctx: &EditorContext, id: &str) {
        if let Some(transition) = ctx.model.transition(id) {
            self.shadows.sync(id, shape_of(transition));
        }
    }

    /// Legt eine Transition an und liefert ihre ID.
    pub fn create(
        &mut self,
        ctx: &mut EditorContext,
        params: CreateTransitionParams,
        record_history: bool,
    ) -> Result<String, ModelInvariantError> {
        let position = params
            .position
            .unwrap_or_else(|| label_position(ctx, &params.source, &params.target));
        let transition = Transition {
            source: params.source,
            target: params.target,
            color: params
                .color
                .unwrap_or_else(|| DEFAULT_TRANSITION_COLOR.to_string()),
            position,
            trigger: params.trigger,
            conditions: params.conditions,
            actions: params.actions,
        };
        let id = match params.id {
            Some(id) => id,
            None => ctx.model.generate_id(EntityKind::Transition),
        };
        self.insert(ctx, &id, transition, None, record_history)?;
        Ok(id)
    }

    /// Fügt eine vollständige Transition ein (Anlegen, Einfügen, Wiederherstellen).
    pub fn insert(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        transition: Transition,
        index: Option<usize>,
        record_history: bool,
    ) -> Result<(), ModelInvariantError> {
        ctx.model.insert_transition(id, transition.clone(), index)?;
        self.attach(id, &transition);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::CreateTransition {
                id: id.to_string(),
                transition,
            });
        }
        log::info!("Transition '{}' angelegt", id);
        Ok(())
    }

    /// Verschiebt die Beschriftung einer Transition
    pub fn move_transition(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        from: Point,
        to: Point,
        record_history: bool,
    ) -> bool {
        if !ctx.model.set_transition_position(id, to) {
            log::debug!("Verschieben ignoriert: Transition '{}' unbekannt", id);
            return false;
        }
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::MoveTransition {
                id: id.to_string(),
                from,
                to,
            });
        }
        true
    }

    /// Ersetzt alle Attribute einer Transition (Quelle, Ziel, Trigger, Bedingungen, …)
    pub fn change(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        transition: Transition,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        let Some(previous) = ctx.model.replace_transition(id, transition.clone())? else {
            log::debug!("Ändern ignoriert: Transition '{}' unbekannt", id);
            return Ok(false);
        };
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::ChangeTransition {
                id: id.to_string(),
                from: previous,
                to: transition,
            });
        }
        log::info!("Transition '{}' geändert", id);
        Ok(true)
    }

    pub fn delete(&mut self, ctx: &mut EditorContext, id: &str, record_history: bool) -> bool {
        let Some((index, transition)) = ctx.model.remove_transition(id) else {
            log::debug!("Löschen ignoriert: Transition '{}' unbekannt", id);
            return false;
        };
        self.shadows.remove(id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::DeleteTransition {
                id: id.to_string(),
                transition,
                index,
            });
        }
        log::info!("Transition '{}' gelöscht", id);
        true
    }
}

impl StateDependents for TransitionsController {
    fn transitions_of_state(&self, ctx: &EditorContext, state_id: &str) -> Vec<String> {
        ctx.model.transitions_touching(state_id)
    }

    fn delete_transition(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        record_history: bool,
    ) -> bool {
        self.delete(ctx, id, record_history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rectangle, State};
    use approx::assert_relative_eq;

    fn ctx_a_b() -> EditorContext {
        let mut ctx = EditorContext::default();
        ctx.model
            .insert_state("A", State::new("A", Rectangle::new(0.0, 0.0, 100.0, 50.0)), None)
            .expect("A");
        ctx.model
            .insert_state("B", State::new("B", Rectangle::new(300.0, 0.0, 100.0, 50.0)), None)
            .expect("B");
        ctx
    }

    #[test]
    fn create_places_label_between_states() {
        let mut ctx = ctx_a_b();
        let mut transitions = TransitionsController::new();
        let id = transitions
            .create(&mut ctx, CreateTransitionParams::between("A", "B"), true)
            .expect("A→B");

        let transition = ctx.model.transition(&id).expect("angelegt");
        assert_relative_eq!(transition.position.x, 200.0);
        assert_relative_eq!(transition.position.y, 25.0);
        assert_eq!(transition.color, DEFAULT_TRANSITION_COLOR);
        assert_eq!(ctx.history.len(), 1);
    }

    #[test]
    fn create_with_unknown_target_changes_nothing() {
        let mut ctx = ctx_a_b();
        let mut transitions = TransitionsController::new();
        let err = transitions
            .create(&mut ctx, CreateTransitionParams::between("A", "X"), true)
            .expect_err("X unbekannt");
        assert!(matches!(err, ModelInvariantError::DanglingTransition { .. }));
        assert!(transitions.shadows().is_empty());
        assert!(ctx.history.is_empty());
        assert!(!ctx.view.is_dirty());
    }

    #[test]
    fn change_swaps_all_attributes() {
        let mut ctx = ctx_a_b();
        let mut transitions = TransitionsController::new();
        let id = transitions
            .create(&mut ctx, CreateTransitionParams::between("A", "B"), false)
            .expect("A→B");

        let mut changed = ctx.model.transition(&id).cloned().expect("vorhanden");
        changed.source = "B".to_string();
        changed.target = "A".to_string();
        changed.color = "#FF0000".to_string();
        assert!(transitions.change(&mut ctx, &id, changed, true).expect("gültig"));

        assert_eq!(transitions.transitions_of_state(&ctx, "A"), vec![id.clone()]);
        match &ctx.history.entries()[0].action {
            HistoryAction::ChangeTransition { from, to, .. } => {
                assert_eq!(from.source, "A");
                assert_eq!(to.color, "#FF0000");
            }
            other => panic!("unerwartete Aktion: {other:?}"),
        }
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut ctx = ctx_a_b();
        let mut transitions = TransitionsController::new();
        assert!(!transitions.delete(&mut ctx, "t-1", true));
        assert!(ctx.history.is_empty());
    }
}
