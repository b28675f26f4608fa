//! Controller für Zustände: Anlegen, Verschieben, Umbenennen, Verschachteln, Löschen.

use super::{ShadowSet, StateDependents};
use crate::app::context::EditorContext;
use crate::app::history::HistoryAction;
use crate::app::shadow::{watch_common, Shadow};
use crate::core::{EntityKind, EntityRef, EventData, ModelInvariantError, Point, Rectangle, State};
use crate::shared::RenderShape;

/// Parameter für einen neuen Zustand
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateStateParams {
    /// Feste ID (z.B. beim Einfügen), sonst wird eine neue vergeben
    pub id: Option<String>,
    pub name: String,
    pub bounds: Rectangle,
    pub parent: Option<String>,
    pub events: Vec<EventData>,
    /// `bounds` beschreibt den Mittelpunkt statt der linken oberen Ecke
    pub place_in_center: bool,
}

/// Verwaltet die Schatten aller Zustände.
#[derive(Default)]
pub struct StatesController {
    shadows: ShadowSet,
}

fn shape_of(state: &State) -> RenderShape {
    RenderShape::State {
        bounds: state.bounds,
        name: state.name.clone(),
        parent: state.parent.clone(),
    }
}

impl StatesController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shadows(&self) -> &ShadowSet {
        &self.shadows
    }

    pub(crate) fn shadows_mut(&mut self) -> &mut ShadowSet {
        &mut self.shadows
    }

    /// Erzeugt die Schatten für alle Zustände eines frisch geladenen Modells
    pub fn rebuild(&mut self, ctx: &EditorContext) {
        self.shadows.clear();
        for (id, state) in ctx.model.states() {
            self.attach(id, state);
        }
    }

    fn attach(&mut self, id: &str, state: &State) {
        let mut shadow = Shadow::new(EntityRef::State(id.to_string()), shape_of(state));
        watch_common(&mut shadow);
        self.shadows.insert(id, shadow);
    }

    fn sync(&mut self, ctx: &EditorContext, id: &str) {
        if let Some(state) = ctx.model.state(id) {
            self.shadows.sync(id, shape_of(state));
        }
    }

    /// Legt einen Zustand an und liefert seine ID.
    pub fn create(
        &mut self,
        ctx: &mut EditorContext,
        params: CreateStateParams,
        record_history: bool,
    ) -> Result<String, ModelInvariantError> {
        let mut bounds = params.bounds;
        if params.place_in_center {
            bounds.x -= bounds.width / 2.0;
            bounds.y -= bounds.height / 2.0;
        }
        let state = State {
            parent: params.parent,
            name: params.name,
            bounds,
            events: params.events,
        };
        let id = match params.id {
            Some(id) => id,
            None => ctx.model.generate_id(EntityKind::State),
        };
        self.insert(ctx, &id, state, None, record_history)?;
        Ok(id)
    }

    /// Fügt einen vollständigen Zustand ein (Anlegen, Einfügen, Wiederherstellen).
    pub fn insert(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        state: State,
        index: Option<usize>,
        record_history: bool,
    ) -> Result<(), ModelInvariantError> {
        ctx.model.insert_state(id, state.clone(), index)?;
        self.attach(id, &state);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::CreateState {
                id: id.to_string(),
                state,
            });
        }
        log::info!("Zustand '{}' angelegt", id);
        Ok(())
    }

    /// Setzt die Position eines Zustands. Unbekannte IDs werden ignoriert.
    pub fn move_state(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        from: Point,
        to: Point,
        record_history: bool,
    ) -> bool {
        if !ctx.model.set_state_position(id, to) {
            log::debug!("Verschieben ignoriert: Zustand '{}' unbekannt", id);
            return false;
        }
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::MoveState {
                id: id.to_string(),
                from,
                to,
            });
        }
        true
    }

    pub fn rename(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        name: &str,
        record_history: bool,
    ) -> bool {
        let Some(previous) = ctx.model.rename_state(id, name) else {
            log::debug!("Umbenennen ignoriert: Zustand '{}' unbekannt", id);
            return false;
        };
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::RenameState {
                id: id.to_string(),
                from: previous,
                to: name.to_string(),
            });
        }
        log::info!("Zustand '{}' umbenannt in '{}'", id, name);
        true
    }

    /// Ersetzt die Ereignisliste eines Zustands
    pub fn set_events(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        events: Vec<EventData>,
        record_history: bool,
    ) -> bool {
        let Some(previous) = ctx.model.set_state_events(id, events.clone()) else {
            log::debug!("Ereignisse ignoriert: Zustand '{}' unbekannt", id);
            return false;
        };
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::SetStateEvents {
                id: id.to_string(),
                from: previous,
                to: events,
            });
        }
        true
    }

    /// Entfernt ein einzelnes Ereignis anhand seines Index
    pub fn remove_event(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        index: usize,
        record_history: bool,
    ) -> bool {
        let Some(previous) = ctx.model.state(id).map(|s| s.events.clone()) else {
            log::debug!("Ereignis löschen ignoriert: Zustand '{}' unbekannt", id);
            return false;
        };
        if ctx.model.remove_state_event(id, index).is_none() {
            log::debug!("Ereignis {} von '{}' existiert nicht", index, id);
            return false;
        }
        ctx.view.mark_dirty();
        if record_history {
            let to = ctx
                .model
                .state(id)
                .map(|s| s.events.clone())
                .unwrap_or_default();
            ctx.history.record(HistoryAction::SetStateEvents {
                id: id.to_string(),
                from: previous,
                to,
            });
        }
        true
    }

    /// Setzt (`Some`) oder entfernt (`None`) den Eltern-Zustand.
    pub fn set_parent(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        parent: Option<&str>,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        let result = match parent {
            Some(parent) => ctx.model.link_state(id, parent)?,
            None => ctx.model.unlink_state(id)?,
        };
        let Some(previous) = result else {
            log::debug!("Verschachteln ignoriert: Zustand '{}' unbekannt", id);
            return Ok(false);
        };
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::LinkState {
                id: id.to_string(),
                from: previous,
                to: parent.map(str::to_string),
            });
        }
        match parent {
            Some(parent) => log::info!("Zustand '{}' unter '{}' verschachtelt", id, parent),
            None => log::info!("Zustand '{}' herausgelöst", id),
        }
        Ok(true)
    }

    /// Setzt den Anfangszustand. Liefert `false`, wenn sich nichts ändert.
    pub fn set_initial_state(
        &mut self,
        ctx: &mut EditorContext,
        id: Option<&str>,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        if ctx.model.initial_state() == id {
            return Ok(false);
        }
        let previous = ctx.model.set_initial_state(id)?;
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::ChangeInitialState {
                from: previous,
                to: id.map(str::to_string),
            });
        }
        log::info!("Anfangszustand: {:?}", id);
        Ok(true)
    }

    /// Entfernt einen einzelnen Zustand ohne Abhängigkeiten (Rückgängig von Anlegen).
    pub fn remove(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        let Some((index, state)) = ctx.model.remove_state(id)? else {
            log::debug!("Löschen ignoriert: Zustand '{}' unbekannt", id);
            return Ok(false);
        };
        self.shadows.remove(id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::DeleteState {
                id: id.to_string(),
                state,
                index,
            });
        }
        log::info!("Zustand '{}' gelöscht", id);
        Ok(true)
    }

    /// Löscht einen Zustand samt Kind-Zuständen und berührten Transitionen.
    ///
    /// Die Kaskade wird vollständig bestimmt, bevor etwas verändert wird. Jede
    /// Teil-Löschung ist ein eigener Verlaufseintrag, alle zusammen eine Gruppe.
    pub fn delete(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        dependents: &mut dyn StateDependents,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        if ctx.model.state(id).is_none() {
            log::debug!("Löschen ignoriert: Zustand '{}' unbekannt", id);
            return Ok(false);
        }

        let subtree = subtree_post_order(ctx, id);
        let mut transitions: Vec<String> = Vec::new();
        for state_id in &subtree {
            for transition in dependents.transitions_of_state(ctx, state_id) {
                if !transitions.contains(&transition) {
                    transitions.push(transition);
                }
            }
        }
        let clears_initial = ctx
            .model
            .initial_state()
            .is_some_and(|initial| subtree.iter().any(|s| s == initial));

        if record_history {
            ctx.history.begin_group();
        }
        let result = self.apply_cascade(
            ctx,
            dependents,
            &subtree,
            &transitions,
            clears_initial,
            record_history,
        );
        if record_history {
            ctx.history.end_group();
        }
        result?;

        log::info!(
            "Zustand '{}' gelöscht ({} Unterzustände, {} Transitionen)",
            id,
            subtree.len() - 1,
            transitions.len()
        );
        Ok(true)
    }
}

impl StatesController {
    fn apply_cascade(
        &mut self,
        ctx: &mut EditorContext,
        dependents: &mut dyn StateDependents,
        subtree: &[String],
        transitions: &[String],
        clears_initial: bool,
        record_history: bool,
    ) -> Result<(), ModelInvariantError> {
        for transition in transitions {
            dependents.delete_transition(ctx, transition, record_history);
        }
        if clears_initial {
            self.set_initial_state(ctx, None, record_history)?;
        }
        for state_id in subtree {
            self.remove(ctx, state_id, record_history)?;
        }
        Ok(())
    }
}

/// Zustand und alle Nachfahren, Kinder vor ihren Eltern
fn subtree_post_order(ctx: &EditorContext, root: &str) -> Vec<String> {
    let mut order = Vec::new();
    let mut stack = vec![(root.to_string(), false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        let children = ctx.model.children_of(&id);
        stack.push((id, true));
        for child in children.into_iter().rev() {
            if !order.contains(&child) {
                stack.push((child, false));
            }
        }
    }
    order
}
