//! Orchestrator eines geöffneten Diagramms.
//!
//! Besitzt Modell, Verlauf und View-Kontext sowie die Controller pro Element-Typ.
//! Element-übergreifende Operationen (Verschachteln, Komponenten bereinigen,
//! Kopieren/Einfügen, Undo/Redo, Auswahl, Kamera) laufen hier zusammen.

use super::clipboard::{Copied, CopyData};
use super::context::EditorContext;
use super::controllers::{
    ComponentsController, CreateComponentParams, CreateNoteParams, CreateStateParams,
    CreateTransitionParams, NotesController, ShadowSet, StatesController, TransitionsController,
};
use super::history::HistoryAction;
use super::mouse_events::{MouseEvent, MouseEventEmitter, MouseEventKind, MouseHandler};
use super::shadow::ControllerSignal;
use crate::core::{
    AnyPlatform, DiagramModel, Elements, EntityKind, EntityRef, EventData, ModelInvariantError,
    PlatformInfo, Point, Rectangle, Transition,
};
use crate::shared::{EditorOptions, RenderItem};
use glam::Vec2;
use indexmap::IndexMap;
use std::rc::Rc;

type ModelResult<T> = Result<T, ModelInvariantError>;

/// Ereignisse an den Host (z.B. zum Öffnen von Dialogen)
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramEvent {
    /// Element soll bearbeitet werden (Doppelklick)
    Change(EntityRef),
    /// Kontextmenü für ein Element
    ContextMenu {
        entity: EntityRef,
        screen_position: Point,
    },
    /// Maustaste über einer Komponente losgelassen
    MouseUpOnComponent(String),
    /// Kontextmenü auf der leeren Fläche
    CanvasContextMenu {
        position: Point,
        screen_position: Point,
    },
}

/// Zentrale Steuerung eines Diagramms.
pub struct DiagramController {
    ctx: EditorContext,
    states: StatesController,
    transitions: TransitionsController,
    components: ComponentsController,
    notes: NotesController,
    platform: Rc<dyn PlatformInfo>,
    options: EditorOptions,
    clipboard: Option<CopyData>,
    /// Wie oft der aktuelle Inhalt der Zwischenablage eingefügt wurde
    paste_count: u32,
    selection: Option<EntityRef>,
    events: Vec<DiagramEvent>,
    canvas: MouseEventEmitter<ControllerSignal>,
}

impl Default for DiagramController {
    fn default() -> Self {
        Self::new(Rc::new(AnyPlatform), EditorOptions::default())
    }
}

impl DiagramController {
    /// Erstellt einen Controller mit leerem Dokument
    pub fn new(platform: Rc<dyn PlatformInfo>, options: EditorOptions) -> Self {
        let model = DiagramModel::new(Rc::clone(&platform));
        let mut canvas = MouseEventEmitter::new();
        let clear: MouseHandler<ControllerSignal> =
            Rc::new(|_event: &mut MouseEvent, out: &mut Vec<ControllerSignal>| {
                out.push(ControllerSignal::ClearSelection)
            });
        let menu: MouseHandler<ControllerSignal> =
            Rc::new(|event: &mut MouseEvent, out: &mut Vec<ControllerSignal>| {
                out.push(ControllerSignal::CanvasContextMenu {
                    position: event.position,
                    screen_position: event.screen_position,
                })
            });
        canvas.on(MouseEventKind::MouseDown, &clear);
        canvas.on(MouseEventKind::ContextMenu, &menu);

        Self {
            ctx: EditorContext::new(model, options.history_limit),
            states: StatesController::new(),
            transitions: TransitionsController::new(),
            components: ComponentsController::new(),
            notes: NotesController::new(),
            platform,
            options,
            clipboard: None,
            paste_count: 0,
            selection: None,
            events: Vec::new(),
            canvas,
        }
    }

    // ── Zugriff ────────────────────────────────────────────────────────

    pub fn model(&self) -> &DiagramModel {
        &self.ctx.model
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Übernimmt geänderte Optionen (Verlaufstiefe greift sofort)
    pub fn set_options(&mut self, options: EditorOptions) {
        self.ctx.history.set_max_depth(options.history_limit);
        self.options = options;
    }

    pub fn states(&self) -> &StatesController {
        &self.states
    }

    pub fn transitions(&self) -> &TransitionsController {
        &self.transitions
    }

    pub fn components(&self) -> &ComponentsController {
        &self.components
    }

    pub fn notes(&self) -> &NotesController {
        &self.notes
    }

    /// Canvas-Emitter, z.B. für zusätzliche Handler des Hosts
    pub fn canvas_emitter_mut(&mut self) -> &mut MouseEventEmitter<ControllerSignal> {
        &mut self.canvas
    }

    // ── Laden / Speichern ─────────────────────────────────────────────

    /// Ersetzt das Dokument vollständig.
    ///
    /// Das neue Dokument wird zuerst validiert; bei einem Fehler bleibt alles unverändert.
    pub fn load_from(&mut self, elements: Elements) -> ModelResult<()> {
        let model = DiagramModel::from_elements(elements, Rc::clone(&self.platform))?;
        self.ctx.model = model;
        self.ctx.history.clear();
        self.selection = None;
        self.clipboard = None;
        self.paste_count = 0;
        self.events.clear();
        self.states.rebuild(&self.ctx);
        self.transitions.rebuild(&self.ctx);
        self.components.rebuild(&self.ctx);
        self.notes.rebuild(&self.ctx);
        self.ctx.view.mark_dirty();
        log::info!(
            "Diagramm geladen: {} Zustände, {} Transitionen, {} Komponenten, {} Notizen",
            self.ctx.model.state_count(),
            self.ctx.model.transition_count(),
            self.ctx.model.component_count(),
            self.ctx.model.note_count()
        );
        Ok(())
    }

    /// Beginnt ein leeres Dokument für die angegebene Plattform
    pub fn new_document(&mut self, platform_name: &str) -> ModelResult<()> {
        self.load_from(Elements::empty(platform_name))
    }

    /// Vollständiger Snapshot für die Serialisierung
    pub fn to_elements(&self) -> Elements {
        self.ctx.model.to_elements()
    }

    // ── Zustände ──────────────────────────────────────────────────────

    pub fn create_state(&mut self, params: CreateStateParams) -> ModelResult<String> {
        self.states.create(&mut self.ctx, params, true)
    }

    /// Setzt die linke obere Ecke eines Zustands
    pub fn move_state(&mut self, id: &str, to: Point) -> bool {
        let Some(from) = self.ctx.model.state(id).map(|s| s.bounds.position()) else {
            log::debug!("Verschieben ignoriert: Zustand '{}' unbekannt", id);
            return false;
        };
        self.states.move_state(&mut self.ctx, id, from, to, true)
    }

    pub fn rename_state(&mut self, id: &str, name: &str) -> bool {
        self.states.rename(&mut self.ctx, id, name, true)
    }

    pub fn set_state_events(&mut self, id: &str, events: Vec<EventData>) -> bool {
        self.states.set_events(&mut self.ctx, id, events, true)
    }

    pub fn remove_state_event(&mut self, id: &str, index: usize) -> bool {
        self.states.remove_event(&mut self.ctx, id, index, true)
    }

    pub fn set_initial_state(&mut self, id: Option<&str>) -> ModelResult<bool> {
        self.states.set_initial_state(&mut self.ctx, id, true)
    }

    /// Verschachtelt `child` unter `parent`.
    ///
    /// Ist `child` der Anfangszustand, wird dieser vorher zurückgesetzt; beide
    /// Schritte bilden eine Verlaufsgruppe.
    pub fn link_state(&mut self, child: &str, parent: &str) -> ModelResult<bool> {
        if self.ctx.model.state(child).is_none() {
            log::debug!("Verschachteln ignoriert: Zustand '{}' unbekannt", child);
            return Ok(false);
        }
        if self.ctx.model.state(parent).is_none() {
            return Err(ModelInvariantError::UnknownState(parent.to_string()));
        }
        if self.ctx.model.is_ancestor_or_self(child, parent) {
            return Err(ModelInvariantError::ParentCycle {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }

        self.ctx.history.begin_group();
        let result = self.link_state_inner(child, parent);
        self.ctx.history.end_group();
        result
    }

    fn link_state_inner(&mut self, child: &str, parent: &str) -> ModelResult<bool> {
        if self.ctx.model.initial_state() == Some(child) {
            self.states.set_initial_state(&mut self.ctx, None, true)?;
        }
        self.states.set_parent(&mut self.ctx, child, Some(parent), true)
    }

    /// Löst einen Zustand aus seinem Eltern-Zustand
    pub fn unlink_state(&mut self, child: &str) -> ModelResult<bool> {
        self.states.set_parent(&mut self.ctx, child, None, true)
    }

    /// Löscht einen Zustand samt Unterzuständen und berührten Transitionen
    pub fn delete_state(&mut self, id: &str) -> ModelResult<bool> {
        let deleted = self
            .states
            .delete(&mut self.ctx, id, &mut self.transitions, true)?;
        self.prune_selection();
        Ok(deleted)
    }

    // ── Transitionen ──────────────────────────────────────────────────

    pub fn create_transition(&mut self, params: CreateTransitionParams) -> ModelResult<String> {
        self.transitions.create(&mut self.ctx, params, true)
    }

    pub fn move_transition(&mut self, id: &str, to: Point) -> bool {
        let Some(from) = self.ctx.model.transition(id).map(|t| t.position) else {
            log::debug!("Verschieben ignoriert: Transition '{}' unbekannt", id);
            return false;
        };
        self.transitions.move_transition(&mut self.ctx, id, from, to, true)
    }

    pub fn change_transition(&mut self, id: &str, transition: Transition) -> ModelResult<bool> {
        self.transitions.change(&mut self.ctx, id, transition, true)
    }

    pub fn delete_transition(&mut self, id: &str) -> bool {
        let deleted = self.transitions.delete(&mut self.ctx, id, true);
        self.prune_selection();
        deleted
    }

    // ── Komponenten ───────────────────────────────────────────────────

    pub fn create_component(&mut self, params: CreateComponentParams) -> ModelResult<String> {
        self.components.create(&mut self.ctx, params, true)
    }

    pub fn move_component(&mut self, name: &str, to: Point) -> bool {
        let Some(from) = self.ctx.model.component(name).map(|c| c.position) else {
            log::debug!("Verschieben ignoriert: Komponente '{}' unbekannt", name);
            return false;
        };
        self.components
            .move_component(&mut self.ctx, name, from, Some(to), true)
    }

    /// Benennt eine Komponente um und/oder ersetzt ihre Parameter
    pub fn change_component(
        &mut self,
        name: &str,
        new_name: &str,
        parameters: IndexMap<String, String>,
    ) -> ModelResult<bool> {
        let changed = self
            .components
            .change(&mut self.ctx, name, new_name, parameters, true)?;
        if changed && self.selection == Some(EntityRef::Component(name.to_string())) {
            self.selection = None;
            self.select(EntityRef::Component(new_name.to_string()));
        }
        Ok(changed)
    }

    /// Löscht eine Komponente.
    ///
    /// Ohne `purge` wird eine referenzierte Komponente mit `ComponentInUse` abgelehnt.
    /// Mit `purge` werden referenzierende Transitionen gelöscht und referenzierende
    /// Zustands-Ereignisse entfernt, alles als eine Verlaufsgruppe.
    pub fn delete_component(&mut self, name: &str, purge: bool) -> ModelResult<bool> {
        if !purge || self.ctx.model.component(name).is_none() {
            let deleted = self.components.delete(&mut self.ctx, name, true)?;
            self.prune_selection();
            return Ok(deleted);
        }

        let transitions = self.ctx.model.transitions_referencing_component(name);
        let states = self.ctx.model.states_referencing_component(name);

        self.ctx.history.begin_group();
        for id in &transitions {
            self.transitions.delete(&mut self.ctx, id, true);
        }
        for id in &states {
            let events: Vec<EventData> = self
                .ctx
                .model
                .state(id)
                .map(|s| {
                    s.events
                        .iter()
                        .filter(|e| !e.references_component(name))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            self.states.set_events(&mut self.ctx, id, events, true);
        }
        let result = self.components.delete(&mut self.ctx, name, true);
        self.ctx.history.end_group();

        self.prune_selection();
        if result.is_ok() {
            log::info!(
                "Komponente '{}' bereinigt ({} Transitionen, {} Zustände)",
                name,
                transitions.len(),
                states.len()
            );
        }
        result
    }

    // ── Notizen ───────────────────────────────────────────────────────

    pub fn create_note(&mut self, params: CreateNoteParams) -> ModelResult<String> {
        self.notes.create(&mut self.ctx, params, true)
    }

    pub fn move_note(&mut self, id: &str, to: Point) -> bool {
        let Some(from) = self.ctx.model.note(id).map(|n| n.position) else {
            log::debug!("Verschieben ignoriert: Notiz '{}' unbekannt", id);
            return false;
        };
        self.notes.move_note(&mut self.ctx, id, from, to, true)
    }

    pub fn change_note_text(&mut self, id: &str, text: &str) -> bool {
        self.notes.change_text(&mut self.ctx, id, text, true)
    }

    pub fn delete_note(&mut self, id: &str) -> bool {
        let deleted = self.notes.delete(&mut self.ctx, id, true);
        self.prune_selection();
        deleted
    }

    /// Löscht ein beliebiges Element (Komponenten ohne Bereinigung)
    pub fn delete_entity(&mut self, entity: &EntityRef) -> ModelResult<bool> {
        match entity {
            EntityRef::State(id) => self.delete_state(id),
            EntityRef::Transition(id) => Ok(self.delete_transition(id)),
            EntityRef::Component(name) => self.delete_component(name, false),
            EntityRef::Note(id) => Ok(self.delete_note(id)),
        }
    }

    /// Löscht das ausgewählte Element
    pub fn delete_selected(&mut self) -> ModelResult<bool> {
        match self.selection.clone() {
            Some(entity) => self.delete_entity(&entity),
            None => Ok(false),
        }
    }

    // ── Auswahl ───────────────────────────────────────────────────────

    pub fn selection(&self) -> Option<&EntityRef> {
        self.selection.as_ref()
    }

    /// Wählt ein Element an; die bisherige Hervorhebung wird aufgehoben.
    pub fn select(&mut self, entity: EntityRef) {
        if !self.entity_exists(&entity) {
            log::debug!("Auswahl ignoriert: {} '{}' unbekannt", entity.kind(), entity.id());
            return;
        }
        if self.selection.as_ref() == Some(&entity) {
            return;
        }
        self.clear_selection();
        self.shadows_of_mut(entity.kind())
            .set_selected(entity.id(), true);
        self.selection = Some(entity);
        self.ctx.view.mark_dirty();
    }

    pub fn clear_selection(&mut self) {
        if let Some(previous) = self.selection.take() {
            self.shadows_of_mut(previous.kind())
                .set_selected(previous.id(), false);
            self.ctx.view.mark_dirty();
        }
    }

    fn prune_selection(&mut self) {
        if let Some(entity) = &self.selection {
            if !self.entity_exists(entity) {
                self.selection = None;
            }
        }
    }

    fn entity_exists(&self, entity: &EntityRef) -> bool {
        let model = &self.ctx.model;
        match entity {
            EntityRef::State(id) => model.state(id).is_some(),
            EntityRef::Transition(id) => model.transition(id).is_some(),
            EntityRef::Component(name) => model.component(name).is_some(),
            EntityRef::Note(id) => model.note(id).is_some(),
        }
    }

    fn shadows_of_mut(&mut self, kind: EntityKind) -> &mut ShadowSet {
        match kind {
            EntityKind::State => self.states.shadows_mut(),
            EntityKind::Transition => self.transitions.shadows_mut(),
            EntityKind::Component => self.components.shadows_mut(),
            EntityKind::Note => self.notes.shadows_mut(),
        }
    }

    fn shadows_of(&self, kind: EntityKind) -> &ShadowSet {
        match kind {
            EntityKind::State => self.states.shadows(),
            EntityKind::Transition => self.transitions.shadows(),
            EntityKind::Component => self.components.shadows(),
            EntityKind::Note => self.notes.shadows(),
        }
    }

    // ── Zwischenablage ────────────────────────────────────────────────

    pub fn clipboard(&self) -> Option<&CopyData> {
        self.clipboard.as_ref()
    }

    /// Setzt die Zwischenablage von außen (z.B. aus der System-Zwischenablage)
    pub fn set_clipboard(&mut self, data: CopyData) {
        self.clipboard = Some(data);
        self.paste_count = 0;
    }

    /// Kopiert ein Element in die Zwischenablage
    pub fn copy(&mut self, entity: &EntityRef) -> bool {
        let model = &self.ctx.model;
        let data = match entity {
            EntityRef::State(id) => model.state(id).cloned().map(|data| {
                CopyData::State(Copied {
                    id: id.clone(),
                    data,
                })
            }),
            EntityRef::Transition(id) => model.transition(id).cloned().map(|data| {
                CopyData::Transition(Copied {
                    id: id.clone(),
                    data,
                })
            }),
            EntityRef::Component(name) => model.component(name).cloned().map(|data| {
                CopyData::Component(Copied {
                    id: name.clone(),
                    data,
                })
            }),
            EntityRef::Note(id) => model.note(id).cloned().map(|data| {
                CopyData::Note(Copied {
                    id: id.clone(),
                    data,
                })
            }),
        };
        match data {
            Some(data) => {
                self.set_clipboard(data);
                log::info!("{} '{}' kopiert", entity.kind(), entity.id());
                true
            }
            None => {
                log::debug!("Kopieren ignoriert: {} '{}' unbekannt", entity.kind(), entity.id());
                false
            }
        }
    }

    pub fn copy_selected(&mut self) -> bool {
        match self.selection.clone() {
            Some(entity) => self.copy(&entity),
            None => false,
        }
    }

    /// Fügt den Inhalt der Zwischenablage mit neuer ID ein.
    ///
    /// Jedes weitere Einfügen desselben Inhalts wird um `paste_offset` weiter versetzt.
    /// Das eingefügte Element wird angewählt.
    pub fn paste(&mut self) -> ModelResult<Option<EntityRef>> {
        let Some(data) = self.clipboard.clone() else {
            return Ok(None);
        };
        let offset = self.options.paste_offset * (self.paste_count + 1) as f32;
        let pasted = match data {
            CopyData::State(copied) => {
                let mut state = copied.data;
                state.bounds.x += offset;
                state.bounds.y += offset;
                if state
                    .parent
                    .as_deref()
                    .is_some_and(|p| self.ctx.model.state(p).is_none())
                {
                    state.parent = None;
                }
                let id = self.ctx.model.generate_id(EntityKind::State);
                self.states.insert(&mut self.ctx, &id, state, None, true)?;
                EntityRef::State(id)
            }
            CopyData::Transition(copied) => {
                let mut transition = copied.data;
                transition.position = transition.position.offset(offset, offset);
                let id = self.ctx.model.generate_id(EntityKind::Transition);
                self.transitions
                    .insert(&mut self.ctx, &id, transition, None, true)?;
                EntityRef::Transition(id)
            }
            CopyData::Note(copied) => {
                let mut note = copied.data;
                note.position = note.position.offset(offset, offset);
                let id = self.ctx.model.generate_id(EntityKind::Note);
                self.notes.insert(&mut self.ctx, &id, note, None, true)?;
                EntityRef::Note(id)
            }
            CopyData::Component(copied) => {
                let mut component = copied.data;
                component.position = component.position.map(|p| p.offset(offset, offset));
                let name = self.ctx.model.unique_component_name(&copied.id);
                self.components
                    .insert(&mut self.ctx, &name, component, None, true)?;
                EntityRef::Component(name)
            }
        };
        self.paste_count += 1;
        self.select(pasted.clone());
        Ok(Some(pasted))
    }

    // ── Verlauf ───────────────────────────────────────────────────────

    pub fn can_undo(&self) -> bool {
        self.ctx.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.ctx.history.can_redo()
    }

    /// Macht die letzte Aktionsgruppe rückgängig.
    ///
    /// Scheitert eine Aktion, wird die Gruppe vollständig zurückgespielt und der
    /// Verlauf bleibt unverändert (`false`).
    pub fn undo(&mut self) -> bool {
        let cursor = self.ctx.history.cursor();
        let Some(actions) = self.ctx.history.pop_undo() else {
            log::debug!("Nichts rückgängig zu machen");
            return false;
        };
        for (done, action) in actions.iter().enumerate() {
            if let Err(e) = self.revert(action) {
                log::error!("Rückgängig fehlgeschlagen, Gruppe wird zurückgespielt: {}", e);
                for applied in actions[..done].iter().rev() {
                    if let Err(e) = self.replay(applied) {
                        log::error!("Zurückspielen fehlgeschlagen: {}", e);
                    }
                }
                self.ctx.history.restore_cursor(cursor);
                self.ctx.view.mark_dirty();
                return false;
            }
        }
        self.prune_selection();
        self.ctx.view.mark_dirty();
        log::info!("Rückgängig: {} Aktion(en)", actions.len());
        true
    }

    /// Stellt die nächste Aktionsgruppe wieder her (gleiches Fehlerverhalten wie `undo`)
    pub fn redo(&mut self) -> bool {
        let cursor = self.ctx.history.cursor();
        let Some(actions) = self.ctx.history.pop_redo() else {
            log::debug!("Nichts wiederherzustellen");
            return false;
        };
        for (done, action) in actions.iter().enumerate() {
            if let Err(e) = self.replay(action) {
                log::error!("Wiederherstellen fehlgeschlagen, Gruppe wird zurückgenommen: {}", e);
                for applied in actions[..done].iter().rev() {
                    if let Err(e) = self.revert(applied) {
                        log::error!("Zurücknehmen fehlgeschlagen: {}", e);
                    }
                }
                self.ctx.history.restore_cursor(cursor);
                self.ctx.view.mark_dirty();
                return false;
            }
        }
        self.prune_selection();
        self.ctx.view.mark_dirty();
        log::info!("Wiederhergestellt: {} Aktion(en)", actions.len());
        true
    }

    /// Spielt die Umkehrung einer Aktion ab, ohne sie aufzuzeichnen
    fn revert(&mut self, action: &HistoryAction) -> ModelResult<()> {
        let ctx = &mut self.ctx;
        match action.clone() {
            HistoryAction::CreateState { id, .. } => {
                self.states.remove(ctx, &id, false)?;
            }
            HistoryAction::DeleteState { id, state, index } => {
                self.states.insert(ctx, &id, state, Some(index), false)?;
            }
            HistoryAction::MoveState { id, from, to } => {
                self.states.move_state(ctx, &id, to, from, false);
            }
            HistoryAction::RenameState { id, from, .. } => {
                self.states.rename(ctx, &id, &from, false);
            }
            HistoryAction::SetStateEvents { id, from, .. } => {
                self.states.set_events(ctx, &id, from, false);
            }
            HistoryAction::LinkState { id, from, .. } => {
                self.states.set_parent(ctx, &id, from.as_deref(), false)?;
            }
            HistoryAction::ChangeInitialState { from, .. } => {
                self.states.set_initial_state(ctx, from.as_deref(), false)?;
            }
            HistoryAction::CreateTransition { id, .. } => {
                self.transitions.delete(ctx, &id, false);
            }
            HistoryAction::DeleteTransition {
                id,
                transition,
                index,
            } => {
                self.transitions
                    .insert(ctx, &id, transition, Some(index), false)?;
            }
            HistoryAction::MoveTransition { id, from, to } => {
                self.transitions.move_transition(ctx, &id, to, from, false);
            }
            HistoryAction::ChangeTransition { id, from, .. } => {
                self.transitions.change(ctx, &id, from, false)?;
            }
            HistoryAction::CreateComponent { name, .. } => {
                self.components.delete(ctx, &name, false)?;
            }
            HistoryAction::DeleteComponent {
                name,
                component,
                index,
            } => {
                self.components
                    .insert(ctx, &name, component, Some(index), false)?;
            }
            HistoryAction::MoveComponent { name, from, to } => {
                self.components.move_component(ctx, &name, to, from, false);
            }
            HistoryAction::ChangeComponent {
                name,
                new_name,
                from,
                ..
            } => {
                self.components.change(ctx, &new_name, &name, from, false)?;
            }
            HistoryAction::CreateNote { id, .. } => {
                self.notes.delete(ctx, &id, false);
            }
            HistoryAction::DeleteNote { id, note, index } => {
                self.notes.insert(ctx, &id, note, Some(index), false)?;
            }
            HistoryAction::MoveNote { id, from, to } => {
                self.notes.move_note(ctx, &id, to, from, false);
            }
            HistoryAction::ChangeNoteText { id, from, .. } => {
                self.notes.change_text(ctx, &id, &from, false);
            }
        }
        Ok(())
    }

    /// Spielt eine Aktion erneut vorwärts ab, ohne sie aufzuzeichnen
    fn replay(&mut self, action: &HistoryAction) -> ModelResult<()> {
        let ctx = &mut self.ctx;
        match action.clone() {
            HistoryAction::CreateState { id, state } => {
                self.states.insert(ctx, &id, state, None, false)?;
            }
            HistoryAction::DeleteState { id, .. } => {
                self.states.remove(ctx, &id, false)?;
            }
            HistoryAction::MoveState { id, from, to } => {
                self.states.move_state(ctx, &id, from, to, false);
            }
            HistoryAction::RenameState { id, to, .. } => {
                self.states.rename(ctx, &id, &to, false);
            }
            HistoryAction::SetStateEvents { id, to, .. } => {
                self.states.set_events(ctx, &id, to, false);
            }
            HistoryAction::LinkState { id, to, .. } => {
                self.states.set_parent(ctx, &id, to.as_deref(), false)?;
            }
            HistoryAction::ChangeInitialState { to, .. } => {
                self.states.set_initial_state(ctx, to.as_deref(), false)?;
            }
            HistoryAction::CreateTransition { id, transition } => {
                self.transitions.insert(ctx, &id, transition, None, false)?;
            }
            HistoryAction::DeleteTransition { id, .. } => {
                self.transitions.delete(ctx, &id, false);
            }
            HistoryAction::MoveTransition { id, from, to } => {
                self.transitions.move_transition(ctx, &id, from, to, false);
            }
            HistoryAction::ChangeTransition { id, to, .. } => {
                self.transitions.change(ctx, &id, to, false)?;
            }
            HistoryAction::CreateComponent { name, component } => {
                self.components.insert(ctx, &name, component, None, false)?;
            }
            HistoryAction::DeleteComponent { name, .. } => {
                self.components.delete(ctx, &name, false)?;
            }
            HistoryAction::MoveComponent { name, from, to } => {
                self.components.move_component(ctx, &name, from, to, false);
            }
            HistoryAction::ChangeComponent {
                name, new_name, to, ..
            } => {
                self.components.change(ctx, &name, &new_name, to, false)?;
            }
            HistoryAction::CreateNote { id, note } => {
                self.notes.insert(ctx, &id, note, None, false)?;
            }
            HistoryAction::DeleteNote { id, .. } => {
                self.notes.delete(ctx, &id, false);
            }
            HistoryAction::MoveNote { id, from, to } => {
                self.notes.move_note(ctx, &id, from, to, false);
            }
            HistoryAction::ChangeNoteText { id, to, .. } => {
                self.notes.change_text(ctx, &id, &to, false);
            }
        }
        Ok(())
    }

    // ── Kamera ────────────────────────────────────────────────────────

    pub fn set_viewport_size(&mut self, size: [f32; 2]) {
        if self.ctx.view.viewport_size != size {
            self.ctx.view.viewport_size = size;
            self.ctx.view.mark_dirty();
        }
    }

    /// Verschiebt die Kamera um ein Delta in Screen-Pixeln
    pub fn pan(&mut self, delta: Vec2) {
        self.ctx.view.camera.pan(delta);
        self.ctx.view.mark_dirty();
    }

    /// Zoomt um `factor`, optional mit festem Canvas-Fokuspunkt
    pub fn zoom(&mut self, factor: f32, focus: Option<Vec2>) {
        let (min, max) = (self.options.camera_zoom_min, self.options.camera_zoom_max);
        let camera = &mut self.ctx.view.camera;
        match focus {
            Some(focus) => camera.zoom_towards(factor, focus, min, max),
            None => camera.zoom_by(factor, min, max),
        }
        self.ctx.view.mark_dirty();
    }

    /// Richtet die Kamera so aus, dass der gesamte Inhalt sichtbar ist
    pub fn center_on_content(&mut self) {
        let size = Vec2::from(self.ctx.view.viewport_size);
        match self.content_bounds() {
            Some(bounds) => self.ctx.view.camera.center_on(
                bounds,
                size,
                self.options.center_padding,
                self.options.camera_zoom_min,
                self.options.camera_zoom_max,
            ),
            None => {
                self.ctx.view.camera.look_at(Vec2::ZERO);
                self.ctx.view.camera.zoom = 1.0;
            }
        }
        self.ctx.view.mark_dirty();
    }

    /// Umschließendes Rechteck aller Elemente auf dem Canvas
    pub fn content_bounds(&self) -> Option<Rectangle> {
        let model = &self.ctx.model;
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut include = |lo: Point, hi: Point| {
            min = min.min(lo.into());
            max = max.max(hi.into());
        };
        for (_, state) in model.states() {
            include(state.bounds.position(), state.bounds.max());
        }
        for (_, transition) in model.transitions() {
            include(transition.position, transition.position);
        }
        for (_, component) in model.components() {
            if let Some(position) = component.position {
                include(position, position);
            }
        }
        for (_, note) in model.notes() {
            include(note.position, note.position);
        }
        if min.x > max.x {
            return None;
        }
        Some(Rectangle::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    // ── Maus-Ereignisse ───────────────────────────────────────────────

    /// Leitet ein Maus-Ereignis an den Schatten eines Elements weiter.
    ///
    /// Liefert `false`, wenn das Element keinen Schatten (mehr) hat.
    pub fn dispatch_mouse(
        &mut self,
        target: &EntityRef,
        kind: MouseEventKind,
        event: &mut MouseEvent,
    ) -> bool {
        let mut signals = Vec::new();
        match self.shadows_of(target.kind()).get(target.id()) {
            Some(shadow) => shadow.emitter().emit(kind, event, &mut signals),
            None => {
                log::debug!("Maus-Ereignis ignoriert: kein Schatten für '{}'", target.id());
                return false;
            }
        }
        self.process_signals(signals);
        true
    }

    /// Leitet ein Maus-Ereignis auf der leeren Fläche weiter
    pub fn dispatch_canvas_mouse(&mut self, kind: MouseEventKind, event: &mut MouseEvent) {
        let mut signals = Vec::new();
        self.canvas.emit(kind, event, &mut signals);
        self.process_signals(signals);
    }

    fn process_signals(&mut self, signals: Vec<ControllerSignal>) {
        for signal in signals {
            match signal {
                ControllerSignal::Select(entity) => self.select(entity),
                ControllerSignal::Change(entity) => self.events.push(DiagramEvent::Change(entity)),
                ControllerSignal::ContextMenu {
                    entity,
                    screen_position,
                } => {
                    self.select(entity.clone());
                    self.events.push(DiagramEvent::ContextMenu {
                        entity,
                        screen_position,
                    });
                }
                ControllerSignal::MouseUpOnComponent(name) => {
                    self.events.push(DiagramEvent::MouseUpOnComponent(name))
                }
                ControllerSignal::DragEnd { entity, from, to } => {
                    self.apply_drag(&entity, from, to)
                }
                ControllerSignal::ClearSelection => self.clear_selection(),
                ControllerSignal::CanvasContextMenu {
                    position,
                    screen_position,
                } => self.events.push(DiagramEvent::CanvasContextMenu {
                    position,
                    screen_position,
                }),
            }
        }
    }

    /// Verschiebt ein Element um das Drag-Delta.
    ///
    /// Eine Komponente ohne Position landet direkt am Drag-Ende.
    fn apply_drag(&mut self, entity: &EntityRef, start: Point, end: Point) {
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let model = &self.ctx.model;
        match entity {
            EntityRef::State(id) => {
                if let Some(from) = model.state(id).map(|s| s.bounds.position()) {
                    self.states
                        .move_state(&mut self.ctx, id, from, from.offset(dx, dy), true);
                }
            }
            EntityRef::Transition(id) => {
                if let Some(from) = model.transition(id).map(|t| t.position) {
                    self.transitions
                        .move_transition(&mut self.ctx, id, from, from.offset(dx, dy), true);
                }
            }
            EntityRef::Component(name) => {
                if let Some(from) = model.component(name).map(|c| c.position) {
                    let to = from.map_or(end, |p| p.offset(dx, dy));
                    self.components
                        .move_component(&mut self.ctx, name, from, Some(to), true);
                }
            }
            EntityRef::Note(id) => {
                if let Some(from) = model.note(id).map(|n| n.position) {
                    self.notes
                        .move_note(&mut self.ctx, id, from, from.offset(dx, dy), true);
                }
            }
        }
    }

    /// Übergibt alle seit dem letzten Aufruf angefallenen Ereignisse
    pub fn take_events(&mut self) -> Vec<DiagramEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Rendering ─────────────────────────────────────────────────────

    /// Liest und setzt das Dirty-Flag zurück
    pub fn take_dirty(&mut self) -> bool {
        self.ctx.view.take_dirty()
    }

    /// Alle Schatten in Zeichenreihenfolge
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.states
            .shadows()
            .render_items()
            .chain(self.transitions.shadows().render_items())
            .chain(self.components.shadows().render_items())
            .chain(self.notes.shadows().render_items())
            .collect()
    }
}

#[cfg(test)]
mod tests;
