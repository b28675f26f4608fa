//! Das zentrale Entity-Modell: Zustände, Transitionen, Komponenten und Notizen.

use super::{
    AnyPlatform, Component, Elements, EventData, ModelInvariantError, Note, PlatformInfo, Point,
    State, Transition,
};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Art eines Diagramm-Elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    State,
    Transition,
    Component,
    Note,
}

impl EntityKind {
    fn id_prefix(self) -> &'static str {
        match self {
            EntityKind::State => "state",
            EntityKind::Transition => "transition",
            EntityKind::Component => "component",
            EntityKind::Note => "note",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::State => "Zustand",
            EntityKind::Transition => "Transition",
            EntityKind::Component => "Komponente",
            EntityKind::Note => "Notiz",
        };
        f.write_str(label)
    }
}

/// Getaggte Referenz auf ein Diagramm-Element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    State(String),
    Transition(String),
    Component(String),
    Note(String),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::State(_) => EntityKind::State,
            EntityRef::Transition(_) => EntityKind::Transition,
            EntityRef::Component(_) => EntityKind::Component,
            EntityRef::Note(_) => EntityKind::Note,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRef::State(id)
            | EntityRef::Transition(id)
            | EntityRef::Component(id)
            | EntityRef::Note(id) => id,
        }
    }
}

type ModelResult<T> = Result<T, ModelInvariantError>;

/// Autoritative Daten eines geöffneten Diagramms.
///
/// Jede Mutation prüft die Invarianten vorher und ändert bei einem Fehler nichts.
/// Unbekannte IDs bei Positions-/Textänderungen liefern `false` bzw. `None`.
pub struct DiagramModel {
    states: IndexMap<String, State>,
    /// Transitionen in Dokument-Reihenfolge, indexiert nach generierter ID
    transitions: IndexMap<String, Transition>,
    components: IndexMap<String, Component>,
    notes: IndexMap<String, Note>,
    initial_state: Option<String>,
    platform_name: String,
    parameters: Option<IndexMap<String, String>>,
    next_id: u64,
    platform: Rc<dyn PlatformInfo>,
}

impl Default for DiagramModel {
    fn default() -> Self {
        Self::new(Rc::new(AnyPlatform))
    }
}

impl fmt::Debug for DiagramModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramModel")
            .field("states", &self.states.len())
            .field("transitions", &self.transitions.len())
            .field("components", &self.components.len())
            .field("notes", &self.notes.len())
            .field("initial_state", &self.initial_state)
            .finish()
    }
}

impl DiagramModel {
    /// Erstellt ein leeres Modell, das gegen die angegebene Plattform validiert
    pub fn new(platform: Rc<dyn PlatformInfo>) -> Self {
        Self {
            states: IndexMap::new(),
            transitions: IndexMap::new(),
            components: IndexMap::new(),
            notes: IndexMap::new(),
            initial_state: None,
            platform_name: String::new(),
            parameters: None,
            next_id: 1,
            platform,
        }
    }

    /// Baut ein Modell aus einem Dokument und prüft alle Invarianten.
    pub fn from_elements(
        elements: Elements,
        platform: Rc<dyn PlatformInfo>,
    ) -> ModelResult<Self> {
        let mut model = Self::new(platform);
        model.platform_name = elements.platform;
        model.parameters = elements.parameters;
        model.states = elements.states;
        model.components = elements.components;
        model.notes = elements.notes;
        for transition in elements.transitions {
            let id = model.generate_id(EntityKind::Transition);
            model.transitions.insert(id, transition);
        }
        model.initial_state = Some(elements.initial_state).filter(|s| !s.is_empty());
        model.validate()?;
        Ok(model)
    }

    /// Vollständiger Snapshot im Dokumentformat
    pub fn to_elements(&self) -> Elements {
        Elements {
            states: self.states.clone(),
            transitions: self.transitions.values().cloned().collect(),
            components: self.components.clone(),
            initial_state: self.initial_state.clone().unwrap_or_default(),
            platform: self.platform_name.clone(),
            parameters: self.parameters.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Prüft sämtliche Invarianten des Dokuments.
    pub fn validate(&self) -> ModelResult<()> {
        for (id, state) in &self.states {
            if let Some(parent) = &state.parent {
                if !self.states.contains_key(parent) {
                    return Err(ModelInvariantError::UnknownState(parent.clone()));
                }
                if self.is_ancestor_or_self(id, parent) {
                    return Err(ModelInvariantError::ParentCycle {
                        child: id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        if let Some(initial) = &self.initial_state {
            self.check_initial_state(initial)?;
        }
        for (name, component) in &self.components {
            self.check_component_type(name, component)?;
        }
        for (id, transition) in &self.transitions {
            self.check_transition(id, transition)?;
        }
        Ok(())
    }

    // ── Lesender Zugriff ───────────────────────────────────────────────

    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.get(id)
    }

    pub fn states(&self) -> impl Iterator<Item = (&String, &State)> {
        self.states.iter()
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.get(id)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&String, &Transition)> {
        self.transitions.iter()
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn components(&self) -> impl Iterator<Item = (&String, &Component)> {
        self.components.iter()
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn notes(&self) -> impl Iterator<Item = (&String, &Note)> {
        self.notes.iter()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial_state.as_deref()
    }

    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }

    /// Direkte Kind-Zustände in Dokument-Reihenfolge
    pub fn children_of(&self, state_id: &str) -> Vec<String> {
        self.states
            .iter()
            .filter(|(_, s)| s.parent.as_deref() == Some(state_id))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// IDs aller Transitionen, die den Zustand als Quelle oder Ziel haben
    pub fn transitions_touching(&self, state_id: &str) -> Vec<String> {
        self.transitions
            .iter()
            .filter(|(_, t)| t.touches_state(state_id))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// IDs aller Transitionen, die die Komponente referenzieren
    pub fn transitions_referencing_component(&self, name: &str) -> Vec<String> {
        self.transitions
            .iter()
            .filter(|(_, t)| t.references_component(name))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// IDs aller Zustände, deren Ereignisse die Komponente referenzieren
    pub fn states_referencing_component(&self, name: &str) -> Vec<String> {
        self.states
            .iter()
            .filter(|(_, s)| s.references_component(name))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Prüft, ob `ancestor` gleich `state_id` oder einer seiner Vorfahren ist
    pub fn is_ancestor_or_self(&self, ancestor: &str, state_id: &str) -> bool {
        let mut current = Some(state_id);
        // Begrenzung schützt vor bereits zyklischen Eingabedaten
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.states.len() {
                return true;
            }
            current = self.states.get(id).and_then(|s| s.parent.as_deref());
        }
        false
    }

    // ── ID-Vergabe ─────────────────────────────────────────────────────

    /// Liefert eine neue, im Dokument noch nicht vergebene ID
    pub fn generate_id(&mut self, kind: EntityKind) -> String {
        loop {
            let candidate = format!("{}-{}", kind.id_prefix(), self.next_id);
            self.next_id += 1;
            let taken = match kind {
                EntityKind::State => self.states.contains_key(&candidate),
                EntityKind::Transition => self.transitions.contains_key(&candidate),
                EntityKind::Component => self.components.contains_key(&candidate),
                EntityKind::Note => self.notes.contains_key(&candidate),
            };
            if !taken {
                return candidate;
            }
        }
    }

    /// Liefert einen freien Komponentennamen auf Basis von `base` (`base`, `base_1`, …)
    pub fn unique_component_name(&self, base: &str) -> String {
        if !self.components.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|name| !self.components.contains_key(name))
            .unwrap_or_else(|| base.to_string())
    }

    // ── Zustände ──────────────────────────────────────────────────────

    /// Fügt einen Zustand ein, optional an einer festen Position der Reihenfolge.
    pub fn insert_state(
        &mut self,
        id: &str,
        state: State,
        index: Option<usize>,
    ) -> ModelResult<()> {
        if self.states.contains_key(id) {
            return Err(ModelInvariantError::DuplicateId {
                kind: EntityKind::State,
                id: id.to_string(),
            });
        }
        if let Some(parent) = &state.parent {
            if !self.states.contains_key(parent) {
                return Err(ModelInvariantError::UnknownState(parent.clone()));
            }
        }
        insert_at(&mut self.states, id.to_string(), state, index);
        Ok(())
    }

    /// Entfernt einen Zustand ohne Abhängigkeiten.
    ///
    /// Kinder, Transitionen und ein Verweis als Anfangszustand müssen vorher
    /// entfernt werden, sonst `StateHasDependents`.
    pub fn remove_state(&mut self, id: &str) -> ModelResult<Option<(usize, State)>> {
        if !self.states.contains_key(id) {
            return Ok(None);
        }
        let has_dependents = self.initial_state.as_deref() == Some(id)
            || self.transitions.values().any(|t| t.touches_state(id))
            || self
                .states
                .values()
                .any(|s| s.parent.as_deref() == Some(id));
        if has_dependents {
            return Err(ModelInvariantError::StateHasDependents(id.to_string()));
        }
        Ok(self
            .states
            .shift_remove_full(id)
            .map(|(index, _, state)| (index, state)))
    }

    /// Setzt die Position (linke obere Ecke) eines Zustands
    pub fn set_state_position(&mut self, id: &str, position: Point) -> bool {
        let Some(state) = self.states.get_mut(id) else {
            return false;
        };
        state.bounds = state.bounds.with_position(position);
        true
    }

    /// Benennt einen Zustand um und liefert den alten Namen
    pub fn rename_state(&mut self, id: &str, name: &str) -> Option<String> {
        let state = self.states.get_mut(id)?;
        Some(std::mem::replace(&mut state.name, name.to_string()))
    }

    /// Ersetzt die Ereignisliste eines Zustands und liefert die alte
    pub fn set_state_events(&mut self, id: &str, events: Vec<EventData>) -> Option<Vec<EventData>> {
        let state = self.states.get_mut(id)?;
        Some(std::mem::replace(&mut state.events, events))
    }

    /// Entfernt ein einzelnes Ereignis und liefert es zurück
    pub fn remove_state_event(&mut self, id: &str, index: usize) -> Option<EventData> {
        let state = self.states.get_mut(id)?;
        (index < state.events.len()).then(|| state.events.remove(index))
    }

    /// Verschachtelt einen Zustand unter `parent`
    pub fn link_state(&mut self, id: &str, parent: &str) -> ModelResult<Option<Option<String>>> {
        self.set_state_parent(id, Some(parent))
    }

    /// Löst einen Zustand aus seinem Eltern-Zustand
    pub fn unlink_state(&mut self, id: &str) -> ModelResult<Option<Option<String>>> {
        self.set_state_parent(id, None)
    }

    /// Setzt oder entfernt den Eltern-Zustand und liefert den vorherigen.
    ///
    /// Lehnt Zyklen ab, ebenso das Verschachteln des Anfangszustands.
    pub fn set_state_parent(
        &mut self,
        id: &str,
        parent: Option<&str>,
    ) -> ModelResult<Option<Option<String>>> {
        if !self.states.contains_key(id) {
            return Ok(None);
        }
        if let Some(parent) = parent {
            if !self.states.contains_key(parent) {
                return Err(ModelInvariantError::UnknownState(parent.to_string()));
            }
            if self.is_ancestor_or_self(id, parent) {
                return Err(ModelInvariantError::ParentCycle {
                    child: id.to_string(),
                    parent: parent.to_string(),
                });
            }
            if self.initial_state.as_deref() == Some(id) {
                return Err(ModelInvariantError::InvalidInitialState(id.to_string()));
            }
        }
        let Some(state) = self.states.get_mut(id) else {
            return Ok(None);
        };
        Ok(Some(std::mem::replace(
            &mut state.parent,
            parent.map(str::to_string),
        )))
    }

    /// Setzt den Anfangszustand und liefert den vorherigen
    pub fn set_initial_state(&mut self, id: Option<&str>) -> ModelResult<Option<String>> {
        if let Some(id) = id {
            self.check_initial_state(id)?;
        }
        Ok(std::mem::replace(
            &mut self.initial_state,
            id.map(str::to_string),
        ))
    }

    fn check_initial_state(&self, id: &str) -> ModelResult<()> {
        match self.states.get(id) {
            Some(state) if state.parent.is_none() => Ok(()),
            _ => Err(ModelInvariantError::InvalidInitialState(id.to_string())),
        }
    }

    // ── Transitionen ──────────────────────────────────────────────────

    /// Fügt eine Transition ein, optional an einer festen Position der Reihenfolge.
    pub fn insert_transition(
        &mut self,
        id: &str,
        transition: Transition,
        index: Option<usize>,
    ) -> ModelResult<()> {
        if self.transitions.contains_key(id) {
            return Err(ModelInvariantError::DuplicateId {
                kind: EntityKind::Transition,
                id: id.to_string(),
            });
        }
        self.check_transition(id, &transition)?;
        insert_at(&mut self.transitions, id.to_string(), transition, index);
        Ok(())
    }

    pub fn remove_transition(&mut self, id: &str) -> Option<(usize, Transition)> {
        self.transitions
            .shift_remove_full(id)
            .map(|(index, _, transition)| (index, transition))
    }

    /// Ersetzt alle Attribute einer Transition und liefert die alten
    pub fn replace_transition(
        &mut self,
        id: &str,
        transition: Transition,
    ) -> ModelResult<Option<Transition>> {
        if !self.transitions.contains_key(id) {
            return Ok(None);
        }
        self.check_transition(id, &transition)?;
        Ok(self
            .transitions
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, transition)))
    }

    pub fn set_transition_position(&mut self, id: &str, position: Point) -> bool {
        let Some(transition) = self.transitions.get_mut(id) else {
            return false;
        };
        transition.position = position;
        true
    }

    fn check_transition(&self, id: &str, transition: &Transition) -> ModelResult<()> {
        for endpoint in [&transition.source, &transition.target] {
            if !self.states.contains_key(endpoint) {
                return Err(ModelInvariantError::DanglingTransition {
                    transition: id.to_string(),
                    state: endpoint.clone(),
                });
            }
        }
        let mut result = Ok(());
        if let Some(condition) = &transition.conditions {
            condition.for_each_variable(&mut |variable| {
                if result.is_err() {
                    return;
                }
                result = match self.components.get(&variable.component) {
                    None => Err(ModelInvariantError::UnknownComponent {
                        component: variable.component.clone(),
                        referenced_by: format!("Transition '{id}'"),
                    }),
                    Some(c) if !self.platform.has_method(&c.kind, &variable.method) => {
                        Err(ModelInvariantError::UnknownMethod {
                            component: variable.component.clone(),
                            method: variable.method.clone(),
                        })
                    }
                    Some(_) => Ok(()),
                };
            });
        }
        result
    }

    // ── Komponenten ───────────────────────────────────────────────────

    pub fn insert_component(
        &mut self,
        name: &str,
        component: Component,
        index: Option<usize>,
    ) -> ModelResult<()> {
        if self.components.contains_key(name) {
            return Err(ModelInvariantError::DuplicateId {
                kind: EntityKind::Component,
                id: name.to_string(),
            });
        }
        self.check_component_type(name, &component)?;
        insert_at(&mut self.components, name.to_string(), component, index);
        Ok(())
    }

    /// Entfernt eine unreferenzierte Komponente
    pub fn remove_component(&mut self, name: &str) -> ModelResult<Option<(usize, Component)>> {
        if !self.components.contains_key(name) {
            return Ok(None);
        }
        let count = self.transitions_referencing_component(name).len()
            + self.states_referencing_component(name).len();
        if count > 0 {
            return Err(ModelInvariantError::ComponentInUse {
                name: name.to_string(),
                count,
            });
        }
        Ok(self
            .components
            .shift_remove_full(name)
            .map(|(index, _, component)| (index, component)))
    }

    /// Ändert Namen und Parameter einer Komponente.
    ///
    /// Beim Umbenennen werden alle Referenzen in Transitionen und Zustands-Ereignissen
    /// mitgezogen. Liefert die vorherigen Parameter.
    pub fn change_component(
        &mut self,
        name: &str,
        new_name: &str,
        parameters: IndexMap<String, String>,
    ) -> ModelResult<Option<IndexMap<String, String>>> {
        if !self.components.contains_key(name) {
            return Ok(None);
        }
        if name != new_name && self.components.contains_key(new_name) {
            return Err(ModelInvariantError::DuplicateId {
                kind: EntityKind::Component,
                id: new_name.to_string(),
            });
        }
        let Some(index) = self.components.get_index_of(name) else {
            return Ok(None);
        };
        let Some((_, mut component)) = self.components.shift_remove_entry(name) else {
            return Ok(None);
        };
        let previous = std::mem::replace(&mut component.parameters, parameters);
        insert_at(
            &mut self.components,
            new_name.to_string(),
            component,
            Some(index),
        );
        if name != new_name {
            self.rename_component_references(name, new_name);
        }
        Ok(Some(previous))
    }

    fn rename_component_references(&mut self, from: &str, to: &str) {
        for transition in self.transitions.values_mut() {
            transition.rename_component(from, to);
        }
        for state in self.states.values_mut() {
            for event in &mut state.events {
                if event.trigger.component == from {
                    event.trigger.component = to.to_string();
                }
                for action in &mut event.actions {
                    if action.component == from {
                        action.component = to.to_string();
                    }
                }
            }
        }
    }

    /// Setzt die Canvas-Position einer Komponente (`None` = ohne Symbol-Position)
    pub fn set_component_position(&mut self, name: &str, position: Option<Point>) -> bool {
        let Some(component) = self.components.get_mut(name) else {
            return false;
        };
        component.position = position;
        true
    }

    fn check_component_type(&self, name: &str, component: &Component) -> ModelResult<()> {
        if self.platform.has_component_type(&component.kind) {
            Ok(())
        } else {
            Err(ModelInvariantError::UnknownComponentType {
                name: name.to_string(),
                kind: component.kind.clone(),
            })
        }
    }

    // ── Notizen ───────────────────────────────────────────────────────

    pub fn insert_note(&mut self, id: &str, note: Note, index: Option<usize>) -> ModelResult<()> {
        if self.notes.contains_key(id) {
            return Err(ModelInvariantError::DuplicateId {
                kind: EntityKind::Note,
                id: id.to_string(),
            });
        }
        insert_at(&mut self.notes, id.to_string(), note, index);
        Ok(())
    }

    pub fn remove_note(&mut self, id: &str) -> Option<(usize, Note)> {
        self.notes
            .shift_remove_full(id)
            .map(|(index, _, note)| (index, note))
    }

    pub fn set_note_position(&mut self, id: &str, position: Point) -> bool {
        let Some(note) = self.notes.get_mut(id) else {
            return false;
        };
        note.position = position;
        true
    }

    /// Ersetzt den Notiztext und liefert den alten
    pub fn set_note_text(&mut self, id: &str, text: &str) -> Option<String> {
        let note = self.notes.get_mut(id)?;
        Some(std::mem::replace(&mut note.text, text.to_string()))
    }
}

/// Fügt ein oder hängt an, falls kein (gültiger) Index vorgegeben ist
fn insert_at<V>(map: &mut IndexMap<String, V>, key: String, value: V, index: Option<usize>) {
    match index {
        Some(index) if index < map.len() => {
            map.shift_insert(index, key, value);
        }
        _ => {
            map.insert(key, value);
        }
    }
}
