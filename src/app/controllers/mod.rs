//! Controller pro Element-Typ.
//!
//! Jeder Controller hält nur die Schatten seiner Elemente (per ID) und verändert
//! das Modell ausschließlich über den übergebenen `EditorContext`.

pub mod components;
pub mod notes;
pub mod states;
pub mod transitions;

pub use components::{ComponentsController, CreateComponentParams};
pub use notes::{CreateNoteParams, NotesController};
pub use states::{CreateStateParams, StatesController};
pub use transitions::{CreateTransitionParams, TransitionsController};

use super::context::EditorContext;
use super::shadow::Shadow;
use crate::shared::{RenderItem, RenderShape};
use indexmap::IndexMap;

/// Abhängige Transitionen eines Zustands, für Kaskaden beim Löschen.
///
/// Der `StatesController` kennt keine Transitionen; der Orchestrator reicht
/// ihm die Implementierung des `TransitionsController` herein.
pub trait StateDependents {
    /// IDs aller Transitionen mit dem Zustand als Quelle oder Ziel
    fn transitions_of_state(&self, ctx: &EditorContext, state_id: &str) -> Vec<String>;

    /// Löscht eine Transition samt Schatten
    fn delete_transition(&mut self, ctx: &mut EditorContext, id: &str, record_history: bool)
        -> bool;
}

/// Schatten eines Controllers, indexiert nach Element-ID
#[derive(Default)]
pub struct ShadowSet {
    shadows: IndexMap<String, Shadow>,
}

impl ShadowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Shadow> {
        self.shadows.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shadows.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shadows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shadows.is_empty()
    }

    /// Fügt einen Schatten ein; ein vorhandener Schatten derselben ID wird ersetzt.
    pub(crate) fn insert(&mut self, id: &str, shadow: Shadow) {
        if let Some(mut old) = self.shadows.insert(id.to_string(), shadow) {
            old.unwatch();
        }
    }

    /// Entfernt einen Schatten und löst seine Handler
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        match self.shadows.shift_remove(id) {
            Some(mut shadow) => {
                shadow.unwatch();
                true
            }
            None => false,
        }
    }

    /// Überträgt eine neu berechnete Form
    pub(crate) fn sync(&mut self, id: &str, shape: RenderShape) {
        if let Some(shadow) = self.shadows.get_mut(id) {
            shadow.sync(shape);
        }
    }

    pub(crate) fn set_selected(&mut self, id: &str, selected: bool) {
        if let Some(shadow) = self.shadows.get_mut(id) {
            shadow.selected = selected;
        }
    }

    /// Entfernt alle Schatten (neues Dokument)
    pub(crate) fn clear(&mut self) {
        for shadow in self.shadows.values_mut() {
            shadow.unwatch();
        }
        self.shadows.clear();
    }

    pub fn render_items(&self) -> impl Iterator<Item = RenderItem> + '_ {
        self.shadows.values().map(Shadow::render_item)
    }
}
