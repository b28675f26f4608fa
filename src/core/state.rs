//! Zustände (States) und die an ihnen hängenden Ereignisse.

use super::Rectangle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aufruf einer Komponenten-Methode.
///
/// Wird für Trigger (`Event`), Aktionen (`Action`) und Bedingungs-Variablen
/// (`Variable`) gleichermaßen verwendet, das JSON-Format ist identisch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentCall {
    /// Name der Komponente im Dokument
    pub component: String,
    /// Methode bzw. Signal der Komponente
    pub method: String,
    /// Optionale benannte Argumente
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<IndexMap<String, String>>,
}

impl ComponentCall {
    /// Erstellt einen Aufruf ohne Argumente
    pub fn new(component: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            method: method.into(),
            args: None,
        }
    }
}

/// Auslösendes Ereignis eines Zustands oder einer Transition
pub type Event = ComponentCall;
/// Auszuführende Aktion
pub type Action = ComponentCall;
/// Komponenten-Methode als Wert in einer Bedingung
pub type Variable = ComponentCall;

/// Ereignis eines Zustands mit zugehörigen Aktionen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub trigger: Event,
    #[serde(rename = "do", default)]
    pub actions: Vec<Action>,
}

impl EventData {
    /// Prüft, ob Trigger oder eine Aktion die Komponente referenziert
    pub fn references_component(&self, name: &str) -> bool {
        self.trigger.component == name || self.actions.iter().any(|a| a.component == name)
    }
}

/// Ein Zustand des Automaten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Eltern-Zustand bei verschachtelten Zuständen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub name: String,
    pub bounds: Rectangle,
    #[serde(default)]
    pub events: Vec<EventData>,
}

impl State {
    /// Erstellt einen Top-Level-Zustand ohne Ereignisse
    pub fn new(name: impl Into<String>, bounds: Rectangle) -> Self {
        Self {
            parent: None,
            name: name.into(),
            bounds,
            events: Vec::new(),
        }
    }

    /// Prüft, ob ein Ereignis die Komponente referenziert
    pub fn references_component(&self, name: &str) -> bool {
        self.events.iter().any(|e| e.references_component(name))
    }
}
