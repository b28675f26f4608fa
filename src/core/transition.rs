//! Transitionen zwischen Zuständen inklusive Bedingungsbaum.

use super::state::{Action, Event, Variable};
use super::Point;
use serde::{Deserialize, Serialize};

/// Wert einer Bedingung: Literal, Komponenten-Methode oder verschachtelte Bedingungen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
    Variable(Variable),
    List(Vec<Condition>),
    Nested(Box<Condition>),
}

/// Bedingung (Vergleichs-Operator oder boolescher Kombinator als `type`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: ConditionValue,
}

impl Condition {
    /// Ruft `f` für jede Variable im Baum auf (Tiefensuche).
    pub fn for_each_variable<'a>(&'a self, f: &mut impl FnMut(&'a Variable)) {
        match &self.value {
            ConditionValue::Variable(v) => f(v),
            ConditionValue::List(list) => list.iter().for_each(|c| c.for_each_variable(f)),
            ConditionValue::Nested(inner) => inner.for_each_variable(f),
            ConditionValue::Number(_) | ConditionValue::Text(_) => {}
        }
    }

    /// Prüft, ob eine Variable im Baum die Komponente referenziert
    pub fn references_component(&self, name: &str) -> bool {
        let mut found = false;
        self.for_each_variable(&mut |v| found |= v.component == name);
        found
    }

    /// Benennt alle Referenzen auf eine Komponente um
    pub fn rename_component(&mut self, from: &str, to: &str) {
        match &mut self.value {
            ConditionValue::Variable(v) if v.component == from => v.component = to.to_string(),
            ConditionValue::List(list) => list
                .iter_mut()
                .for_each(|c| c.rename_component(from, to)),
            ConditionValue::Nested(inner) => inner.rename_component(from, to),
            _ => {}
        }
    }
}

/// Eine Transition zwischen zwei Zuständen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub source: String,
    pub target: String,
    pub color: String,
    /// Anker des Labels auf dem Canvas
    pub position: Point,
    pub trigger: Event,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Condition>,
    #[serde(rename = "do", default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

impl Transition {
    /// Prüft, ob die Transition am Zustand hängt (als Quelle oder Ziel)
    pub fn touches_state(&self, state_id: &str) -> bool {
        self.source == state_id || self.target == state_id
    }

    /// Prüft, ob Trigger, Bedingung oder Aktionen die Komponente referenzieren
    pub fn references_component(&self, name: &str) -> bool {
        self.trigger.component == name
            || self
                .conditions
                .as_ref()
                .is_some_and(|c| c.references_component(name))
            || self
                .actions
                .as_ref()
                .is_some_and(|acts| acts.iter().any(|a| a.component == name))
    }

    /// Benennt alle Referenzen auf eine Komponente um
    pub fn rename_component(&mut self, from: &str, to: &str) {
        if self.trigger.component == from {
            self.trigger.component = to.to_string();
        }
        if let Some(cond) = self.conditions.as_mut() {
            cond.rename_component(from, to);
        }
        for action in self.actions.iter_mut().flatten() {
            if action.component == from {
                action.component = to.to_string();
            }
        }
    }
}
