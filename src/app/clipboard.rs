//! Zwischenablage: getaggter Snapshot eines kopierten Elements.

use crate::core::{Component, EntityRef, Note, State, Transition};
use serde::{Deserialize, Serialize};

/// Kopiertes Element samt ursprünglicher ID bzw. Name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Copied<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

/// Inhalt der Zwischenablage.
///
/// Serialisiert als `{"type": "state", "data": {...}}`, damit ein Host den
/// Inhalt als Text in die System-Zwischenablage legen kann.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum CopyData {
    State(Copied<State>),
    Transition(Copied<Transition>),
    Note(Copied<Note>),
    Component(Copied<Component>),
}

impl CopyData {
    /// Referenz auf das ursprünglich kopierte Element
    pub fn source(&self) -> EntityRef {
        match self {
            CopyData::State(c) => EntityRef::State(c.id.clone()),
            CopyData::Transition(c) => EntityRef::Transition(c.id.clone()),
            CopyData::Note(c) => EntityRef::Note(c.id.clone()),
            CopyData::Component(c) => EntityRef::Component(c.id.clone()),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
