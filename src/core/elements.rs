//! Das persistierte Dokumentformat `Elements`.

use super::{Component, Note, State, Transition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Vollständiges Diagramm-Dokument, wie es gespeichert und geladen wird.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elements {
    #[serde(default)]
    pub states: IndexMap<String, State>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(default)]
    pub components: IndexMap<String, Component>,
    /// ID des Anfangszustands (leer = nicht gesetzt)
    #[serde(default)]
    pub initial_state: String,
    /// Kennung der Zielplattform
    #[serde(default)]
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub notes: IndexMap<String, Note>,
}

impl Elements {
    /// Leeres Dokument für eine Plattform
    pub fn empty(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            parameters: Some(IndexMap::new()),
            ..Self::default()
        }
    }
}
