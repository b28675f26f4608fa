//! Plattform-Komponenten und Notizen.

use super::Point;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Eine Komponente des Dokuments (z.B. LED, Timer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Von der Plattform deklarierter Komponententyp
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parameters: IndexMap<String, String>,
    /// Position des Komponenten-Symbols auf dem Canvas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl Component {
    /// Erstellt eine Komponente ohne Parameter
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: IndexMap::new(),
            position: None,
        }
    }
}

/// Freie Textnotiz auf dem Canvas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Note {
    pub position: Point,
    pub text: String,
}
