//! Schnittstelle zu den Plattform-Metadaten (nur lesende Validierungsabfragen).

use indexmap::{IndexMap, IndexSet};

/// Liefert Validierungsdaten der aktiven Zielplattform.
pub trait PlatformInfo {
    /// Bietet die Plattform den Komponententyp an?
    fn has_component_type(&self, kind: &str) -> bool;
    /// Deklariert der Komponententyp die Methode bzw. das Signal?
    fn has_method(&self, kind: &str, method: &str) -> bool;
}

/// Plattform ohne Einschränkungen (solange keine Metadaten geladen sind)
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyPlatform;

impl PlatformInfo for AnyPlatform {
    fn has_component_type(&self, _kind: &str) -> bool {
        true
    }

    fn has_method(&self, _kind: &str, _method: &str) -> bool {
        true
    }
}

/// Fest deklarierte Plattform: Komponententyp → Methoden
#[derive(Debug, Clone, Default)]
pub struct StaticPlatform {
    components: IndexMap<String, IndexSet<String>>,
}

impl StaticPlatform {
    /// Erstellt eine leere Plattform
    pub fn new() -> Self {
        Self::default()
    }

    /// Deklariert einen Komponententyp mit seinen Methoden
    pub fn with_component<I, S>(mut self, kind: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components
            .insert(kind.into(), methods.into_iter().map(Into::into).collect());
        self
    }
}

impl PlatformInfo for StaticPlatform {
    fn has_component_type(&self, kind: &str) -> bool {
        self.components.contains_key(kind)
    }

    fn has_method(&self, kind: &str, method: &str) -> bool {
        self.components
            .get(kind)
            .is_some_and(|methods| methods.contains(method))
    }
}
