//! Fehlertyp für verletzte Modell-Invarianten.

use super::EntityKind;
use thiserror::Error;

/// Eine Mutation wurde abgelehnt, weil sie eine Modell-Invariante verletzen würde.
///
/// Das Modell ist in diesem Fall unverändert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelInvariantError {
    #[error("{kind} '{id}' existiert bereits")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("Zustand '{0}' existiert nicht")]
    UnknownState(String),
    #[error("Transition '{transition}' verweist auf fehlenden Zustand '{state}'")]
    DanglingTransition { transition: String, state: String },
    #[error("Zustand '{child}' kann nicht unter '{parent}' verschachtelt werden (Zyklus)")]
    ParentCycle { child: String, parent: String },
    #[error("Zustand '{0}' hat noch abhängige Kind-Zustände oder Transitionen")]
    StateHasDependents(String),
    #[error("Anfangszustand '{0}' muss ein existierender Top-Level-Zustand sein")]
    InvalidInitialState(String),
    #[error("Komponententyp '{kind}' von '{name}' wird von der Plattform nicht angeboten")]
    UnknownComponentType { name: String, kind: String },
    #[error("Komponente '{component}' (referenziert von {referenced_by}) existiert nicht")]
    UnknownComponent {
        component: String,
        referenced_by: String,
    },
    #[error("Komponente '{component}' hat keine Methode '{method}'")]
    UnknownMethod { component: String, method: String },
    #[error("Komponente '{name}' wird noch von {count} Element(en) referenziert")]
    ComponentInUse { name: String, count: usize },
}
