//! Controller für Plattform-Komponenten.

use super::ShadowSet;
use crate::app::context::EditorContext;
use crate::app::history::HistoryAction;
use crate::app::mouse_events::MouseEventKind;
use crate::app::shadow::{watch_common, ControllerSignal, Shadow};
use crate::core::{Component, EntityRef, ModelInvariantError, Point};
use crate::shared::RenderShape;
use indexmap::IndexMap;

/// Parameter für eine neue Komponente
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateComponentParams {
    /// Eindeutiger Name im Dokument
    pub name: String,
    /// Plattform-Typ
    pub kind: String,
    pub parameters: IndexMap<String, String>,
    pub position: Option<Point>,
}

/// Verwaltet die Schatten aller Komponenten.
#[derive(Default)]
pub struct ComponentsController {
    shadows: ShadowSet,
}

fn shape_of(component: &Component) -> RenderShape {
    RenderShape::Component {
        position: component.position,
        kind: component.kind.clone(),
    }
}

impl ComponentsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shadows(&self) -> &ShadowSet {
        &self.shadows
    }

    pub(crate) fn shadows_mut(&mut self) -> &mut ShadowSet {
        &mut self.shadows
    }

    pub fn rebuild(&mut self, ctx: &EditorContext) {
        self.shadows.clear();
        for (name, component) in ctx.model.components() {
            self.attach(name, component);
        }
    }

    fn attach(&mut self, name: &str, component: &Component) {
        let mut shadow = Shadow::new(EntityRef::Component(name.to_string()), shape_of(component));
        watch_common(&mut shadow);
        // Loslassen über einer Komponente, z.B. für Drag&Drop auf Zustände
        shadow.watch(MouseEventKind::MouseUp, |entity, _event, out| {
            out.push(ControllerSignal::MouseUpOnComponent(entity.id().to_string()));
        });
        self.shadows.insert(name, shadow);
    }

    fn sync(&mut self, ctx: &EditorContext, name: &str) {
        if let Some(component) = ctx.model.component(name) {
            self.shadows.sync(name, shape_of(component));
        }
    }

    pub fn create(
        &mut self,
        ctx: &mut EditorContext,
        params: CreateComponentParams,
        record_history: bool,
    ) -> Result<String, ModelInvariantError> {
        let component = Component {
            kind: params.kind,
            parameters: params.parameters,
            position: params.position,
        };
        self.insert(ctx, &params.name, component, None, record_history)?;
        Ok(params.name)
    }

    /// Fügt eine vollständige Komponente ein (Anlegen, Einfügen, Wiederherstellen).
    pub fn insert(
        &mut self,
        ctx: &mut EditorContext,
        name: &str,
        component: Component,
        index: Option<usize>,
        record_history: bool,
    ) -> Result<(), ModelInvariantError> {
        ctx.model.insert_component(name, component.clone(), index)?;
        self.attach(name, &component);
        ctx.view.mark_dirty();
        log::info!("Komponente '{}' ({}) angelegt", name, component.kind);
        if record_history {
            ctx.history.record(HistoryAction::CreateComponent {
                name: name.to_string(),
                component,
            });
        }
        Ok(())
    }

    /// Setzt die Canvas-Position des Komponenten-Symbols
    pub fn move_component(
        &mut self,
        ctx: &mut EditorContext,
        name: &str,
        from: Option<Point>,
        to: Option<Point>,
        record_history: bool,
    ) -> bool {
        if !ctx.model.set_component_position(name, to) {
            log::debug!("Verschieben ignoriert: Komponente '{}' unbekannt", name);
            return false;
        }
        self.sync(ctx, name);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::MoveComponent {
                name: name.to_string(),
                from,
                to,
            });
        }
        true
    }

    /// Benennt eine Komponente um und/oder ersetzt ihre Parameter.
    ///
    /// Referenzen in Transitionen und Zustands-Ereignissen werden mit umbenannt.
    pub fn change(
        &mut self,
        ctx: &mut EditorContext,
        name: &str,
        new_name: &str,
        parameters: IndexMap<String, String>,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        let Some(previous) = ctx.model.change_component(name, new_name, parameters.clone())? else {
            log::debug!("Ändern ignoriert: Komponente '{}' unbekannt", name);
            return Ok(false);
        };
        if name != new_name {
            self.shadows.remove(name);
            if let Some(component) = ctx.model.component(new_name).cloned() {
                self.attach(new_name, &component);
            }
        } else {
            self.sync(ctx, name);
        }
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::ChangeComponent {
                name: name.to_string(),
                new_name: new_name.to_string(),
                from: previous,
                to: parameters,
            });
        }
        log::info!("Komponente '{}' geändert (Name: '{}')", name, new_name);
        Ok(true)
    }

    /// Löscht eine unreferenzierte Komponente; referenzierte werden abgelehnt.
    pub fn delete(
        &mut self,
        ctx: &mut EditorContext,
        name: &str,
        record_history: bool,
    ) -> Result<bool, ModelInvariantError> {
        let Some((index, component)) = ctx.model.remove_component(name)? else {
            log::debug!("Löschen ignoriert: Komponente '{}' unbekannt", name);
            return Ok(false);
        };
        self.shadows.remove(name);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::DeleteComponent {
                name: name.to_string(),
                component,
                index,
            });
        }
        log::info!("Komponente '{}' gelöscht", name);
        Ok(true)
    }
}
