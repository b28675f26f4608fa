//! Render-Schatten: pro Modell-Element ein interaktives, renderbares Abbild.
//!
//! Ein Schatten referenziert sein Element nur über die ID und ist nie autoritativ.
//! Er lebt höchstens so lange wie der Modell-Eintrag, den er spiegelt.

use super::mouse_events::{MouseEvent, MouseEventEmitter, MouseEventKind, MouseHandler};
use crate::core::{EntityRef, Point};
use crate::shared::{RenderItem, RenderShape};

/// Ergebnis eines Maus-Handlers, vom Orchestrator in Reihenfolge verarbeitet
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerSignal {
    /// Element anwählen
    Select(EntityRef),
    /// Element zum Bearbeiten öffnen (Doppelklick)
    Change(EntityRef),
    /// Kontextmenü für ein Element
    ContextMenu {
        entity: EntityRef,
        screen_position: Point,
    },
    /// Maustaste über einer Komponente losgelassen
    MouseUpOnComponent(String),
    /// Drag eines Elements abgeschlossen
    DragEnd {
        entity: EntityRef,
        from: Point,
        to: Point,
    },
    /// Klick ins Leere
    ClearSelection,
    /// Kontextmenü auf der leeren Fläche
    CanvasContextMenu {
        position: Point,
        screen_position: Point,
    },
}

/// Interaktiver Schatten eines Modell-Elements
pub struct Shadow {
    entity: EntityRef,
    shape: RenderShape,
    /// Hervorhebung als aktuelle Auswahl
    pub selected: bool,
    emitter: MouseEventEmitter<ControllerSignal>,
    watched: Vec<(MouseEventKind, MouseHandler<ControllerSignal>)>,
}

impl Shadow {
    pub fn new(entity: EntityRef, shape: RenderShape) -> Self {
        Self {
            entity,
            shape,
            selected: false,
            emitter: MouseEventEmitter::new(),
            watched: Vec::new(),
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn shape(&self) -> &RenderShape {
        &self.shape
    }

    /// Übernimmt eine neu berechnete Form aus dem Modell
    pub fn sync(&mut self, shape: RenderShape) {
        self.shape = shape;
    }

    pub fn emitter(&self) -> &MouseEventEmitter<ControllerSignal> {
        &self.emitter
    }

    /// Für zusätzliche Handler des Hosts (z.B. Overlays)
    pub fn emitter_mut(&mut self) -> &mut MouseEventEmitter<ControllerSignal> {
        &mut self.emitter
    }

    /// Registriert einen Controller-Handler und merkt ihn für `unwatch`
    pub fn watch(
        &mut self,
        kind: MouseEventKind,
        handler: impl Fn(&EntityRef, &mut MouseEvent, &mut Vec<ControllerSignal>) + 'static,
    ) {
        let entity = self.entity.clone();
        let handler: MouseHandler<ControllerSignal> =
            std::rc::Rc::new(move |event: &mut MouseEvent, out: &mut Vec<ControllerSignal>| {
                handler(&entity, event, out)
            });
        self.emitter.on(kind, &handler);
        self.watched.push((kind, handler));
    }

    /// Entfernt genau die Handler, die über `watch` registriert wurden
    pub fn unwatch(&mut self) {
        for (kind, handler) in self.watched.drain(..) {
            self.emitter.off(kind, &handler);
        }
    }

    /// Anzahl der Controller-Handler
    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    pub fn render_item(&self) -> RenderItem {
        RenderItem {
            entity: self.entity.clone(),
            shape: self.shape.clone(),
            selected: self.selected,
        }
    }
}

/// Standard-Handler, die jeder Controller an seine Schatten hängt
pub(crate) fn watch_common(shadow: &mut Shadow) {
    shadow.watch(MouseEventKind::MouseDown, |entity, _event, out| {
        out.push(ControllerSignal::Select(entity.clone()));
    });
    shadow.watch(MouseEventKind::DoubleClick, |entity, _event, out| {
        out.push(ControllerSignal::Change(entity.clone()));
    });
    shadow.watch(MouseEventKind::ContextMenu, |entity, event, out| {
        out.push(ControllerSignal::ContextMenu {
            entity: entity.clone(),
            screen_position: event.screen_position,
        });
    });
    shadow.watch(MouseEventKind::DragEnd, |entity, event, out| {
        if let Some(drag) = event.drag {
            out.push(ControllerSignal::DragEnd {
                entity: entity.clone(),
                from: drag.start,
                to: drag.end,
            });
        }
    });
}
