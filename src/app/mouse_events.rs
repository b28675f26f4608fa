//! Maus-Ereignisse mit abbrechbarer Weitergabe (Stop-Propagation).
//!
//! Jedes interaktive Objekt besitzt einen eigenen `MouseEventEmitter`.
//! Handler werden pro Ereignisart als geordnete Menge gehalten und beim
//! `emit` in umgekehrter Registrierungsreihenfolge aufgerufen, sodass der zuletzt
//! registrierte (spezifischste) Handler das Ereignis zuerst sieht.

use crate::core::Point;
use std::collections::HashMap;
use std::rc::Rc;

/// Art eines Maus-Ereignisses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    MouseDown,
    MouseUp,
    DoubleClick,
    ContextMenu,
    DragEnd,
}

/// Start- und Endposition eines abgeschlossenen Drags (Canvas-Koordinaten)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInfo {
    pub start: Point,
    pub end: Point,
}

/// Ein Maus-Ereignis, wie es an die Handler geht.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// Position in Canvas-Koordinaten
    pub position: Point,
    /// Bewegung seit dem letzten Ereignis
    pub delta: Point,
    /// Linke Maustaste gedrückt
    pub left: bool,
    /// Position in Fenster-Koordinaten (für Kontextmenüs)
    pub screen_position: Point,
    /// Nur bei `DragEnd` gesetzt
    pub drag: Option<DragInfo>,
    propagation_stopped: bool,
}

impl MouseEvent {
    /// Erstellt ein Ereignis an einer Canvas-Position (Screen-Position identisch)
    pub fn at(position: Point) -> Self {
        Self {
            position,
            delta: Point::default(),
            left: true,
            screen_position: position,
            drag: None,
            propagation_stopped: false,
        }
    }

    /// Setzt die Fenster-Position
    pub fn with_screen_position(mut self, screen_position: Point) -> Self {
        self.screen_position = screen_position;
        self
    }

    /// Erstellt ein `DragEnd`-Ereignis
    pub fn drag_end(start: Point, end: Point) -> Self {
        Self {
            delta: Point::new(end.x - start.x, end.y - start.y),
            drag: Some(DragInfo { start, end }),
            ..Self::at(end)
        }
    }

    /// Unterdrückt alle weiteren Handler dieser Auslösung
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Handler für Maus-Ereignisse. Ergebnisse werden als Signale `S` in die Outbox geschrieben.
pub type MouseHandler<S> = Rc<dyn Fn(&mut MouseEvent, &mut Vec<S>)>;

/// Publish/Subscribe-Registry für Maus-Ereignisse eines Objekts.
pub struct MouseEventEmitter<S> {
    handlers: HashMap<MouseEventKind, Vec<MouseHandler<S>>>,
}

impl<S> Default for MouseEventEmitter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MouseEventEmitter<S> {
    /// Erstellt einen Emitter ohne Handler
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registriert einen Handler. Ein bereits registrierter Handler bleibt an seiner Position.
    pub fn on(&mut self, kind: MouseEventKind, handler: &MouseHandler<S>) {
        let set = self.handlers.entry(kind).or_default();
        if !set.iter().any(|h| Rc::ptr_eq(h, handler)) {
            set.push(Rc::clone(handler));
        }
    }

    /// Entfernt einen Handler; unbekannte Handler werden ignoriert.
    pub fn off(&mut self, kind: MouseEventKind, handler: &MouseHandler<S>) {
        let Some(set) = self.handlers.get_mut(&kind) else {
            return;
        };
        set.retain(|h| !Rc::ptr_eq(h, handler));
        if set.is_empty() {
            self.handlers.remove(&kind);
        }
    }

    /// Löst ein Ereignis aus: Handler laufen vom zuletzt registrierten zum ersten,
    /// bis einer `stop_propagation()` aufruft.
    pub fn emit(&self, kind: MouseEventKind, event: &mut MouseEvent, outbox: &mut Vec<S>) {
        event.propagation_stopped = false;
        let Some(set) = self.handlers.get(&kind) else {
            return;
        };
        for handler in set.iter().rev() {
            if event.propagation_stopped {
                break;
            }
            handler(event, outbox);
        }
    }

    /// Anzahl registrierter Handler für eine Ereignisart
    pub fn handler_count(&self, kind: MouseEventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Gibt `true` zurück, wenn gar keine Handler registriert sind
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(tag: &'static str) -> MouseHandler<&'static str> {
        Rc::new(move |_event: &mut MouseEvent, out: &mut Vec<&'static str>| out.push(tag))
    }

    #[test]
    fn emit_runs_handlers_in_reverse_registration_order() {
        let mut emitter = MouseEventEmitter::new();
        emitter.on(MouseEventKind::MouseDown, &recorder("first"));
        emitter.on(MouseEventKind::MouseDown, &recorder("second"));

        let mut out = Vec::new();
        emitter.emit(
            MouseEventKind::MouseDown,
            &mut MouseEvent::at(Point::default()),
            &mut out,
        );
        assert_eq!(out, vec!["second", "first"]);
    }

    #[test]
    fn stop_propagation_skips_earlier_handlers() {
        let mut emitter = MouseEventEmitter::new();
        emitter.on(MouseEventKind::MouseDown, &recorder("earlier"));
        let stopper: MouseHandler<&'static str> =
            Rc::new(|event: &mut MouseEvent, out: &mut Vec<&'static str>| {
            out.push("later");
            event.stop_propagation();
        });
        emitter.on(MouseEventKind::MouseDown, &stopper);

        let mut event = MouseEvent::at(Point::default());
        let mut out = Vec::new();
        emitter.emit(MouseEventKind::MouseDown, &mut event, &mut out);
        assert_eq!(out, vec!["later"]);

        // Propagation-Zustand gilt nur für eine Auslösung
        emitter.off(MouseEventKind::MouseDown, &stopper);
        out.clear();
        emitter.emit(MouseEventKind::MouseDown, &mut event, &mut out);
        assert_eq!(out, vec!["earlier"]);
    }

    #[test]
    fn on_and_off_are_idempotent() {
        let mut emitter: MouseEventEmitter<&'static str> = MouseEventEmitter::new();
        let handler = recorder("x");
        emitter.on(MouseEventKind::DragEnd, &handler);
        emitter.on(MouseEventKind::DragEnd, &handler);
        assert_eq!(emitter.handler_count(MouseEventKind::DragEnd), 1);

        emitter.off(MouseEventKind::DragEnd, &recorder("fremd"));
        assert_eq!(emitter.handler_count(MouseEventKind::DragEnd), 1);

        emitter.off(MouseEventKind::DragEnd, &handler);
        emitter.off(MouseEventKind::DragEnd, &handler);
        assert!(emitter.is_empty());
    }

    #[test]
    fn emit_without_handlers_is_noop() {
        let emitter: MouseEventEmitter<&'static str> = MouseEventEmitter::new();
        let mut out = Vec::new();
        emitter.emit(
            MouseEventKind::ContextMenu,
            &mut MouseEvent::at(Point::default()),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
