//! Undo/Redo-Verlauf mit verknüpften (atomaren) Aktionsgruppen.
//!
//! Ein linearer Stack mit Cursor. Jeder Eintrag trägt eine typisierte Aktion mit
//! Vorwärts- und Rückwärts-Daten. `connected` gibt an, wie viele unmittelbar
//! davorliegende Einträge mit diesem zusammen eine Gruppe bilden (z.B. die
//! kaskadierten Transitionen beim Löschen eines Zustands).

use crate::core::{Component, EventData, Note, Point, State, Transition};
use indexmap::IndexMap;

/// Eine rückspielbare Controller-Operation
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    CreateState {
        id: String,
        state: State,
    },
    DeleteState {
        id: String,
        state: State,
        index: usize,
    },
    MoveState {
        id: String,
        from: Point,
        to: Point,
    },
    RenameState {
        id: String,
        from: String,
        to: String,
    },
    SetStateEvents {
        id: String,
        from: Vec<EventData>,
        to: Vec<EventData>,
    },
    /// Verschachteln (`to = Some`) oder Herauslösen (`to = None`)
    LinkState {
        id: String,
        from: Option<String>,
        to: Option<String>,
    },
    ChangeInitialState {
        from: Option<String>,
        to: Option<String>,
    },
    CreateTransition {
        id: String,
        transition: Transition,
    },
    DeleteTransition {
        id: String,
        transition: Transition,
        index: usize,
    },
    MoveTransition {
        id: String,
        from: Point,
        to: Point,
    },
    ChangeTransition {
        id: String,
        from: Transition,
        to: Transition,
    },
    CreateComponent {
        name: String,
        component: Component,
    },
    DeleteComponent {
        name: String,
        component: Component,
        index: usize,
    },
    MoveComponent {
        name: String,
        from: Option<Point>,
        to: Option<Point>,
    },
    ChangeComponent {
        name: String,
        new_name: String,
        from: IndexMap<String, String>,
        to: IndexMap<String, String>,
    },
    CreateNote {
        id: String,
        note: Note,
    },
    DeleteNote {
        id: String,
        note: Note,
        index: usize,
    },
    MoveNote {
        id: String,
        from: Point,
        to: Point,
    },
    ChangeNoteText {
        id: String,
        from: String,
        to: String,
    },
}

/// Ein Eintrag im Verlauf
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    /// Anzahl der direkt davorliegenden Einträge derselben Gruppe
    pub connected: usize,
}

/// Linearer Undo/Redo-Verlauf mit Cursor.
#[derive(Debug, Default)]
pub struct EditHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    /// 0 = unbegrenzt
    max_depth: usize,
    /// Cursor-Stände geöffneter Gruppen (verschachtelbar)
    open_groups: Vec<usize>,
}

impl EditHistory {
    /// Erstellt einen Verlauf mit maximaler Tiefe (0 = unbegrenzt).
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_depth,
            open_groups: Vec::new(),
        }
    }

    /// Ändert die maximale Tiefe; überzählige alte Gruppen werden sofort verworfen.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        self.enforce_max_depth();
    }

    /// Zeichnet eine Aktion auf und verwirft den Redo-Rest hinter dem Cursor.
    pub fn record(&mut self, action: HistoryAction) {
        self.entries.truncate(self.cursor);
        self.entries.push(HistoryEntry {
            action,
            connected: 0,
        });
        self.cursor = self.entries.len();
        self.enforce_max_depth();
    }

    /// Öffnet eine Gruppe: alle bis `end_group` aufgezeichneten Einträge werden atomar.
    pub fn begin_group(&mut self) {
        self.open_groups.push(self.cursor);
    }

    /// Schließt die zuletzt geöffnete Gruppe. Der letzte Eintrag erhält als
    /// `connected` die Anzahl der übrigen Gruppeneinträge.
    pub fn end_group(&mut self) {
        let Some(start) = self.open_groups.pop() else {
            return;
        };
        if self.cursor > start + 1 {
            let last = self.cursor - 1;
            self.entries[last].connected = last - start;
        }
        self.enforce_max_depth();
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Nimmt die Gruppe vor dem Cursor zurück.
    ///
    /// Liefert die Aktionen neueste zuerst; der Aufrufer spielt jeweils die Umkehrung ab.
    pub fn pop_undo(&mut self) -> Option<Vec<HistoryAction>> {
        if !self.can_undo() {
            return None;
        }
        let last = self.cursor - 1;
        let start = last.saturating_sub(self.entries[last].connected);
        let actions = self.entries[start..self.cursor]
            .iter()
            .rev()
            .map(|e| e.action.clone())
            .collect();
        self.cursor = start;
        Some(actions)
    }

    /// Stellt die Gruppe hinter dem Cursor wieder her.
    ///
    /// Liefert die Aktionen älteste zuerst für das Vorwärts-Abspielen.
    pub fn pop_redo(&mut self) -> Option<Vec<HistoryAction>> {
        if !self.can_redo() {
            return None;
        }
        let end = self.group_end(self.cursor);
        let actions = self.entries[self.cursor..=end]
            .iter()
            .map(|e| e.action.clone())
            .collect();
        self.cursor = end + 1;
        Some(actions)
    }

    /// Leert den Verlauf (neues oder geladenes Dokument)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.open_groups.clear();
    }

    /// Letzter Index der äußersten Gruppe, die bei `start` beginnt
    fn group_end(&self, start: usize) -> usize {
        (start..self.entries.len())
            .filter(|&e| e - self.entries[e].connected.min(e) == start)
            .last()
            .unwrap_or(start)
    }

    /// Setzt den Cursor nach einem fehlgeschlagenen Abspielen zurück
    pub(crate) fn restore_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.entries.len());
    }

    /// Verwirft die ältesten vollständigen Gruppen, solange das Limit überschritten ist.
    ///
    /// Die jüngste Gruppe vor dem Cursor bleibt immer erhalten, auch wenn sie allein
    /// größer als das Limit ist.
    fn enforce_max_depth(&mut self) {
        if self.max_depth == 0 || !self.open_groups.is_empty() {
            return;
        }
        while self.entries.len() > self.max_depth && self.cursor > 0 {
            let end = self.group_end(0);
            if end + 1 >= self.cursor {
                break;
            }
            self.entries.drain(..=end);
            self.cursor -= end + 1;
        }
    }
}
