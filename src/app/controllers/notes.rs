//! Controller für freie Textnotizen.

use super::ShadowSet;
use crate::app::context::EditorContext;
use crate::app::history::HistoryAction;
use crate::app::shadow::{watch_common, Shadow};
use crate::core::{EntityKind, EntityRef, ModelInvariantError, Note, Point};
use crate::shared::RenderShape;

/// Parameter für eine neue Notiz
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateNoteParams {
    pub id: Option<String>,
    pub position: Point,
    pub text: String,
}

#[derive(Default)]
pub struct NotesController {
    shadows: ShadowSet,
}

fn shape_of(note: &Note) -> RenderShape {
    RenderShape::Note {
        position: note.position,
        text: note.text.clone(),
    }
}

impl NotesController {
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
        for (id, note) in ctx.model.notes() {
            self.attach(id, note);
        }
    }

    fn attach(&mut self, id: &str, note: &Note) {
        let mut shadow = Shadow::new(EntityRef::Note(id.to_string()), shape_of(note));
        watch_common(&mut shadow);
        self.shadows.insert(id, shadow);
    }

    fn sync(&mut self, ctx: &EditorContext, id: &str) {
        if let Some(note) = ctx.model.note(id) {
            self.shadows.sync(id, shape_of(note));
        }
    }

    pub fn create(
        &mut self,
        ctx: &mut EditorContext,
        params: CreateNoteParams,
        record_history: bool,
    ) -> Result<String, ModelInvariantError> {
        let id = match params.id {
            Some(id) => id,
            None => ctx.model.generate_id(EntityKind::Note),
        };
        let note = Note {
            position: params.position,
            text: params.text,
        };
        self.insert(ctx, &id, note, None, record_history)?;
        Ok(id)
    }

    pub fn insert(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        note: Note,
        index: Option<usize>,
        record_history: bool,
    ) -> Result<(), ModelInvariantError> {
        ctx.model.insert_note(id, note.clone(), index)?;
        self.attach(id, &note);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::CreateNote {
                id: id.to_string(),
                note,
            });
        }
        log::info!("Notiz '{}' angelegt", id);
        Ok(())
    }

    pub fn move_note(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        from: Point,
        to: Point,
        record_history: bool,
    ) -> bool {
        if !ctx.model.set_note_position(id, to) {
            log::debug!("Verschieben ignoriert: Notiz '{}' unbekannt", id);
            return false;
        }
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::MoveNote {
                id: id.to_string(),
                from,
                to,
            });
        }
        true
    }

    pub fn change_text(
        &mut self,
        ctx: &mut EditorContext,
        id: &str,
        text: &str,
        record_history: bool,
    ) -> bool {
        let Some(previous) = ctx.model.set_note_text(id, text) else {
            log::debug!("Text ignoriert: Notiz '{}' unbekannt", id);
            return false;
        };
        self.sync(ctx, id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::ChangeNoteText {
                id: id.to_string(),
                from: previous,
                to: text.to_string(),
            });
        }
        true
    }

    pub fn delete(&mut self, ctx: &mut EditorContext, id: &str, record_history: bool) -> bool {
        let Some((index, note)) = ctx.model.remove_note(id) else {
            log::debug!("Löschen ignoriert: Notiz '{}' unbekannt", id);
            return false;
        };
        self.shadows.remove(id);
        ctx.view.mark_dirty();
        if record_history {
            ctx.history.record(HistoryAction::DeleteNote {
                id: id.to_string(),
                note,
                index,
            });
        }
        log::info!("Notiz '{}' gelöscht", id);
        true
    }
}
