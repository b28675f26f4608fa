//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Handler auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    ///
    /// Abgelehnte Mutationen (verletzte Modell-Invarianten) kommen als Fehler zurück,
    /// das Diagramm ist in diesem Fall unverändert.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            AppCommand::NewDocument { platform } => {
                handlers::file_io::new_document(state, &platform)?
            }
            AppCommand::LoadFile { path } => handlers::file_io::load(state, path)?,
            AppCommand::SaveFile { path } => handlers::file_io::save(state, path)?,

            // === Maus ===
            AppCommand::DispatchEntityMouse {
                target,
                kind,
                event,
            } => handlers::editing::dispatch_entity_mouse(state, &target, kind, event),
            AppCommand::DispatchCanvasMouse { kind, event } => {
                handlers::editing::dispatch_canvas_mouse(state, kind, event)
            }

            // === Editing ===
            AppCommand::CreateState { params } => handlers::editing::create_state(state, params)?,
            AppCommand::CreateTransition { params } => {
                handlers::editing::create_transition(state, params)?
            }
            AppCommand::CreateComponent { params } => {
                handlers::editing::create_component(state, params)?
            }
            AppCommand::CreateNote { params } => handlers::editing::create_note(state, params)?,
            AppCommand::DeleteSelected => handlers::editing::delete_selected(state)?,
            AppCommand::CopySelected => handlers::editing::copy_selected(state),
            AppCommand::Paste => handlers::editing::paste(state)?,
            AppCommand::SetClipboard { data } => handlers::editing::set_clipboard(state, data),

            // === History ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),

            // === Kamera & Viewport ===
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::PanCamera { delta } => handlers::view::pan(state, delta),
            AppCommand::ZoomCamera {
                factor,
                focus_world,
            } => handlers::view::zoom_towards(state, factor, focus_world),
            AppCommand::CenterCamera => handlers::view::center_camera(state),

            // === Anwendungssteuerung ===
            AppCommand::RequestExit => handlers::dialog::request_exit(state),
            AppCommand::ApplyOptions { options } => {
                handlers::dialog::apply_options(state, options)?
            }
        }

        Ok(())
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &mut AppState) -> RenderScene {
        render_scene::build(state)
    }
}
