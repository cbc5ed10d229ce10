mod editing;
mod logging;
mod modes;
mod movement;

use super::App;
use crate::event::{Event, EventEnvelope};

impl App {
    pub(super) fn handle_event(&mut self, env: EventEnvelope) {
        // Log a concise line for the processed event
        Self::log_event(self.gs.tick, &env.kind);
        match env.kind {
            Event::Tick => {}
            Event::MovementRequested { dt_ms } => {
                self.handle_movement_requested(dt_ms);
            }
            Event::LookRequested { dx, dy } => {
                self.handle_look_requested(dx, dy);
            }
            Event::ZoomRequested { delta } => {
                self.gs.rig.zoom(delta);
            }
            Event::EditRequested { action } => {
                self.handle_edit_requested(action);
            }
            Event::EscapePressed => {
                self.handle_escape_pressed();
            }
            Event::MenuActionRequested { action } => {
                self.handle_menu_action(action);
            }
            Event::CaptureChanged { captured } => {
                self.handle_capture_changed(captured);
            }
            Event::CaptureGraceExpired => {
                self.handle_capture_grace_expired();
            }
            // Outcome notifications: logged above, nothing further to do
            Event::BlockPlaced { .. }
            | Event::BlockRemoved { .. }
            | Event::EditRejected { .. }
            | Event::ModeChanged { .. }
            | Event::SettingsChanged { .. } => {}
        }
    }
}
