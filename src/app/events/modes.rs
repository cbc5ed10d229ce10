use super::App;
use crate::event::Event;
use crate::mode::{MenuAction, Mode, ModeChange};

impl App {
    pub(super) fn handle_menu_action(&mut self, action: MenuAction) {
        if let Some(change) = self.gs.mode.apply(action) {
            self.on_mode_changed(change);
        }
    }

    pub(super) fn handle_escape_pressed(&mut self) {
        match self.gs.mode.mode() {
            // the host drops pointer capture; the grace check decides whether to pause
            Mode::Playing => self.set_pointer_capture(false),
            Mode::Settings => {
                if let Some(change) = self.gs.mode.escape() {
                    self.on_mode_changed(change);
                }
            }
            Mode::Menu => {}
        }
    }

    pub(super) fn handle_capture_changed(&mut self, captured: bool) {
        if !captured && self.gs.mode.capture_lost() {
            self.queue.emit_after(1, Event::CaptureGraceExpired);
        }
    }

    pub(super) fn handle_capture_grace_expired(&mut self) {
        if let Some(change) = self.gs.mode.grace_expired(self.input.captured()) {
            self.on_mode_changed(change);
        }
    }

    fn on_mode_changed(&mut self, change: ModeChange) {
        self.queue.emit_now(Event::ModeChanged {
            from: change.from,
            to: change.to,
        });
        if change.to == Mode::Playing {
            self.set_pointer_capture(true);
        } else {
            self.input.release_all();
            self.set_pointer_capture(false);
        }
    }
}
