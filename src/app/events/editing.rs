use super::App;
use crate::event::Event;
use crate::gamestate::EditStatus;
use crate::raycast::{self, EditAction, EditOutcome};

impl App {
    pub(super) fn handle_edit_requested(&mut self, action: EditAction) {
        let ray = self.gs.camera_pose().reticle();
        let origin = self.gs.walker.pos;
        let result =
            raycast::resolve_edit_target(&ray, &self.gs.registry, origin, self.gs.max_range)
                .and_then(|hit| raycast::apply_edit(&mut self.gs.registry, &hit, action));
        match result {
            Ok(outcome) => {
                self.gs.last_edit = EditStatus::Done(outcome);
                let ev = match outcome {
                    EditOutcome::Placed { coord, slot } => Event::BlockPlaced { coord, slot },
                    EditOutcome::Removed { coord } => Event::BlockRemoved { coord },
                };
                self.queue.emit_now(ev);
            }
            Err(reason) => {
                self.gs.last_edit = EditStatus::Rejected(reason);
                self.queue.emit_now(Event::EditRejected { action, reason });
            }
        }
    }
}
