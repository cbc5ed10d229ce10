use super::App;

impl App {
    pub(super) fn handle_movement_requested(&mut self, dt_ms: f32) {
        let input = self.input.move_input(self.gs.settings.strafe_mode);
        let before = self.gs.walker.state;
        let contact = self
            .gs
            .walker
            .tick(self.gs.registry.index(), &input, dt_ms / 1000.0);
        let w = &self.gs.walker;
        if w.state != before {
            log::debug!(
                target: "events",
                "[tick {}] {:?} -> {:?} at ({:.2},{:.2},{:.2})",
                self.gs.tick,
                before,
                w.state,
                w.pos.x,
                w.pos.y,
                w.pos.z
            );
        }
        if let Some(c) = contact {
            log::trace!(
                target: "events",
                "[tick {}] contact n=({:.2},{:.2},{:.2}) depth={:.4}",
                self.gs.tick,
                c.normal.x,
                c.normal.y,
                c.normal.z,
                c.depth
            );
        }
    }

    pub(super) fn handle_look_requested(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.gs.settings.pointer_sensitivity;
        self.gs.walker.look(dx, dy, sensitivity);
    }
}
