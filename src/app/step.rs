use super::App;
use crate::event::Event;
use crate::hud::{self, HudSnapshot};
use crate::input::Key;
use crate::mode::MenuAction;
use crate::raycast::{self, EditAction};
use crate::script::ScriptFrame;

/// Nominal viewport width the compass offset is computed for.
const HUD_WIDTH: f32 = 1280.0;

impl App {
    /// Advance one frame of `dt_ms` milliseconds.
    pub fn step(&mut self, dt_ms: f32) {
        self.process_settings_events();

        self.queue.emit_now(Event::Tick);
        let queued = self.input.drain();
        if self.gs.mode.is_playing() {
            let captured = self.input.captured();
            let (dx, dy) = queued.pointer;
            if captured && (dx != 0.0 || dy != 0.0) {
                self.queue.emit_now(Event::LookRequested { dx, dy });
            }
            for delta in queued.scroll {
                self.queue.emit_now(Event::ZoomRequested { delta });
            }
            self.queue.emit_now(Event::MovementRequested { dt_ms });
            if captured {
                for action in queued.buttons.into_iter().filter_map(EditAction::from_button) {
                    self.queue.emit_now(Event::EditRequested { action });
                }
            }
        }

        while let Some(env) = self.queue.pop_ready() {
            self.evt_processed_total += 1;
            *self
                .evt_processed_by
                .entry(env.kind.name().to_string())
                .or_insert(0) += 1;
            self.handle_event(env);
        }

        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.gs.elapsed_ms += dt_ms as f64;
            self.fps.frame(dt_ms as f64);
        }
        self.update_field();
        self.refresh_view();
        self.update_debug_stats();

        self.gs.tick = self.gs.tick.wrapping_add(1);
        self.queue.advance_tick();
    }

    /// Camera, avatar fade and reticle marker for the pose after this frame's movement.
    fn refresh_view(&mut self) {
        self.gs.pose = self.gs.camera_pose();
        self.gs.avatar.update_fade(self.gs.rig.distance);
        self.gs.marker = if self.gs.mode.is_playing() {
            raycast::resolve_target(
                &self.gs.pose.reticle(),
                &self.gs.registry,
                self.gs.walker.pos,
                self.gs.max_range,
            )
            .map(|hit| raycast::face_marker(&hit))
        } else {
            None
        };
    }

    fn update_field(&mut self) {
        self.feed.poll();
        let Some(data) = self.feed.data().cloned() else {
            return;
        };
        let t = self.field_cfg.field_time(self.gs.elapsed_ms);
        let idx = data.time_index(t);
        if self.last_field_index != Some(idx) {
            self.particles.update(&data, t);
            self.last_field_index = Some(idx);
        }
    }

    fn update_debug_stats(&mut self) {
        let reg = self.gs.registry.stats();
        let mut by: Vec<(String, usize)> = self
            .evt_processed_by
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        by.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        self.debug_stats.events_processed = self.evt_processed_total;
        self.debug_stats.queued_events = self.queue.pending();
        self.debug_stats.events_by = by;
        self.debug_stats.blocks = reg.blocks;
        self.debug_stats.indexed_triangles = reg.indexed_triangles;
        self.debug_stats.index_rebuilds = reg.rebuilds;
        self.debug_stats.visible_particles = if self.last_field_index.is_some() {
            self.particles.visible()
        } else {
            0
        };
    }

    pub fn key_down(&mut self, key: Key) {
        if self.input.key_down(key) && key == Key::Escape {
            self.queue.emit_now(Event::EscapePressed);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn menu_action(&mut self, action: MenuAction) {
        self.queue.emit_now(Event::MenuActionRequested { action });
    }

    /// Pointer capture granted or revoked by the host.
    pub fn set_pointer_capture(&mut self, captured: bool) {
        if self.input.set_captured(captured) {
            self.queue.emit_now(Event::CaptureChanged { captured });
        }
    }

    pub fn apply_script_frame(&mut self, frame: &ScriptFrame<'_>) {
        let step = frame.step;
        for key in self.input.set_held(step.keys.iter().copied()) {
            if key == Key::Escape {
                self.queue.emit_now(Event::EscapePressed);
            }
        }
        if let Some([dx, dy]) = step.look {
            self.input.pointer_moved(dx, dy);
        }
        if !frame.first {
            return;
        }
        if let Some(note) = &step.note {
            log::info!("[tick {}] script: {}", self.gs.tick, note);
        }
        if let Some(action) = step.action {
            self.menu_action(action);
        }
        if let Some(captured) = step.capture {
            self.set_pointer_capture(captured);
        }
        if let Some(button) = step.click {
            self.input.button_down(button);
        }
        if let Some(delta) = step.scroll {
            self.input.scrolled(delta);
        }
        if let Some(strafe) = step.strafe_mode {
            self.set_strafe_mode(strafe);
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        let yaw = self.gs.walker.yaw;
        HudSnapshot {
            name: self.name.clone(),
            yaw: hud::yaw_text(yaw),
            position: hud::position_text(self.gs.walker.pos),
            fps: self.fps.fps(),
            compass_offset: hud::compass_offset(yaw.to_degrees(), HUD_WIDTH),
            mode: format!("{:?}", self.gs.mode.mode()),
            field: self.feed.state().label().to_string(),
            edit: self.gs.last_edit.to_string(),
            blocks: self.gs.registry.len(),
        }
    }
}
