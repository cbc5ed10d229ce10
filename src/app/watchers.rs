use super::App;
use crate::config::Settings;
use crate::event::Event;

impl App {
    pub fn process_settings_events(&mut self) {
        let Some(rx) = &self.settings_event_rx else {
            return;
        };
        if rx.try_iter().count() == 0 {
            return;
        }
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        match Settings::load_from_path(path) {
            Ok(s) => {
                if s == self.gs.settings {
                    return;
                }
                log::info!("Reloaded settings from {}", path.display());
                self.gs.rig.far = s.far_clip;
                self.gs.settings = s;
                self.emit_settings_changed();
            }
            Err(e) => log::warn!("Settings reload failed: {}", e),
        }
    }

    pub fn set_strafe_mode(&mut self, strafe: bool) {
        if self.gs.settings.strafe_mode == strafe {
            return;
        }
        self.gs.settings.strafe_mode = strafe;
        self.persist_settings();
        self.emit_settings_changed();
    }

    pub fn set_pointer_sensitivity(&mut self, sensitivity: f32) {
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            log::warn!("ignoring pointer sensitivity {}", sensitivity);
            return;
        }
        self.gs.settings.pointer_sensitivity = sensitivity;
        self.persist_settings();
        self.emit_settings_changed();
    }

    pub fn set_far_clip(&mut self, far: f32) {
        if !far.is_finite() || far <= 0.0 {
            log::warn!("ignoring far clip {}", far);
            return;
        }
        self.gs.settings.far_clip = far;
        self.gs.rig.far = far;
        self.persist_settings();
        self.emit_settings_changed();
    }

    fn emit_settings_changed(&mut self) {
        self.queue.emit_now(Event::SettingsChanged {
            strafe_mode: self.gs.settings.strafe_mode,
            pointer_sensitivity: self.gs.settings.pointer_sensitivity,
        });
    }

    fn persist_settings(&self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(e) = self.gs.settings.save_to_path(path) {
            log::warn!("saving settings to {} failed: {}", path.display(), e);
        }
    }
}
