use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Menu,
    Settings,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Start,
    OpenSettings,
    CloseSettings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
}

/// Menu / settings / playing, with pointer-capture loss as an implicit pause.
#[derive(Debug)]
pub struct ModeMachine {
    mode: Mode,
    previous: Option<Mode>,
    grace_armed: bool,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self {
            mode: Mode::Menu,
            previous: None,
            grace_armed: false,
        }
    }
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Playing
    }

    fn go(&mut self, to: Mode) -> Option<ModeChange> {
        let from = self.mode;
        if from == to {
            return None;
        }
        if to == Mode::Settings {
            self.previous = Some(from);
        }
        self.mode = to;
        Some(ModeChange { from, to })
    }

    pub fn apply(&mut self, action: MenuAction) -> Option<ModeChange> {
        match action {
            MenuAction::Start => self.go(Mode::Playing),
            MenuAction::OpenSettings => self.go(Mode::Settings),
            MenuAction::CloseSettings => self.close_settings(),
        }
    }

    fn close_settings(&mut self) -> Option<ModeChange> {
        if self.mode != Mode::Settings {
            return None;
        }
        let back = self.previous.take().unwrap_or(Mode::Menu);
        self.go(back)
    }

    /// Escape only means something inside the settings screen.
    pub fn escape(&mut self) -> Option<ModeChange> {
        self.close_settings()
    }

    /// Record a capture loss. Returns true when a grace check should be scheduled.
    pub fn capture_lost(&mut self) -> bool {
        if self.mode != Mode::Playing {
            return false;
        }
        self.grace_armed = true;
        true
    }

    /// Run the deferred check one frame after a capture loss.
    pub fn grace_expired(&mut self, captured: bool) -> Option<ModeChange> {
        if !std::mem::take(&mut self.grace_armed) {
            return None;
        }
        if self.mode == Mode::Playing && !captured {
            self.go(Mode::Settings)
        } else {
            None
        }
    }
}
