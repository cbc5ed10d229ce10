use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::player::MoveInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    W,
    S,
    A,
    D,
    Shift,
    Space,
    I,
    K,
    J,
    L,
    Escape,
}

/// Pointer and wheel input gathered since the last tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueuedInput {
    pub pointer: (f32, f32),
    pub buttons: Vec<u8>,
    pub scroll: Vec<f32>,
}

impl QueuedInput {
    pub fn is_empty(&self) -> bool {
        self.pointer == (0.0, 0.0) && self.buttons.is_empty() && self.scroll.is_empty()
    }
}

/// Keyboard state plus per-tick pointer queues.
///
/// Keys are read as current up/down state; everything else accumulates until
/// [`InputState::drain`] at the start of a tick.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    queued: QueuedInput,
    captured: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the key was not already held.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Replace the whole held set.
    pub fn set_held<I: IntoIterator<Item = Key>>(&mut self, keys: I) -> Vec<Key> {
        let next: HashSet<Key> = keys.into_iter().collect();
        let pressed = next.difference(&self.held).copied().collect();
        self.held = next;
        pressed
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        self.queued.pointer.0 += dx;
        self.queued.pointer.1 += dy;
    }

    pub fn button_down(&mut self, button: u8) {
        self.queued.buttons.push(button);
    }

    pub fn scrolled(&mut self, delta_y: f32) {
        self.queued.scroll.push(delta_y);
    }

    #[inline]
    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Returns true when capture actually changed.
    pub fn set_captured(&mut self, captured: bool) -> bool {
        let changed = self.captured != captured;
        self.captured = captured;
        changed
    }

    pub fn drain(&mut self) -> QueuedInput {
        std::mem::take(&mut self.queued)
    }

    pub fn move_input(&self, strafe: bool) -> MoveInput {
        MoveInput {
            forward: self.is_down(Key::W),
            back: self.is_down(Key::S),
            left: self.is_down(Key::A),
            right: self.is_down(Key::D),
            run: self.is_down(Key::Shift),
            jump: self.is_down(Key::Space),
            pitch_up: self.is_down(Key::I),
            pitch_down: self.is_down(Key::K),
            yaw_left: self.is_down(Key::J),
            yaw_right: self.is_down(Key::L),
            strafe,
        }
    }
}
