use std::collections::{BTreeMap, VecDeque};

use glowfield_blocks::GridCoord;

use crate::mode::{MenuAction, Mode};
use crate::raycast::{EditAction, EditError};

pub enum Event {
    // Time housekeeping
    Tick,

    // Input-derived intents
    MovementRequested { dt_ms: f32 },
    LookRequested { dx: f32, dy: f32 },
    ZoomRequested { delta: f32 },
    EditRequested { action: EditAction },
    EscapePressed,
    MenuActionRequested { action: MenuAction },
    CaptureChanged { captured: bool },
    CaptureGraceExpired,

    // Outcomes
    BlockPlaced { coord: GridCoord, slot: u32 },
    BlockRemoved { coord: GridCoord },
    EditRejected { action: EditAction, reason: EditError },
    ModeChanged { from: Mode, to: Mode },
    SettingsChanged { strafe_mode: bool, pointer_sensitivity: f32 },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick => "Tick",
            Event::MovementRequested { .. } => "MovementRequested",
            Event::LookRequested { .. } => "LookRequested",
            Event::ZoomRequested { .. } => "ZoomRequested",
            Event::EditRequested { .. } => "EditRequested",
            Event::EscapePressed => "EscapePressed",
            Event::MenuActionRequested { .. } => "MenuActionRequested",
            Event::CaptureChanged { .. } => "CaptureChanged",
            Event::CaptureGraceExpired => "CaptureGraceExpired",
            Event::BlockPlaced { .. } => "BlockPlaced",
            Event::BlockRemoved { .. } => "BlockRemoved",
            Event::EditRejected { .. } => "EditRejected",
            Event::ModeChanged { .. } => "ModeChanged",
            Event::SettingsChanged { .. } => "SettingsChanged",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        self.emit_at(self.now, kind)
    }

    pub fn emit_at(&mut self, tick: u64, kind: Event) -> u64 {
        let id = self.alloc_id();
        let env = EventEnvelope { id, tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
        id
    }

    pub fn emit_after(&mut self, delta: u64, kind: Event) -> u64 {
        self.emit_at(self.now.wrapping_add(delta), kind)
    }

    /// Next event due this tick; events emitted while draining are picked up too.
    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.by_tick.get_mut(&self.now)?.pop_front()
    }

    /// Events still waiting, across all ticks.
    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }

    pub fn advance_tick(&mut self) {
        // clean empty current bucket
        if self.by_tick.get(&self.now).is_some_and(VecDeque::is_empty) {
            self.by_tick.remove(&self.now);
        }
        self.now = self.now.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_within_a_tick() {
        let mut q = EventQueue::new();
        q.emit_now(Event::Tick);
        q.emit_now(Event::EscapePressed);
        assert_eq!(q.pop_ready().map(|e| e.kind.name()), Some("Tick"));
        assert_eq!(q.pop_ready().map(|e| e.kind.name()), Some("EscapePressed"));
        assert!(q.pop_ready().is_none());
    }

    #[test]
    fn delayed_events_wait_for_their_tick() {
        let mut q = EventQueue::new();
        let id = q.emit_after(1, Event::CaptureGraceExpired);
        assert!(q.pop_ready().is_none());
        assert_eq!(q.pending(), 1);
        q.advance_tick();
        let env = q.pop_ready().unwrap();
        assert_eq!(env.id, id);
        assert_eq!(env.tick, 1);
        q.advance_tick();
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn ids_are_unique_and_nonzero() {
        let mut q = EventQueue::new();
        let a = q.emit_now(Event::Tick);
        let b = q.emit_at(5, Event::Tick);
        assert!(a != 0 && b != 0 && a != b);
    }
}
