use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use glowfield_field::{EmParticles, FieldFeed};

use crate::config::FieldConfig;
use crate::event::EventQueue;
use crate::gamestate::GameState;
use crate::hud::FpsCounter;
use crate::input::InputState;

pub struct App {
    pub gs: GameState,
    pub queue: EventQueue,
    pub input: InputState,
    pub feed: FieldFeed,
    pub particles: EmParticles,
    pub fps: FpsCounter,
    pub debug_stats: DebugStats,
    pub name: String,
    pub(crate) field_cfg: FieldConfig,
    pub(crate) last_field_index: Option<usize>,
    pub(crate) evt_processed_total: usize,
    pub(crate) evt_processed_by: HashMap<String, usize>,
    pub(crate) settings_path: Option<PathBuf>,
    pub(crate) settings_event_rx: Option<Receiver<()>>,
}

#[derive(Default, Debug, Clone)]
pub struct DebugStats {
    pub events_processed: usize,
    pub queued_events: usize,
    pub events_by: Vec<(String, usize)>,
    pub blocks: usize,
    pub indexed_triangles: usize,
    pub index_rebuilds: u64,
    pub visible_particles: usize,
}
