use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use glowfield_field::{EmParticles, FieldFeed};
use glowfield_scene::Scene;

use super::{App, DebugStats};
use crate::config::{GameConfig, Settings};
use crate::event::EventQueue;
use crate::gamestate::GameState;
use crate::hud::FpsCounter;
use crate::input::InputState;

/// Host-side choices that are not part of the game config.
#[derive(Clone, Debug)]
pub struct AppOptions {
    pub name: String,
    /// Where settings are saved; `None` keeps them in memory only.
    pub settings_path: Option<PathBuf>,
    pub watch_settings: bool,
    pub field_enabled: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            name: "player".to_string(),
            settings_path: None,
            watch_settings: false,
            field_enabled: false,
        }
    }
}

impl App {
    pub fn new(config: GameConfig, settings: Settings, scene: Scene, opts: AppOptions) -> Self {
        log::info!(
            "scene: {} surfaces, {} triangles",
            scene.surfaces.len(),
            scene.triangle_count()
        );
        let gs = GameState::new(scene, &config, settings);
        let stats = gs.registry.index().stats();
        log::info!(
            "collision index: {} triangles, {} nodes, {} leaves, depth {}",
            stats.triangles,
            stats.nodes,
            stats.leaves,
            stats.max_depth
        );

        let field_cfg = config.field.clone();
        let feed = if opts.field_enabled && field_cfg.enabled {
            let feed_cfg = field_cfg.feed_config();
            log::info!(
                "field loader starts in {} ms ({:?})",
                feed_cfg.start_delay.as_millis(),
                feed_cfg.dims
            );
            FieldFeed::wave(&feed_cfg)
        } else {
            FieldFeed::disabled()
        };
        let particles = EmParticles::seeded(
            field_cfg.particle_count,
            field_cfg.slab_size(),
            field_cfg.seed,
        );

        let settings_event_rx = match (&opts.settings_path, opts.watch_settings) {
            (Some(path), true) => Some(spawn_settings_watcher(path.clone())),
            _ => None,
        };

        Self {
            gs,
            queue: EventQueue::new(),
            input: InputState::new(),
            feed,
            particles,
            fps: FpsCounter::default(),
            debug_stats: DebugStats::default(),
            name: opts.name,
            field_cfg,
            last_field_index: None,
            evt_processed_total: 0,
            evt_processed_by: HashMap::new(),
            settings_path: opts.settings_path,
            settings_event_rx,
        }
    }
}

/// File watcher for the settings file; each change sends one unit on the channel.
fn spawn_settings_watcher(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let mut watcher = match notify::recommended_watcher(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    match event.kind {
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                            let _ = tx.send(());
                        }
                        _ => {}
                    }
                }
            },
        ) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("settings watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
            log::warn!("cannot watch {}: {}", path.display(), e);
            return;
        }
        log::info!("watching {} for changes", path.display());
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}
