use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glowfield::script::{Script, ScriptPlayer};
use glowfield::{App, AppOptions, GameConfig, Settings};
use glowfield_scene::Scene;

#[derive(Parser, Debug)]
#[command(version, about = "Headless frame driver for the glowfield exploration core")]
struct Args {
    /// Game tunables (TOML)
    #[arg(long, default_value = "assets/glowfield.toml")]
    config: PathBuf,

    /// User settings file; created with defaults when missing
    #[arg(long, default_value = "settings.toml")]
    settings: PathBuf,

    /// Input script (TOML); the built-in demo runs when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Frames to simulate; 0 runs until the script ends
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Simulated frame length in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// Log a HUD line every N frames (0 disables)
    #[arg(long, default_value_t = 30)]
    hud_every: u64,

    /// Default log filter; RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Skip the background field simulation
    #[arg(long)]
    no_field: bool,

    /// Reload settings when the file changes on disk
    #[arg(long)]
    watch_settings: bool,

    /// Player name shown on the HUD
    #[arg(long, default_value = "player")]
    name: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_env("RUST_LOG")
        .init();

    let config = GameConfig::load_or_default(&args.config);
    let settings = Settings::load_or_default(&args.settings);
    if !args.settings.exists() {
        settings.save_to_path(&args.settings)?;
    }
    let script = match &args.script {
        Some(path) => Script::load_from_path(path)?,
        None => Script::demo(),
    };
    let frames = if args.frames == 0 {
        script.total_frames()
    } else {
        args.frames
    };

    let mut app = App::new(
        config,
        settings,
        Scene::standard(),
        AppOptions {
            name: args.name.clone(),
            settings_path: Some(args.settings.clone()),
            watch_settings: args.watch_settings,
            field_enabled: !args.no_field,
        },
    );
    let mut player = ScriptPlayer::new(script);

    log::info!("running {} frames of {} ms", frames, args.frame_ms);
    let started = Instant::now();
    for frame in 0..frames {
        if let Some(input) = player.next_frame() {
            app.apply_script_frame(&input);
        }
        app.step(args.frame_ms);
        if args.hud_every > 0 && frame % args.hud_every == 0 {
            log::info!("{}", app.hud());
        }
    }

    let stats = &app.debug_stats;
    log::info!(
        "done in {:.2?}: {} events, {} blocks, {} indexed triangles, {} index rebuilds, {} visible particles",
        started.elapsed(),
        stats.events_processed,
        stats.blocks,
        stats.indexed_triangles,
        stats.index_rebuilds,
        stats.visible_particles
    );
    for (name, n) in stats.events_by.iter().take(8) {
        log::debug!("  {:<22} {}", name, n);
    }
    log::info!("{}", app.hud());
    Ok(())
}
