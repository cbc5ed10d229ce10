//! Headless core of a third-person exploration game: capsule movement over an
//! octree of static and placed geometry, reticle placement of unit blocks, and a
//! streamed scalar field that sizes a particle cloud.
#![forbid(unsafe_code)]

pub mod app;
pub mod avatar;
pub mod camera;
pub mod config;
pub mod event;
pub mod gamestate;
pub mod hud;
pub mod input;
pub mod mode;
pub mod player;
pub mod raycast;
pub mod script;

#[cfg(test)]
mod stairs_tests;

pub use app::{App, AppOptions};
pub use config::{ConfigError, GameConfig, Settings};
