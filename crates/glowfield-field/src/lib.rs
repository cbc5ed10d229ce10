//! Time-varying scalar field: wave simulation, background delivery, and particle sizing.
#![forbid(unsafe_code)]

pub mod data;
pub mod feed;
pub mod particles;
pub mod wave;

pub use data::{FieldData, FieldDims, particle_size};
pub use feed::{FeedConfig, FeedError, FeedState, FieldFeed};
pub use particles::{BASE_SIZE, EmParticles};
pub use wave::{WaveParams, simulate};
