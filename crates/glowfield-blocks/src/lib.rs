//! Placed unit cubes, the protected static set, and the collision index kept in sync with both.
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod registry;

pub use coord::{GridCoord, SurfaceId};
pub use error::{PlaceError, RemoveError};
pub use registry::{
    BlockRegistry, DEFAULT_CAPACITY, PlaceableShape, PlaceableSurface, RegistryStats,
};
