use crate::{GridCoord, SurfaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("instance pool exhausted ({capacity} blocks)")]
    PoolExhausted { capacity: usize },
    #[error("cell {0} is already occupied")]
    AlreadyOccupied(GridCoord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemoveError {
    #[error("no block for {0}")]
    NotFound(SurfaceId),
    #[error("{0} is protected scene geometry")]
    ProtectedGeometry(SurfaceId),
}
