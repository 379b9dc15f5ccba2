use fw_core::FleetError;
use thiserror::Error;

use crate::MapHandle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("map surface unavailable: {0}")]
    Unavailable(String),

    #[error("container {0:?} is already bound to a map")]
    ContainerBusy(String),

    #[error("unknown map {0}")]
    UnknownMap(MapHandle),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

impl From<SurfaceError> for FleetError {
    fn from(err: SurfaceError) -> Self {
        FleetError::MapSurfaceUnavailable(err.to_string())
    }
}
