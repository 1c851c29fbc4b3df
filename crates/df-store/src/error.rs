use df_core::DroneId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("route for drone {0} has no usable waypoints")]
    EmptyRoute(DroneId),

    #[error("no route registered for drone {0}")]
    UnknownDrone(DroneId),
}

pub type StoreResult<T> = Result<T, StoreError>;
