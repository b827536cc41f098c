use thiserror::Error;

/// Convenient result alias for the routing core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A location with this name is already registered.
    #[error("location '{name}' already exists")]
    DuplicateName { name: String },

    /// Edit or removal targeted a name that is not registered.
    #[error("location '{name}' not found")]
    NotFound { name: String },

    /// A route waypoint named a location the store does not know.
    #[error("location '{name}' does not exist in the store")]
    UnknownLocation { name: String },

    /// Malformed waypoint input, index or parameter.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("a route needs at least 2 waypoints, got {count}")]
    InsufficientWaypoints { count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }
}
