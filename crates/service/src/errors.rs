use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input fields failed their checks; the message lists every failing field.
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
    #[error("{0}")]
    NotFound(String),
    /// A foreign key on the input does not resolve.
    #[error("Invalid {field}: {value}")]
    InvalidReference { field: &'static str, value: u64 },
    /// Delete blocked by live references.
    #[error("{0}")]
    Conflict(String),
    /// Malformed listing parameters.
    #[error("{0}")]
    BadRequest(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: u64) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn in_use(entity: &str, id: u64, count: usize) -> Self {
        Self::Conflict(format!("{} {} is in use by {} resources", entity, id, count))
    }
}
