use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(FieldErrors),
}
