use thiserror::Error;

/// Errors raised while constructing node values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("invalid border thickness {0}")]
    InvalidBorder(f64),
}
