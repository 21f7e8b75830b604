//! Error types for document operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Malformed document source: {0}")]
    Document(String),

    #[error("Invalid node type: {0}")]
    InvalidNodeType(u8),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
