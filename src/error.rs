//! Domain error types for brokerdesk
//!
//! Provides structured error types for different domains:
//! - `SourceError` for list data sources
//! - `LifecycleError` for record status transitions
//! - `CatalogError` for loading the entity catalog
//! - `BrokerdeskError` as the top-level error type

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for brokerdesk
#[derive(Debug, Error)]
pub enum BrokerdeskError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Errors reported by a `ListDataSource`
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("Request for page {0} failed: {1}")]
    RequestFailed(u32, String),

    #[error("Page {0} is out of range")]
    PageOutOfRange(u32),

    #[error("Invalid page size {0}")]
    InvalidPageSize(usize),

    #[error("Data source unavailable")]
    Unavailable,
}

/// Errors related to record status changes
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Cannot move from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Status {0} does not apply to this record")]
    WrongKind(String),

    #[error("Record {0} not found")]
    RecordNotFound(i64),
}

/// Errors related to the entity catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse catalog {0}: {1}")]
    Parse(PathBuf, serde_json::Error),

    #[error("Record {record} has unknown status '{status}'")]
    InvalidStatus { record: i64, status: String },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// Result type alias for BrokerdeskError
pub type Result<T> = std::result::Result<T, BrokerdeskError>;

/// Result type alias for SourceError
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for LifecycleError
pub type LifecycleResult<T> = std::result::Result<T, LifecycleError>;
