//! Metarename - batch title tagging for media files
//!
//! Files are gathered into a [`collection::FileCollection`], a set of rename rules is
//! evaluated over the checked entries, and each resulting name is written into the
//! file's title tag by a [`tags::TagWriter`]. The [`pipeline::BatchApplyPipeline`] ties
//! the pieces together and decides what happens when a write fails.

use thiserror::Error;

pub mod cli;
pub mod collection;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod tags;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MetaRenameError {
    /// Files could not be added to the collection
    #[error("{0}")]
    Collection(#[from] collection::CollectionError),
    /// A rule could not be compiled or evaluated
    #[error("Rule error: {0}")]
    Rule(#[from] rules::RuleError),
    /// A batch apply could not start
    #[error("{0}")]
    Apply(#[from] pipeline::ApplyError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
    /// Some files of a batch could not be written
    #[error("{failed} file(s) could not be written")]
    WriteFailures { failed: usize },
    /// JSON output failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MetaRenameError>;
