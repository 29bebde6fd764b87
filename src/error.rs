// src/error.rs

use thiserror::Error;

/// Failures loading or validating a policy configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid policy setting '{key}': {message}")]
    Invalid { key: String, message: String },
}

/// Errors surfaced to whoever drives a pipeline run.
///
/// Only the fatal cases live here. Bad dates, non-numeric quantities and
/// missing prices are coerced by the loader and never reach this type.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no '{column}' column found in {source_name}")]
    MissingColumn { source_name: String, column: String },

    #[error("no valid consumption records after normalization")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read workbook {source_name}: {message}")]
    Excel { source_name: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("synthetic generator: {0}")]
    Synthetic(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
