//! Shared foundation for the Instagram comment sentiment workspace:
//! application configuration, the sentiment label domain type, and the
//! tabular data model with CSV/Excel I/O.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod io;
pub mod label;
pub mod table;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use label::{Classification, SentimentLabel};
pub use table::{resolve_column, DataTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet parse error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("table contains no rows")]
    Empty,

    #[error("no column matching '{column}' found")]
    ColumnNotFound { column: String },

    #[error("unsupported table format: {name}")]
    UnsupportedFormat { name: String },
}
