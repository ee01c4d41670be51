//! Comment-export client: turns an Instagram post URL into a downloaded,
//! validated comment table on disk.
//!
//! The export service performs the actual collection. This crate starts an
//! export run, polls it to a terminal status inside a bounded window,
//! downloads the result, and only hands back files that parse as tables.
//! Partial exports are never accepted.

pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::ExporterClient;
pub use error::ExtractError;
pub use extract::extract_comments;
pub use types::{ExportJob, ExportRequest, PollSettings};
