//! # Intake Databricks
//!
//! [`VolumeClient`](intake_files::VolumeClient) implementation backed by the Databricks
//! Files API (`PUT /api/2.0/fs/files/Volumes/...`).
//!
//! Authentication is a bearer token supplied through configuration; this crate does not
//! obtain or refresh tokens itself.

mod client;
mod config;

pub use client::FilesApiClient;
pub use config::DatabricksConfig;

/// Errors raised while constructing a [`FilesApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum DatabricksError {
    #[error("invalid Databricks configuration: {0}")]
    Config(String),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
