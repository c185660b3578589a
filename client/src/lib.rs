//! Cadastro client - manages users against the usuarios REST API.
//!
//! The API is tried first for every action. When it cannot be reached the
//! change is applied to the in-memory list instead, and the list is flagged
//! as diverged until the next successful refresh.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod record_store;

pub use api::ApiClient;
pub use config::{ApiConfig, ConfigError, DeploymentMode};
pub use error::ApiError;
pub use record_store::{Outcome, RecordStore};
