//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses and the asset directory is set
//! - Catch allow-list entries that can never match
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ServerConfig;

/// A single semantic problem in a config.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address is not a valid socket address: {0}")]
    InvalidBindAddress(String),

    #[error("assets.dir must not be empty")]
    EmptyAssetDir,

    #[error("cors.allow_origins entry is empty")]
    EmptyOrigin,

    #[error("cors.allow_origins entry has a trailing slash and will never match an Origin header: {0}")]
    TrailingSlashOrigin(String),
}

/// Validate a config, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.assets.dir.is_empty() {
        errors.push(ValidationError::EmptyAssetDir);
    }

    for origin in &config.cors.allow_origins {
        if origin.is_empty() {
            errors.push(ValidationError::EmptyOrigin);
        } else if origin != "*" && origin.ends_with('/') {
            // Origin headers never carry a trailing slash; the allow-list
            // comparison is exact, so such an entry is dead.
            errors.push(ValidationError::TrailingSlashOrigin(origin.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
