//! Command implementations.

pub mod classify;
pub mod evaluate;

pub use self::classify::execute_classify;
pub use self::evaluate::execute_evaluate;

use crate::error::{CliError, Result};
use secrecy::SecretString;
use std::env;
use std::path::Path;
use tracing::{debug, warn};

/// Load a `.env` file from the working directory or its parents.
///
/// Variables already set in the process environment are not overridden.
/// A missing file is silent; an unreadable one is logged and skipped.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring .env file: {}", e),
    }
}

/// Load variables from a specific env file.
pub fn load_env_from(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .map_err(|e| CliError::Config(format!("Failed to load {}: {}", path.display(), e)))
}

/// Read a credential from the environment; unset or blank counts as missing.
pub(crate) fn read_credential(var: &str) -> Result<SecretString> {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| CliError::MissingCredential(var.to_string()))
}
