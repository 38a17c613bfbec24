//! API key resolution.
//!
//! The single secret this system needs is resolved at process start by
//! trying, in order: a TOML secrets file (the managed-store analog), then a
//! `.env` file / the process environment. Absence in both sources is a
//! fatal configuration error raised before the dataset is read.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ServerError};

/// Environment variable consulted after the secrets file.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Deserialize)]
struct SecretsFile {
    openai_api_key: Option<String>,
}

fn from_secrets_file(path: &Path) -> Option<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "secrets file not readable");
            return None;
        }
    };
    match toml::from_str::<SecretsFile>(&contents) {
        Ok(secrets) => secrets.openai_api_key.filter(|k| !k.trim().is_empty()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "secrets file is not valid TOML");
            None
        }
    }
}

/// Resolve the API key from the secrets file, then the environment.
///
/// Loads `.env` into the environment (best effort) before consulting
/// [`API_KEY_ENV`].
///
/// # Errors
///
/// Returns [`ServerError::Config`] if neither source provides a key.
pub fn resolve_api_key(secrets_path: &Path) -> Result<String> {
    dotenvy::dotenv().ok();
    resolve_api_key_from(secrets_path, |name| std::env::var(name).ok())
}

/// Resolve the API key with an explicit environment lookup instead of the
/// process environment. The source order is unchanged: the secrets file is
/// consulted first, then `env` with [`API_KEY_ENV`].
///
/// # Errors
///
/// Returns [`ServerError::Config`] if neither source provides a key.
pub fn resolve_api_key_from(
    secrets_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    if let Some(key) = from_secrets_file(secrets_path) {
        debug!(path = %secrets_path.display(), "API key loaded from secrets file");
        return Ok(key);
    }

    if let Some(key) = env(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        debug!("API key loaded from environment");
        return Ok(key);
    }

    Err(ServerError::Config(format!(
        "{API_KEY_ENV} not found in {} or the environment",
        secrets_path.display()
    )))
}
