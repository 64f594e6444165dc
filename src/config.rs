//! Configuration management for lbcli.
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file in the local data directory. Unlike credentials for OAuth clients,
//! everything here has a sensible default, so a missing `.env` file is not
//! an error.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.listenbrainz.org";
pub const DEFAULT_MUSICBRAINZ_URL: &str = "https://musicbrainz.org/ws/2";
pub const DEFAULT_CRITIQUEBRAINZ_URL: &str = "https://critiquebrainz.org/ws/1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/lbcli/.env`
/// - macOS: `~/Library/Application Support/lbcli/.env`
/// - Windows: `%LOCALAPPDATA%/lbcli/.env`
///
/// The parent directory is created when missing. Variables already present in
/// the environment are not overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lbcli/.env");
    path
}

/// Returns the ListenBrainz API root (`LISTENBRAINZ_API_URL`).
///
/// The value is normalised by the client, so both `https://host` and
/// `https://host/1/` are accepted.
pub fn api_url() -> String {
    env_or("LISTENBRAINZ_API_URL", DEFAULT_API_URL)
}

/// Returns the MusicBrainz web service root (`MUSICBRAINZ_API_URL`).
pub fn musicbrainz_url() -> String {
    env_or("MUSICBRAINZ_API_URL", DEFAULT_MUSICBRAINZ_URL)
}

/// Returns the CritiqueBrainz web service root (`CRITIQUEBRAINZ_API_URL`).
pub fn critiquebrainz_url() -> String {
    env_or("CRITIQUEBRAINZ_API_URL", DEFAULT_CRITIQUEBRAINZ_URL)
}

/// Returns the user token from `LISTENBRAINZ_TOKEN`, if set and non-empty.
pub fn user_token() -> Option<String> {
    env::var("LISTENBRAINZ_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
