//! # CLI Module
//!
//! Command implementations for the `lbcli` binary. Each command builds a
//! [`Client`] from the environment, resolves the user token when it needs
//! one, calls the library and renders the result as coloured messages or
//! tables.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Validates a user token and stores it locally
//!
//! ### Listens
//!
//! - [`import`] - Submits listens from JSON files in batches
//! - [`now_playing`] / [`listen`] - Submits a single track
//! - [`listens`] - Shows a page of a user's listens
//!
//! ### Social
//!
//! - [`follow`], [`unfollow`], [`followers`], [`following`]
//!
//! ### Statistics, Playlists and Pins
//!
//! - [`stats`], [`playlists`], [`pins`]
//!
//! ## Token Resolution
//!
//! Commands that write to ListenBrainz look for a token in this order:
//! 1. `--token` on the command line
//! 2. `LISTENBRAINZ_TOKEN` in the environment or `.env` file
//! 3. The token stored by `lbcli auth`
//!
//! ## Error Handling
//!
//! Fatal problems (no token, unreadable input) end the process through
//! [`crate::error!`]. Failures of a single batch during an import are
//! reported with [`crate::warning!`] and the import carries on.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    listenbrainz::{Client, ClientConfig},
    management::TokenManager,
};

mod auth;
mod listens;
mod playlists;
mod social;
mod stats;

pub use auth::auth;
pub use listens::{import, listen, listens, now_playing};
pub use playlists::{pins, playlists};
pub use social::{follow, followers, following, unfollow};
pub use stats::stats;

pub(crate) fn client() -> Client {
    Client::with_config(ClientConfig::from_env())
}

pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Returns the token to act with, or ends the process when there is none.
pub(crate) async fn resolve_token(explicit: Option<String>) -> String {
    if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
        return token;
    }
    if let Some(token) = config::user_token() {
        return token;
    }

    match TokenManager::load().await {
        Ok(mgr) => mgr.token().to_string(),
        Err(e) => {
            error!(
                "No user token found. Run lbcli auth or set LISTENBRAINZ_TOKEN.\n Error: {}",
                e
            );
        }
    }
}
