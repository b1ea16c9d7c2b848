//! Configuration management for tracktube.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. Everything is read exactly once at startup into a [`Config`]
//! value which is then handed to the component constructors; no component
//! looks at the environment on its own.
//!
//! Lookup order for the `.env` file:
//! 1. `.env` in the current working directory
//! 2. `.env` in the local data directory (`~/.local/share/tracktube/.env` on Linux)
//!
//! Variables already present in the process environment always win.

use std::{env, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch";

pub const DEFAULT_PLAYLIST_ID: &str = "2nSHh0BiEoRjfOAF5HXLu9";
pub const DEFAULT_DOWNLOADER: &str = "youtube-dl";

const APP_DIR: &str = "tracktube";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("Error loading YouTube credentials: {0}")]
    InvalidClientJson(#[from] serde_json::Error),
    #[error("Error loading YouTube credentials: neither an `installed` nor a `web` client is defined")]
    NoClientCredentials,
    #[error("Error loading YouTube credentials: missing redirect URL")]
    MissingRedirectUri,
    #[error("Error loading YouTube credentials: invalid endpoint {0}")]
    InvalidEndpoint(String),
}

/// OAuth client registration of the Google project, as found under the
/// `installed` or `web` key of the downloaded client JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    pub auth_uri: String,
    pub token_uri: String,
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<OAuthClientConfig>,
    web: Option<OAuthClientConfig>,
}

impl OAuthClientConfig {
    /// Parses the client JSON. A `web` client takes precedence over an
    /// `installed` one, and at least one redirect URI is required.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ClientSecretFile = serde_json::from_str(json)?;
        let client = file
            .web
            .or(file.installed)
            .ok_or(ConfigError::NoClientCredentials)?;

        if client.redirect_uris.is_empty() {
            return Err(ConfigError::MissingRedirectUri);
        }

        Ok(client)
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris.first().map(String::as_str).unwrap_or_default()
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub playlist_id: String,
    pub youtube: OAuthClientConfig,
    pub token_path: PathBuf,
    pub downloader: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let spotify_client_id = require("SPOTIFY_CLIENT_ID")?;
        let spotify_client_secret = require("SPOTIFY_CLIENT_SECRET")?;
        let youtube = OAuthClientConfig::from_json(&require("YOUTUBE_CREDENTIALS_JSON")?)?;

        Ok(Config {
            spotify_client_id,
            spotify_client_secret,
            playlist_id: get("SPOTIFY_PLAYLIST_ID").unwrap_or_else(|| DEFAULT_PLAYLIST_ID.to_string()),
            youtube,
            token_path: get("TRACKTUBE_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_token_path),
            downloader: get("TRACKTUBE_DOWNLOADER").unwrap_or_else(|| DEFAULT_DOWNLOADER.to_string()),
        })
    }
}

/// Loads a `.env` file into the process environment.
///
/// Tries the working directory first, then the local data directory. Returns
/// the path of the file that was loaded, if any. A missing file is not an
/// error: the variables may as well come from the real environment.
pub fn load_env() -> Option<PathBuf> {
    if let Ok(path) = dotenv::dotenv() {
        return Some(path);
    }

    let path = data_dir().join(".env");
    dotenv::from_path(&path).ok().map(|_| path)
}

/// Default location of the credential cache:
/// `<local data dir>/tracktube/cache/token.json`.
pub fn default_token_path() -> PathBuf {
    let mut path = data_dir();
    path.push("cache/token.json");
    path
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}
