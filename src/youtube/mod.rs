//! # YouTube Integration Module
//!
//! Everything that talks to Google: the OAuth authorization-code bootstrap
//! with its credential cache, and the Data API search used to find a video
//! per track.
//!
//! ## Authentication
//!
//! [`auth::bootstrap`] returns the cached credential when the cache file can
//! be read. Otherwise it prints an authorization URL requesting offline
//! access, waits for the operator to paste back the redirect URL, exchanges
//! the contained code and caches the resulting credential. Only the first run
//! is interactive.
//!
//! ## Search
//!
//! [`search::YoutubeClient`] performs one `search.list` call per query with
//! `maxResults=1` and returns the video id of the top hit. Expired access
//! tokens are refreshed in memory through [`crate::management::TokenManager`].

pub mod auth;
pub mod search;
