//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API, authenticated with the
//! client-credentials grant. No user authorization is involved: the playlist
//! must be readable with an application token.
//!
//! - [`auth`] - `POST /api/token` with `grant_type=client_credentials`
//! - [`playlist`] - `GET /playlists/{id}` and the conversion of its entries
//!   into [`crate::types::Track`] values

pub mod auth;
pub mod playlist;
