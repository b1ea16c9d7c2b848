use reqwest::Client;
use thiserror::Error;

use crate::{
    config::SPOTIFY_API_URL,
    spotify::auth,
    types::{PlaylistResponse, Track},
    warning,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Error authenticating with Spotify: {0}")]
    Auth(reqwest::Error),
    #[error("Error retrieving Spotify playlist: {0}")]
    Fetch(reqwest::Error),
}

pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
}

impl SpotifyClient {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        SpotifyClient {
            http: Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Fetches the playlist and returns its tracks in playlist order.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, CatalogError> {
        let token = auth::client_credentials_token(&self.http, &self.client_id, &self.client_secret)
            .await
            .map_err(CatalogError::Auth)?;

        let playlist = self.get_playlist(playlist_id, &token).await.map_err(CatalogError::Fetch)?;

        Ok(tracks_from_playlist(playlist))
    }

    async fn get_playlist(&self, playlist_id: &str, token: &str) -> Result<PlaylistResponse, reqwest::Error> {
        let api_url = format!(
            "{uri}/playlists/{id}",
            uri = SPOTIFY_API_URL,
            id = playlist_id
        );

        self.http
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json::<PlaylistResponse>()
            .await
    }
}

/// Maps playlist entries to tracks credited to their first artist. Entries
/// without track data (removed or local files) or without any artist are
/// skipped.
pub fn tracks_from_playlist(playlist: PlaylistResponse) -> Vec<Track> {
    playlist
        .tracks
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let Some(track) = item.track else {
                warning!("Skipping playlist entry {} without track data", i + 1);
                return None;
            };

            let Some(artist) = track.artists.into_iter().next() else {
                warning!("Skipping {} without artist", track.name);
                return None;
            };

            Some(Track {
                title: track.name,
                artist: artist.name,
            })
        })
        .collect()
}
