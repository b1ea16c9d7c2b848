use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// Tokens are treated as expired slightly before their actual expiry so a
/// request never starts with a token that dies in flight.
const EXPIRY_MARGIN_SECS: i64 = 10;

/// OAuth credential for the YouTube Data API, as stored in the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_expiry"
    )]
    pub expiry: Option<DateTime<Utc>>,
}

/// Reads the zero timestamp (`0001-01-01T00:00:00Z`) that Go's oauth2
/// package writes for tokens without an expiry as no expiry.
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let expiry = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(expiry.filter(|e| e.year() > 1))
}

impl Credential {
    /// A credential without an expiry never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now + Duration::seconds(EXPIRY_MARGIN_SECS) >= expiry,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMatch {
    pub track: Track,
    pub video_id: String,
}

#[derive(Tabled)]
pub struct MatchTableRow {
    pub title: String,
    pub artist: String,
    pub video: String,
}

impl From<&VideoMatch> for MatchTableRow {
    fn from(m: &VideoMatch) -> Self {
        MatchTableRow {
            title: m.track.title.clone(),
            artist: m.track.artist.clone(),
            video: m.video_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracks {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn credential(expiry: Option<DateTime<Utc>>) -> Credential {
        Credential {
            access_token: "ya29.access".to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: "1//refresh".to_string(),
            expiry,
        }
    }

    #[test]
    fn credential_expiry_uses_margin() {
        let expiry = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let cred = credential(Some(expiry));

        assert!(!cred.is_expired_at(expiry - Duration::minutes(5)));
        assert!(cred.is_expired_at(expiry - Duration::seconds(5)));
        assert!(cred.is_expired_at(expiry + Duration::hours(1)));
    }

    #[test]
    fn credential_without_expiry_never_expires() {
        assert!(!credential(None).is_expired());
    }

    #[test]
    fn reads_cache_file_written_by_other_oauth_clients() {
        let json = r#"{"access_token":"ya29.a0","token_type":"Bearer","refresh_token":"1//0g","expiry":"2024-03-09T17:45:12.123456+01:00"}"#;
        let cred: Credential = serde_json::from_str(json).unwrap();

        assert_eq!(cred.access_token, "ya29.a0");
        assert_eq!(cred.refresh_token, "1//0g");
        assert_eq!(
            cred.expiry.unwrap().timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 9, 16, 45, 12).unwrap().timestamp()
        );
    }

    #[test]
    fn zero_expiry_from_go_cache_never_expires() {
        let json = r#"{"access_token":"a","token_type":"Bearer","refresh_token":"r","expiry":"0001-01-01T00:00:00Z"}"#;
        let cred: Credential = serde_json::from_str(json).unwrap();

        assert_eq!(cred.expiry, None);
        assert!(!cred.is_expired());
    }

    #[test]
    fn null_expiry_never_expires() {
        let json = r#"{"access_token":"a","expiry":null}"#;
        let cred: Credential = serde_json::from_str(json).unwrap();

        assert_eq!(cred.expiry, None);
    }

    #[test]
    fn parses_playlist_with_missing_tracks() {
        let json = r#"{
            "id": "2nSHh0BiEoRjfOAF5HXLu9",
            "name": "Road trip",
            "tracks": {
                "total": 2,
                "items": [
                    {"track": {"name": "Imagine", "artists": [{"name": "John Lennon"}, {"name": "Yoko Ono"}]}},
                    {"track": null}
                ]
            }
        }"#;
        let playlist: PlaylistResponse = serde_json::from_str(json).unwrap();

        assert_eq!(playlist.tracks.items.len(), 2);
        let first = playlist.tracks.items[0].track.as_ref().unwrap();
        assert_eq!(first.artists[0].name, "John Lennon");
        assert!(playlist.tracks.items[1].track.is_none());
    }

    #[test]
    fn parses_search_response() {
        let json = r#"{
            "kind": "youtube#searchListResponse",
            "items": [{
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": "YkgkThdzX-8"},
                "snippet": {"title": "Imagine - John Lennon", "channelTitle": "John Lennon"}
            }]
        }"#;
        let response: SearchListResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.items[0].id.video_id.as_deref(), Some("YkgkThdzX-8"));
    }
}
