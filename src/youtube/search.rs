use reqwest::Client;
use thiserror::Error;

use crate::{
    config::YOUTUBE_API_URL,
    management::TokenManager,
    pipeline::VideoSearch,
    types::SearchListResponse,
    youtube::auth::{ExchangeError, OAuthClient, TokenRefresh},
};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unable to refresh access token: {0}")]
    Token(#[from] ExchangeError),
    #[error("no results found for query: {0}")]
    NoResults(String),
}

/// YouTube Data API client, limited to the one search call the pipeline uses.
pub struct YoutubeClient<R = OAuthClient> {
    http: Client,
    api_url: String,
    tokens: TokenManager<R>,
}

impl<R: TokenRefresh> YoutubeClient<R> {
    pub fn new(tokens: TokenManager<R>) -> Self {
        YoutubeClient {
            http: Client::new(),
            api_url: YOUTUBE_API_URL.to_string(),
            tokens,
        }
    }

    /// Returns the video id of the top result for `query`.
    ///
    /// A top result that is a channel or a playlist carries no video id and
    /// counts as no result.
    pub async fn search_top_video(&mut self, query: &str) -> Result<String, SearchError> {
        let token = self.tokens.get_valid_token().await?;

        let response = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[("part", "id,snippet"), ("q", query), ("maxResults", "1")])
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let list = response.json::<SearchListResponse>().await?;
        top_video_id(list).ok_or_else(|| SearchError::NoResults(query.to_string()))
    }
}

impl<R: TokenRefresh> VideoSearch for YoutubeClient<R> {
    async fn search(&mut self, query: &str) -> Result<String, SearchError> {
        self.search_top_video(query).await
    }
}

fn top_video_id(list: SearchListResponse) -> Option<String> {
    list.items
        .into_iter()
        .next()
        .and_then(|item| item.id.video_id)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;
    use crate::types::Credential;

    fn parse(json: &str) -> SearchListResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_the_first_video() {
        let list = parse(
            r#"{"items":[
                {"id":{"kind":"youtube#video","videoId":"first"}},
                {"id":{"kind":"youtube#video","videoId":"second"}}
            ]}"#,
        );
        assert_eq!(top_video_id(list).as_deref(), Some("first"));
    }

    #[test]
    fn empty_result_has_no_video() {
        assert_eq!(top_video_id(parse(r#"{"items":[]}"#)), None);
        assert_eq!(top_video_id(parse(r#"{"kind":"youtube#searchListResponse"}"#)), None);
    }

    #[test]
    fn channel_hit_has_no_video() {
        let list = parse(r#"{"items":[{"id":{"kind":"youtube#channel","channelId":"UC123"}}]}"#);
        assert_eq!(top_video_id(list), None);
    }

    struct RejectingRefresh;

    impl TokenRefresh for RejectingRefresh {
        async fn refresh(&self, _refresh_token: &str) -> Result<Credential, ExchangeError> {
            Err(ExchangeError::Rejected {
                status: 401,
                body: r#"{"error":"invalid_client"}"#.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn failed_refresh_is_a_token_error() {
        let expired = Credential {
            access_token: "stale".to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: "refresh".to_string(),
            expiry: Some(Utc::now() - TimeDelta::minutes(5)),
        };
        let mut client = YoutubeClient::new(TokenManager::new(expired, RejectingRefresh));

        let result = client.search_top_video("Imagine John Lennon").await;

        assert!(matches!(
            result,
            Err(SearchError::Token(ExchangeError::Rejected { status: 401, .. }))
        ));
    }
}
