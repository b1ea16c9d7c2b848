use std::{
    future::Future,
    io::{self, BufRead},
    string::FromUtf8Error,
};

use chrono::{TimeDelta, Utc};
use reqwest::{Client, Url};
use thiserror::Error;

use crate::{
    config::{ConfigError, OAuthClientConfig, YOUTUBE_SCOPE},
    info,
    management::{CredentialError, CredentialStore},
    types::{Credential, OAuthTokenResponse},
    utils, warning,
};

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("token endpoint answered {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Unable to read authorization code: {0}")]
    Prompt(io::Error),
    #[error("Unable to decode authorization code: {0}")]
    Decode(FromUtf8Error),
    #[error("Authorization code not found in URL")]
    MissingAuthCode,
    #[error("Unable to retrieve token from web: {0}")]
    Exchange(ExchangeError),
    #[error("Unable to cache token: {0}")]
    Store(#[from] CredentialError),
}

/// Source of the text the operator pastes back after authorizing.
pub trait CodePrompt {
    fn prompt(&mut self, auth_url: &str) -> io::Result<String>;
}

/// Prints the authorization URL, tries to open it in the browser and blocks
/// on one line of standard input.
pub struct StdinPrompt;

impl CodePrompt for StdinPrompt {
    fn prompt(&mut self, auth_url: &str) -> io::Result<String> {
        info!(
            "Go to the following link in your browser, then paste the URL you were redirected to:\n{}",
            auth_url
        );
        if webbrowser::open(auth_url).is_err() {
            warning!("Failed to open browser. Please navigate to the URL above manually.");
        }

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// The two halves of the authorization-code grant the bootstrapper needs.
pub trait TokenExchange {
    fn authorize_url(&self, state: &str) -> String;

    fn exchange(&self, code: &str) -> impl Future<Output = Result<Credential, ExchangeError>>;
}

/// Trades a refresh token for a new access token.
pub trait TokenRefresh {
    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<Credential, ExchangeError>>;
}

/// OAuth client for Google's authorization server.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthClientConfig,
    auth_endpoint: Url,
    scope: String,
    http: Client,
}

impl OAuthClient {
    pub fn new(config: OAuthClientConfig) -> Result<Self, ConfigError> {
        let auth_endpoint = Url::parse(&config.auth_uri)
            .map_err(|_| ConfigError::InvalidEndpoint(config.auth_uri.clone()))?;
        Url::parse(&config.token_uri)
            .map_err(|_| ConfigError::InvalidEndpoint(config.token_uri.clone()))?;

        Ok(OAuthClient {
            config,
            auth_endpoint,
            scope: YOUTUBE_SCOPE.to_string(),
            http: Client::new(),
        })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<OAuthTokenResponse, ExchangeError> {
        let response = self
            .http
            .post(&self.config.token_uri)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<OAuthTokenResponse>().await?)
    }
}

impl TokenExchange for OAuthClient {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = self.auth_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("client_id", self.config.client_id.as_str())
            .append_pair("redirect_uri", self.config.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scope)
            .append_pair("state", state);
        url.into()
    }

    async fn exchange(&self, code: &str) -> Result<Credential, ExchangeError> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .await?;

        Ok(credential_from_response(response, ""))
    }
}

impl TokenRefresh for OAuthClient {
    /// The returned credential keeps `refresh_token` unless the server
    /// rotated it.
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, ExchangeError> {
        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .await?;

        Ok(credential_from_response(response, refresh_token))
    }
}

fn credential_from_response(response: OAuthTokenResponse, previous_refresh_token: &str) -> Credential {
    Credential {
        access_token: response.access_token,
        token_type: response.token_type,
        refresh_token: response
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| previous_refresh_token.to_string()),
        // a lifetime too large to represent is stored as no expiry
        expiry: response
            .expires_in
            .filter(|secs| *secs > 0)
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime)),
    }
}

/// Returns the cached credential, or runs the interactive authorization-code
/// flow and caches its result.
///
/// A missing cache and an unreadable one are treated alike: both mean the
/// application has not been authorized yet. Every failure of the
/// interactive flow, including failing to cache its result, is returned.
pub async fn bootstrap<E, P>(
    store: &CredentialStore,
    oauth: &E,
    prompt: &mut P,
) -> Result<Credential, BootstrapError>
where
    E: TokenExchange,
    P: CodePrompt,
{
    if let Ok(credential) = store.load().await {
        return Ok(credential);
    }

    info!("No cached YouTube credential, authorization required.");
    let credential = interactive_exchange(oauth, prompt).await?;

    info!("Saving credential file to: {}", store.path().display());
    store.save(&credential).await?;
    Ok(credential)
}

async fn interactive_exchange<E, P>(oauth: &E, prompt: &mut P) -> Result<Credential, BootstrapError>
where
    E: TokenExchange,
    P: CodePrompt,
{
    let state = utils::generate_state();
    let pasted = prompt
        .prompt(&oauth.authorize_url(&state))
        .map_err(BootstrapError::Prompt)?;

    let decoded = utils::decode_pasted_input(&pasted).map_err(BootstrapError::Decode)?;
    info!("Decoded URL: {}", decoded);

    let code = utils::extract_auth_code(&decoded).ok_or(BootstrapError::MissingAuthCode)?;

    oauth.exchange(&code).await.map_err(BootstrapError::Exchange)
}
