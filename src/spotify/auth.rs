use reqwest::Client;

use crate::{config::SPOTIFY_API_TOKEN_URL, types::ClientCredentialsResponse};

/// Requests an application access token with the client-credentials grant.
///
/// The token only grants access to public catalog data, which is all a
/// playlist lookup needs.
pub async fn client_credentials_token(
    http: &Client,
    client_id: &str,
    client_secret: &str,
) -> Result<String, reqwest::Error> {
    let response = http
        .post(SPOTIFY_API_TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()?;

    let token = response.json::<ClientCredentialsResponse>().await?;
    Ok(token.access_token)
}
