use crate::{
    types::Credential,
    youtube::auth::{ExchangeError, OAuthClient, TokenRefresh},
};

/// Holds the YouTube credential for the lifetime of a run.
///
/// An expired access token is refreshed in memory the first time it is
/// needed. The refreshed credential is not written back to the cache file.
pub struct TokenManager<R = OAuthClient> {
    credential: Credential,
    oauth: R,
}

impl<R: TokenRefresh> TokenManager<R> {
    pub fn new(credential: Credential, oauth: R) -> Self {
        TokenManager { credential, oauth }
    }

    pub async fn get_valid_token(&mut self) -> Result<String, ExchangeError> {
        if self.needs_refresh() {
            self.credential = self.oauth.refresh(&self.credential.refresh_token).await?;
        }

        Ok(self.credential.access_token.clone())
    }

    fn needs_refresh(&self) -> bool {
        // without a refresh token the stale token is sent as-is and the API decides
        self.credential.is_expired() && !self.credential.refresh_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{Duration, Utc};

    use super::*;

    fn credential(access_token: &str, expires_in: Option<i64>, refresh_token: &str) -> Credential {
        Credential {
            access_token: access_token.to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: refresh_token.to_string(),
            expiry: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    /// Hands out `refreshed-<n>` access tokens that live for `expires_in`
    /// seconds and keeps the refresh token it was given, like a server that
    /// does not rotate refresh tokens.
    struct StubRefresh {
        calls: RefCell<Vec<String>>,
        expires_in: i64,
        fail: bool,
    }

    impl StubRefresh {
        fn issuing(expires_in: i64) -> Self {
            StubRefresh {
                calls: RefCell::new(Vec::new()),
                expires_in,
                fail: false,
            }
        }

        fn failing() -> Self {
            StubRefresh {
                fail: true,
                ..Self::issuing(3600)
            }
        }
    }

    impl TokenRefresh for StubRefresh {
        async fn refresh(&self, refresh_token: &str) -> Result<Credential, ExchangeError> {
            self.calls.borrow_mut().push(refresh_token.to_string());
            if self.fail {
                return Err(ExchangeError::Rejected {
                    status: 400,
                    body: r#"{"error":"invalid_grant"}"#.to_string(),
                });
            }

            let access_token = format!("refreshed-{}", self.calls.borrow().len());
            Ok(credential(&access_token, Some(self.expires_in), refresh_token))
        }
    }

    #[tokio::test]
    async fn valid_token_is_used_as_is() {
        let mut manager = TokenManager::new(credential("access", Some(3600), "refresh"), StubRefresh::issuing(3600));

        assert_eq!(manager.get_valid_token().await.unwrap(), "access");
        assert_eq!(manager.get_valid_token().await.unwrap(), "access");
        assert!(manager.oauth.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn expired_token_is_replaced_by_refreshed_one() {
        let mut manager = TokenManager::new(credential("access", Some(-60), "refresh"), StubRefresh::issuing(3600));

        assert_eq!(manager.get_valid_token().await.unwrap(), "refreshed-1");
        // the refreshed credential is kept for the rest of the run
        assert_eq!(manager.get_valid_token().await.unwrap(), "refreshed-1");
        assert_eq!(*manager.oauth.calls.borrow(), vec!["refresh".to_string()]);
    }

    #[tokio::test]
    async fn refresh_token_survives_a_refresh() {
        // every issued token is already stale, so each call refreshes again
        let mut manager = TokenManager::new(credential("access", Some(-60), "refresh"), StubRefresh::issuing(-60));

        assert_eq!(manager.get_valid_token().await.unwrap(), "refreshed-1");
        assert_eq!(manager.get_valid_token().await.unwrap(), "refreshed-2");
        assert_eq!(
            *manager.oauth.calls.borrow(),
            vec!["refresh".to_string(), "refresh".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_refresh_is_returned() {
        let mut manager = TokenManager::new(credential("access", Some(-60), "refresh"), StubRefresh::failing());

        let result = manager.get_valid_token().await;

        assert!(matches!(result, Err(ExchangeError::Rejected { status: 400, .. })));
    }

    #[tokio::test]
    async fn expired_token_without_refresh_token_is_sent_anyway() {
        let mut manager = TokenManager::new(credential("access", Some(-60), ""), StubRefresh::issuing(3600));

        assert!(!manager.needs_refresh());
        assert_eq!(manager.get_valid_token().await.unwrap(), "access");
        assert!(manager.oauth.calls.borrow().is_empty());
    }

    #[test]
    fn token_without_expiry_needs_no_refresh() {
        let manager = TokenManager::new(credential("access", None, "refresh"), StubRefresh::issuing(3600));
        assert!(!manager.needs_refresh());
    }
}
