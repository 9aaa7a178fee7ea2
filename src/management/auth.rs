use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{
    error::{Error, Result},
    types::{Token, TokenResponse},
};

/// Seconds before expiry at which a cached token is considered stale.
const EXPIRY_MARGIN: u64 = 60;

/// In-memory cache for the client-credentials access token.
#[derive(Debug, Default)]
pub struct TokenManager {
    token: Option<Token>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, requesting a new one when it is missing or stale.
    pub async fn get_valid_token(
        &mut self,
        http: &Client,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !Self::is_expired(t)) {
            return Ok(token.access_token.clone());
        }

        let token = Self::request_token(http, token_url, client_id, client_secret).await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    pub fn invalidate(&mut self) {
        self.token = None;
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= token.obtained_at + token.expires_in
    }

    async fn request_token(
        http: &Client,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Token> {
        let credentials = STANDARD.encode(format!("{client_id}:{client_secret}"));
        let res = http
            .post(token_url)
            .header("Authorization", format!("Basic {credentials}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned {}",
                res.status()
            )));
        }

        let body: TokenResponse = res.json().await?;
        Ok(Token {
            access_token: body.access_token,
            expires_in: body.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}
