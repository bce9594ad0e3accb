//! OAuth access tokens for the Sheets API.
//!
//! A service-account key is exchanged for a short-lived bearer token using the
//! JWT bearer grant. The token is cached until shortly before it expires.

use std::{
    path::Path,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// The fields of a Google service-account JSON key that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read service account file `{}`", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid service account file `{}`", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the signed assertion sent to the token endpoint.
    fn assertion(&self, scope: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.client_email,
            scope,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.private_key_id);

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .context("Service account private key is not a valid RSA PEM")?;

        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Where access tokens come from.
#[derive(Debug, Clone)]
pub enum Credentials {
    ServiceAccount(ServiceAccountKey),
    /// A bearer token minted elsewhere, used as is.
    AccessToken(String),
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Authenticator {
    http: reqwest::Client,
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl Authenticator {
    pub fn new(http: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            http,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Returns a bearer token for the spreadsheets scope.
    pub async fn access_token(&self) -> Result<String> {
        let key = match &self.credentials {
            Credentials::AccessToken(token) => return Ok(token.clone()),
            Credentials::ServiceAccount(key) => key,
        };

        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        debug!("Requesting access token for {}", key.client_email);
        let assertion = key.assertion(SHEETS_SCOPE)?;
        let response: TokenResponse = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("Token request failed")?
            .error_for_status()
            .context("Token endpoint rejected the service account")?
            .json()
            .await
            .context("Invalid token response")?;

        let lifetime = Duration::from_secs(response.expires_in.unwrap_or(0));
        let expires_at = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(CachedToken {
                token: response.access_token.clone(),
                expires_at,
            });
        }

        Ok(response.access_token)
    }

    fn cached_token(&self) -> Option<String> {
        let cached = self.cached.lock().ok()?;
        cached
            .as_ref()
            .filter(|c| c.expires_at > Instant::now())
            .map(|c| c.token.clone())
    }
}

// -- Tests -------------------------------------------------------------------
