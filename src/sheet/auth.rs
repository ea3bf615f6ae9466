// src/sheet/auth.rs
//
// Service-account OAuth: sign an RS256 JWT with the key from creds.json and
// trade it at the token endpoint for a bearer token (JWT bearer grant).

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{SheetError, SheetResult};
use crate::config::consts::{TOKEN_LIFETIME_SECS, TOKEN_REFRESH_MARGIN_SECS, TOKEN_URI};
use crate::core::net::{self, Retry};

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

fn default_token_uri() -> String { s!(TOKEN_URI) }

/// The fields we need from a Google service-account key file.
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> SheetResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|source| SheetError::CredsRead { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| SheetError::CredsParse { path: path.to_path_buf(), source })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

pub struct TokenSource {
    key: ServiceAccountKey,
    scope: String,
    cached: Option<CachedToken>,
}

impl TokenSource {
    pub fn new(key: ServiceAccountKey, scopes: &[&str]) -> Self {
        Self { key, scope: scopes.join(" "), cached: None }
    }

    pub fn client_email(&self) -> &str { &self.key.client_email }

    pub fn claims(&self, now: DateTime<Utc>) -> Claims {
        let iat = now.timestamp();
        Claims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }

    /// Signed assertion for the token request.
    pub fn assertion(&self, now: DateTime<Utc>) -> SheetResult<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&header, &self.claims(now), &key)?)
    }

    /// Bearer token, reusing the cached one until shortly before expiry.
    pub fn token(&mut self, http: &Client) -> SheetResult<String> {
        let now = Utc::now();
        if let Some(t) = self.cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(t.value.clone());
        }

        let assertion = self.assertion(now)?;
        let resp = net::send("token exchange", Retry::Idempotent, || {
            http.post(&self.key.token_uri)
                .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        })?;
        let body: TokenResponse = resp.json()?;

        let lifetime = body.expires_in.unwrap_or(TOKEN_LIFETIME_SECS);
        log::info!("got access token for {} (expires in {lifetime}s)", self.key.client_email);
        self.cached = Some(CachedToken {
            value: body.access_token.clone(),
            expires_at: now + Duration::seconds(lifetime),
        });
        Ok(body.access_token)
    }
}
