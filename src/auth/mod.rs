use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Cookie carrying the shared platform session token.
pub const PLATFORM_SESSION_COOKIE: &str = "__session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub tenant: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String, tenant: Option<String>, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub,
            tenant,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Session-protect collaborator for platform-mode and auth-host
/// requests. On failure the gate supplies its own response; the
/// routing layer returns it unchanged.
#[async_trait]
pub trait AuthGate: Send + Sync {
    async fn protect(&self, headers: &HeaderMap) -> Result<(), Response>;
}

/// Shared-auth check backed by a JWT in the Authorization header or
/// the platform session cookie.
pub struct JwtAuthGate {
    secret: String,
}

impl JwtAuthGate {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    fn extract_token(&self, headers: &HeaderMap) -> Result<String, String> {
        if let Some(auth_header) = headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| "Invalid Authorization header format".to_string())?;
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                if token.trim().is_empty() {
                    return Err("Empty bearer token".to_string());
                }
                return Ok(token.to_string());
            }
            return Err("Authorization header must use Bearer token format".to_string());
        }

        crate::middleware::cookie_value(headers, PLATFORM_SESSION_COOKIE)
            .ok_or_else(|| "Missing session token".to_string())
    }

    fn validate(&self, token: &str) -> Result<Claims, String> {
        if self.secret.is_empty() {
            return Err("JWT secret not configured".to_string());
        }
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|e| format!("Invalid session token: {}", e))?;
        Ok(token_data.claims)
    }
}

#[async_trait]
impl AuthGate for JwtAuthGate {
    async fn protect(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = self
            .extract_token(headers)
            .map_err(|msg| GatewayError::unauthorized(msg).into_response())?;

        let claims = self
            .validate(&token)
            .map_err(|msg| GatewayError::unauthorized(msg).into_response())?;

        tracing::debug!("Platform session accepted for subject '{}'", claims.sub);
        Ok(())
    }
}
