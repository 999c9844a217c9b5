//! Credential value types and refresh dispatch for object-storage backends.
//!
//! The interactive authorization flow (OAuth2 code exchange) lives outside
//! this crate; here are the value types the upload pipeline consumes and the
//! per-provider dispatch deciding how a credential is renewed.

mod provider;
mod token;

pub use provider::{Provider, TokenExchange, refresh};
pub use token::{generate_state_token, tokens_equal};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors from credential handling.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("refresh not supported for provider: {0}")]
    Unsupported(Provider),

    #[error("credential carries no refresh token")]
    MissingRefreshToken,

    #[error("token exchange failed: {0}")]
    Exchange(String),
}

/// A bearer credential for the object store, plus the endpoint it is valid
/// for. Treated as an opaque value by the upload pipeline; the segmentation
/// core never sees it at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Returns `true` if the credential has expired as of `now`.
    ///
    /// A credential without an expiry never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| t <= now)
    }
}
