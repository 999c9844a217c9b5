//! Closed set of supported object-storage backends and the per-provider
//! credential refresh dispatch.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Credential, CredentialError};

/// The object-storage backends this client knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    /// OpenStack Swift behind a Keystone identity service.
    SwiftKeystone,
    /// OpenStack Swift with the legacy TempAuth middleware.
    SwiftTempAuth,
    /// hubiC (OVH) Swift, authorized through OAuth2.
    Hubic,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::SwiftKeystone => "swift-keystone",
            Provider::SwiftTempAuth => "swift-tempauth",
            Provider::Hubic => "hubic",
        };
        write!(f, "{name}")
    }
}

/// Collaborator performing the actual token exchange against the provider's
/// authorization service. Network transport lives behind this seam.
pub trait TokenExchange {
    /// Trades `refresh_token` for a fresh credential.
    fn exchange(&self, refresh_token: &str) -> Result<Credential, CredentialError>;
}

/// Requests a renewed credential for `provider`.
///
/// TempAuth tokens cannot be renewed offline; that variant returns
/// [`CredentialError::Unsupported`] and callers route the account through
/// the interactive login instead.
pub fn refresh(
    provider: Provider,
    current: &Credential,
    exchange: &dyn TokenExchange,
) -> Result<Credential, CredentialError> {
    debug!(%provider, endpoint = %current.endpoint, "refreshing credential");
    match provider {
        Provider::SwiftKeystone | Provider::Hubic => {
            let refresh_token = current
                .refresh_token
                .as_deref()
                .ok_or(CredentialError::MissingRefreshToken)?;
            exchange.exchange(refresh_token)
        }
        Provider::SwiftTempAuth => Err(CredentialError::Unsupported(provider)),
    }
}
