//! Merchant credentials and endpoint selection.

use masking::Secret;
use serde::{Deserialize, Serialize};

/// Credentials sent in the body of every CIM request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuthentication {
    name: Secret<String>,
    transaction_key: Secret<String>,
}

impl From<&AuthorizedotnetConfig> for MerchantAuthentication {
    fn from(config: &AuthorizedotnetConfig) -> Self {
        Self {
            name: config.api_login_id.clone(),
            transaction_key: config.transaction_key.clone(),
        }
    }
}

/// Which Authorize.Net environment requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Sandbox,
    Production,
}

impl ExecutionMode {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://apitest.authorize.net/xml/v1/request.api",
            Self::Production => "https://api.authorize.net/xml/v1/request.api",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizedotnetConfig {
    pub api_login_id: Secret<String>,
    pub transaction_key: Secret<String>,
    pub base_url: String,
}

impl AuthorizedotnetConfig {
    pub fn new(
        api_login_id: Secret<String>,
        transaction_key: Secret<String>,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            api_login_id,
            transaction_key,
            base_url: mode.base_url().to_string(),
        }
    }
}
