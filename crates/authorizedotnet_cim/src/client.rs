//! HTTP transport for the CIM endpoint.

use error_stack::ResultExt;
use masking::Secret;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    auth::{AuthorizedotnetConfig, MerchantAuthentication},
    errors::{CustomResult, GatewayError},
    types::{
        CreateCustomerPaymentProfileRequest, CreateCustomerProfile,
        CreateCustomerProfileRequest, CreatePaymentProfile, CustomerProfile,
        GetCustomerPaymentProfileRequest, GetPaymentProfile, PaymentProfile, ValidationMode,
    },
};

/// A session against one Authorize.Net environment. Holds the merchant
/// credentials and posts every request to the single CIM endpoint.
#[derive(Debug, Clone)]
pub struct CimClient {
    http: reqwest::Client,
    config: AuthorizedotnetConfig,
}

impl CimClient {
    pub fn new(config: AuthorizedotnetConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn merchant_authentication(&self) -> MerchantAuthentication {
        MerchantAuthentication::from(&self.config)
    }

    pub(crate) fn build_create_customer_profile_request(
        &self,
        profile: CustomerProfile,
    ) -> CreateCustomerProfileRequest {
        CreateCustomerProfileRequest {
            create_customer_profile_request: CreateCustomerProfile {
                merchant_authentication: self.merchant_authentication(),
                profile,
            },
        }
    }

    pub(crate) fn build_create_payment_profile_request(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile: PaymentProfile,
    ) -> CreateCustomerPaymentProfileRequest {
        CreateCustomerPaymentProfileRequest {
            create_customer_payment_profile_request: CreatePaymentProfile {
                merchant_authentication: self.merchant_authentication(),
                customer_profile_id,
                payment_profile,
                // Attachment always verifies the instrument against the
                // card network, regardless of which environment is in use.
                validation_mode: ValidationMode::LiveMode,
            },
        }
    }

    pub(crate) fn build_get_payment_profile_request(
        &self,
        customer_profile_id: Secret<String>,
        customer_payment_profile_id: String,
    ) -> GetCustomerPaymentProfileRequest {
        GetCustomerPaymentProfileRequest {
            get_customer_payment_profile_request: GetPaymentProfile {
                merchant_authentication: self.merchant_authentication(),
                ref_id: correlation_id(),
                customer_profile_id,
                customer_payment_profile_id,
            },
        }
    }

    pub(crate) async fn execute<Req, Resp>(&self, request: &Req) -> CustomResult<Resp, GatewayError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body =
            serde_json::to_vec(request).change_context(GatewayError::RequestEncodingFailed)?;
        tracing::debug!(url = %self.config.base_url, "sending CIM request");
        let response = self
            .http
            .post(&self.config.base_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .change_context(GatewayError::Unreachable)?;
        let bytes = response
            .bytes()
            .await
            .change_context(GatewayError::Unreachable)?;
        // Authorize.Net prefixes response bodies with a UTF-8 BOM.
        let body = bytes
            .strip_prefix(b"\xef\xbb\xbf".as_slice())
            .unwrap_or(bytes.as_ref());
        serde_json::from_slice(body).change_context(GatewayError::ResponseDeserializationFailed)
    }
}

/// Gateway-side tracing id, fresh per read-back request. Time-derived, not
/// relied on for local uniqueness.
fn correlation_id() -> String {
    format!("ref{}", time::OffsetDateTime::now_utc().unix_timestamp())
}
