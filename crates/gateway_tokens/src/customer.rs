//! Customer profile creation at the gateway.

use authorizedotnet_cim::{
    types::{rejection_reason, CustomerProfile, ResultCode},
    CustomResult, CustomerInformationApi,
};
use error_stack::ResultExt;
use regex::Regex;

use crate::{errors::TokenizationError, types::Payor};

/// The gateway rejects merchantCustomerId values longer than this.
const MAX_MERCHANT_CUSTOMER_ID_LENGTH: usize = 20;

pub(crate) const ADD_CUSTOMER_FALLBACK: &str =
    "Unable to add customer to Authorize.net gateway";

/// Creates a customer profile for the payor and returns its reference.
///
/// A rejection carrying the gateway's duplicate-record message means a
/// profile for this payor already exists remotely without a local token
/// pointing at it; the existing id is extracted from the message text and
/// reused instead of failing the submission.
pub(crate) async fn create_customer_profile<Gateway>(
    gateway: &Gateway,
    payor: &Payor,
) -> CustomResult<String, TokenizationError>
where
    Gateway: CustomerInformationApi + ?Sized,
{
    let merchant_customer_id = Some(payor.client_id.to_string())
        .filter(|id| id.len() <= MAX_MERCHANT_CUSTOMER_ID_LENGTH);
    let profile = CustomerProfile {
        merchant_customer_id,
        description: Some(payor.name.clone()),
        email: payor.email.clone(),
    };

    let response = gateway
        .create_customer_profile(profile)
        .await
        .change_context(TokenizationError::GatewayUnreachable)?;

    match response.messages.result_code {
        ResultCode::Ok => response.customer_profile_id.ok_or_else(|| {
            TokenizationError::UnexpectedResponse("missing customer profile id").into()
        }),
        ResultCode::Error => {
            let existing_id = response
                .messages
                .message
                .first()
                .and_then(|message| extract_customer_profile_id(&message.text));
            match existing_id {
                Some(id) => {
                    tracing::info!(client_id = payor.client_id, "reusing duplicate customer profile");
                    Ok(id)
                }
                None => Err(TokenizationError::GatewayRejected(rejection_reason(
                    &response.messages,
                    ADD_CUSTOMER_FALLBACK,
                )))?,
            }
        }
    }
}

/// Pulls the profile id out of the gateway's duplicate-record message,
/// e.g. "A duplicate record with ID 190178 already exists.".
fn extract_customer_profile_id(text: &str) -> Option<String> {
    let re = Regex::new(r"ID (\d+)").ok()?;
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}
