//! Request and response shapes for the CIM endpoint.
//!
//! The connector enforces field ordering, it expects fields to be in the
//! same order as in their API documentation.

use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::auth::MerchantAuthentication;

/// Client-side-encrypted card data issued by Accept.js. Opaque to this
/// crate and forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueData {
    pub data_descriptor: String,
    pub data_value: Secret<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentDetails {
    OpaqueData(OpaqueData),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Individual,
    Business,
}

/// A payment profile as submitted for attachment. Always marked as the
/// profile's default instrument, held by an individual customer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProfile {
    customer_type: CustomerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    bill_to: Option<BillTo>,
    payment: PaymentDetails,
    default_payment_profile: bool,
}

impl PaymentProfile {
    pub fn new(bill_to: Option<BillTo>, payment: PaymentDetails) -> Self {
        Self {
            customer_type: CustomerType::Individual,
            bill_to,
            payment,
            default_payment_profile: true,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    // testMode performs a Luhn mod-10 check on the card number, without
    // further validation at the card network.
    TestMode,
    // liveMode submits a zero-dollar or one-cent transaction to confirm
    // that the card belongs to an active account.
    LiveMode,
}

/// The `profile` section of a create-customer-profile request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerProfileRequest {
    pub(crate) create_customer_profile_request: CreateCustomerProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCustomerProfile {
    pub(crate) merchant_authentication: MerchantAuthentication,
    pub(crate) profile: CustomerProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPaymentProfileRequest {
    pub(crate) create_customer_payment_profile_request: CreatePaymentProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentProfile {
    pub(crate) merchant_authentication: MerchantAuthentication,
    pub(crate) customer_profile_id: Secret<String>,
    pub(crate) payment_profile: PaymentProfile,
    pub(crate) validation_mode: ValidationMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerPaymentProfileRequest {
    pub(crate) get_customer_payment_profile_request: GetPaymentProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetPaymentProfile {
    pub(crate) merchant_authentication: MerchantAuthentication,
    pub(crate) ref_id: String,
    pub(crate) customer_profile_id: Secret<String>,
    pub(crate) customer_payment_profile_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub code: String,
    pub text: String,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Serialize, strum::Display)]
pub enum ResultCode {
    #[default]
    Ok,
    Error,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessages {
    pub result_code: ResultCode,
    #[serde(default)]
    pub message: Vec<ResponseMessage>,
}

/// Renders a rejection response into the single line shown to the payor:
/// the first message as `"<code>  <text>"`, or the caller's
/// operation-specific fallback when the gateway sent no messages.
pub fn rejection_reason(messages: &ResponseMessages, fallback: &str) -> String {
    messages
        .message
        .first()
        .map(|message| format!("{}  {}", message.code, message.text))
        .unwrap_or_else(|| fallback.to_string())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerProfileResponse {
    pub customer_profile_id: Option<String>,
    #[serde(default)]
    pub customer_payment_profile_id_list: Vec<String>,
    pub messages: ResponseMessages,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPaymentProfileResponse {
    pub customer_profile_id: Option<String>,
    pub customer_payment_profile_id: Option<String>,
    pub validation_direct_response: Option<Secret<String>>,
    pub messages: ResponseMessages,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerPaymentProfileResponse {
    pub payment_profile: Option<MaskedPaymentProfile>,
    pub messages: ResponseMessages,
}

/// The read-back view of an attached instrument. Card data comes back
/// masked (`XXXX1111`, expiry `XXXX`), suitable for display only.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedPaymentProfile {
    pub customer_profile_id: Option<String>,
    pub customer_payment_profile_id: String,
    pub payment: Option<MaskedPayment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedPayment {
    pub credit_card: Option<MaskedCreditCard>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedCreditCard {
    pub card_number: String,
    pub expiration_date: Option<String>,
    pub card_type: Option<String>,
}
