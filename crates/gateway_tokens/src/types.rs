//! Domain model for payors and vaulted tokens.

pub use authorizedotnet_cim::types::OpaqueData;
use masking::Secret;
use serde::{Deserialize, Serialize};

/// Closed set of instrument kinds a payor can submit. Matched exhaustively
/// by the workflow so an unsupported kind is an explicit outcome, never a
/// silent fall-through.
#[derive(Debug, Clone)]
pub enum PaymentMethodData {
    /// A card already tokenized client-side by Accept.js.
    OpaqueCard(OpaqueData),
    BankTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum GatewayType {
    CreditCard,
    BankTransfer,
}

impl GatewayType {
    /// Stable identifier used by the wider billing system.
    pub const fn id(self) -> i64 {
        match self {
            Self::CreditCard => 1,
            Self::BankTransfer => 2,
        }
    }
}

/// The payor's primary contact, when one is on file.
#[derive(Debug, Clone)]
pub struct PayorContact {
    pub first_name: Secret<String>,
    pub last_name: Secret<String>,
}

/// Read-only view of the local client record, as provided by the payor
/// directory.
#[derive(Debug, Clone)]
pub struct Payor {
    pub company_id: i64,
    pub client_id: i64,
    pub name: String,
    pub address1: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub postal_code: Option<Secret<String>>,
    pub country_name: Option<String>,
    pub phone: Option<Secret<String>>,
    pub email: Option<Secret<String>>,
    pub primary_contact: Option<PayorContact>,
}

/// Display-safe summary of a vaulted instrument.
///
/// The read-back response exposes only masked card data, so expiry fields
/// hold the literal placeholder `xx` rather than real values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodMeta {
    pub exp_month: String,
    pub exp_year: String,
    pub brand: String,
    pub last4: String,
    pub gateway_type: GatewayType,
}

/// Placeholder stored in [`PaymentMethodMeta`] expiry fields.
pub const EXPIRY_PLACEHOLDER: &str = "xx";

/// The vaulted record linking a local client to a remote customer/payment
/// profile pair. Created once per successful onboarding; listing and
/// deletion are handled elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientGatewayToken {
    pub company_id: i64,
    pub client_id: i64,
    pub company_gateway_id: i64,
    pub gateway_type: GatewayType,
    /// The gateway's payment profile id, used for future charges.
    pub token: String,
    /// The gateway's customer profile id, reused for every instrument the
    /// payor vaults on this gateway.
    pub gateway_customer_reference: String,
    pub meta: PaymentMethodMeta,
}
