//! Card-instrument onboarding against Authorize.Net.
//!
//! Takes a payor's client-side-encrypted card payload, resolves or creates
//! the payor's customer profile at the gateway, attaches the instrument as
//! a payment profile, reads it back for masked display details, and vaults
//! the result as a [`types::ClientGatewayToken`]. One submission performs
//! at most three sequential remote calls; concurrent submissions for the
//! same payor are not deduplicated and must be serialized by the caller if
//! double-vaulting has to be prevented.

pub mod customer;
pub mod db;
pub mod errors;
pub mod tokenize;
pub mod types;

pub use db::{ClientGatewayTokenInterface, MockDb};
pub use errors::TokenizationError;
pub use tokenize::PaymentMethodOnboarding;
pub use types::{ClientGatewayToken, GatewayType, PaymentMethodData, Payor};
