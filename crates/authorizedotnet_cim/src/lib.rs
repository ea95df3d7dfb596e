//! Typed client for the Authorize.Net Customer Information Manager (CIM) API.
//!
//! Covers the three operations needed to vault a card instrument under a
//! customer profile: creating a customer profile, attaching a payment
//! profile to it, and reading the attached profile back for its masked
//! card details. Authentication details travel in the request body, so the
//! client adds no auth headers.

pub mod api;
pub mod auth;
pub mod client;
pub mod errors;
pub mod types;

pub use api::CustomerInformationApi;
pub use auth::{AuthorizedotnetConfig, ExecutionMode, MerchantAuthentication};
pub use client::CimClient;
pub use errors::{CustomResult, GatewayError};
