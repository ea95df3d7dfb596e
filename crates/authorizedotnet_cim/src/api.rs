//! The seam workflows program against. Implemented by [`CimClient`] and by
//! recording fakes in tests.

use masking::Secret;

use crate::{
    client::CimClient,
    errors::{CustomResult, GatewayError},
    types::{
        CreateCustomerPaymentProfileResponse, CreateCustomerProfileResponse, CustomerProfile,
        GetCustomerPaymentProfileResponse, PaymentProfile,
    },
};

/// The three CIM operations needed to vault a card instrument.
///
/// Each call is a single request/response round trip. Errors are
/// transport-level only; a response with a non-"Ok" result code is returned
/// to the caller for inspection.
#[async_trait::async_trait]
pub trait CustomerInformationApi: Send + Sync {
    async fn create_customer_profile(
        &self,
        profile: CustomerProfile,
    ) -> CustomResult<CreateCustomerProfileResponse, GatewayError>;

    async fn create_customer_payment_profile(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile: PaymentProfile,
    ) -> CustomResult<CreateCustomerPaymentProfileResponse, GatewayError>;

    async fn get_customer_payment_profile(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile_id: String,
    ) -> CustomResult<GetCustomerPaymentProfileResponse, GatewayError>;
}

#[async_trait::async_trait]
impl CustomerInformationApi for CimClient {
    async fn create_customer_profile(
        &self,
        profile: CustomerProfile,
    ) -> CustomResult<CreateCustomerProfileResponse, GatewayError> {
        self.execute(&self.build_create_customer_profile_request(profile))
            .await
    }

    async fn create_customer_payment_profile(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile: PaymentProfile,
    ) -> CustomResult<CreateCustomerPaymentProfileResponse, GatewayError> {
        self.execute(
            &self.build_create_payment_profile_request(customer_profile_id, payment_profile),
        )
        .await
    }

    async fn get_customer_payment_profile(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile_id: String,
    ) -> CustomResult<GetCustomerPaymentProfileResponse, GatewayError> {
        self.execute(
            &self.build_get_payment_profile_request(customer_profile_id, payment_profile_id),
        )
        .await
    }
}
