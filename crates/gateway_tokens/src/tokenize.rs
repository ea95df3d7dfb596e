//! The onboarding workflow: resolve the customer profile, attach the
//! instrument, read it back, vault the token.

use authorizedotnet_cim::{
    types::{
        rejection_reason, BillTo, MaskedPaymentProfile, OpaqueData, PaymentDetails,
        PaymentProfile, ResultCode,
    },
    CustomResult, CustomerInformationApi,
};
use error_stack::ResultExt;
use masking::Secret;

use crate::{
    customer,
    db::ClientGatewayTokenInterface,
    errors::TokenizationError,
    types::{
        ClientGatewayToken, GatewayType, PaymentMethodData, PaymentMethodMeta, Payor,
        EXPIRY_PLACEHOLDER,
    },
};

const ADD_PAYMENT_METHOD_FALLBACK: &str =
    "Unable to add payment method to Authorize.net gateway";

/// One onboarding submission for one payor. Borrows its collaborators for
/// the duration of the request.
pub struct PaymentMethodOnboarding<'a, Gateway: ?Sized, Store: ?Sized> {
    gateway: &'a Gateway,
    store: &'a Store,
    payor: &'a Payor,
    company_gateway_id: i64,
}

impl<'a, Gateway, Store> PaymentMethodOnboarding<'a, Gateway, Store>
where
    Gateway: CustomerInformationApi + ?Sized,
    Store: ClientGatewayTokenInterface + Sync + ?Sized,
{
    pub fn new(
        gateway: &'a Gateway,
        store: &'a Store,
        payor: &'a Payor,
        company_gateway_id: i64,
    ) -> Self {
        Self {
            gateway,
            store,
            payor,
            company_gateway_id,
        }
    }

    /// Entry point for an inbound submission. The instrument kind is
    /// threaded explicitly through the whole call chain.
    #[tracing::instrument(skip_all, fields(client_id = self.payor.client_id))]
    pub async fn submit(
        &self,
        payment_method: PaymentMethodData,
    ) -> CustomResult<ClientGatewayToken, TokenizationError> {
        match payment_method {
            PaymentMethodData::OpaqueCard(payload) => self.onboard_credit_card(payload).await,
            PaymentMethodData::BankTransfer => Err(TokenizationError::NotImplemented)?,
        }
    }

    async fn onboard_credit_card(
        &self,
        payload: OpaqueData,
    ) -> CustomResult<ClientGatewayToken, TokenizationError> {
        let gateway_customer_reference = self.resolve_customer_profile().await?;
        let profile = self
            .add_payment_method(&gateway_customer_reference, payload)
            .await?;
        self.persist_token(&profile, gateway_customer_reference, GatewayType::CreditCard)
            .await
    }

    /// Reuses the customer profile reference from an existing vaulted
    /// token; only a payor with no token for this gateway causes a remote
    /// profile creation.
    async fn resolve_customer_profile(&self) -> CustomResult<String, TokenizationError> {
        let existing = self
            .store
            .find_client_gateway_token(self.payor.client_id, self.company_gateway_id)
            .await
            .change_context(TokenizationError::PersistenceFailure)?;
        match existing {
            Some(token) => Ok(token.gateway_customer_reference),
            None => customer::create_customer_profile(self.gateway, self.payor).await,
        }
    }

    /// Attaches the instrument to the customer profile and returns the
    /// verified read-back view.
    async fn add_payment_method(
        &self,
        gateway_customer_reference: &str,
        payload: OpaqueData,
    ) -> CustomResult<MaskedPaymentProfile, TokenizationError> {
        let payment_profile =
            PaymentProfile::new(self.billing_address(), PaymentDetails::OpaqueData(payload));

        let response = self
            .gateway
            .create_customer_payment_profile(
                Secret::new(gateway_customer_reference.to_string()),
                payment_profile,
            )
            .await
            .change_context(TokenizationError::GatewayUnreachable)?;
        tracing::debug!(result = %response.messages.result_code, "payment profile attachment");

        match response.messages.result_code {
            ResultCode::Ok => {
                let payment_profile_id = response.customer_payment_profile_id.ok_or(
                    TokenizationError::UnexpectedResponse("missing payment profile id"),
                )?;
                self.fetch_payment_profile(gateway_customer_reference, payment_profile_id)
                    .await
            }
            ResultCode::Error => Err(TokenizationError::GatewayRejected(rejection_reason(
                &response.messages,
                ADD_PAYMENT_METHOD_FALLBACK,
            )))?,
        }
    }

    /// Re-reads the attached profile for its masked card details. A token
    /// is never vaulted from the attach response alone.
    async fn fetch_payment_profile(
        &self,
        gateway_customer_reference: &str,
        payment_profile_id: String,
    ) -> CustomResult<MaskedPaymentProfile, TokenizationError> {
        let response = self
            .gateway
            .get_customer_payment_profile(
                Secret::new(gateway_customer_reference.to_string()),
                payment_profile_id,
            )
            .await
            .change_context(TokenizationError::GatewayUnreachable)?;

        match response.messages.result_code {
            ResultCode::Ok => response.payment_profile.ok_or_else(|| {
                TokenizationError::UnexpectedResponse("missing payment profile").into()
            }),
            ResultCode::Error => Err(TokenizationError::GatewayRejected(rejection_reason(
                &response.messages,
                ADD_PAYMENT_METHOD_FALLBACK,
            )))?,
        }
    }

    /// Billing address from the payor's primary contact. No contact on
    /// file degrades to an attachment without a billing address.
    fn billing_address(&self) -> Option<BillTo> {
        self.payor.primary_contact.as_ref().map(|contact| BillTo {
            first_name: Some(contact.first_name.clone()),
            last_name: Some(contact.last_name.clone()),
            company: Some(self.payor.name.clone()),
            address: self.payor.address1.clone(),
            city: self.payor.city.clone(),
            state: self.payor.state.clone(),
            zip: self.payor.postal_code.clone(),
            country: self.payor.country_name.clone(),
            phone_number: self.payor.phone.clone(),
        })
    }

    /// The sole local mutation point: one vaulted record per successful
    /// onboarding.
    async fn persist_token(
        &self,
        profile: &MaskedPaymentProfile,
        gateway_customer_reference: String,
        gateway_type: GatewayType,
    ) -> CustomResult<ClientGatewayToken, TokenizationError> {
        let meta = build_payment_method_meta(profile, gateway_type)?;
        let token = ClientGatewayToken {
            company_id: self.payor.company_id,
            client_id: self.payor.client_id,
            company_gateway_id: self.company_gateway_id,
            gateway_type,
            token: profile.customer_payment_profile_id.clone(),
            gateway_customer_reference,
            meta,
        };
        let token = self
            .store
            .insert_client_gateway_token(token)
            .await
            .change_context(TokenizationError::PersistenceFailure)?;
        tracing::info!(
            client_id = token.client_id,
            gateway_type = %token.gateway_type,
            "vaulted client gateway token"
        );
        Ok(token)
    }
}

/// Builds the display summary from the read-back card data. Expiry is not
/// exposed by the read-back response, so the placeholder is stored in its
/// place.
fn build_payment_method_meta(
    profile: &MaskedPaymentProfile,
    gateway_type: GatewayType,
) -> CustomResult<PaymentMethodMeta, TokenizationError> {
    let card = profile
        .payment
        .as_ref()
        .and_then(|payment| payment.credit_card.as_ref())
        .ok_or(TokenizationError::UnexpectedResponse(
            "payment profile has no card data",
        ))?;
    Ok(PaymentMethodMeta {
        exp_month: EXPIRY_PLACEHOLDER.to_string(),
        exp_year: EXPIRY_PLACEHOLDER.to_string(),
        brand: card.card_type.clone().unwrap_or_default(),
        last4: card.card_number.clone(),
        gateway_type,
    })
}
