use std::sync::Mutex;

use authorizedotnet_cim::{
    types::{
        CreateCustomerPaymentProfileResponse, CreateCustomerProfileResponse, CustomerProfile,
        GetCustomerPaymentProfileResponse, MaskedCreditCard, MaskedPayment, MaskedPaymentProfile,
        PaymentProfile, ResponseMessage, ResponseMessages, ResultCode,
    },
    CustomResult, CustomerInformationApi, GatewayError,
};
use gateway_tokens::{
    types::{OpaqueData, PaymentMethodMeta, PayorContact},
    ClientGatewayToken, ClientGatewayTokenInterface, GatewayType, MockDb, PaymentMethodData,
    PaymentMethodOnboarding, Payor, TokenizationError,
};
use masking::{PeekInterface, Secret};

const COMPANY_GATEWAY_ID: i64 = 77;

fn payor() -> Payor {
    Payor {
        company_id: 10,
        client_id: 42,
        name: "Acme Inc".to_string(),
        address1: Some(Secret::new("1 Main St".to_string())),
        city: Some("Springfield".to_string()),
        state: Some(Secret::new("OR".to_string())),
        postal_code: Some(Secret::new("97477".to_string())),
        country_name: Some("United States".to_string()),
        phone: Some(Secret::new("555-0100".to_string())),
        email: Some(Secret::new("jane@example.com".to_string())),
        primary_contact: Some(PayorContact {
            first_name: Secret::new("Jane".to_string()),
            last_name: Secret::new("Doe".to_string()),
        }),
    }
}

fn opaque_card() -> PaymentMethodData {
    PaymentMethodData::OpaqueCard(OpaqueData {
        data_descriptor: "COMMON.ACCEPT.INAPP.PAYMENT".to_string(),
        data_value: Secret::new("eyJjb2RlIjoi".to_string()),
    })
}

fn ok_messages() -> ResponseMessages {
    ResponseMessages {
        result_code: ResultCode::Ok,
        message: vec![ResponseMessage {
            code: "I00001".to_string(),
            text: "Successful.".to_string(),
        }],
    }
}

fn error_messages(code: &str, text: &str) -> ResponseMessages {
    ResponseMessages {
        result_code: ResultCode::Error,
        message: vec![ResponseMessage {
            code: code.to_string(),
            text: text.to_string(),
        }],
    }
}

fn masked_profile(payment_profile_id: &str) -> MaskedPaymentProfile {
    MaskedPaymentProfile {
        customer_profile_id: Some("190178".to_string()),
        customer_payment_profile_id: payment_profile_id.to_string(),
        payment: Some(MaskedPayment {
            credit_card: Some(MaskedCreditCard {
                card_number: "XXXX1111".to_string(),
                expiration_date: Some("XXXX".to_string()),
                card_type: Some("Visa".to_string()),
            }),
        }),
    }
}

/// Records every call and serves canned responses. A `None` response
/// stands for a transport failure.
#[derive(Default)]
struct MockGateway {
    calls: Mutex<Vec<String>>,
    attach_requests: Mutex<Vec<serde_json::Value>>,
    create_profile: Option<CreateCustomerProfileResponse>,
    attach: Option<CreateCustomerPaymentProfileResponse>,
    read_back: Option<GetCustomerPaymentProfileResponse>,
}

impl MockGateway {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    fn attach_requests(&self) -> Vec<serde_json::Value> {
        self.attach_requests.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait::async_trait]
impl CustomerInformationApi for MockGateway {
    async fn create_customer_profile(
        &self,
        _profile: CustomerProfile,
    ) -> CustomResult<CreateCustomerProfileResponse, GatewayError> {
        self.calls
            .lock()
            .expect("mutex poisoned")
            .push("create_customer_profile".to_string());
        self.create_profile
            .clone()
            .ok_or_else(|| GatewayError::Unreachable.into())
    }

    async fn create_customer_payment_profile(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile: PaymentProfile,
    ) -> CustomResult<CreateCustomerPaymentProfileResponse, GatewayError> {
        self.calls.lock().expect("mutex poisoned").push(format!(
            "create_customer_payment_profile:{}",
            customer_profile_id.peek()
        ));
        self.attach_requests.lock().expect("mutex poisoned").push(
            serde_json::to_value(&payment_profile).expect("payment profile serializes"),
        );
        self.attach
            .clone()
            .ok_or_else(|| GatewayError::Unreachable.into())
    }

    async fn get_customer_payment_profile(
        &self,
        customer_profile_id: Secret<String>,
        payment_profile_id: String,
    ) -> CustomResult<GetCustomerPaymentProfileResponse, GatewayError> {
        self.calls.lock().expect("mutex poisoned").push(format!(
            "get_customer_payment_profile:{}:{}",
            customer_profile_id.peek(),
            payment_profile_id
        ));
        self.read_back
            .clone()
            .ok_or_else(|| GatewayError::Unreachable.into())
    }
}

fn existing_token(gateway_customer_reference: &str) -> ClientGatewayToken {
    ClientGatewayToken {
        company_id: 10,
        client_id: 42,
        company_gateway_id: COMPANY_GATEWAY_ID,
        gateway_type: GatewayType::CreditCard,
        token: "400001".to_string(),
        gateway_customer_reference: gateway_customer_reference.to_string(),
        meta: PaymentMethodMeta {
            exp_month: "xx".to_string(),
            exp_year: "xx".to_string(),
            brand: "Visa".to_string(),
            last4: "XXXX4242".to_string(),
            gateway_type: GatewayType::CreditCard,
        },
    }
}

#[tokio::test]
async fn first_submission_creates_profile_attaches_and_vaults() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id_list: vec![],
            messages: ok_messages(),
        }),
        attach: Some(CreateCustomerPaymentProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id: Some("512345".to_string()),
            validation_direct_response: None,
            messages: ok_messages(),
        }),
        read_back: Some(GetCustomerPaymentProfileResponse {
            payment_profile: Some(masked_profile("512345")),
            messages: ok_messages(),
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let token = flow.submit(opaque_card()).await.expect("onboarding succeeds");

    assert_eq!(
        gateway.calls(),
        vec![
            "create_customer_profile".to_string(),
            "create_customer_payment_profile:190178".to_string(),
            "get_customer_payment_profile:190178:512345".to_string(),
        ]
    );
    assert_eq!(token.token, "512345");
    assert_eq!(token.gateway_customer_reference, "190178");
    assert_eq!(token.gateway_type, GatewayType::CreditCard);
    assert_eq!(token.meta.brand, "Visa");
    assert_eq!(token.meta.last4, "XXXX1111");
    assert_eq!(token.meta.exp_month, "xx");
    assert_eq!(token.meta.exp_year, "xx");

    let attach_request = &gateway.attach_requests()[0];
    assert_eq!(attach_request["billTo"]["firstName"], "Jane");
    assert_eq!(attach_request["billTo"]["country"], "United States");

    let vaulted = store
        .find_client_gateway_token(42, COMPANY_GATEWAY_ID)
        .await
        .expect("store reachable");
    assert_eq!(vaulted, Some(token));
}

#[tokio::test]
async fn existing_token_skips_profile_creation_and_reuses_reference() {
    let gateway = MockGateway {
        attach: Some(CreateCustomerPaymentProfileResponse {
            customer_profile_id: Some("12345".to_string()),
            customer_payment_profile_id: Some("512346".to_string()),
            validation_direct_response: None,
            messages: ok_messages(),
        }),
        read_back: Some(GetCustomerPaymentProfileResponse {
            payment_profile: Some(masked_profile("512346")),
            messages: ok_messages(),
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    store
        .insert_client_gateway_token(existing_token("12345"))
        .await
        .expect("seeding succeeds");
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let token = flow.submit(opaque_card()).await.expect("onboarding succeeds");

    assert_eq!(
        gateway.calls(),
        vec![
            "create_customer_payment_profile:12345".to_string(),
            "get_customer_payment_profile:12345:512346".to_string(),
        ]
    );
    assert_eq!(token.gateway_customer_reference, "12345");
}

#[tokio::test]
async fn missing_contact_omits_billing_address() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id_list: vec![],
            messages: ok_messages(),
        }),
        attach: Some(CreateCustomerPaymentProfileResponse {
            customer_profile_id: None,
            customer_payment_profile_id: Some("512345".to_string()),
            validation_direct_response: None,
            messages: ok_messages(),
        }),
        read_back: Some(GetCustomerPaymentProfileResponse {
            payment_profile: Some(masked_profile("512345")),
            messages: ok_messages(),
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = Payor {
        primary_contact: None,
        ..payor()
    };
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    flow.submit(opaque_card()).await.expect("onboarding succeeds");

    let attach_request = &gateway.attach_requests()[0];
    assert!(attach_request
        .as_object()
        .expect("an object")
        .get("billTo")
        .is_none());
}

#[tokio::test]
async fn rejected_attachment_reports_first_message_and_vaults_nothing() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id_list: vec![],
            messages: ok_messages(),
        }),
        attach: Some(CreateCustomerPaymentProfileResponse {
            customer_profile_id: None,
            customer_payment_profile_id: None,
            validation_direct_response: None,
            messages: error_messages("E00027", "Duplicate"),
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let error = flow.submit(opaque_card()).await.expect_err("attach rejected");

    assert_eq!(
        error.current_context(),
        &TokenizationError::GatewayRejected("E00027  Duplicate".to_string())
    );
    // No read-back after a rejected attach, and nothing vaulted.
    assert_eq!(
        gateway.calls(),
        vec![
            "create_customer_profile".to_string(),
            "create_customer_payment_profile:190178".to_string(),
        ]
    );
    assert!(store
        .find_client_gateway_token(42, COMPANY_GATEWAY_ID)
        .await
        .expect("store reachable")
        .is_none());
}

#[tokio::test]
async fn unreachable_gateway_during_attach() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id_list: vec![],
            messages: ok_messages(),
        }),
        attach: None,
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let error = flow.submit(opaque_card()).await.expect_err("no response");

    assert_eq!(
        error.current_context(),
        &TokenizationError::GatewayUnreachable
    );
}

#[tokio::test]
async fn failed_read_back_vaults_nothing() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id_list: vec![],
            messages: ok_messages(),
        }),
        attach: Some(CreateCustomerPaymentProfileResponse {
            customer_profile_id: None,
            customer_payment_profile_id: Some("512345".to_string()),
            validation_direct_response: None,
            messages: ok_messages(),
        }),
        read_back: Some(GetCustomerPaymentProfileResponse {
            payment_profile: None,
            messages: error_messages("E00040", "The record cannot be found."),
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let error = flow.submit(opaque_card()).await.expect_err("read-back failed");

    assert_eq!(
        error.current_context(),
        &TokenizationError::GatewayRejected("E00040  The record cannot be found.".to_string())
    );
    assert!(store
        .find_client_gateway_token(42, COMPANY_GATEWAY_ID)
        .await
        .expect("store reachable")
        .is_none());
}

#[tokio::test]
async fn duplicate_customer_profile_is_recovered_from_message_text() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: None,
            customer_payment_profile_id_list: vec![],
            messages: error_messages(
                "E00039",
                "A duplicate record with ID 190178 already exists.",
            ),
        }),
        attach: Some(CreateCustomerPaymentProfileResponse {
            customer_profile_id: Some("190178".to_string()),
            customer_payment_profile_id: Some("512345".to_string()),
            validation_direct_response: None,
            messages: ok_messages(),
        }),
        read_back: Some(GetCustomerPaymentProfileResponse {
            payment_profile: Some(masked_profile("512345")),
            messages: ok_messages(),
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let token = flow.submit(opaque_card()).await.expect("profile reused");

    assert_eq!(token.gateway_customer_reference, "190178");
}

#[tokio::test]
async fn rejected_customer_profile_creation_uses_fallback_translation() {
    let gateway = MockGateway {
        create_profile: Some(CreateCustomerProfileResponse {
            customer_profile_id: None,
            customer_payment_profile_id_list: vec![],
            messages: ResponseMessages {
                result_code: ResultCode::Error,
                message: vec![],
            },
        }),
        ..Default::default()
    };
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let error = flow.submit(opaque_card()).await.expect_err("creation rejected");

    assert_eq!(
        error.current_context(),
        &TokenizationError::GatewayRejected(
            "Unable to add customer to Authorize.net gateway".to_string()
        )
    );
}

#[tokio::test]
async fn bank_transfer_is_not_implemented_and_touches_nothing() {
    let gateway = MockGateway::default();
    let store = MockDb::new();
    let payor = payor();
    let flow = PaymentMethodOnboarding::new(&gateway, &store, &payor, COMPANY_GATEWAY_ID);

    let error = flow
        .submit(PaymentMethodData::BankTransfer)
        .await
        .expect_err("bank transfers are a stub");

    assert_eq!(error.current_context(), &TokenizationError::NotImplemented);
    assert!(gateway.calls().is_empty());
    assert!(store.client_gateway_tokens.lock().await.is_empty());
}
