//! Storage seam for vaulted tokens.

use std::sync::Arc;

use authorizedotnet_cim::CustomResult;
use futures::lock::Mutex;

use crate::{errors::StorageError, types::ClientGatewayToken};

/// Access to the local token store. The workflow reads at most once and
/// writes at most once per submission.
#[async_trait::async_trait]
pub trait ClientGatewayTokenInterface {
    async fn find_client_gateway_token(
        &self,
        client_id: i64,
        company_gateway_id: i64,
    ) -> CustomResult<Option<ClientGatewayToken>, StorageError>;

    async fn insert_client_gateway_token(
        &self,
        token: ClientGatewayToken,
    ) -> CustomResult<ClientGatewayToken, StorageError>;
}

/// In-memory store used by tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MockDb {
    pub client_gateway_tokens: Arc<Mutex<Vec<ClientGatewayToken>>>,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ClientGatewayTokenInterface for MockDb {
    async fn find_client_gateway_token(
        &self,
        client_id: i64,
        company_gateway_id: i64,
    ) -> CustomResult<Option<ClientGatewayToken>, StorageError> {
        let tokens = self.client_gateway_tokens.lock().await;
        Ok(tokens
            .iter()
            .find(|token| {
                token.client_id == client_id && token.company_gateway_id == company_gateway_id
            })
            .cloned())
    }

    async fn insert_client_gateway_token(
        &self,
        token: ClientGatewayToken,
    ) -> CustomResult<ClientGatewayToken, StorageError> {
        let mut tokens = self.client_gateway_tokens.lock().await;
        tokens.push(token.clone());
        Ok(token)
    }
}
