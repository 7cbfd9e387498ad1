use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::store::{KnowledgeStore, NodeId, PracticeDirection, StoreError};

/// JSON action client for a knowledge store bridge running in the host editor
#[derive(Clone)]
pub struct StoreConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl StoreConnectClient {
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { base_url, client }
    }

    /// Check if the store bridge is available
    pub async fn check_connection(&self) -> Result<u32, StoreError> {
        self.invoke::<u32>("version", json!({}))
            .await?
            .into_result("version")
    }

    /// Invoke a store bridge action
    async fn invoke<T>(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<ConnectResponse<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let request = ConnectRequest {
            action: action.to_string(),
            version: 1,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        Ok(response.json::<ConnectResponse<T>>().await?)
    }
}

#[async_trait]
impl KnowledgeStore for StoreConnectClient {
    async fn find_node_by_name(&self, name: &str) -> Result<Option<NodeId>, StoreError> {
        self.invoke::<NodeId>("findNodeByName", json!({ "name": name }))
            .await?
            .into_option()
    }

    async fn create_node(&self) -> Result<NodeId, StoreError> {
        self.invoke::<NodeId>("createNode", json!({}))
            .await?
            .into_result("createNode")
    }

    async fn set_text(&self, id: &NodeId, text: &str) -> Result<(), StoreError> {
        self.invoke::<serde_json::Value>("setText", json!({ "id": id, "text": text }))
            .await?
            .into_unit()
    }

    async fn set_parent(&self, id: &NodeId, parent: &NodeId) -> Result<(), StoreError> {
        self.invoke::<serde_json::Value>("setParent", json!({ "id": id, "parent": parent }))
            .await?
            .into_unit()
    }

    async fn set_is_review_card(
        &self,
        id: &NodeId,
        is_review_card: bool,
    ) -> Result<(), StoreError> {
        self.invoke::<serde_json::Value>(
            "setIsReviewCard",
            json!({ "id": id, "isReviewCard": is_review_card }),
        )
        .await?
        .into_unit()
    }

    async fn set_practice_direction(
        &self,
        id: &NodeId,
        direction: PracticeDirection,
    ) -> Result<(), StoreError> {
        self.invoke::<serde_json::Value>(
            "setPracticeDirection",
            json!({ "id": id, "direction": direction }),
        )
        .await?
        .into_unit()
    }
}

#[derive(Serialize)]
struct ConnectRequest {
    action: String,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct ConnectResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> ConnectResponse<T> {
    fn into_option(self) -> Result<Option<T>, StoreError> {
        if let Some(error) = self.error {
            return Err(StoreError::Remote(error));
        }

        Ok(self.result)
    }

    fn into_result(self, action: &str) -> Result<T, StoreError> {
        self.into_option()?
            .ok_or_else(|| StoreError::EmptyResult(action.to_string()))
    }

    fn into_unit(self) -> Result<(), StoreError> {
        self.into_option().map(|_| ())
    }
}
