use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::value_objects::ids::SubscriptionId;
use crate::infrastructure::db::dto::DeliveryResultRow;
use crate::infrastructure::db::stores::delivery_result_store::{
    DeliveryResultRepositoryError, DeliveryResultStore,
};
use std::sync::Arc;

pub struct DeliveryResultRepository {
    store: Arc<dyn DeliveryResultStore>,
}

impl DeliveryResultRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn DeliveryResultStore>) -> Self {
        Self { store }
    }

    /// Up to `limit` most recent results, newest first. Never `None`.
    pub async fn search_history(
        &self,
        subscription_id: SubscriptionId,
        limit: u32,
    ) -> Result<Vec<DeliveryResult>, DeliveryResultRepositoryError> {
        let rows = self.store.search_history(subscription_id.0, limit).await?;
        Ok(rows
            .unwrap_or_default()
            .into_iter()
            .map(DeliveryResultRow::into_result)
            .collect())
    }

    /// Returns `false` when the store already held this result id.
    pub async fn insert(
        &self,
        result: &DeliveryResult,
    ) -> Result<bool, DeliveryResultRepositoryError> {
        self.store
            .insert(&DeliveryResultRow::from_result(result))
            .await
    }
}
