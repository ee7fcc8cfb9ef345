use crate::infrastructure::db::dto::DeliveryResultRow;
use crate::infrastructure::db::stores::delivery_result_store::{
    DeliveryResultRepositoryError, DeliveryResultStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryDeliveryResultStore {
    history: Mutex<HashMap<uuid::Uuid, Vec<DeliveryResultRow>>>,
}

impl InMemoryDeliveryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryResultStore for InMemoryDeliveryResultStore {
    async fn search_history(
        &self,
        subscription_id: uuid::Uuid,
        limit: u32,
    ) -> Result<Option<Vec<DeliveryResultRow>>, DeliveryResultRepositoryError> {
        let history = self
            .history
            .lock()
            .map_err(|_| DeliveryResultRepositoryError::StorageUnavailable)?;
        let Some(rows) = history.get(&subscription_id) else {
            return Ok(None);
        };

        let mut rows = rows.clone();
        rows.sort_by(|a, b| b.attempted_at.cmp(&a.attempted_at));
        rows.truncate(limit as usize);
        Ok(Some(rows))
    }

    async fn insert(&self, row: &DeliveryResultRow) -> Result<bool, DeliveryResultRepositoryError> {
        let mut history = self
            .history
            .lock()
            .map_err(|_| DeliveryResultRepositoryError::StorageUnavailable)?;
        let rows = history.entry(row.subscription_id).or_default();
        if rows.iter().any(|stored| stored.id.eq_ignore_ascii_case(&row.id)) {
            return Ok(false);
        }
        rows.push(row.clone());
        Ok(true)
    }
}
