use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::DeliveryResultRow;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResultRepositoryError {
    Conflict,
    InvalidInput,
    StorageUnavailable,
}

impl From<DatabaseError> for DeliveryResultRepositoryError {
    fn from(_: DatabaseError) -> Self {
        DeliveryResultRepositoryError::StorageUnavailable
    }
}

/// Append-only delivery history, keyed by subscription.
#[async_trait]
pub trait DeliveryResultStore: Send + Sync {
    /// Up to `limit` most recent results for a subscription, newest first.
    async fn search_history(
        &self,
        subscription_id: uuid::Uuid,
        limit: u32,
    ) -> Result<Option<Vec<DeliveryResultRow>>, DeliveryResultRepositoryError>;
    /// Record a result under its subscription.
    ///
    /// A result whose id is already stored for that subscription is ignored and
    /// `false` is returned.
    async fn insert(&self, row: &DeliveryResultRow) -> Result<bool, DeliveryResultRepositoryError>;
}

/// A no-op result store used when persistence is not configured.
pub struct DisabledDeliveryResultStore;

#[async_trait]
impl DeliveryResultStore for DisabledDeliveryResultStore {
    async fn search_history(
        &self,
        _subscription_id: uuid::Uuid,
        _limit: u32,
    ) -> Result<Option<Vec<DeliveryResultRow>>, DeliveryResultRepositoryError> {
        Err(DeliveryResultRepositoryError::StorageUnavailable)
    }

    async fn insert(&self, _row: &DeliveryResultRow) -> Result<bool, DeliveryResultRepositoryError> {
        Err(DeliveryResultRepositoryError::StorageUnavailable)
    }
}
