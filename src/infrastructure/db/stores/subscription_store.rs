use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::{NewSubscriptionRow, SubscriptionRow};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionRepositoryError {
    NotFound,
    Conflict,
    InvalidInput,
    StorageUnavailable,
}

impl From<DatabaseError> for SubscriptionRepositoryError {
    fn from(_: DatabaseError) -> Self {
        SubscriptionRepositoryError::StorageUnavailable
    }
}

/// Durable storage for webhook subscriptions.
///
/// List queries may answer `None` for "no result set"; callers go through
/// `SubscriptionRepository`, which turns that into an empty list.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Fetch a subscription by its ID. Returns `None` if it doesn't exist.
    async fn get(
        &self,
        subscription_id: uuid::Uuid,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError>;
    /// All subscriptions created by an owner.
    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError>;
    /// The owner's subscription for one event, if any.
    async fn find_by_owner_and_event(
        &self,
        owner_id: &str,
        event_name: &str,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError>;
    /// Subscriptions for an event across all owners.
    async fn search_by_event(
        &self,
        event_name: &str,
        active_only: bool,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError>;
    /// Create a subscription, assigning its ID, and return exactly what was stored.
    ///
    /// Returns `Conflict` when the (owner, event) pair is already taken.
    async fn insert(
        &self,
        row: &NewSubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError>;
    /// Update a subscription and return exactly what was stored.
    async fn update(
        &self,
        row: &SubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError>;
    /// Delete a subscription by its ID. Returns an error if it doesn't exist.
    async fn delete(&self, subscription_id: uuid::Uuid)
    -> Result<(), SubscriptionRepositoryError>;
}

/// A no-op subscription store used when persistence is not configured.
pub struct DisabledSubscriptionStore;

#[async_trait]
impl SubscriptionStore for DisabledSubscriptionStore {
    async fn get(
        &self,
        _subscription_id: uuid::Uuid,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }

    async fn find_by_owner(
        &self,
        _owner_id: &str,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }

    async fn find_by_owner_and_event(
        &self,
        _owner_id: &str,
        _event_name: &str,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }

    async fn search_by_event(
        &self,
        _event_name: &str,
        _active_only: bool,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }

    async fn insert(
        &self,
        _row: &NewSubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }

    async fn update(
        &self,
        _row: &SubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }

    async fn delete(
        &self,
        _subscription_id: uuid::Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        Err(SubscriptionRepositoryError::StorageUnavailable)
    }
}
