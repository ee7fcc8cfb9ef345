use crate::domain::entities::subscription::{NewSubscription, WebhookSubscription};
use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
use crate::infrastructure::db::dto::{NewSubscriptionRow, SubscriptionRow};
use crate::infrastructure::db::stores::subscription_store::{
    SubscriptionRepositoryError, SubscriptionStore,
};
use std::sync::Arc;

/// Domain-facing view of a `SubscriptionStore`.
///
/// Absent result sets from the store come back as empty lists, so nothing past this
/// point has to tell "no data" apart from "no rows".
pub struct SubscriptionRepository {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Fetch a subscription by its ID. Returns `None` if it doesn't exist.
    pub async fn get(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<WebhookSubscription>, SubscriptionRepositoryError> {
        let row = self.store.get(id.0).await?;
        Ok(row.map(SubscriptionRow::into_subscription))
    }

    pub async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Vec<WebhookSubscription>, SubscriptionRepositoryError> {
        let rows = self.store.find_by_owner(owner_id.as_str()).await?;
        Ok(into_subscriptions(rows))
    }

    pub async fn find_by_owner_and_event(
        &self,
        owner_id: &OwnerId,
        event_name: &str,
    ) -> Result<Option<WebhookSubscription>, SubscriptionRepositoryError> {
        let row = self
            .store
            .find_by_owner_and_event(owner_id.as_str(), event_name)
            .await?;
        Ok(row.map(SubscriptionRow::into_subscription))
    }

    pub async fn search_by_event(
        &self,
        event_name: &str,
        active_only: bool,
    ) -> Result<Vec<WebhookSubscription>, SubscriptionRepositoryError> {
        let rows = self.store.search_by_event(event_name, active_only).await?;
        Ok(into_subscriptions(rows))
    }

    /// Create a subscription and return it with its store-assigned ID.
    pub async fn insert(
        &self,
        sub: &NewSubscription,
    ) -> Result<WebhookSubscription, SubscriptionRepositoryError> {
        let stored = self.store.insert(&NewSubscriptionRow::from_new(sub)).await?;
        Ok(stored.into_subscription())
    }

    /// Update a subscription and return what was actually stored.
    pub async fn update(
        &self,
        sub: &WebhookSubscription,
    ) -> Result<WebhookSubscription, SubscriptionRepositoryError> {
        let stored = self
            .store
            .update(&SubscriptionRow::from_subscription(sub))
            .await?;
        Ok(stored.into_subscription())
    }

    /// Delete a subscription by its ID. Returns an error if it doesn't exist.
    pub async fn delete(&self, id: SubscriptionId) -> Result<(), SubscriptionRepositoryError> {
        self.store.delete(id.0).await
    }
}

fn into_subscriptions(rows: Option<Vec<SubscriptionRow>>) -> Vec<WebhookSubscription> {
    rows.unwrap_or_default()
        .into_iter()
        .map(SubscriptionRow::into_subscription)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::SubscriptionRepository;
    use crate::domain::value_objects::ids::OwnerId;
    use crate::infrastructure::db::dto::{NewSubscriptionRow, SubscriptionRow};
    use crate::infrastructure::db::stores::subscription_store::{
        SubscriptionRepositoryError, SubscriptionStore,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Answers every list query with "no result set".
    struct AbsentStore;

    #[async_trait]
    impl SubscriptionStore for AbsentStore {
        async fn get(
            &self,
            _subscription_id: uuid::Uuid,
        ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
            Ok(None)
        }

        async fn find_by_owner(
            &self,
            _owner_id: &str,
        ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
            Ok(None)
        }

        async fn find_by_owner_and_event(
            &self,
            _owner_id: &str,
            _event_name: &str,
        ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
            Ok(None)
        }

        async fn search_by_event(
            &self,
            _event_name: &str,
            _active_only: bool,
        ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
            Ok(None)
        }

        async fn insert(
            &self,
            _row: &NewSubscriptionRow,
        ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
            Err(SubscriptionRepositoryError::InvalidInput)
        }

        async fn update(
            &self,
            _row: &SubscriptionRow,
        ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
            Err(SubscriptionRepositoryError::InvalidInput)
        }

        async fn delete(
            &self,
            _subscription_id: uuid::Uuid,
        ) -> Result<(), SubscriptionRepositoryError> {
            Err(SubscriptionRepositoryError::NotFound)
        }
    }

    #[tokio::test]
    async fn given_absent_result_sets_when_listing_should_return_empty_lists() {
        let repo = SubscriptionRepository::new(Arc::new(AbsentStore));

        let by_owner = repo.find_by_owner(&OwnerId::from("42")).await.unwrap();
        let by_event = repo.search_by_event("order.created", false).await.unwrap();

        assert!(by_owner.is_empty());
        assert!(by_event.is_empty());
    }

    #[tokio::test]
    async fn given_store_error_when_deleting_should_propagate_unchanged() {
        let repo = SubscriptionRepository::new(Arc::new(AbsentStore));

        let result = repo.delete(crate::domain::value_objects::ids::SubscriptionId::new()).await;

        assert_eq!(result, Err(SubscriptionRepositoryError::NotFound));
    }
}
