use std::sync::Arc;

use crate::infrastructure::db::database::{Database, DatabaseError};
use crate::infrastructure::db::memory::{InMemoryDeliveryResultStore, InMemorySubscriptionStore};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::postgres::delivery_result_store_postgres::DeliveryResultStorePostgres;
use crate::infrastructure::db::postgres::subscription_store_postgres::SubscriptionStorePostgres;
use crate::infrastructure::db::repositories::delivery_result_repository::DeliveryResultRepository;
use crate::infrastructure::db::repositories::subscription_repository::SubscriptionRepository;

#[derive(Clone)]
pub struct Repositories {
    pub db: Option<Arc<PostgresDatabase>>,
    pub subscription: Arc<SubscriptionRepository>,
    pub delivery_result: Arc<DeliveryResultRepository>,
}

impl Repositories {
    /// Build all repositories backed by Postgres stores.
    pub fn postgres(db: Arc<PostgresDatabase>) -> Self {
        let subscription_store = Arc::new(SubscriptionStorePostgres::new(db.clone()));
        let result_store = Arc::new(DeliveryResultStorePostgres::new(db.clone()));

        Self {
            db: Some(db),
            subscription: Arc::new(SubscriptionRepository::new(subscription_store)),
            delivery_result: Arc::new(DeliveryResultRepository::new(result_store)),
        }
    }

    /// Build all repositories backed by process-local stores.
    pub fn in_memory() -> Self {
        Self {
            db: None,
            subscription: Arc::new(SubscriptionRepository::new(Arc::new(
                InMemorySubscriptionStore::new(),
            ))),
            delivery_result: Arc::new(DeliveryResultRepository::new(Arc::new(
                InMemoryDeliveryResultStore::new(),
            ))),
        }
    }

    /// Check that the backing database answers. Always succeeds without one.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let Some(db) = self.db.as_ref() else {
            return Ok(());
        };
        db.execute("SELECT 1").await.map(|_| ())
    }
}
