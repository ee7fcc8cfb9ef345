use crate::domain::entities::subscription::WebhookSubscription;
use crate::domain::value_objects::ids::SubscriptionId;
use crate::infrastructure::db::stores::delivery_result_store::DeliveryResultRepositoryError;
use crate::infrastructure::db::stores::subscription_store::SubscriptionRepositoryError;
use thiserror::Error;

/// Failures surfaced by the subscription and history use cases.
///
/// Store failures are carried as-is; the transport decides how to present them.
#[derive(Debug, Error)]
pub enum SubscriptionUseCaseError {
    #[error("subscription {0} not found")]
    NotFound(SubscriptionId),

    /// `created` holds the subscriptions committed before the conflicting event.
    #[error("a subscription for event '{event}' already exists")]
    Conflict {
        event: String,
        created: Vec<WebhookSubscription>,
    },

    #[error("subscription store failure: {0:?}")]
    SubscriptionStorage(SubscriptionRepositoryError),

    #[error("delivery history store failure: {0:?}")]
    HistoryStorage(DeliveryResultRepositoryError),
}

impl From<SubscriptionRepositoryError> for SubscriptionUseCaseError {
    fn from(err: SubscriptionRepositoryError) -> Self {
        SubscriptionUseCaseError::SubscriptionStorage(err)
    }
}

impl From<DeliveryResultRepositoryError> for SubscriptionUseCaseError {
    fn from(err: DeliveryResultRepositoryError) -> Self {
        SubscriptionUseCaseError::HistoryStorage(err)
    }
}
