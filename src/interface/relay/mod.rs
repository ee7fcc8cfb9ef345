//! Peer interface used by the delivery relay.
//!
//! The relay performs the outbound HTTP calls. It asks which active subscriptions
//! listen to an event, and later pushes back what happened on each attempt.

use crate::application::context::AppContext;
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::application::usecases::ingest_delivery_results::IngestDeliveryResultsUseCase;
use crate::application::usecases::search_subscriptions::SearchSubscriptionsUseCase;
use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::entities::subscription::{SubscriptionConfig, WebhookSubscription};
use crate::domain::value_objects::ids::SubscriptionId;
use async_trait::async_trait;
use std::sync::Arc;

/// What the relay needs to deliver one event to one subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTarget {
    pub subscription_id: SubscriptionId,
    pub event_name: String,
    pub config: SubscriptionConfig,
}

impl From<WebhookSubscription> for SubscriptionTarget {
    fn from(sub: WebhookSubscription) -> Self {
        Self {
            subscription_id: sub.id,
            event_name: sub.event_name,
            config: sub.config,
        }
    }
}

#[async_trait]
pub trait RelayPeer: Send + Sync {
    /// Active subscriptions for `event_name`.
    async fn search(&self, event_name: &str)
    -> Result<Vec<SubscriptionTarget>, SubscriptionUseCaseError>;

    /// Hand a batch of delivery results to the reconciler.
    async fn report_results(
        &self,
        results: Vec<DeliveryResult>,
    ) -> Result<(), SubscriptionUseCaseError>;
}

/// In-process `RelayPeer` backed by the application use cases.
#[derive(Clone)]
pub struct RelayService {
    ctx: Arc<AppContext>,
}

impl RelayService {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl RelayPeer for RelayService {
    async fn search(
        &self,
        event_name: &str,
    ) -> Result<Vec<SubscriptionTarget>, SubscriptionUseCaseError> {
        let subs = SearchSubscriptionsUseCase::by_event(&self.ctx, event_name, true).await?;
        Ok(subs.into_iter().map(SubscriptionTarget::from).collect())
    }

    async fn report_results(
        &self,
        results: Vec<DeliveryResult>,
    ) -> Result<(), SubscriptionUseCaseError> {
        IngestDeliveryResultsUseCase::execute(&self.ctx, results).await?;
        Ok(())
    }
}
