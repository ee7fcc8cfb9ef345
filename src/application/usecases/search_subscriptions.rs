// Use case: search_subscriptions.

use crate::application::context::AppContext;
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::entities::subscription::WebhookSubscription;
use crate::domain::value_objects::ids::SubscriptionId;

/// Owner-agnostic read queries used by operators and the delivery relay.
pub struct SearchSubscriptionsUseCase;

impl SearchSubscriptionsUseCase {
    /// Every subscription for `event_name`, across all owners.
    pub async fn by_event(
        ctx: &AppContext,
        event_name: &str,
        active_only: bool,
    ) -> Result<Vec<WebhookSubscription>, SubscriptionUseCaseError> {
        Ok(ctx
            .repos
            .subscription
            .search_by_event(event_name, active_only)
            .await?)
    }

    /// Up to `limit` most recent results for a subscription, newest first.
    ///
    /// `limit` is clamped to `1..=limits.max_history_limit`.
    pub async fn history(
        ctx: &AppContext,
        subscription_id: SubscriptionId,
        limit: u32,
    ) -> Result<Vec<DeliveryResult>, SubscriptionUseCaseError> {
        let limit = limit.clamp(1, ctx.limits.max_history_limit.max(1));
        Ok(ctx
            .repos
            .delivery_result
            .search_history(subscription_id, limit)
            .await?)
    }
}
