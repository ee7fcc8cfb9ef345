// Use case: get_subscription.

use crate::application::context::AppContext;
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::entities::subscription::WebhookSubscription;
use crate::domain::value_objects::ids::SubscriptionId;

/// Fetches a subscription together with its recent delivery history.
pub struct GetSubscriptionUseCase;

#[derive(Debug, Clone)]
pub struct GetSubscriptionResult {
    pub subscription: WebhookSubscription,
    /// Most recent first, at most `limits.history_limit` entries.
    pub history: Vec<DeliveryResult>,
}

impl GetSubscriptionUseCase {
    pub async fn execute(
        ctx: &AppContext,
        id: SubscriptionId,
    ) -> Result<GetSubscriptionResult, SubscriptionUseCaseError> {
        // Step 1: Load the subscription or fail.
        let subscription = ctx
            .repos
            .subscription
            .get(id)
            .await?
            .ok_or(SubscriptionUseCaseError::NotFound(id))?;

        // Step 2: Attach the newest history entries.
        let history = ctx
            .repos
            .delivery_result
            .search_history(id, ctx.limits.history_limit)
            .await?;

        Ok(GetSubscriptionResult {
            subscription,
            history,
        })
    }
}
