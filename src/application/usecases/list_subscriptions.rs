// Use case: list_subscriptions.

use crate::application::context::AppContext;
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::entities::subscription::WebhookSubscription;
use crate::domain::value_objects::ids::OwnerId;

/// Lists the caller's own subscriptions.
pub struct ListSubscriptionsUseCase;

impl ListSubscriptionsUseCase {
    /// Returns an empty list when the owner has nothing registered.
    pub async fn execute(
        ctx: &AppContext,
        owner_id: &OwnerId,
    ) -> Result<Vec<WebhookSubscription>, SubscriptionUseCaseError> {
        Ok(ctx.repos.subscription.find_by_owner(owner_id).await?)
    }
}
