// Use case: update_subscription.

use crate::application::context::AppContext;
use crate::application::shared::audit::{self, AuditAction};
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::entities::subscription::{SubscriptionPatch, WebhookSubscription};
use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
use crate::domain::value_objects::timestamps::Timestamp;
use crate::infrastructure::db::stores::subscription_store::SubscriptionRepositoryError;
use tracing::debug;

/// Applies a partial update to a subscription.
pub struct UpdateSubscriptionUseCase;

#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    /// Caller performing the update, for the audit trail.
    pub actor: OwnerId,
    pub patch: SubscriptionPatch,
}

impl UpdateSubscriptionUseCase {
    /// Merge the patch and persist. `updated_at` is refreshed even for a no-op patch.
    pub async fn execute(
        ctx: &AppContext,
        cmd: UpdateSubscriptionCommand,
    ) -> Result<WebhookSubscription, SubscriptionUseCaseError> {
        // Step 1: Load the current state.
        let mut subscription = ctx
            .repos
            .subscription
            .get(cmd.subscription_id)
            .await?
            .ok_or(SubscriptionUseCaseError::NotFound(cmd.subscription_id))?;

        // Step 2: Merge the patch into the loaded copy.
        let changed = subscription.apply_patch(cmd.patch, Timestamp::now_utc_seconds());
        debug!(subscription_id = %subscription.id, changed, "subscription_patch_applied");

        // Step 3: Persist and audit.
        let stored = match ctx.repos.subscription.update(&subscription).await {
            Ok(stored) => stored,
            Err(SubscriptionRepositoryError::NotFound) => {
                return Err(SubscriptionUseCaseError::NotFound(cmd.subscription_id));
            }
            Err(err) => return Err(err.into()),
        };
        audit::record(
            cmd.actor.as_str(),
            AuditAction::SubscriptionUpdated,
            stored.id,
        );

        Ok(stored)
    }
}
