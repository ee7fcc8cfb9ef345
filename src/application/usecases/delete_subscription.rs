// Use case: delete_subscription.

use crate::application::context::AppContext;
use crate::application::shared::audit::{self, AuditAction};
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
use crate::infrastructure::db::stores::subscription_store::SubscriptionRepositoryError;

/// Removes a subscription. Its delivery history is left in place.
pub struct DeleteSubscriptionUseCase;

#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub actor: OwnerId,
}

impl DeleteSubscriptionUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: DeleteSubscriptionCommand,
    ) -> Result<(), SubscriptionUseCaseError> {
        let id = cmd.subscription_id;

        // Step 1: Confirm it exists.
        if ctx.repos.subscription.get(id).await?.is_none() {
            return Err(SubscriptionUseCaseError::NotFound(id));
        }

        // Step 2: Delete; a concurrent delete surfaces as NotFound too.
        match ctx.repos.subscription.delete(id).await {
            Ok(()) => {}
            Err(SubscriptionRepositoryError::NotFound) => {
                return Err(SubscriptionUseCaseError::NotFound(id));
            }
            Err(err) => return Err(err.into()),
        }

        audit::record(cmd.actor.as_str(), AuditAction::SubscriptionDeleted, id);
        Ok(())
    }
}
