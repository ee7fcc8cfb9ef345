// Use case: create_subscriptions.

use crate::application::context::AppContext;
use crate::application::shared::audit::{self, AuditAction};
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::entities::subscription::{
    NewSubscription, SubscriptionConfig, WebhookSubscription,
};
use crate::domain::value_objects::ids::OwnerId;
use crate::domain::value_objects::timestamps::Timestamp;
use crate::infrastructure::db::stores::subscription_store::SubscriptionRepositoryError;
use metrics::counter;
use tracing::instrument;

/// Registers one subscription per requested event for the caller.
pub struct CreateSubscriptionsUseCase;

#[derive(Debug, Clone)]
pub struct CreateSubscriptionsCommand {
    pub owner_id: OwnerId,
    /// Display name of the caller, recorded in the audit trail.
    pub actor_name: String,
    pub config: SubscriptionConfig,
    pub events: Vec<String>,
}

impl CreateSubscriptionsUseCase {
    /// Create the subscriptions in request order.
    ///
    /// Processing stops at the first event the owner is already subscribed to. Earlier
    /// events stay committed and are returned inside the `Conflict` error.
    #[instrument(skip(ctx, cmd), fields(owner_id = %cmd.owner_id, events = cmd.events.len()))]
    pub async fn execute(
        ctx: &AppContext,
        cmd: CreateSubscriptionsCommand,
    ) -> Result<Vec<WebhookSubscription>, SubscriptionUseCaseError> {
        // Step 1: Stamp every candidate with the same second-precision time.
        let now = Timestamp::now_utc_seconds();
        let actor = audit_actor(&cmd.owner_id, &cmd.actor_name);
        let mut created = Vec::with_capacity(cmd.events.len());

        for event_name in cmd.events {
            let candidate = NewSubscription::active(
                cmd.owner_id.clone(),
                event_name,
                cmd.config.clone(),
                now,
            );

            // Step 2: Refuse a second subscription for the same (owner, event).
            let existing = ctx
                .repos
                .subscription
                .find_by_owner_and_event(&candidate.owner_id, &candidate.event_name)
                .await?;
            if existing.is_some() {
                return Err(SubscriptionUseCaseError::Conflict {
                    event: candidate.event_name,
                    created,
                });
            }

            // Step 3: Persist; the store's unique index catches racing creates.
            let stored = match ctx.repos.subscription.insert(&candidate).await {
                Ok(stored) => stored,
                Err(SubscriptionRepositoryError::Conflict) => {
                    return Err(SubscriptionUseCaseError::Conflict {
                        event: candidate.event_name,
                        created,
                    });
                }
                Err(err) => return Err(err.into()),
            };

            // Step 4: Audit and collect.
            audit::record(&actor, AuditAction::SubscriptionCreated, stored.id);
            counter!("subscriptions_created_total").increment(1);
            created.push(stored);
        }

        Ok(created)
    }
}

fn audit_actor(owner_id: &OwnerId, actor_name: &str) -> String {
    if actor_name.trim().is_empty() {
        owner_id.to_string()
    } else {
        format!("{owner_id} ({})", actor_name.trim())
    }
}
