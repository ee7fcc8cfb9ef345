use crate::domain::value_objects::ids::SubscriptionId;
use tracing::info;

/// Actor recorded for changes made by the delivery relay.
pub const RELAY_ACTOR: &str = "relay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionDeleted,
    DeliveryResultRecorded,
    SubscriptionDeactivated,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::SubscriptionCreated => "subscription_created",
            AuditAction::SubscriptionUpdated => "subscription_updated",
            AuditAction::SubscriptionDeleted => "subscription_deleted",
            AuditAction::DeliveryResultRecorded => "delivery_result_recorded",
            AuditAction::SubscriptionDeactivated => "subscription_deactivated",
        }
    }
}

/// Emit one audit line for a successful mutation.
pub fn record(actor: &str, action: AuditAction, subscription_id: SubscriptionId) {
    info!(
        target: "audit",
        actor,
        action = action.as_str(),
        subscription_id = %subscription_id,
        "audit"
    );
}
