use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
use crate::domain::value_objects::timestamps::Timestamp;
use crate::domain::workflows::activation::ActivationState;
use serde::{Deserialize, Serialize};

/// Where and how a webhook is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionConfig {
    pub url: String,
    pub secret: String,
    pub content_type: String,
}

/// Binding between an owner, one event name and a delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSubscription {
    pub id: SubscriptionId,
    pub owner_id: OwnerId,
    pub event_name: String,
    pub is_active: bool,
    pub config: SubscriptionConfig,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subscription that has not been stored yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub owner_id: OwnerId,
    pub event_name: String,
    pub is_active: bool,
    pub config: SubscriptionConfig,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewSubscription {
    /// Build an active candidate stamped with `now` for both timestamps.
    pub fn active(
        owner_id: OwnerId,
        event_name: String,
        config: SubscriptionConfig,
        now: Timestamp,
    ) -> Self {
        let now = now.truncate_to_seconds();
        Self {
            owner_id,
            event_name,
            is_active: true,
            config,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(self, id: SubscriptionId) -> WebhookSubscription {
        WebhookSubscription {
            id,
            owner_id: self.owner_id,
            event_name: self.event_name,
            is_active: self.is_active,
            config: self.config,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update of a subscription. `None` and empty strings leave a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub url: Option<String>,
    pub secret: Option<String>,
    pub content_type: Option<String>,
    pub is_active: Option<bool>,
}

impl WebhookSubscription {
    pub fn activation_state(&self) -> ActivationState {
        ActivationState::from_flag(self.is_active)
    }

    /// Apply a partial update and refresh `updated_at` to `now`.
    ///
    /// Text fields are replaced only when the incoming value is non-empty and differs
    /// from the current one ignoring ASCII case. `updated_at` moves even when nothing
    /// else changed. Returns whether any field other than `updated_at` changed.
    pub fn apply_patch(&mut self, patch: SubscriptionPatch, now: Timestamp) -> bool {
        let mut changed = false;
        changed |= overwrite_if_different(&mut self.config.url, patch.url);
        changed |= overwrite_if_different(&mut self.config.secret, patch.secret);
        changed |= overwrite_if_different(&mut self.config.content_type, patch.content_type);

        if let Some(is_active) = patch.is_active {
            changed |= if is_active {
                self.activate()
            } else {
                self.deactivate()
            };
        }

        self.updated_at = now.truncate_to_seconds();
        changed
    }

    /// Move to `Active`. Returns `false` when the subscription was already active.
    pub fn activate(&mut self) -> bool {
        match self.activation_state().activate() {
            Ok(next) => {
                self.is_active = next.is_active();
                true
            }
            Err(_) => false,
        }
    }

    /// Move to `Inactive`. Returns `false` when the subscription was already inactive.
    pub fn deactivate(&mut self) -> bool {
        match self.activation_state().deactivate() {
            Ok(next) => {
                self.is_active = next.is_active();
                true
            }
            Err(_) => false,
        }
    }
}

fn overwrite_if_different(current: &mut String, incoming: Option<String>) -> bool {
    match incoming {
        Some(value) if !value.is_empty() && !value.eq_ignore_ascii_case(current) => {
            *current = value;
            true
        }
        _ => false,
    }
}
