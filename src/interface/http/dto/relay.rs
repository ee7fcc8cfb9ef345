use crate::interface::relay::SubscriptionTarget;
use serde::Serialize;

/// Everything the relay needs to sign and send one webhook.
#[derive(Debug, Serialize)]
pub struct RelayTargetResponse {
    pub subscription_id: String,
    pub event: String,
    pub url: String,
    pub secret: String,
    pub content_type: String,
}

impl From<SubscriptionTarget> for RelayTargetResponse {
    fn from(target: SubscriptionTarget) -> Self {
        Self {
            subscription_id: target.subscription_id.to_string(),
            event: target.event_name,
            url: target.config.url,
            secret: target.config.secret,
            content_type: target.config.content_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RelayTargetsResponse {
    pub targets: Vec<RelayTargetResponse>,
}
