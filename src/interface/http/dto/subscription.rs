use crate::application::usecases::ingest_delivery_results::IngestDeliveryResultsReport;
use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::entities::subscription::{SubscriptionPatch, WebhookSubscription};
use crate::domain::value_objects::ids::{DeliveryResultId, SubscriptionId};
use crate::domain::value_objects::timestamps::Timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionsRequest {
    /// Caller display name, only used in the audit trail.
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    pub events: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub url: Option<String>,
    pub secret: Option<String>,
    pub content_type: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateSubscriptionRequest> for SubscriptionPatch {
    fn from(req: UpdateSubscriptionRequest) -> Self {
        SubscriptionPatch {
            url: req.url,
            secret: req.secret,
            content_type: req.content_type,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub event: String,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// One delivery attempt as reported by the relay.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryResultRequest {
    pub id: String,
    pub subscription_id: uuid::Uuid,
    pub status_code: u16,
    /// RFC 3339; the receive time is used when absent.
    #[serde(default)]
    pub attempted_at: Option<String>,
}

impl DeliveryResultRequest {
    pub fn into_result(self) -> Result<DeliveryResult, String> {
        if self.id.trim().is_empty() {
            return Err("result id is required".to_string());
        }
        if !(100..=599).contains(&self.status_code) {
            return Err(format!("status_code {} is out of range", self.status_code));
        }
        let attempted_at = match self.attempted_at.as_deref() {
            Some(raw) => OffsetDateTime::parse(raw, &Rfc3339)
                .map(Timestamp::from)
                .map_err(|_| format!("attempted_at '{raw}' is not RFC 3339"))?,
            None => Timestamp::now_utc(),
        };
        Ok(DeliveryResult {
            id: DeliveryResultId(self.id),
            subscription_id: SubscriptionId(self.subscription_id),
            status_code: self.status_code,
            attempted_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct IngestResultsRequest {
    pub results: Vec<DeliveryResultRequest>,
}

#[derive(Debug, Serialize)]
pub struct IngestResultsResponse {
    pub recorded: usize,
    pub duplicates: usize,
    pub deactivated: Vec<String>,
}

impl From<IngestDeliveryResultsReport> for IngestResultsResponse {
    fn from(report: IngestDeliveryResultsReport) -> Self {
        Self {
            recorded: report.recorded,
            duplicates: report.duplicates,
            deactivated: report.deactivated.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Owner view of a subscription. The signing secret is never echoed back.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub owner_id: String,
    pub event: String,
    pub is_active: bool,
    pub url: String,
    pub content_type: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&WebhookSubscription> for SubscriptionResponse {
    fn from(sub: &WebhookSubscription) -> Self {
        Self {
            id: sub.id.to_string(),
            owner_id: sub.owner_id.to_string(),
            event: sub.event_name.clone(),
            is_active: sub.is_active,
            url: sub.config.url.clone(),
            content_type: sub.config.content_type.clone(),
            created_at: rfc3339(sub.created_at),
            updated_at: rfc3339(sub.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeliveryResultResponse {
    pub id: String,
    pub status_code: u16,
    pub attempted_at: String,
}

impl From<&DeliveryResult> for DeliveryResultResponse {
    fn from(result: &DeliveryResult) -> Self {
        Self {
            id: result.id.to_string(),
            status_code: result.status_code,
            attempted_at: rfc3339(result.attempted_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionDetailResponse {
    pub subscription: SubscriptionResponse,
    pub history: Vec<DeliveryResultResponse>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<SubscriptionResponse>,
}

impl SubscriptionListResponse {
    pub fn from_subscriptions(subs: &[WebhookSubscription]) -> Self {
        Self {
            subscriptions: subs.iter().map(SubscriptionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<DeliveryResultResponse>,
}

pub fn rfc3339(ts: Timestamp) -> String {
    ts.as_inner().format(&Rfc3339).unwrap_or_default()
}

/// Trim event names, drop blanks and repeats, keep first-seen order.
pub fn normalize_events(events: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(events.len());
    for event in events.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
        if !out.iter().any(|seen| seen == event) {
            out.push(event.to_string());
        }
    }
    out
}
