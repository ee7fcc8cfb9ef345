use crate::domain::value_objects::ids::{DeliveryResultId, SubscriptionId};
use crate::domain::value_objects::timestamps::Timestamp;

/// Outcome of one outbound delivery attempt, as reported by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    pub id: DeliveryResultId,
    pub subscription_id: SubscriptionId,
    pub status_code: u16,
    pub attempted_at: Timestamp,
}

impl DeliveryResult {
    /// `true` for 4xx responses, the only range that triggers auto-deactivation.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status_code: u16) -> DeliveryResult {
        DeliveryResult {
            id: DeliveryResultId::from("r1"),
            subscription_id: SubscriptionId::new(),
            status_code,
            attempted_at: Timestamp::now_utc(),
        }
    }

    #[test]
    fn given_status_codes_when_classified_should_only_flag_4xx() {
        for code in [400, 404, 410, 499] {
            assert!(result(code).is_client_error(), "{code}");
        }
        for code in [200, 204, 301, 399, 500, 503] {
            assert!(!result(code).is_client_error(), "{code}");
        }
    }
}
