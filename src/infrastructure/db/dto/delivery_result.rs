use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::value_objects::ids::{DeliveryResultId, SubscriptionId};
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DeliveryResultRow {
    pub id: String,
    pub subscription_id: uuid::Uuid,
    pub status_code: i32,
    pub attempted_at: OffsetDateTime,
}

impl DeliveryResultRow {
    pub fn from_result(result: &DeliveryResult) -> Self {
        Self {
            id: result.id.0.clone(),
            subscription_id: result.subscription_id.0,
            status_code: i32::from(result.status_code),
            attempted_at: result.attempted_at.as_inner(),
        }
    }

    pub fn into_result(self) -> DeliveryResult {
        DeliveryResult {
            id: DeliveryResultId(self.id),
            subscription_id: SubscriptionId(self.subscription_id),
            // Out-of-range codes cannot be written through `from_result`.
            status_code: u16::try_from(self.status_code).unwrap_or_default(),
            attempted_at: Timestamp::from(self.attempted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeliveryResultRow;
    use crate::domain::entities::delivery_result::DeliveryResult;
    use crate::domain::value_objects::ids::{DeliveryResultId, SubscriptionId};
    use crate::domain::value_objects::timestamps::Timestamp;

    #[test]
    fn given_result_when_mapped_to_row_and_back_should_keep_fields() {
        let result = DeliveryResult {
            id: DeliveryResultId::from("r1"),
            subscription_id: SubscriptionId::new(),
            status_code: 404,
            attempted_at: Timestamp::now_utc(),
        };

        let row = DeliveryResultRow::from_result(&result);
        assert_eq!(row.status_code, 404);

        assert_eq!(row.into_result(), result);
    }
}
