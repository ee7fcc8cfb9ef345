use crate::domain::entities::subscription::{
    NewSubscription, SubscriptionConfig, WebhookSubscription,
};
use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SubscriptionRow {
    pub id: uuid::Uuid,
    pub owner_id: String,
    pub event_name: String,
    pub url: String,
    pub secret: String,
    pub content_type: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Insert payload; the id column is filled in by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriptionRow {
    pub owner_id: String,
    pub event_name: String,
    pub url: String,
    pub secret: String,
    pub content_type: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl SubscriptionRow {
    pub fn from_subscription(sub: &WebhookSubscription) -> Self {
        Self {
            id: sub.id.0,
            owner_id: sub.owner_id.0.clone(),
            event_name: sub.event_name.clone(),
            url: sub.config.url.clone(),
            secret: sub.config.secret.clone(),
            content_type: sub.config.content_type.clone(),
            is_active: sub.is_active,
            created_at: sub.created_at.as_inner(),
            updated_at: sub.updated_at.as_inner(),
        }
    }

    pub fn into_subscription(self) -> WebhookSubscription {
        WebhookSubscription {
            id: SubscriptionId(self.id),
            owner_id: OwnerId(self.owner_id),
            event_name: self.event_name,
            is_active: self.is_active,
            config: SubscriptionConfig {
                url: self.url,
                secret: self.secret,
                content_type: self.content_type,
            },
            created_at: Timestamp::from(self.created_at),
            updated_at: Timestamp::from(self.updated_at),
        }
    }
}

impl NewSubscriptionRow {
    pub fn from_new(sub: &NewSubscription) -> Self {
        Self {
            owner_id: sub.owner_id.0.clone(),
            event_name: sub.event_name.clone(),
            url: sub.config.url.clone(),
            secret: sub.config.secret.clone(),
            content_type: sub.config.content_type.clone(),
            is_active: sub.is_active,
            created_at: sub.created_at.as_inner(),
            updated_at: sub.updated_at.as_inner(),
        }
    }

    pub fn with_id(self, id: uuid::Uuid) -> SubscriptionRow {
        SubscriptionRow {
            id,
            owner_id: self.owner_id,
            event_name: self.event_name,
            url: self.url,
            secret: self.secret,
            content_type: self.content_type,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewSubscriptionRow, SubscriptionRow};
    use crate::domain::entities::subscription::{NewSubscription, SubscriptionConfig};
    use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
    use crate::domain::value_objects::timestamps::Timestamp;

    fn sample_new() -> NewSubscription {
        NewSubscription::active(
            OwnerId::from("42"),
            "order.created".to_string(),
            SubscriptionConfig {
                url: "https://a.test/hook".to_string(),
                secret: "s".to_string(),
                content_type: "application/json".to_string(),
            },
            Timestamp::now_utc(),
        )
    }

    #[test]
    fn given_subscription_when_mapped_to_row_and_back_should_keep_fields() {
        let sub = sample_new().with_id(SubscriptionId::new());

        let row = SubscriptionRow::from_subscription(&sub);
        assert_eq!(row.id, sub.id.0);
        assert_eq!(row.owner_id, "42");
        assert_eq!(row.url, sub.config.url);

        assert_eq!(row.into_subscription(), sub);
    }

    #[test]
    fn given_new_row_when_assigned_id_should_carry_all_columns() {
        let new = sample_new();
        let id = uuid::Uuid::new_v4();

        let row = NewSubscriptionRow::from_new(&new).with_id(id);

        assert_eq!(row.id, id);
        assert_eq!(row.event_name, "order.created");
        assert!(row.is_active);
        assert_eq!(row.created_at, new.created_at.as_inner());
    }
}
