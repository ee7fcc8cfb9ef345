use crate::infrastructure::db::dto::{NewSubscriptionRow, SubscriptionRow};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::subscription_store::{
    SubscriptionRepositoryError, SubscriptionStore,
};
use async_trait::async_trait;
use sqlx::PgConnection;

macro_rules! subscription_columns {
    () => {
        "id,
        owner_id,
        event_name,
        url,
        secret,
        content_type,
        is_active,
        created_at,
        updated_at"
    };
}

#[derive(Clone)]
pub struct SubscriptionStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl SubscriptionStorePostgres {
    /// Build a Postgres-backed subscription store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        subscription_id: uuid::Uuid,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(concat!(
            "SELECT ",
            subscription_columns!(),
            " FROM webhook_subscriptions WHERE id = $1"
        ))
        .bind(subscription_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        Ok(row)
    }

    async fn find_by_owner_impl_conn(
        conn: &mut PgConnection,
        owner_id: String,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(concat!(
            "SELECT ",
            subscription_columns!(),
            " FROM webhook_subscriptions
            WHERE owner_id = $1
            ORDER BY created_at, id"
        ))
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        Ok(Some(rows))
    }

    async fn find_by_owner_and_event_impl_conn(
        conn: &mut PgConnection,
        owner_id: String,
        event_name: String,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(concat!(
            "SELECT ",
            subscription_columns!(),
            " FROM webhook_subscriptions
            WHERE owner_id = $1
              AND event_name = $2
            LIMIT 1"
        ))
        .bind(owner_id)
        .bind(event_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        Ok(row)
    }

    async fn search_by_event_impl_conn(
        conn: &mut PgConnection,
        event_name: String,
        active_only: bool,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(concat!(
            "SELECT ",
            subscription_columns!(),
            " FROM webhook_subscriptions
            WHERE event_name = $1
              AND (is_active OR NOT $2)
            ORDER BY created_at, id"
        ))
        .bind(event_name)
        .bind(active_only)
        .fetch_all(&mut *conn)
        .await
        .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        Ok(Some(rows))
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &NewSubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        let stored = sqlx::query_as::<_, SubscriptionRow>(concat!(
            "INSERT INTO webhook_subscriptions (
                owner_id,
                event_name,
                url,
                secret,
                content_type,
                is_active,
                created_at,
                updated_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (owner_id, event_name) DO NOTHING
            RETURNING ",
            subscription_columns!()
        ))
        .bind(&row.owner_id)
        .bind(&row.event_name)
        .bind(&row.url)
        .bind(&row.secret)
        .bind(&row.content_type)
        .bind(row.is_active)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        match stored {
            Some(row) => Ok(row),
            None => Err(SubscriptionRepositoryError::Conflict),
        }
    }

    async fn update_impl_conn(
        conn: &mut PgConnection,
        row: &SubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        let stored = sqlx::query_as::<_, SubscriptionRow>(concat!(
            "UPDATE webhook_subscriptions SET
                url = $2,
                secret = $3,
                content_type = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING ",
            subscription_columns!()
        ))
        .bind(row.id)
        .bind(&row.url)
        .bind(&row.secret)
        .bind(&row.content_type)
        .bind(row.is_active)
        .bind(row.updated_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        stored.ok_or(SubscriptionRepositoryError::NotFound)
    }

    async fn delete_impl_conn(
        conn: &mut PgConnection,
        subscription_id: uuid::Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        let result = sqlx::query("DELETE FROM webhook_subscriptions WHERE id = $1")
            .bind(subscription_id)
            .execute(&mut *conn)
            .await
            .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)?;

        if result.rows_affected() == 0 {
            return Err(SubscriptionRepositoryError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionStorePostgres {
    async fn get(
        &self,
        subscription_id: uuid::Uuid,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, subscription_id)))
            .await
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        let owner_id = owner_id.to_string();
        self.db
            .with_conn(move |conn| Box::pin(Self::find_by_owner_impl_conn(conn, owner_id)))
            .await
    }

    async fn find_by_owner_and_event(
        &self,
        owner_id: &str,
        event_name: &str,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        let owner_id = owner_id.to_string();
        let event_name = event_name.to_string();
        self.db
            .with_conn(move |conn| {
                Box::pin(Self::find_by_owner_and_event_impl_conn(
                    conn, owner_id, event_name,
                ))
            })
            .await
    }

    async fn search_by_event(
        &self,
        event_name: &str,
        active_only: bool,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        let event_name = event_name.to_string();
        self.db
            .with_conn(move |conn| {
                Box::pin(Self::search_by_event_impl_conn(conn, event_name, active_only))
            })
            .await
    }

    async fn insert(
        &self,
        row: &NewSubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(async move { Self::insert_impl_conn(conn, &row).await }))
            .await
    }

    async fn update(
        &self,
        row: &SubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(async move { Self::update_impl_conn(conn, &row).await }))
            .await
    }

    async fn delete(
        &self,
        subscription_id: uuid::Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, subscription_id)))
            .await
    }
}
