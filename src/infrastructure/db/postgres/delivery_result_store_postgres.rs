use crate::infrastructure::db::dto::DeliveryResultRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::delivery_result_store::{
    DeliveryResultRepositoryError, DeliveryResultStore,
};
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct DeliveryResultStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl DeliveryResultStorePostgres {
    /// Build a Postgres-backed delivery history store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn search_history_impl_conn(
        conn: &mut PgConnection,
        subscription_id: uuid::Uuid,
        limit: u32,
    ) -> Result<Option<Vec<DeliveryResultRow>>, DeliveryResultRepositoryError> {
        let rows = sqlx::query_as::<_, DeliveryResultRow>(
            "SELECT
                id,
                subscription_id,
                status_code,
                attempted_at
            FROM webhook_delivery_results
            WHERE subscription_id = $1
            ORDER BY attempted_at DESC, recorded_at DESC
            LIMIT $2",
        )
        .bind(subscription_id)
        .bind(i64::from(limit))
        .fetch_all(&mut *conn)
        .await
        .map_err(|_| DeliveryResultRepositoryError::StorageUnavailable)?;

        Ok(Some(rows))
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &DeliveryResultRow,
    ) -> Result<bool, DeliveryResultRepositoryError> {
        let result = sqlx::query(
            "INSERT INTO webhook_delivery_results (
                id,
                subscription_id,
                status_code,
                attempted_at
            )
            VALUES ($1,$2,$3,$4)
            ON CONFLICT (subscription_id, lower(id)) DO NOTHING",
        )
        .bind(&row.id)
        .bind(row.subscription_id)
        .bind(row.status_code)
        .bind(row.attempted_at)
        .execute(&mut *conn)
        .await
        .map_err(|_| DeliveryResultRepositoryError::StorageUnavailable)?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl DeliveryResultStore for DeliveryResultStorePostgres {
    async fn search_history(
        &self,
        subscription_id: uuid::Uuid,
        limit: u32,
    ) -> Result<Option<Vec<DeliveryResultRow>>, DeliveryResultRepositoryError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(Self::search_history_impl_conn(conn, subscription_id, limit))
            })
            .await
    }

    async fn insert(&self, row: &DeliveryResultRow) -> Result<bool, DeliveryResultRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(async move { Self::insert_impl_conn(conn, &row).await }))
            .await
    }
}
