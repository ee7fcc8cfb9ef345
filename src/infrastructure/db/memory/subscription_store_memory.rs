use crate::infrastructure::db::dto::{NewSubscriptionRow, SubscriptionRow};
use crate::infrastructure::db::stores::subscription_store::{
    SubscriptionRepositoryError, SubscriptionStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct InMemorySubscriptionStore {
    rows: Mutex<HashMap<uuid::Uuid, SubscriptionRow>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<uuid::Uuid, SubscriptionRow>>, SubscriptionRepositoryError>
    {
        self.rows
            .lock()
            .map_err(|_| SubscriptionRepositoryError::StorageUnavailable)
    }
}

fn non_empty(rows: Vec<SubscriptionRow>) -> Option<Vec<SubscriptionRow>> {
    if rows.is_empty() { None } else { Some(rows) }
}

fn sorted(mut rows: Vec<SubscriptionRow>) -> Vec<SubscriptionRow> {
    rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    rows
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn get(
        &self,
        subscription_id: uuid::Uuid,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        Ok(self.rows()?.get(&subscription_id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        let rows = self
            .rows()?
            .values()
            .filter(|row| row.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(non_empty(sorted(rows)))
    }

    async fn find_by_owner_and_event(
        &self,
        owner_id: &str,
        event_name: &str,
    ) -> Result<Option<SubscriptionRow>, SubscriptionRepositoryError> {
        Ok(self
            .rows()?
            .values()
            .find(|row| row.owner_id == owner_id && row.event_name == event_name)
            .cloned())
    }

    async fn search_by_event(
        &self,
        event_name: &str,
        active_only: bool,
    ) -> Result<Option<Vec<SubscriptionRow>>, SubscriptionRepositoryError> {
        let rows = self
            .rows()?
            .values()
            .filter(|row| row.event_name == event_name && (!active_only || row.is_active))
            .cloned()
            .collect();
        Ok(non_empty(sorted(rows)))
    }

    async fn insert(
        &self,
        row: &NewSubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        let mut rows = self.rows()?;
        if rows
            .values()
            .any(|stored| stored.owner_id == row.owner_id && stored.event_name == row.event_name)
        {
            return Err(SubscriptionRepositoryError::Conflict);
        }
        let stored = row.clone().with_id(uuid::Uuid::new_v4());
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        row: &SubscriptionRow,
    ) -> Result<SubscriptionRow, SubscriptionRepositoryError> {
        let mut rows = self.rows()?;
        let Some(stored) = rows.get_mut(&row.id) else {
            return Err(SubscriptionRepositoryError::NotFound);
        };
        *stored = row.clone();
        Ok(stored.clone())
    }

    async fn delete(
        &self,
        subscription_id: uuid::Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        match self.rows()?.remove(&subscription_id) {
            Some(_) => Ok(()),
            None => Err(SubscriptionRepositoryError::NotFound),
        }
    }
}
