use crate::config::Subscriptions;
use crate::infrastructure::db::repositories::Repositories;

/// Shared application resources used by use cases.
pub struct AppContext {
    pub repos: Repositories,
    pub limits: Subscriptions,
}

impl AppContext {
    /// Build a new application context with shared repositories and limits.
    pub fn new(repos: Repositories, limits: Subscriptions) -> Self {
        Self { repos, limits }
    }
}
