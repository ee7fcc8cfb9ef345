//! Process-local stores, used for `db.backend = "memory"` and in tests.
//!
//! They honour the same uniqueness rules as the Postgres schema: one subscription
//! per (owner, event) and one result per (subscription, case-folded result id).

mod delivery_result_store_memory;
mod subscription_store_memory;

pub use delivery_result_store_memory::InMemoryDeliveryResultStore;
pub use subscription_store_memory::InMemorySubscriptionStore;
