pub mod create_subscriptions;
pub mod delete_subscription;
pub mod get_subscription;
pub mod ingest_delivery_results;
pub mod list_subscriptions;
pub mod search_subscriptions;
pub mod update_subscription;
