mod database;
pub mod delivery_result_store_postgres;
pub mod subscription_store_postgres;

pub use database::PostgresDatabase;
