pub mod delivery_result_store;
pub mod subscription_store;
