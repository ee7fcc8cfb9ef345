pub mod delivery_result_repository;
pub mod factory;
pub mod subscription_repository;

pub use factory::Repositories;
