pub mod audit;
pub mod subscription_errors;
