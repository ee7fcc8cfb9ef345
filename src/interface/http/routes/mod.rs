pub mod health;
pub mod metrics;
pub mod ready;
pub mod relay;
pub mod subscription;
