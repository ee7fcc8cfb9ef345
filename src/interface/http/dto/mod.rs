pub mod relay;
pub mod subscription;
