pub mod delivery_result;
pub mod subscription;
