pub mod delivery_result;
pub mod subscription;

pub use delivery_result::DeliveryResultRow;
pub use subscription::{NewSubscriptionRow, SubscriptionRow};
