pub mod action;
pub mod definition;
pub mod reducer;
pub mod subscriptions;

pub use action::{CartAction, CartChange};
pub use definition::{CartStore, CartStoreConfig, DEFAULT_STORAGE_KEY};
pub use subscriptions::{Listener, SubscriptionId};
