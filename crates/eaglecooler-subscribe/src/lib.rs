//! Change Subscription Manager: five independent pollers behind one
//! process-wide coordinator (spec.md §4.E).

pub mod comparator;
pub mod disk;
pub mod events;
pub mod handle;
pub mod manager;
pub mod poller;

pub use comparator::sequences_changed;
pub use disk::{stat_mtime_ms, MtimeSnapshot};
pub use events::ChangeEvent;
pub use handle::SubscriptionHandle;
pub use manager::{SubscribeOptions, SubscriptionManager};
pub use poller::Poller;
