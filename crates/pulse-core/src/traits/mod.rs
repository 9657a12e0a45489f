pub mod activity;
pub mod store;

pub use activity::IActivitySource;
pub use store::IEngagementStore;
