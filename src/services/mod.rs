pub mod holder;
pub mod metrics;
pub mod outlet_food;
pub mod snapshot;
pub mod source;
pub mod store;
