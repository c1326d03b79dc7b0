pub mod menu;
pub mod outlet;
pub mod serde_helpers;
