pub mod health;
pub mod metrics;
pub mod outlet_food;
