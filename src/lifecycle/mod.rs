//! Orchestration: actor startup and shutdown, configuration, and saved state.

pub mod config;
pub mod kitchen_system;
pub mod persistence;

pub use config::KitchenConfig;
pub use kitchen_system::{KitchenError, KitchenSystem};
pub use persistence::{DishRecord, KitchenSnapshot, PersistenceError};
