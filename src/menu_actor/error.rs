//! Error types for the Menu actor.

use crate::model::DishId;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The dish is not on the menu.
    #[error("Dish not found: {0}")]
    NotFound(DishId),

    /// A dish with this name is already on the menu.
    #[error("Dish already exists: {0}")]
    AlreadyExists(DishId),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient inventory for {dish}: requested {requested}, available {available}")]
    InsufficientInventory {
        dish: DishId,
        requested: u32,
        available: u32,
    },

    /// The provided quantity is invalid (zero).
    #[error("Invalid amount: {0}")]
    InvalidAmount(u32),

    /// Adding the units would push the stock past `u32::MAX`.
    #[error("Stock overflow for {dish}: {available} available, {amount} more")]
    StockOverflow {
        dish: DishId,
        amount: u32,
        available: u32,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for MenuError {
    fn from(msg: String) -> Self {
        MenuError::ActorCommunicationError(msg)
    }
}
