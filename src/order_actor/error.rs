//! Error types for the Order actor.

use crate::menu_actor::MenuError;
use crate::model::{DishId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The dish is not on the menu.
    #[error("Unknown dish: {0}")]
    UnknownDish(DishId),

    /// The menu does not have enough of the dish left.
    #[error("Insufficient inventory for {dish}: requested {requested}, available {available}")]
    InsufficientInventory {
        dish: DishId,
        requested: u32,
        available: u32,
    },

    /// The dish is not part of this order.
    #[error("Dish not in order: {0}")]
    DishNotInOrder(DishId),

    /// The provided quantity is invalid (zero).
    #[error("Invalid amount: {0}")]
    InvalidAmount(u32),

    /// The order would hold more units of the dish than a `u32` counts.
    #[error("Too many units of {0} for one order")]
    QuantityOverflow(DishId),

    /// The order's total no longer fits in a `u64`.
    #[error("Order total exceeds the supported range")]
    TotalOverflow,

    /// Paying would overflow the kitchen's revenue counter.
    #[error("Revenue would exceed the supported range")]
    RevenueOverflow,

    /// The operation is not allowed in the order's current status.
    #[error("Cannot {operation} order while it is {status}")]
    IllegalStateTransition {
        status: OrderStatus,
        operation: &'static str,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<MenuError> for OrderError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(dish) => OrderError::UnknownDish(dish),
            MenuError::InsufficientInventory {
                dish,
                requested,
                available,
            } => OrderError::InsufficientInventory {
                dish,
                requested,
                available,
            },
            MenuError::InvalidAmount(amount) => OrderError::InvalidAmount(amount),
            MenuError::StockOverflow { dish, .. } => OrderError::QuantityOverflow(dish),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
