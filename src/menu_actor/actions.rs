//! Custom actions for the Menu actor.
//!
//! Every change to a dish's stock counter goes through one of these actions, so the menu actor
//! is the only place where stock arithmetic happens.

use crate::model::Reservation;

/// Stock operations on a single dish.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Reads the available quantity.
    CheckStock,
    /// Takes `u32` units out of stock for an order.
    ///
    /// # Errors
    /// Fails if the amount is zero or exceeds the available quantity. Nothing changes on failure.
    Reserve(u32),
    /// Puts `u32` previously reserved units back.
    Release(u32),
    /// Adds `u32` new units to stock.
    Restock(u32),
}

/// Results from MenuActions.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuActionResult {
    /// Available quantity after the action (`CheckStock`, `Release`, `Restock`).
    Available(u32),
    /// Result of `Reserve`.
    Reserved(Reservation),
}
