//! Custom actions for the Order actor.
//!
//! Everything beyond create/get/delete is an action: editing the order's dishes, moving it
//! through its lifecycle, and the `UnitCooked` reports that cooking tasks send back.

use crate::model::{CookProgress, DishId, OrderId};

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Reserves `amount` units of `dish` and adds them to the order.
    AddDish { dish: DishId, amount: u32 },
    /// Drops a line from a draft and returns its units to the menu.
    RemoveDish(DishId),
    /// Commits a draft and starts cooking every line.
    Start,
    /// Stops cooking and returns every reserved unit. Repeating it retries failed releases.
    Cancel,
    /// Settles a ready order.
    Pay,
    /// Sent by a cooking task each time it finishes one unit.
    UnitCooked { dish: DishId, generation: u64 },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// Units of the dish now held by the order.
    AddDish(u32),
    /// Units returned to the menu.
    RemoveDish(u32),
    Start,
    /// Units returned to the menu.
    Cancel(u32),
    Pay(Receipt),
    UnitCooked(CookProgress),
}

/// Outcome of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order: OrderId,
    pub total: u64,
    /// Kitchen revenue after this payment.
    pub revenue: u64,
}
