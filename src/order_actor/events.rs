//! Order notifications and the kitchen's revenue counter.

use super::actions::Receipt;
use crate::model::{DishId, OrderId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Broadcast whenever an order changes in a way a customer would want to hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    Started(OrderId),
    DishReady { order: OrderId, dish: DishId },
    Ready(OrderId),
    /// A ready order got new dishes and is cooking again.
    Reopened(OrderId),
    Cancelled(OrderId),
    Paid(Receipt),
}

/// Total money taken by the kitchen. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RevenueLedger {
    total: Arc<AtomicU64>,
}

impl RevenueLedger {
    pub fn new(initial: u64) -> Self {
        Self {
            total: Arc::new(AtomicU64::new(initial)),
        }
    }

    /// Adds `amount` and returns the new total. Returns `None` and leaves the ledger alone if
    /// the total would overflow.
    pub fn record(&self, amount: u64) -> Option<u64> {
        self.total
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |total| {
                total.checked_add(amount)
            })
            .ok()
            .map(|previous| previous + amount)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }
}
