//! Customer orders and the per-dish cooking state they own.
//!
//! An [`Order`] is a plain aggregate. It never talks to other actors itself; the order actor
//! drives it (see [`crate::order_actor`]) and the methods here only check and apply state
//! transitions.
use crate::model::{DishId, Reservation};
use crate::order_actor::cooking;
use actor_framework::WeakResourceClient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Lifecycle of an order.
///
/// ```text
/// Draft --start--> Started --all lines ready--> Ready --pay--> Paid
///                  Started --cancel--> Cancelled
///                  Started <--add_dish-- Ready
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Draft,
    Started,
    Ready,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            OrderStatus::Draft => "not committed",
            OrderStatus::Started => "cooking",
            OrderStatus::Ready => "ready",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Reply to a cooking task after it reported a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookProgress {
    /// More units to go; keep cooking.
    Continue,
    /// The line just became ready.
    Done,
    /// The report came from a cancelled or superseded process and was ignored.
    Stale,
}

/// Handle to the task cooking one generation of a line.
#[derive(Debug, Clone)]
pub struct CookingProcess {
    pub generation: u64,
    token: CancellationToken,
}

/// Cooking state of one dish within one order.
#[derive(Debug, Clone)]
pub struct DishLine {
    pub dish: DishId,
    pub unit_price: u64,
    pub cook_time: Duration,
    /// Units reserved from the menu for this line.
    pub requested: u32,
    pub completed: u32,
    pub ready: bool,
    pub cancelled: bool,
    /// Set once a cancelled line's units are back on the menu.
    pub released: bool,
    generation: u64,
    process: Option<CookingProcess>,
}

impl DishLine {
    pub fn new(reservation: Reservation) -> Self {
        Self {
            dish: reservation.dish,
            unit_price: reservation.unit_price,
            cook_time: reservation.cook_time,
            requested: reservation.amount,
            completed: 0,
            ready: false,
            cancelled: false,
            released: false,
            generation: 0,
            process: None,
        }
    }

    /// Adds freshly reserved units to the line.
    ///
    /// A ready line starts over: `completed` goes back to 0 and the whole requested amount is
    /// cooked again by the next process. A running process just keeps going towards the
    /// larger target. The order checks with [`Order::total_after`] that the new amount fits.
    pub fn add_amount(&mut self, reservation: Reservation) {
        self.requested += reservation.amount;
        self.unit_price = reservation.unit_price;
        self.cook_time = reservation.cook_time;
        if self.ready {
            self.ready = false;
            self.completed = 0;
        }
    }

    pub fn is_cooking(&self) -> bool {
        self.process.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Spawns a cooking task for this line unless one is already running or nothing is left.
    ///
    /// Returns whether a task was spawned.
    pub fn start_cooking(&mut self, order: OrderId, orders: &WeakResourceClient<Order>) -> bool {
        if self.process.is_some()
            || self.cancelled
            || self.ready
            || self.completed >= self.requested
        {
            return false;
        }

        self.generation += 1;
        let token = CancellationToken::new();
        cooking::spawn(
            order,
            self.dish.clone(),
            self.generation,
            self.cook_time,
            token.clone(),
            orders.clone(),
        );
        self.process = Some(CookingProcess {
            generation: self.generation,
            token,
        });
        true
    }

    /// Applies one cooked unit reported by the process of `generation`.
    pub fn record_unit(&mut self, generation: u64) -> CookProgress {
        match &self.process {
            Some(process) if !self.cancelled && process.generation == generation => {}
            _ => return CookProgress::Stale,
        }

        self.completed += 1;
        if self.completed >= self.requested {
            self.ready = true;
            self.process = None;
            CookProgress::Done
        } else {
            CookProgress::Continue
        }
    }

    /// Stops the running process, if any, without touching the counters.
    pub fn halt(&mut self) {
        if let Some(process) = self.process.take() {
            process.token.cancel();
        }
    }

    /// Stops cooking for good. The completed count is kept.
    pub fn cancel(&mut self) {
        self.halt();
        self.cancelled = true;
    }

    /// `unit_price * requested`, or `None` if it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.requested))
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub owner: String,
    pub status: OrderStatus,
    pub lines: BTreeMap<DishId, DishLine>,
}

impl Order {
    pub fn new(id: OrderId, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            status: OrderStatus::Draft,
            lines: BTreeMap::new(),
        }
    }

    /// Sum of `unit_price * requested` over every line, or `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.lines
            .values()
            .try_fold(0u64, |sum, line| sum.checked_add(line.total()?))
    }

    /// Total the order would reach after taking `reservation`, or `None` if the line's amount
    /// or any sum overflows.
    pub fn total_after(&self, reservation: &Reservation) -> Option<u64> {
        let mut total = 0u64;
        let mut merged = false;
        for line in self.lines.values() {
            let line_total = if line.dish == reservation.dish {
                merged = true;
                let requested = line.requested.checked_add(reservation.amount)?;
                reservation.unit_price.checked_mul(u64::from(requested))?
            } else {
                line.total()?
            };
            total = total.checked_add(line_total)?;
        }
        if !merged {
            let line_total = reservation
                .unit_price
                .checked_mul(u64::from(reservation.amount))?;
            total = total.checked_add(line_total)?;
        }
        Some(total)
    }

    /// Moves a started order to `Ready` once every line is ready.
    ///
    /// Returns `true` only on the call that makes the transition.
    pub fn check_ready(&mut self) -> bool {
        if self.status != OrderStatus::Started || self.lines.is_empty() {
            return false;
        }
        if self.lines.values().all(|line| line.ready) {
            self.status = OrderStatus::Ready;
            return true;
        }
        false
    }

    /// Units of `dish` currently held by this order.
    pub fn reserved(&self, dish: &DishId) -> u32 {
        self.lines.get(dish).map_or(0, |line| line.requested)
    }

    /// Units a cancelled order still owes the menu.
    pub fn unreleased(&self) -> u32 {
        if self.status != OrderStatus::Cancelled {
            return 0;
        }
        self.lines
            .values()
            .filter(|line| !line.released)
            .map(|line| line.requested)
            .fold(0, u32::saturating_add)
    }
}

/// DTO for creating an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub owner: String,
}
