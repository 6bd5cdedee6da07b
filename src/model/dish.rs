/// A dish on the menu, with its stock counter.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Dish`](#impl-ActorEntity-for-Dish) for details on:
/// - Creation parameters ([`DishCreate`])
/// - Update parameters ([`DishUpdate`])
/// - Custom actions ([`MenuAction`](crate::menu_actor::MenuAction))
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

/// Type-safe identifier for dishes. Dishes are keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DishId(pub String);

impl From<&str> for DishId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for DishId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    pub id: DishId,
    /// Price of one unit, in whole currency units.
    pub price: u64,
    /// Units that can still be reserved.
    pub available: u32,
    /// Time to cook one unit.
    pub cook_time: Duration,
}

impl Dish {
    pub fn new(id: impl Into<DishId>, price: u64, available: u32, cook_time: Duration) -> Self {
        Self {
            id: id.into(),
            price,
            available,
            cook_time,
        }
    }
}

/// DTO for adding a dish to the menu.
#[derive(Debug, Clone)]
pub struct DishCreate {
    pub name: String,
    pub price: u64,
    pub available: u32,
    pub cook_time: Duration,
}

/// DTO for editing a dish. Stock only changes through menu actions.
#[derive(Debug, Clone, Default)]
pub struct DishUpdate {
    pub price: Option<u64>,
    pub cook_time: Option<Duration>,
}

/// Stock taken from the menu for one order line.
///
/// Carries the price and cook time as they were when the stock was taken, so the order never
/// has to look the dish up again.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub dish: DishId,
    pub amount: u32,
    pub unit_price: u64,
    pub cook_time: Duration,
}
