//! # Order Actor
//!
//! Owns every [`Order`] and runs its cooking. All order state, including the per-dish cooking
//! counters, is changed only inside this actor, one message at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`], [`OrderActionResult`] and [`Receipt`]
//! - [`cooking`] - the per-line cooking task
//! - [`events`] - [`OrderEvent`] and the [`RevenueLedger`]
//! - [`error`] - [`OrderError`]
//!
//! ## Cooking round trip
//!
//! ```text
//! start / add_dish ──spawn──▶ cooking task ──sleep(cook_time)──▶ UnitCooked ──▶ order actor
//!                                  ▲                                              │
//!                                  └────────────── Continue ◀─────────────────────┘
//! ```
//!
//! The task never touches the order. It asks the actor to record each unit, and the actor
//! checks the line's cancelled flag and generation before counting it. A unit finished after
//! `cancel` is therefore never counted, and neither is one from a process that a top-up has
//! replaced.
//!
//! ## Dependencies
//!
//! The actor needs an [`OrderContext`]: the menu client for reservations, a weak client to
//! itself for the cooking tasks, the revenue ledger and the event channel.

pub mod actions;
pub mod cooking;
pub mod entity;
pub mod error;
pub mod events;

pub use actions::*;
pub use error::*;
pub use events::*;

use crate::clients::{MenuClient, OrderClient};
use crate::model::Order;
use actor_framework::{ResourceActor, WeakResourceClient};
use tokio::sync::broadcast;

/// Dependencies injected into the Order actor's `run`.
#[derive(Clone)]
pub struct OrderContext {
    pub menu: MenuClient,
    /// Handed to cooking tasks so they can report back.
    pub orders: WeakResourceClient<Order>,
    pub revenue: RevenueLedger,
    pub events: broadcast::Sender<OrderEvent>,
}

impl OrderContext {
    /// Sends `event` to every subscriber. Having none is fine.
    pub fn publish(&self, event: OrderEvent) {
        let _ = self.events.send(event);
    }
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(client))
}
