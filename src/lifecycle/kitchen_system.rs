//! Owns the menu and order actors for the lifetime of the kitchen.
//!
//! The order actor is always stopped before the menu actor it depends on.

use super::config::KitchenConfig;
use super::persistence::{DishRecord, KitchenSnapshot, PersistenceError};
use crate::clients::{MenuClient, OrderClient};
use crate::menu_actor::{self, MenuError};
use crate::order_actor::{self, OrderContext, OrderEvent, RevenueLedger};
use crate::session::Session;
use actor_framework::ActorClient;
use std::path::Path;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, instrument};

/// Events buffered per subscriber before the slowest one starts missing them.
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Actor task failed: {0}")]
    ActorFailed(#[from] JoinError),

    #[error("Saved revenue {0} does not fit the ledger")]
    RevenueOverflow(u64),
}

/// Starts, wires and stops the kitchen's actors.
///
/// # Architecture
///
/// - **Menu actor**: dishes and their stock. No dependencies.
/// - **Order actor**: orders and their cooking. Depends on the menu client, a weak client to
///   itself, the revenue ledger and the event channel.
///
/// The order actor holds a menu client, so the menu actor outlives it. `shutdown` relies on that
/// ordering.
///
/// # Example
///
/// ```ignore
/// let kitchen = KitchenSystem::open(KitchenConfig::from_env()).await?;
/// let mut alice = kitchen.session("alice");
/// // ...
/// drop(alice);
/// kitchen.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Client for interacting with the Menu actor
    pub menu: MenuClient,

    /// Client for interacting with the Order actor
    pub orders: OrderClient,

    revenue: RevenueLedger,
    events: broadcast::Sender<OrderEvent>,
    config: KitchenConfig,
    order_handle: JoinHandle<()>,
    menu_handle: JoinHandle<()>,
}

impl KitchenSystem {
    /// Spawns both actors with an empty menu and zero revenue.
    pub fn new(config: KitchenConfig) -> Self {
        // 1. Create actors
        let (menu_actor, menu) = menu_actor::new(config.buffer_size);
        let (order_actor, orders) = order_actor::new(config.buffer_size);
        let revenue = RevenueLedger::default();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        // 2. Start actors with injected context
        let menu_handle = tokio::spawn(menu_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            menu: menu.clone(),
            orders: orders.inner().downgrade(),
            revenue: revenue.clone(),
            events: events.clone(),
        }));

        info!(buffer_size = config.buffer_size, "Kitchen started");
        Self {
            menu,
            orders,
            revenue,
            events,
            config,
            order_handle,
            menu_handle,
        }
    }

    /// Spawns the actors and restores the state saved at `config.state_path`, if any.
    pub async fn open(config: KitchenConfig) -> Result<Self, KitchenError> {
        let snapshot = KitchenSnapshot::load_or_default(&config.state_path)?;
        let system = Self::new(config);
        system.restore(snapshot).await?;
        Ok(system)
    }

    /// Adds the saved dishes to the menu and the saved revenue to the ledger.
    #[instrument(skip(self, snapshot), fields(dishes = snapshot.dishes.len()))]
    pub async fn restore(&self, snapshot: KitchenSnapshot) -> Result<(), KitchenError> {
        for record in snapshot.dishes {
            self.menu.add_dish(record.into()).await?;
        }
        self.revenue
            .record(snapshot.revenue)
            .ok_or(KitchenError::RevenueOverflow(snapshot.revenue))?;
        Ok(())
    }

    /// Current menu, stock and revenue.
    pub async fn snapshot(&self) -> Result<KitchenSnapshot, KitchenError> {
        let dishes = self.menu.list().await?;
        Ok(KitchenSnapshot {
            dishes: dishes.iter().map(DishRecord::from).collect(),
            revenue: self.revenue.total(),
        })
    }

    /// Takes a snapshot and writes it to `path`.
    #[instrument(skip(self))]
    pub async fn save(&self, path: &Path) -> Result<(), KitchenError> {
        self.snapshot().await?.save(path)?;
        Ok(())
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn revenue(&self) -> u64 {
        self.revenue.total()
    }

    /// Receives every [`OrderEvent`] published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.events.subscribe()
    }

    pub fn session(&self, user: impl Into<String>) -> Session {
        Session::new(user, self.orders.clone())
    }

    /// Gracefully shuts down both actors.
    ///
    /// Every [`Session`] and client clone must be dropped first; each one keeps its actor running.
    /// The order actor stops its cooking tasks on the way out.
    pub async fn shutdown(self) -> Result<(), KitchenError> {
        info!("Shutting down kitchen...");

        // Step 1: Close the channels by dropping our clients
        drop(self.orders);
        drop(self.menu);

        // Step 2: The order actor holds the last menu client, so it has to finish first
        for (name, handle) in [("order", self.order_handle), ("menu", self.menu_handle)] {
            if let Err(e) = handle.await {
                error!(actor = name, error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Kitchen shutdown complete.");
        Ok(())
    }
}
