//! # Customer Session
//!
//! What one customer can do at the counter: build a single draft order, commit it, and then
//! manage the orders they placed. A session only ever touches its own orders; asking about
//! anyone else's gets [`SessionError::UnknownOrder`].
//!
//! ```rust,ignore
//! let mut alice = kitchen.session("alice");
//! alice.create_order().await?;
//! alice.select_dish("soup".into(), 2).await?;
//! let order = alice.finish_order().await?;   // cooking starts
//! // ...
//! let receipt = alice.pay_order(order).await?;
//! ```

use crate::clients::OrderClient;
use crate::model::{DishId, OrderId, OrderStatus};
use crate::order_actor::{OrderError, Receipt};
use actor_framework::ActorClient;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("No order in progress")]
    NoDraft,

    #[error("An order is already in progress: {0}")]
    DraftInProgress(OrderId),

    #[error("Not one of your orders: {0}")]
    UnknownOrder(OrderId),

    #[error(transparent)]
    Order(#[from] OrderError),
}

pub struct Session {
    user: String,
    orders: OrderClient,
    draft: Option<OrderId>,
    placed: BTreeSet<OrderId>,
}

impl Session {
    pub fn new(user: impl Into<String>, orders: OrderClient) -> Self {
        Self {
            user: user.into(),
            orders,
            draft: None,
            placed: BTreeSet::new(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn draft(&self) -> Option<OrderId> {
        self.draft
    }

    fn require_draft(&self) -> Result<OrderId, SessionError> {
        self.draft.ok_or(SessionError::NoDraft)
    }

    fn require_placed(&self, id: OrderId) -> Result<OrderId, SessionError> {
        if self.placed.contains(&id) {
            Ok(id)
        } else {
            Err(SessionError::UnknownOrder(id))
        }
    }

    /// Opens a draft order.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn create_order(&mut self) -> Result<OrderId, SessionError> {
        if let Some(draft) = self.draft {
            return Err(SessionError::DraftInProgress(draft));
        }
        let id = self.orders.create_order(&self.user).await?;
        self.draft = Some(id);
        Ok(id)
    }

    /// Adds a dish to the draft. Returns the units of that dish now in the draft.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn select_dish(&mut self, dish: DishId, amount: u32) -> Result<u32, SessionError> {
        let draft = self.require_draft()?;
        Ok(self.orders.add_dish(draft, dish, amount).await?)
    }

    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn remove_dish(&mut self, dish: DishId) -> Result<u32, SessionError> {
        let draft = self.require_draft()?;
        Ok(self.orders.remove_dish(draft, dish).await?)
    }

    /// Commits the draft and starts cooking it.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn finish_order(&mut self) -> Result<OrderId, SessionError> {
        let draft = self.require_draft()?;
        self.orders.start(draft).await?;
        self.draft = None;
        self.placed.insert(draft);
        info!(order = %draft, "Order placed");
        Ok(draft)
    }

    /// Adds a dish to an order that is already cooking or ready.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn add_order_dish(
        &mut self,
        order: OrderId,
        dish: DishId,
        amount: u32,
    ) -> Result<u32, SessionError> {
        let order = self.require_placed(order)?;
        Ok(self.orders.add_dish(order, dish, amount).await?)
    }

    /// Cancels a cooking order and forgets it.
    ///
    /// If some units could not go back to the menu the order stays in the session, so calling
    /// this again retries the release.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn cancel_order(&mut self, order: OrderId) -> Result<u32, SessionError> {
        let order = self.require_placed(order)?;
        let released = self.orders.cancel(order).await?;
        self.orders.delete(order).await?;
        self.placed.remove(&order);
        Ok(released)
    }

    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn pay_order(&mut self, order: OrderId) -> Result<Receipt, SessionError> {
        let order = self.require_placed(order)?;
        Ok(self.orders.pay(order).await?)
    }

    /// Status of every placed order, then the draft if there is one.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn my_orders(&self) -> Result<Vec<(OrderId, OrderStatus)>, SessionError> {
        let mut statuses = Vec::with_capacity(self.placed.len() + 1);
        for &order in &self.placed {
            statuses.push((order, self.orders.status(order).await?));
        }
        if let Some(draft) = self.draft {
            statuses.push((draft, self.orders.status(draft).await?));
        }
        Ok(statuses)
    }
}
