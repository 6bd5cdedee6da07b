//! # Order Client
//!
//! Typed API over the order actor. Each method sends one [`OrderAction`] and unpacks the
//! matching [`OrderActionResult`].
use crate::model::{DishId, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError, Receipt};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("unexpected reply: {:?}", result))
}

impl OrderClient {
    /// Opens a new draft order for `owner`.
    #[instrument(skip(self))]
    pub async fn create_order(&self, owner: &str) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let params = OrderCreate {
            owner: owner.to_string(),
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Reserves `amount` units of `dish` for the order. Returns the units now on the line.
    #[instrument(skip(self))]
    pub async fn add_dish(&self, id: OrderId, dish: DishId, amount: u32) -> Result<u32, OrderError> {
        match self.action(id, OrderAction::AddDish { dish, amount }).await? {
            OrderActionResult::AddDish(requested) => Ok(requested),
            other => Err(unexpected(other)),
        }
    }

    /// Removes a line from a draft. Returns the units given back to the menu.
    #[instrument(skip(self))]
    pub async fn remove_dish(&self, id: OrderId, dish: DishId) -> Result<u32, OrderError> {
        match self.action(id, OrderAction::RemoveDish(dish)).await? {
            OrderActionResult::RemoveDish(released) => Ok(released),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn start(&self, id: OrderId) -> Result<(), OrderError> {
        match self.action(id, OrderAction::Start).await? {
            OrderActionResult::Start => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Cancels a cooking order, or retries the release of a cancelled one. Returns the units
    /// given back to the menu by this call.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<u32, OrderError> {
        match self.action(id, OrderAction::Cancel).await? {
            OrderActionResult::Cancel(released) => Ok(released),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn pay(&self, id: OrderId) -> Result<Receipt, OrderError> {
        match self.action(id, OrderAction::Pay).await? {
            OrderActionResult::Pay(receipt) => Ok(receipt),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn status(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        match self.get(id).await? {
            Some(order) => Ok(order.status),
            None => Err(OrderError::NotFound(id.to_string())),
        }
    }

    async fn action(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}
