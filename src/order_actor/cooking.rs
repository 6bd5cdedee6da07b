//! Cooking tasks.
//!
//! One task per line generation. It sleeps for the dish's cook time, reports the unit to the
//! order actor, and goes again until the actor says the line is done. The task holds only a
//! weak handle to the order actor, so it never keeps the actor alive.

use super::actions::{OrderAction, OrderActionResult};
use crate::model::{CookProgress, DishId, Order, OrderId};
use actor_framework::WeakResourceClient;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};

pub fn spawn(
    order: OrderId,
    dish: DishId,
    generation: u64,
    cook_time: Duration,
    token: CancellationToken,
    orders: WeakResourceClient<Order>,
) {
    let span = tracing::debug_span!("cooking", %order, %dish, generation);
    tokio::spawn(
        async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Cooking cancelled");
                        return;
                    }
                    _ = tokio::time::sleep(cook_time) => {}
                }

                let Some(client) = orders.upgrade() else {
                    debug!("Order actor gone");
                    return;
                };
                let action = OrderAction::UnitCooked {
                    dish: dish.clone(),
                    generation,
                };
                let reply = client.perform_action(order, action).await;
                drop(client);

                match reply {
                    Ok(OrderActionResult::UnitCooked(CookProgress::Continue)) => {}
                    Ok(OrderActionResult::UnitCooked(progress)) => {
                        debug!(?progress, "Cooking finished");
                        return;
                    }
                    Ok(other) => {
                        warn!(?other, "Unexpected reply");
                        return;
                    }
                    Err(e) => {
                        debug!(error = %e, "Order unavailable");
                        return;
                    }
                }
            }
        }
        .instrument(span),
    );
}
