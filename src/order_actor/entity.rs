//! [`ActorEntity`] implementation for [`Order`].
//!
//! Every action validates the order's status first and only then touches the menu or the
//! lines, so a rejected request leaves the order exactly as it was.

use super::actions::{OrderAction, OrderActionResult, Receipt};
use super::error::OrderError;
use super::events::OrderEvent;
use super::OrderContext;
use crate::menu_actor::MenuError;
use crate::model::{CookProgress, DishId, DishLine, Order, OrderCreate, OrderId, OrderStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::collections::btree_map::Entry;
use std::convert::Infallible;
use tracing::{debug, info, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn assign_id(_params: &OrderCreate, sequence: u64) -> OrderId {
        OrderId(sequence)
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.owner))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &OrderContext) -> Result<(), Self::Error> {
        match update {}
    }

    /// Only finished orders and empty drafts can be removed; anything else still holds stock.
    /// A cancelled order whose release failed is kept until a repeated cancel returns its units.
    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), Self::Error> {
        let empty_draft = self.status == OrderStatus::Draft && self.lines.is_empty();
        if (self.status.is_terminal() && self.unreleased() == 0) || empty_draft {
            Ok(())
        } else {
            Err(OrderError::IllegalStateTransition {
                status: self.status,
                operation: "delete",
            })
        }
    }

    async fn on_shutdown(&mut self, _ctx: &OrderContext) {
        for line in self.lines.values_mut() {
            line.halt();
        }
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::AddDish { dish, amount } => self.add_dish(dish, amount, ctx).await,
            OrderAction::RemoveDish(dish) => self.remove_dish(dish, ctx).await,
            OrderAction::Start => self.start(ctx),
            OrderAction::Cancel => self.cancel(ctx).await,
            OrderAction::Pay => self.pay(ctx),
            OrderAction::UnitCooked { dish, generation } => {
                Ok(self.unit_cooked(dish, generation, ctx))
            }
        }
    }
}

impl Order {
    fn require(
        &self,
        allowed: &[OrderStatus],
        operation: &'static str,
    ) -> Result<(), OrderError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(OrderError::IllegalStateTransition {
                status: self.status,
                operation,
            })
        }
    }

    async fn add_dish(
        &mut self,
        dish: DishId,
        amount: u32,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        if amount == 0 {
            return Err(OrderError::InvalidAmount(amount));
        }
        self.require(
            &[OrderStatus::Draft, OrderStatus::Started, OrderStatus::Ready],
            "add dishes to",
        )?;

        if self.reserved(&dish).checked_add(amount).is_none() {
            return Err(OrderError::QuantityOverflow(dish));
        }

        let reservation = ctx.menu.reserve(dish.clone(), amount).await?;
        if self.total_after(&reservation).is_none() {
            warn!(order = %self.id, %dish, unit_price = reservation.unit_price, "Total would overflow");
            release(ctx, &dish, amount).await?;
            return Err(OrderError::TotalOverflow);
        }

        if self.status == OrderStatus::Ready {
            self.status = OrderStatus::Started;
            info!(order = %self.id, "Order reopened");
            ctx.publish(OrderEvent::Reopened(self.id));
        }

        let id = self.id;
        let cooking = self.status == OrderStatus::Started;
        let line = match self.lines.entry(dish) {
            Entry::Occupied(entry) => {
                let line = entry.into_mut();
                line.add_amount(reservation);
                line
            }
            Entry::Vacant(entry) => entry.insert(DishLine::new(reservation)),
        };
        if cooking {
            line.start_cooking(id, &ctx.orders);
        }
        debug!(order = %id, dish = %line.dish, requested = line.requested, "Dish added");
        Ok(OrderActionResult::AddDish(line.requested))
    }

    async fn remove_dish(
        &mut self,
        dish: DishId,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        self.require(&[OrderStatus::Draft], "remove dishes from")?;
        if !self.lines.contains_key(&dish) {
            return Err(OrderError::DishNotInOrder(dish));
        }
        let amount = self.reserved(&dish);

        release(ctx, &dish, amount).await?;
        self.lines.remove(&dish);
        debug!(order = %self.id, %dish, amount, "Dish removed");
        Ok(OrderActionResult::RemoveDish(amount))
    }

    fn start(&mut self, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        self.require(&[OrderStatus::Draft], "start")?;
        if self.lines.is_empty() {
            return Err(OrderError::IllegalStateTransition {
                status: self.status,
                operation: "start empty",
            });
        }

        self.status = OrderStatus::Started;
        let id = self.id;
        for line in self.lines.values_mut() {
            line.start_cooking(id, &ctx.orders);
        }
        info!(order = %id, lines = self.lines.len(), "Order started");
        ctx.publish(OrderEvent::Started(id));
        Ok(OrderActionResult::Start)
    }

    /// Stops cooking and returns every line's units to the menu.
    ///
    /// Lines whose release fails stay marked as unreleased on the cancelled order; cancelling
    /// it again retries just those lines.
    async fn cancel(&mut self, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        let retry = self.status == OrderStatus::Cancelled && self.unreleased() > 0;
        if !retry {
            self.require(&[OrderStatus::Started], "cancel")?;
            self.status = OrderStatus::Cancelled;
            for line in self.lines.values_mut() {
                line.cancel();
            }
            ctx.publish(OrderEvent::Cancelled(self.id));
        }

        let id = self.id;
        let mut released = 0;
        for line in self.lines.values_mut().filter(|line| !line.released) {
            match release(ctx, &line.dish, line.requested).await {
                Ok(()) => {
                    line.released = true;
                    released = u32::saturating_add(released, line.requested);
                }
                Err(e) => warn!(
                    order = %id,
                    dish = %line.dish,
                    amount = line.requested,
                    error = %e,
                    "Release failed, units held until the next cancel"
                ),
            }
        }
        info!(order = %id, released, unreleased = self.unreleased(), "Order cancelled");
        Ok(OrderActionResult::Cancel(released))
    }

    fn pay(&mut self, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        self.require(&[OrderStatus::Ready], "pay")?;

        let total = self.total().ok_or(OrderError::TotalOverflow)?;
        let revenue = ctx
            .revenue
            .record(total)
            .ok_or(OrderError::RevenueOverflow)?;
        self.status = OrderStatus::Paid;
        let receipt = Receipt {
            order: self.id,
            total,
            revenue,
        };
        info!(order = %self.id, total, revenue, "Order paid");
        ctx.publish(OrderEvent::Paid(receipt.clone()));
        Ok(OrderActionResult::Pay(receipt))
    }

    fn unit_cooked(&mut self, dish: DishId, generation: u64, ctx: &OrderContext) -> OrderActionResult {
        let id = self.id;
        let Some(line) = self.lines.get_mut(&dish) else {
            return OrderActionResult::UnitCooked(CookProgress::Stale);
        };

        let progress = line.record_unit(generation);
        debug!(
            order = %id,
            %dish,
            completed = line.completed,
            requested = line.requested,
            ?progress,
            "Unit cooked"
        );
        if progress == CookProgress::Done {
            ctx.publish(OrderEvent::DishReady { order: id, dish });
            if self.check_ready() {
                info!(order = %id, "Order ready");
                ctx.publish(OrderEvent::Ready(id));
            }
        }
        OrderActionResult::UnitCooked(progress)
    }
}

/// Returns units to the menu. A dish that has since been taken off the menu has nowhere to go
/// back to, so its units are dropped.
async fn release(ctx: &OrderContext, dish: &DishId, amount: u32) -> Result<(), OrderError> {
    match ctx.menu.release(dish.clone(), amount).await {
        Ok(_) => Ok(()),
        Err(MenuError::NotFound(_)) => {
            warn!(%dish, amount, "Dish no longer on the menu, units dropped");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
