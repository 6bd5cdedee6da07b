//! [`ActorEntity`] implementation for [`Dish`].
//!
//! Dishes are keyed by name. Stock changes only through [`MenuAction`]s; `on_update` edits the
//! price and cook time and leaves the counter alone.

use super::actions::{MenuAction, MenuActionResult};
use super::error::MenuError;
use crate::model::{Dish, DishCreate, DishId, DishUpdate, Reservation};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Dish {
    type Id = DishId;
    type Create = DishCreate;
    type Update = DishUpdate;
    type Action = MenuAction;
    type ActionResult = MenuActionResult;
    type Context = ();
    type Error = MenuError;

    fn assign_id(params: &DishCreate, _sequence: u64) -> DishId {
        DishId(params.name.clone())
    }

    fn from_create_params(id: DishId, params: DishCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.price, params.available, params.cook_time))
    }

    async fn on_update(&mut self, update: DishUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(cook_time) = update.cook_time {
            self.cook_time = cook_time;
        }
        Ok(())
    }

    /// # Actions
    /// - `CheckStock`: returns the available quantity
    /// - `Reserve`: takes units out of stock, all or nothing
    /// - `Release`: returns units to stock
    /// - `Restock`: adds units to stock; zero is rejected
    ///
    /// Neither `Release` nor `Restock` may push the stock past `u32::MAX`.
    async fn handle_action(
        &mut self,
        action: MenuAction,
        _ctx: &(),
    ) -> Result<MenuActionResult, Self::Error> {
        match action {
            MenuAction::CheckStock => Ok(MenuActionResult::Available(self.available)),
            MenuAction::Reserve(amount) => {
                if amount == 0 {
                    return Err(MenuError::InvalidAmount(amount));
                }
                if amount > self.available {
                    return Err(MenuError::InsufficientInventory {
                        dish: self.id.clone(),
                        requested: amount,
                        available: self.available,
                    });
                }
                self.available -= amount;
                debug!(dish = %self.id, amount, available = self.available, "Reserved");
                Ok(MenuActionResult::Reserved(Reservation {
                    dish: self.id.clone(),
                    amount,
                    unit_price: self.price,
                    cook_time: self.cook_time,
                }))
            }
            MenuAction::Release(amount) => {
                self.available = self.add_stock(amount)?;
                debug!(dish = %self.id, amount, available = self.available, "Released");
                Ok(MenuActionResult::Available(self.available))
            }
            MenuAction::Restock(amount) => {
                if amount == 0 {
                    return Err(MenuError::InvalidAmount(amount));
                }
                self.available = self.add_stock(amount)?;
                Ok(MenuActionResult::Available(self.available))
            }
        }
    }
}

impl Dish {
    fn add_stock(&self, amount: u32) -> Result<u32, MenuError> {
        self.available
            .checked_add(amount)
            .ok_or_else(|| MenuError::StockOverflow {
                dish: self.id.clone(),
                amount,
                available: self.available,
            })
    }
}
