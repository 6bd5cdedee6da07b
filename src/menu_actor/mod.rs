//! # Menu Actor
//!
//! Owns every [`Dish`] on the menu together with its stock counter.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Dish`]
//! - [`error`] - [`MenuError`]
//! - [`actions`] - [`MenuAction`] and [`MenuActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Reservations
//!
//! Orders never change stock directly. They ask the menu actor to `Reserve` units and get back a
//! [`Reservation`](crate::model::Reservation); on removal or cancellation they `Release` them.
//! The actor handles one message at a time, so two orders racing for the last portion cannot
//! both win and the counter never goes below zero.
//!
//! ```rust
//! use kitchen_engine::clients::MenuClient;
//! use kitchen_engine::menu_actor;
//! use kitchen_engine::model::DishCreate;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, menu) = menu_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let soup = menu
//!         .add_dish(DishCreate {
//!             name: "soup".to_string(),
//!             price: 100,
//!             available: 3,
//!             cook_time: Duration::from_secs(1),
//!         })
//!         .await?;
//!
//!     let reservation = menu.reserve(soup.clone(), 2).await?;
//!     assert_eq!(reservation.unit_price, 100);
//!     assert_eq!(menu.check_stock(soup).await?, 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::MenuClient;
use crate::model::Dish;
use actor_framework::ResourceActor;

/// Creates a new Menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Dish>, MenuClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, MenuClient::new(client))
}
