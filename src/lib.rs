//! # Kitchen Engine
//!
//! Order fulfillment for a restaurant kitchen, built on [`actor_framework`]. Customers build
//! orders from the menu; the kitchen cooks every dish unit by unit in the background, tells
//! the customer when the whole order is ready, and takes the payment.
//!
//! ## Modules
//!
//! - [`model`]: [`Dish`](model::Dish), [`Order`](model::Order) and the per-dish
//!   [`DishLine`](model::DishLine) cooking state.
//! - [`menu_actor`]: owns the menu and its stock. Reservations are all or nothing.
//! - [`order_actor`]: owns the orders, runs the cooking tasks, publishes
//!   [`OrderEvent`](order_actor::OrderEvent)s.
//! - [`clients`]: typed wrappers ([`MenuClient`](clients::MenuClient),
//!   [`OrderClient`](clients::OrderClient)) around the actors' channels.
//! - [`session`]: what a single customer may do.
//! - [`lifecycle`]: [`KitchenSystem`](lifecycle::KitchenSystem) starts and stops everything,
//!   plus configuration and saved state.
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for testing an actor against scripted dependencies. Cooking
//! tests run on Tokio's paused clock, so a 1-second dish takes no real time.

pub mod clients;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod session;
