//! # Actor Framework
//!
//! Building blocks for type-safe, message-passing resource actors on Tokio. A resource (a menu
//! dish, a customer order) implements [`ActorEntity`]; a [`ResourceActor`] owns every instance
//! of that resource and applies requests to them one at a time; a [`ResourceClient`] is the
//! cloneable handle that sends those requests.
//!
//! ## Why actors here?
//!
//! - **Isolated state**: each actor exclusively owns its store, so there are no locks to forget.
//! - **Linearizable operations**: a request is fully applied before the next one is read from
//!   the channel. Check-then-act sequences inside one request can't be interleaved.
//! - **Uniform surface**: create / get / list / update / delete plus a typed `Action` for
//!   everything resource-specific.
//!
//! **Further Reading**:
//! - [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain state and the hooks that change it
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop, id assignment, logging
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async calls
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to `new()`. Actors are created first
//! and wired afterwards, which also lets an actor receive a [`WeakResourceClient`] to *itself*
//! for background tasks that report back to it:
//!
//! ```rust,ignore
//! let (menu_actor, menu) = ResourceActor::<Dish>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(menu_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext {
//!     menu: MenuClient::new(menu.clone()),
//!     orders: orders.downgrade(),
//!     ..
//! }));
//! ```
//!
//! A strong client to itself would keep the channel open forever; the weak one does not.
//!
//! ## Errors
//!
//! Each entity declares one error enum. The actor boxes it into
//! [`FrameworkError::EntityError`] for the trip over the channel, and the resource client takes
//! it back out with [`FrameworkError::into_entity_error`] so callers match on typed variants.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations instead of a real actor.
//! See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::{ResourceClient, WeakResourceClient};
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
