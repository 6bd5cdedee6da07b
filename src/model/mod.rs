//! Pure data structures managed by the actors: menu [`Dish`]es and customer [`Order`]s.
//!
//! The [`ActorEntity`](actor_framework::ActorEntity) implementations live next to the actors
//! ([`menu_actor::entity`](crate::menu_actor::entity), [`order_actor::entity`](crate::order_actor::entity)).

pub mod dish;
pub mod order;

pub use dish::*;
pub use order::*;
