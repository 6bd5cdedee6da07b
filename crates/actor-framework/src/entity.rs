//! # ActorEntity Trait
//!
//! The contract every resource (a menu dish, a customer order, ...) implements so that a
//! generic [`ResourceActor`](crate::ResourceActor) can own it. The trait names the identifier,
//! the DTOs for creation and updates, the custom actions, the injected context and the error
//! type, and exposes the lifecycle hooks the actor calls while it processes messages.
//!
//! # Identifiers
//! Some resources are keyed by a natural name chosen by the caller (a dish is keyed by its
//! name), others by a number the actor hands out (orders). [`ActorEntity::assign_id`] covers
//! both: it receives the creation payload and the actor's next sequence number, and the entity
//! decides which one to use. The actor rejects a create whose id is already in its store.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::on_shutdown`]
//!
//! The defaults do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so an entity can call other actors while handling a message (an order
/// reserving stock from the menu). The `Context` is handed to `run()` rather than `new()`,
/// which lets actors that depend on each other be created first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations (e.g. `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor. `()` when there are none.
    type Context: Send + Sync;

    /// One error enum for the whole actor.
    ///
    /// Clients recover it from [`FrameworkError::EntityError`](crate::FrameworkError::EntityError)
    /// with [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Picks the identifier for a new entity.
    ///
    /// `sequence` starts at 1 and grows by one per create request the actor receives.
    fn assign_id(params: &Self::Create, sequence: u64) -> Self::Id;

    /// Construct the full entity from its id and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning an error keeps it in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for every stored entity once the actor's channel has closed.
    ///
    /// Entities that own background work (timers, spawned tasks) stop it here.
    async fn on_shutdown(&mut self, _ctx: &Self::Context) {}

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
