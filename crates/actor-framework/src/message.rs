//! # Generic Messages
//!
//! The request envelope a [`ResourceClient`](crate::ResourceClient) sends to its
//! [`ResourceActor`](crate::ResourceActor). Every variant carries a oneshot sender for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to a `ResourceActor`.
///
/// The variants are the resource lifecycle (create, read, update, delete), a `List` for
/// snapshots, and `Action` for resource-specific operations that don't fit CRUD. The payload
/// types come from the entity's associated types, so a dish payload can't reach the order actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
