//! # Generic Client
//!
//! The sending half of a `ResourceActor`: one async method per request kind, each awaiting the
//! actor's reply on a oneshot channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Cheap to clone: it only holds the channel sender. The actor keeps running for as long as at
/// least one `ResourceClient` for it is alive.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// Returns a handle that does not keep the actor alive.
    ///
    /// Background tasks owned by the actor's own entities hold one of these, so the actor can
    /// still shut down when every regular client is gone.
    pub fn downgrade(&self) -> WeakResourceClient<T> {
        WeakResourceClient {
            sender: self.sender.downgrade(),
        }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

/// Non-owning counterpart of [`ResourceClient`].
#[derive(Clone)]
pub struct WeakResourceClient<T: ActorEntity> {
    sender: mpsc::WeakSender<ResourceRequest<T>>,
}

impl<T: ActorEntity> WeakResourceClient<T> {
    /// Returns a usable client, or `None` once the actor's last strong client is gone.
    pub fn upgrade(&self) -> Option<ResourceClient<T>> {
        self.sender.upgrade().map(ResourceClient::new)
    }
}
