//! # Mock Client & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`], but the requests it sends are answered
//! from a queue of expectations instead of a `ResourceActor`. Use it to test an actor whose
//! *dependency* you want to control: an order actor against a menu that runs out of stock on
//! demand, or that has gone away entirely.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, replies are scripted | Real store |
//! | **Error injection** | `return_err(..)` | Needs the right state first |
//! | **Use case** | Code that *calls* the actor | The actor itself, full system |
//!
//! ## Testing Patterns
//!
//! 1. **Single actor**: spawn one `ResourceActor` with a `()` context and drive it with its client.
//! 2. **Actor with mocked dependencies**: spawn the actor under test, give it a context built
//!    from `MockClient::client()`. The order actor tests work this way.
//! 3. **Full system**: spawn everything through the lifecycle type and test end to end.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Shelf { id: String, stock: u32 }
//! #[derive(Debug)] struct ShelfCreate { name: String }
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug)] enum ShelfAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = String; type Create = ShelfCreate; type Update = ShelfUpdate;
//!     type Action = ShelfAction; type ActionResult = u32; type Context = (); type Error = ShelfError;
//!     fn assign_id(params: &ShelfCreate, _: u64) -> String { params.name.clone() }
//!     fn from_create_params(id: String, _: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, stock: 0 })
//!     }
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<u32, Self::Error> { Ok(0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_action("flour".to_string()).return_ok(3);
//!     mock.expect_action("flour".to_string()).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.perform_action("flour".into(), ShelfAction::Take(2)).await.unwrap(), 3);
//!     assert!(client.perform_action("flour".into(), ShelfAction::Take(2)).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! A request that doesn't match the next expectation (wrong kind or wrong id) gets its reply
//! channel dropped, so the caller sees [`FrameworkError::ActorDropped`], and [`MockClient::verify`]
//! panics with the mismatch.
//!
//! For tests that want to inspect the request payload itself, [`create_mock_client`] returns the
//! raw receiver, and [`expect_action`] pulls the next action off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { id, .. } => format!("get({id})"),
            Expectation::Create { .. } => "create".to_string(),
            Expectation::List { .. } => "list".to_string(),
            Expectation::Delete { id, .. } => format!("delete({id})"),
            Expectation::Action { id, .. } => format!("action({id})"),
        }
    }
}

fn describe_request<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { .. } => "create".to_string(),
        ResourceRequest::Get { id, .. } => format!("get({id})"),
        ResourceRequest::List { .. } => "list".to_string(),
        ResourceRequest::Update { id, .. } => format!("update({id})"),
        ResourceRequest::Delete { id, .. } => format!("delete({id})"),
        ResourceRequest::Action { id, .. } => format!("action({id})"),
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type SharedState<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &SharedState<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scripted stand-in for a `ResourceActor`.
///
/// Must be created inside a Tokio runtime: the replies come from a spawned task.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: SharedState<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: SharedState<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&task_state).expectations.pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: want, response }),
                    ) if id == want => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) if id == want => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) if id == want => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let expected = expectation
                            .as_ref()
                            .map(Expectation::describe)
                            .unwrap_or_else(|| "nothing".to_string());
                        let failure = format!(
                            "unexpected {}, expected {}",
                            describe_request(&request),
                            expected
                        );
                        tracing::warn!(%failure, "Mock mismatch");
                        lock(&task_state).failures.push(failure);
                        // dropping `request` closes its reply channel
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client whose requests are answered by this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(&self.state, move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(&self.state, |response| Expectation::Create { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(&self.state, |response| Expectation::List { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(&self.state, move |response| Expectation::Delete {
            id,
            response,
        })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(&self.state, move |response| Expectation::Action {
            id,
            response,
        })
    }

    /// Panics if any request was unexpected or any expectation is still pending.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.failures.is_empty() {
            panic!("Mock received unexpected requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            let pending: Vec<String> = state.expectations.iter().map(Expectation::describe).collect();
            panic!("Not all expectations were met: {:?}", pending);
        }
    }
}

/// Queues one scripted reply; finish with [`return_ok`](Self::return_ok) or
/// [`return_err`](Self::return_err).
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    state: &'a SharedState<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        state: &'a SharedState<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            state,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        lock(self.state).expectations.push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.build)(Err(error));
        lock(self.state).expectations.push_back(expectation);
    }
}

/// Creates a client and the raw receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: String,
        stock: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        name: String,
    }

    #[derive(Debug)]
    struct ShelfUpdate;

    #[derive(Debug, PartialEq)]
    enum ShelfAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("shelf error")]
    struct ShelfError;

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = String;
        type Create = ShelfCreate;
        type Update = ShelfUpdate;
        type Action = ShelfAction;
        type ActionResult = u32;
        type Context = ();
        type Error = ShelfError;

        fn assign_id(params: &ShelfCreate, _sequence: u64) -> String {
            params.name.clone()
        }

        fn from_create_params(id: String, _params: ShelfCreate) -> Result<Self, Self::Error> {
            Ok(Self { id, stock: 0 })
        }

        async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<u32, Self::Error> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_action_payload() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let task = tokio::spawn(async move {
            client
                .perform_action("flour".to_string(), ShelfAction::Take(2))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, "flour");
        assert_eq!(action, ShelfAction::Take(2));
        responder.send(Ok(5)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_create().return_ok("flour".to_string());
        mock.expect_get("flour".to_string()).return_ok(Some(Shelf {
            id: "flour".to_string(),
            stock: 4,
        }));
        mock.expect_list().return_ok(vec![]);
        mock.expect_delete("flour".to_string())
            .return_err(FrameworkError::NotFound("flour".to_string()));

        let client = mock.client();
        let id = client
            .create(ShelfCreate {
                name: "flour".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, "flour");
        assert_eq!(client.get(id.clone()).await.unwrap().unwrap().stock, 4);
        assert!(client.list().await.unwrap().is_empty());
        assert!(matches!(
            client.delete(id).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_reply() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_action("flour".to_string()).return_ok(1);

        let client = mock.client();
        let result = client
            .perform_action("sugar".to_string(), ShelfAction::Take(1))
            .await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verified.is_err());
    }
}
