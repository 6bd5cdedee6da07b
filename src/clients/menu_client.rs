//! # Menu Client
//!
//! High-level API for the menu actor: dish administration plus the stock operations orders use.
//! It wraps a `ResourceClient<Dish>` and turns actor replies back into [`MenuError`]s.
use crate::menu_actor::{MenuAction, MenuActionResult, MenuError};
use crate::model::{Dish, DishCreate, DishId, DishUpdate, Reservation};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<Dish>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<Dish>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Dish> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<Dish> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => MenuError::NotFound(DishId(id)),
            FrameworkError::AlreadyExists(id) => MenuError::AlreadyExists(DishId(id)),
            other => other
                .into_entity_error::<MenuError>()
                .unwrap_or_else(|e| MenuError::ActorCommunicationError(e.to_string())),
        }
    }
}

fn unexpected(result: MenuActionResult) -> MenuError {
    MenuError::ActorCommunicationError(format!("unexpected reply: {:?}", result))
}

impl MenuClient {
    /// Puts a new dish on the menu. Fails with `AlreadyExists` if the name is taken.
    #[instrument(skip(self))]
    pub async fn add_dish(&self, params: DishCreate) -> Result<DishId, MenuError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn edit_dish(&self, id: DishId, update: DishUpdate) -> Result<Dish, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Takes the dish off the menu. Orders holding reservations keep their lines.
    #[instrument(skip(self))]
    pub async fn remove_dish(&self, id: DishId) -> Result<(), MenuError> {
        self.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: DishId) -> Result<u32, MenuError> {
        match self.action(id, MenuAction::CheckStock).await? {
            MenuActionResult::Available(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Reserves `amount` units, all or nothing.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: DishId, amount: u32) -> Result<Reservation, MenuError> {
        match self.action(id, MenuAction::Reserve(amount)).await? {
            MenuActionResult::Reserved(reservation) => Ok(reservation),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `amount` reserved units to stock. Returns the new available quantity.
    #[instrument(skip(self))]
    pub async fn release(&self, id: DishId, amount: u32) -> Result<u32, MenuError> {
        match self.action(id, MenuAction::Release(amount)).await? {
            MenuActionResult::Available(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: DishId, amount: u32) -> Result<u32, MenuError> {
        match self.action(id, MenuAction::Restock(amount)).await? {
            MenuActionResult::Available(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    async fn action(&self, id: DishId, action: MenuAction) -> Result<MenuActionResult, MenuError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};
    use std::time::Duration;

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);
        let menu = MenuClient::new(client);

        let task = tokio::spawn(async move { menu.check_stock("soup".into()).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, DishId::from("soup"));
        assert_eq!(action, MenuAction::CheckStock);
        responder.send(Ok(MenuActionResult::Available(42))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_error_keeps_its_type() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);
        let menu = MenuClient::new(client);

        let task = tokio::spawn(async move { menu.reserve("soup".into(), 9).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, MenuAction::Reserve(9));
        let insufficient = MenuError::InsufficientInventory {
            dish: "soup".into(),
            requested: 9,
            available: 1,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(insufficient.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(insufficient));
    }

    #[tokio::test]
    async fn test_missing_dish_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);
        let menu = MenuClient::new(client);

        let task = tokio::spawn(async move { menu.release("soup".into(), 1).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::NotFound("soup".to_string())))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(MenuError::NotFound("soup".into())));
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Dish>(10);
        drop(receiver);
        let menu = MenuClient::new(client);

        let err = menu
            .add_dish(DishCreate {
                name: "soup".to_string(),
                price: 1,
                available: 1,
                cook_time: Duration::from_secs(1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::ActorCommunicationError(_)));
    }
}
