use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use kitchen_engine::clients::{MenuClient, OrderClient};
use kitchen_engine::menu_actor::{MenuActionResult, MenuError};
use kitchen_engine::model::{Dish, DishId, OrderStatus, Reservation};
use kitchen_engine::order_actor::{self, OrderContext, OrderError, OrderEvent, RevenueLedger};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Real Order actor, scripted Menu.
struct Harness {
    orders: OrderClient,
    revenue: RevenueLedger,
    events: broadcast::Receiver<OrderEvent>,
    handle: JoinHandle<()>,
}

fn spawn_orders(menu: &MockClient<Dish>) -> Harness {
    let (actor, orders) = order_actor::new(16);
    let (events, receiver) = broadcast::channel(64);
    let revenue = RevenueLedger::default();
    let handle = tokio::spawn(actor.run(OrderContext {
        menu: MenuClient::new(menu.client()),
        orders: orders.inner().downgrade(),
        revenue: revenue.clone(),
        events,
    }));
    Harness {
        orders,
        revenue,
        events: receiver,
        handle,
    }
}

fn reserved(dish: &str, amount: u32, unit_price: u64) -> MenuActionResult {
    MenuActionResult::Reserved(Reservation {
        dish: dish.into(),
        amount,
        unit_price,
        cook_time: Duration::from_secs(1),
    })
}

/// Pattern 2: Actor + Mocks. The order actor's reservation logic runs for real; the menu's
/// answers are scripted.
#[tokio::test(start_paused = true)]
async fn test_order_cooks_and_pays_against_mocked_menu() {
    let mut menu = MockClient::<Dish>::new();
    menu.expect_action("soup".into()).return_ok(reserved("soup", 2, 100));
    let mut h = spawn_orders(&menu);

    let order = h.orders.create_order("alice").await.unwrap();
    assert_eq!(h.orders.add_dish(order, "soup".into(), 2).await, Ok(2));
    h.orders.start(order).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(h.orders.status(order).await.unwrap(), OrderStatus::Ready);

    let receipt = h.orders.pay(order).await.unwrap();
    assert_eq!((receipt.total, receipt.revenue), (200, 200));
    assert_eq!(h.revenue.total(), 200);

    let mut last = None;
    while let Ok(event) = h.events.try_recv() {
        last = Some(event);
    }
    assert_eq!(last, Some(OrderEvent::Paid(receipt)));

    menu.verify();
    drop(h.orders);
    h.handle.await.unwrap();
}

#[tokio::test]
async fn test_menu_refusal_is_passed_through() {
    let mut menu = MockClient::<Dish>::new();
    let out_of_stock = MenuError::InsufficientInventory {
        dish: "soup".into(),
        requested: 4,
        available: 1,
    };
    menu.expect_action("soup".into())
        .return_err(FrameworkError::EntityError(Box::new(out_of_stock)));
    menu.expect_action("tart".into())
        .return_err(FrameworkError::NotFound("tart".to_string()));
    let h = spawn_orders(&menu);

    let order = h.orders.create_order("alice").await.unwrap();
    assert_eq!(
        h.orders.add_dish(order, "soup".into(), 4).await,
        Err(OrderError::InsufficientInventory {
            dish: "soup".into(),
            requested: 4,
            available: 1,
        })
    );
    assert_eq!(
        h.orders.add_dish(order, "tart".into(), 1).await,
        Err(OrderError::UnknownDish("tart".into()))
    );

    let draft = h.orders.get(order).await.unwrap().unwrap();
    assert!(draft.lines.is_empty());
    assert_eq!(draft.status, OrderStatus::Draft);
    menu.verify();
}

#[tokio::test]
async fn test_remove_releases_to_menu() {
    let mut menu = MockClient::<Dish>::new();
    menu.expect_action("soup".into()).return_ok(reserved("soup", 3, 100));
    menu.expect_action("soup".into())
        .return_ok(MenuActionResult::Available(10));
    let h = spawn_orders(&menu);

    let order = h.orders.create_order("alice").await.unwrap();
    h.orders.add_dish(order, "soup".into(), 3).await.unwrap();
    assert_eq!(h.orders.remove_dish(order, "soup".into()).await, Ok(3));
    assert!(h.orders.get(order).await.unwrap().unwrap().lines.is_empty());
    menu.verify();
}

#[tokio::test]
async fn test_release_of_deleted_dish_is_dropped() {
    let mut menu = MockClient::<Dish>::new();
    menu.expect_action("soup".into()).return_ok(reserved("soup", 1, 100));
    menu.expect_action("soup".into())
        .return_err(FrameworkError::NotFound("soup".to_string()));
    let h = spawn_orders(&menu);

    let order = h.orders.create_order("alice").await.unwrap();
    h.orders.add_dish(order, "soup".into(), 1).await.unwrap();
    assert_eq!(h.orders.remove_dish(order, "soup".into()).await, Ok(1));
    menu.verify();
}

#[tokio::test]
async fn test_menu_outage_keeps_the_line() {
    let mut menu = MockClient::<Dish>::new();
    menu.expect_action("soup".into()).return_ok(reserved("soup", 1, 100));
    menu.expect_action("soup".into())
        .return_err(FrameworkError::ActorClosed);
    let h = spawn_orders(&menu);

    let order = h.orders.create_order("alice").await.unwrap();
    h.orders.add_dish(order, "soup".into(), 1).await.unwrap();
    assert!(matches!(
        h.orders.remove_dish(order, "soup".into()).await,
        Err(OrderError::ActorCommunicationError(_))
    ));
    let draft = h.orders.get(order).await.unwrap().unwrap();
    assert_eq!(draft.reserved(&DishId::from("soup")), 1);
    menu.verify();
}

#[tokio::test]
async fn test_orders_with_stock_cannot_be_deleted() {
    let mut menu = MockClient::<Dish>::new();
    menu.expect_action("soup".into()).return_ok(reserved("soup", 1, 100));
    let h = spawn_orders(&menu);

    let empty = h.orders.create_order("bob").await.unwrap();
    h.orders.delete(empty).await.unwrap();

    let order = h.orders.create_order("alice").await.unwrap();
    h.orders.add_dish(order, "soup".into(), 1).await.unwrap();
    assert_eq!(
        h.orders.delete(order).await,
        Err(OrderError::IllegalStateTransition {
            status: OrderStatus::Draft,
            operation: "delete",
        })
    );
    menu.verify();
}

#[tokio::test(start_paused = true)]
async fn test_failed_cancel_release_is_retried() {
    let mut menu = MockClient::<Dish>::new();
    menu.expect_action("soup".into()).return_ok(reserved("soup", 2, 100));
    menu.expect_action("soup".into())
        .return_err(FrameworkError::ActorClosed);
    menu.expect_action("soup".into())
        .return_ok(MenuActionResult::Available(10));
    let h = spawn_orders(&menu);

    let order = h.orders.create_order("alice").await.unwrap();
    h.orders.add_dish(order, "soup".into(), 2).await.unwrap();
    h.orders.start(order).await.unwrap();

    assert_eq!(h.orders.cancel(order).await, Ok(0));
    let cancelled = h.orders.get(order).await.unwrap().unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.unreleased(), 2);
    assert_eq!(
        h.orders.delete(order).await,
        Err(OrderError::IllegalStateTransition {
            status: OrderStatus::Cancelled,
            operation: "delete",
        })
    );

    assert_eq!(h.orders.cancel(order).await, Ok(2));
    assert_eq!(
        h.orders.cancel(order).await,
        Err(OrderError::IllegalStateTransition {
            status: OrderStatus::Cancelled,
            operation: "cancel",
        })
    );
    h.orders.delete(order).await.unwrap();
    menu.verify();
}
