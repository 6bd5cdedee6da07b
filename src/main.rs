//! # Kitchen Engine demo
//!
//! Opens the kitchen (restoring saved state), puts two dishes on an empty menu, places one
//! order, waits for it to be ready, pays, saves and shuts down.
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ```

use actor_framework::tracing::setup_tracing;
use kitchen_engine::lifecycle::{KitchenConfig, KitchenSystem};
use kitchen_engine::model::DishCreate;
use kitchen_engine::order_actor::OrderEvent;
use std::time::Duration;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = KitchenConfig::from_env();
    info!(state_path = %config.state_path.display(), "Starting kitchen");
    let kitchen = KitchenSystem::open(config.clone()).await?;

    if kitchen.snapshot().await?.dishes.is_empty() {
        let span = tracing::info_span!("menu_setup");
        async {
            for (name, price, available, secs) in [("soup", 100, 10, 1), ("bread", 50, 20, 1)] {
                kitchen
                    .menu
                    .add_dish(DishCreate {
                        name: name.to_string(),
                        price,
                        available,
                        cook_time: Duration::from_secs(secs),
                    })
                    .await?;
            }
            Ok::<_, Box<dyn std::error::Error>>(())
        }
        .instrument(span)
        .await?;
    }

    let mut events = kitchen.subscribe();
    let mut alice = kitchen.session("alice");

    let span = tracing::info_span!("order_processing", user = "alice");
    let receipt = async {
        alice.create_order().await?;
        alice.select_dish("soup".into(), 2).await?;
        alice.select_dish("bread".into(), 1).await?;
        let order = alice.finish_order().await?;

        loop {
            match events.recv().await? {
                OrderEvent::Ready(id) if id == order => break,
                event => info!(?event, "Kitchen event"),
            }
        }
        Ok::<_, Box<dyn std::error::Error>>(alice.pay_order(order).await?)
    }
    .instrument(span)
    .await?;

    info!(order = %receipt.order, total = receipt.total, revenue = receipt.revenue, "Paid");

    kitchen.save(&config.state_path).await?;
    drop(alice);
    kitchen.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
