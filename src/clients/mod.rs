//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).

pub mod menu_client;
pub mod order_client;

pub use menu_client::*;
pub use order_client::*;
