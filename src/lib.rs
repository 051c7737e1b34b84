//! Restaurant API: REST CRUD service for a single restaurants table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::DbConfig;
pub use error::{AppError, ConfigError};
pub use model::{NewRestaurant, Restaurant, RestaurantDraft};
pub use routes::{api_routes, common_routes};
pub use state::AppState;
pub use store::{MemoryStore, MySqlStore, RestaurantStore};
