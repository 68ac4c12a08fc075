//! HTTP API handlers for pokedex-api

pub mod detail;
pub mod health;
pub mod list;
pub mod method;
pub mod params;
pub mod pokemon;
pub mod response;

pub use detail::get_entity_detail;
pub use health::health_routes;
pub use list::{get_pokemon_by_id, list_generations, list_pokemon, list_types};
pub use method::{cors_layer, method_guard};
pub use params::QueryParams;
pub use pokemon::list_pokemon_with_images;
pub use response::{ApiError, ApiResponse};
