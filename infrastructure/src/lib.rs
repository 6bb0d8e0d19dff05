pub mod api_client;
pub mod config;
pub mod envelope;

pub use api_client::RestaurantClient;
pub use config::Config;
