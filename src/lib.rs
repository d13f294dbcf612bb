pub mod config;
pub mod error;
pub mod frontend;
pub mod handlers;
pub mod languages;
pub mod routes;
pub mod state;
pub mod translate;

pub use config::Config;
pub use routes::app;
pub use state::AppState;
