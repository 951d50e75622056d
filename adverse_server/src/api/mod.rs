//! HTTP API for the adverse event engine

pub mod handlers;
pub mod routes;

pub use handlers::AppError;
pub use routes::{cors_layer, create_router};
