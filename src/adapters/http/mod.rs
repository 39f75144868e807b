//! HTTP surface for the flow endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::routes;
