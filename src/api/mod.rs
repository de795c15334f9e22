//! HTTP surface: `GET /health` and `POST /score`.
pub mod client;
pub mod handlers;
pub mod routes;
pub mod types;

pub use handlers::score_layout;
pub use routes::{router, AppState};
