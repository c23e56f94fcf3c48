//! Glyphpress HTTP server: router, handlers and error mapping around the
//! upload pipeline.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
