//! HTTP API surface.
//!
//! Routes, handlers, shared state, and the middleware stack. Everything
//! request-scoped lives here; the auth and store modules stay transport
//! agnostic.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod timing;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
