//! Earshot HTTP service
//!
//! Thin axum layer over the classifiers in `earshot-core`: decode the raw
//! request body, run the blocking inference off the request loop, return the
//! result as JSON. The library half exists so the end-to-end tests can spin
//! the router up on an ephemeral listener with mock models.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppContext;
