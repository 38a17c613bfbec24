//! # symcheck-server
//!
//! HTTP surface for the symcheck symptom checker: the single-page UI, the
//! advice endpoint, and API-key resolution. The `symcheck` binary wires
//! credential lookup, the one-time corpus build, and the axum server
//! together.

pub mod credentials;
pub mod error;
pub mod routes;
pub mod startup;
pub mod ui;

pub use credentials::{API_KEY_ENV, resolve_api_key, resolve_api_key_from};
pub use error::{Result, ServerError};
pub use routes::{AdviceRequest, AdviceResponse, AppState, ErrorResponse, router};
pub use startup::prepare_engine;
