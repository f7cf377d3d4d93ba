//! HTTP serving: the directory and ping queries plus the static bundle.

pub mod first_request;
pub mod server;

pub use first_request::FirstRequestGate;
pub use server::{AppServer, AppState};
