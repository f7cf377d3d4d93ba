//! Regional ping service with a Cloud Run endpoint directory.

pub mod config;
pub mod control_plane;
pub mod directory;
pub mod http;

pub use config::Settings;
pub use directory::{Endpoint, EndpointDirectory};
pub use http::AppServer;
