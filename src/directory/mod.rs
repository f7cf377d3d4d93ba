//! Endpoint directory: the region-code-keyed map of known deployments.
//!
//! # Data Flow
//! ```text
//! control-plane list response (nested JSON items)
//!     → decode.rs (flatten one item → Endpoint)
//!     → builder.rs (accumulate, merge the global entry)
//!     → EndpointDirectory (immutable, shared via Arc to handlers)
//! ```
//!
//! # Design Decisions
//! - The directory is built once at startup and never mutated; handlers
//!   only get read access, so "one build, many readers" is enforced by
//!   the types rather than by convention
//! - One malformed listing skips that item, never the whole build
//! - A failed list call aborts startup: an empty directory silently
//!   presented as complete would be worse than not serving

pub mod builder;
pub mod decode;
pub mod record;

pub use builder::{build_directory, BuildError};
pub use decode::{decode_service, DecodeError};
pub use record::{Endpoint, EndpointDirectory};
