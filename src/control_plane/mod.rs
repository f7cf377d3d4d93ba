//! Cloud Run control-plane access.
//!
//! # Design Decisions
//! - The listing seam is a trait so the directory builder can be
//!   exercised without a network
//! - Credentials come from the ambient environment (the GCE metadata
//!   server); there is no key material to manage here
//! - No retries: a failed listing is fatal to startup by policy, and the
//!   platform restarts the process

pub mod client;

pub use client::{CloudRunClient, ControlPlaneError, ServiceLister};
