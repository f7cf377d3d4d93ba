//! Directory assembly from the control-plane listing.

use thiserror::Error;
use tracing::{info, warn};

use crate::control_plane::{ControlPlaneError, ServiceLister};
use crate::directory::decode::decode_service;
use crate::directory::record::{Endpoint, EndpointDirectory};

/// Error produced when the directory cannot be built at all.
///
/// Per-item decode failures are not build errors; those items are skipped.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The control-plane list call failed; there is nothing to serve.
    #[error("control-plane listing failed: {0}")]
    List(#[from] ControlPlaneError),
}

/// Build the endpoint directory for `project`.
///
/// Lists the project's production services, flattens each item into an
/// [`Endpoint`] keyed by region code, and merges the configured global
/// entry last so it wins any collision on the literal key `global`.
///
/// A single undecodable item is skipped with a warning rather than
/// failing the build; a failed list call is fatal, since the alternative
/// is serving an incomplete directory as if it were complete.
pub async fn build_directory<L: ServiceLister>(
    lister: &L,
    project: &str,
    global_endpoint: Option<&str>,
) -> Result<EndpointDirectory, BuildError> {
    let items = lister.list_services(project).await?;

    let mut directory = EndpointDirectory::default();
    for item in &items {
        match decode_service(item.get().as_bytes()) {
            Ok(endpoint) if endpoint.region.is_empty() => {
                // A record without a region code has no usable key.
                warn!(url = %endpoint.url, "Skipping service without a region label");
            }
            Ok(endpoint) => directory.insert(endpoint),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable service item");
            }
        }
    }

    if let Some(url) = global_endpoint {
        directory.insert(Endpoint::global(url));
    }

    info!(
        listed = items.len(),
        endpoints = directory.len(),
        "Endpoint directory assembled"
    );

    Ok(directory)
}
