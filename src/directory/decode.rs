//! Flattening of one nested control-plane service item.
//!
//! The Cloud Run Admin API does not carry the region as a first-class
//! field: the region code rides in a generic label and the human region
//! name in a generic annotation on the service template. Decoding is
//! therefore a matter of knowing the right keys. Those keys live here and
//! only here, so provider schema drift is a one-line fix.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::directory::record::Endpoint;

/// Label carrying the region code on a deployed service.
const LOCATION_LABEL: &str = "cloud.googleapis.com/location";

/// Annotation carrying the human region name on the service template.
const REGION_NAME_ANNOTATION: &str = "region-name";

/// Error produced when a control-plane item cannot be decoded.
#[derive(Debug, Error)]
#[error("malformed service item: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

// The slice of the deployment-description schema we read. Every level
// defaults so absent nesting yields empty strings; only a level of the
// wrong type is an error. Unknown siblings are ignored.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawService {
    metadata: RawMetadata,
    status: RawStatus,
    spec: RawSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    labels: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStatus {
    address: RawAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAddress {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSpec {
    template: RawTemplate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTemplate {
    metadata: RawTemplateMetadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTemplateMetadata {
    annotations: HashMap<String, String>,
}

/// Flatten one raw service item into an [`Endpoint`].
///
/// Pure transformation: the same bytes always yield the same record.
/// Absent leaves become empty strings rather than errors; the schema marks
/// nothing as required.
pub fn decode_service(bytes: &[u8]) -> Result<Endpoint, DecodeError> {
    let raw: RawService = serde_json::from_slice(bytes)?;
    Ok(Endpoint {
        url: raw.status.address.url,
        region: raw
            .metadata
            .labels
            .get(LOCATION_LABEL)
            .cloned()
            .unwrap_or_default(),
        region_name: raw
            .spec
            .template
            .metadata
            .annotations
            .get(REGION_NAME_ANNOTATION)
            .cloned()
            .unwrap_or_default(),
    })
}
