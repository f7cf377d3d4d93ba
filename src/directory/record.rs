//! Flat endpoint record and the read-only directory map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Region code of the synthetic load-balanced entry.
pub const GLOBAL_REGION: &str = "global";

/// Human-readable name of the synthetic load-balanced entry.
pub const GLOBAL_REGION_NAME: &str = "Global External HTTPS Load Balancer";

/// One deployed endpoint, flattened from the control plane's nested
/// service description.
///
/// Field names on the wire (`URL`, `Region`, `RegionName`) are part of the
/// public `/api/endpoints` contract that probing clients parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTPS URL of the deployment.
    #[serde(rename = "URL")]
    pub url: String,

    /// Programmatic region code, e.g. `us-central1`. Doubles as the
    /// directory key.
    #[serde(rename = "Region")]
    pub region: String,

    /// Geographic name of the region, e.g. `Iowa`.
    #[serde(rename = "RegionName")]
    pub region_name: String,
}

impl Endpoint {
    /// The synthetic "global" entry pointing at the load-balanced URL.
    pub fn global(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            region: GLOBAL_REGION.to_string(),
            region_name: GLOBAL_REGION_NAME.to_string(),
        }
    }
}

/// Read-only map of region code → endpoint.
///
/// Constructed once by the builder; request handlers share it behind an
/// `Arc` and can only read. Serializes as a plain JSON object keyed by
/// region code.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct EndpointDirectory {
    entries: HashMap<String, Endpoint>,
}

impl EndpointDirectory {
    /// Look up an endpoint by region code.
    pub fn get(&self, region: &str) -> Option<&Endpoint> {
        self.entries.get(region)
    }

    /// Number of known endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no endpoints are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `region` has an entry.
    pub fn contains(&self, region: &str) -> bool {
        self.entries.contains_key(region)
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Endpoint)> {
        self.entries.iter()
    }

    /// Insert an endpoint under its region code, replacing any previous
    /// holder of that code. Listing order from the control plane is not
    /// stable, so last writer wins.
    pub(crate) fn insert(&mut self, endpoint: Endpoint) {
        self.entries.insert(endpoint.region.clone(), endpoint);
    }
}
