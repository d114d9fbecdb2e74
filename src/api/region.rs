//
//  satellite-link
//  api/region.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Region to service URL resolution.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::api::common::Error;

static REGION_URLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("global", crate::DEFAULT_SERVICE_URL),
        ("us-south", "https://us-south.api.link.satellite.cloud.ibm.com"),
        ("us-east", "https://us-east.api.link.satellite.cloud.ibm.com"),
        ("eu-gb", "https://eu-gb.api.link.satellite.cloud.ibm.com"),
        ("eu-de", "https://eu-de.api.link.satellite.cloud.ibm.com"),
        ("jp-tok", "https://jp-tok.api.link.satellite.cloud.ibm.com"),
        ("jp-osa", "https://jp-osa.api.link.satellite.cloud.ibm.com"),
        ("au-syd", "https://au-syd.api.link.satellite.cloud.ibm.com"),
        ("ca-tor", "https://ca-tor.api.link.satellite.cloud.ibm.com"),
        ("br-sao", "https://br-sao.api.link.satellite.cloud.ibm.com"),
    ])
});

/// Returns the service URL for a region identifier.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for regions that are not in the table. No URL
/// is produced in that case.
///
/// # Example
///
/// ```rust
/// use satellite_link::api::service_url_for_region;
///
/// assert_eq!(
///     service_url_for_region("us-south").unwrap(),
///     "https://us-south.api.link.satellite.cloud.ibm.com"
/// );
/// assert!(service_url_for_region("moon-1").is_err());
/// ```
pub fn service_url_for_region(region: &str) -> Result<String, Error> {
    REGION_URLS
        .get(region)
        .map(|url| url.to_string())
        .ok_or_else(|| Error::Configuration(format!("unrecognized region '{}'", region)))
}

/// Lists the known region identifiers, sorted.
pub fn known_regions() -> Vec<&'static str> {
    let mut regions: Vec<_> = REGION_URLS.keys().copied().collect();
    regions.sort_unstable();
    regions
}
