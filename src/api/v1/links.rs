//
//  satellite-link
//  api/v1/links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Links (locations).
//!
//! A link is the top-level resource of the API: the tunnel context configured
//! for one Satellite location. Endpoints and sources always live under a link.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::common::Error;
use crate::api::operation::{json_body, Operation, OperationDescriptor};
use crate::api::v1::ExecutionResult;

/// A link for a Satellite location.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `ws_endpoint` | Tunnel server endpoint connectors dial into |
/// | `location_id` | The Satellite location ID |
/// | `crn` | CRN of the location |
/// | `desc` | Free-form description |
/// | `satellite_link_host` | Host name of the link service for the location |
/// | `status` | Link status, e.g. `enabled` |
/// | `created_at` / `last_change` | Epoch timestamps in milliseconds, as strings |
/// | `performance` | Aggregated tunnel metrics |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellite_link_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<LocationPerformance>,
}

/// Aggregated performance metrics of a link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPerformance {
    /// Number of open tunnels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tunnels: Option<i64>,

    /// Overall health, e.g. `up`.
    #[serde(rename = "healthStatus", skip_serializing_if = "Option::is_none")]
    pub health_status: Option<String>,

    /// Average latency in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_latency: Option<i64>,

    /// Receive bandwidth in bytes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_bandwidth: Option<i64>,

    /// Transmit bandwidth in bytes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_bandwidth: Option<i64>,

    /// Total bandwidth in bytes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<i64>,

    /// Per-connector metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectors: Option<Vec<LocationConnectorPerformance>>,
}

/// Metrics of a single connector of a link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConnectorPerformance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<i64>,

    #[serde(rename = "rxBW", skip_serializing_if = "Option::is_none")]
    pub rx_bw: Option<i64>,

    #[serde(rename = "txBW", skip_serializing_if = "Option::is_none")]
    pub tx_bw: Option<i64>,
}

json_body!(Location);

/// Options for `create_link`.
///
/// # Example
///
/// ```rust
/// use satellite_link::api::v1::CreateLinkOptions;
///
/// let options = CreateLinkOptions::new()
///     .with_crn("crn:v1:staging:public:satellite:us-south:a/1ae4::location:brbats7009sqna3dtest")
///     .with_location_id("brbats7009sqna3dtest");
/// assert_eq!(options.location_id.as_deref(), Some("brbats7009sqna3dtest"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateLinkOptions {
    /// CRN of the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,

    /// The Satellite location ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,

    /// Headers sent with this call only.
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateLinkOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CRN of the location.
    pub fn with_crn(mut self, crn: impl Into<String>) -> Self {
        self.crn = Some(crn.into());
        self
    }

    /// Sets the location ID.
    pub fn with_location_id(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }
}

impl Operation for CreateLinkOptions {
    type Output = Location;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::post("/v1/locations")
            .headers(&self.headers)
            .json_body(self)
    }
}

/// Options for `get_link`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetLinkOptions {
    /// The Satellite location ID.
    pub location_id: Option<String>,

    /// Headers sent with this call only.
    pub headers: HashMap<String, String>,
}

impl GetLinkOptions {
    /// Creates the options for the given location.
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            ..Default::default()
        }
    }
}

impl Operation for GetLinkOptions {
    type Output = Location;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(OperationDescriptor::get("/v1/locations/{location_id}")
            .path_param("location_id", self.location_id.as_deref())
            .headers(&self.headers))
    }
}

/// Options for `update_link`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateLinkOptions {
    /// The Satellite location ID.
    #[serde(skip)]
    pub location_id: Option<String>,

    /// New tunnel server endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_endpoint: Option<String>,

    /// Headers sent with this call only.
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateLinkOptions {
    /// Creates the options for the given location.
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            ..Default::default()
        }
    }

    /// Sets the websocket endpoint of the tunnel server.
    pub fn with_ws_endpoint(mut self, ws_endpoint: impl Into<String>) -> Self {
        self.ws_endpoint = Some(ws_endpoint.into());
        self
    }
}

impl Operation for UpdateLinkOptions {
    type Output = Location;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::patch("/v1/locations/{location_id}")
            .path_param("location_id", self.location_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

/// Options for `delete_link`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteLinkOptions {
    /// The Satellite location ID.
    pub location_id: Option<String>,

    /// Headers sent with this call only.
    pub headers: HashMap<String, String>,
}

impl DeleteLinkOptions {
    /// Creates the options for the given location.
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            ..Default::default()
        }
    }
}

impl Operation for DeleteLinkOptions {
    type Output = ExecutionResult;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(OperationDescriptor::delete("/v1/locations/{location_id}")
            .path_param("location_id", self.location_id.as_deref())
            .headers(&self.headers))
    }
}

impl_headers!(
    CreateLinkOptions,
    GetLinkOptions,
    UpdateLinkOptions,
    DeleteLinkOptions,
);
