//
//  satellite-link
//  api/v1/sources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Sources and their association with endpoints.
//!
//! A source is a named set of addresses (CIDR ranges) allowed to originate
//! traffic through endpoints. The association can be managed from either side:
//! per endpoint (`*_endpoint_sources`) or per source (`*_source_endpoints`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::common::Error;
use crate::api::operation::{json_body, Operation, OperationDescriptor};
use crate::api::v1::ExecutionResult;

/// A source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Source type, e.g. `user` or `service`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// CIDR ranges of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change: Option<String>,
}

/// A list of sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

/// Whether a source is enabled for an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceStatusObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change: Option<String>,

    /// `true` while the change has not reached the connectors yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
}

/// The sources of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceStatusObject>>,
}

/// Requested state of one source of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceStatusRequestObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl SourceStatusRequestObject {
    /// Enables or disables `source_id` for an endpoint.
    pub fn new(source_id: impl Into<String>, enabled: bool) -> Self {
        Self {
            source_id: Some(source_id.into()),
            enabled: Some(enabled),
        }
    }
}

/// Whether a source is enabled for one endpoint.
///
/// Also used as the request item of `update_source_endpoints`, where only
/// `endpoint_id` and `enabled` are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointSourceStatusEndpointsItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
}

impl EndpointSourceStatusEndpointsItem {
    /// Enables or disables `endpoint_id` for a source.
    pub fn new(endpoint_id: impl Into<String>, enabled: bool) -> Self {
        Self {
            endpoint_id: Some(endpoint_id.into()),
            enabled: Some(enabled),
            ..Default::default()
        }
    }
}

/// The endpoints of one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointSourceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointSourceStatusEndpointsItem>>,
}

json_body!(Source, Sources, SourceStatus, EndpointSourceStatus);

/// Options for `list_endpoint_sources`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEndpointSourcesOptions {
    pub location_id: Option<String>,
    pub endpoint_id: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListEndpointSourcesOptions {
    /// Creates the options for the given location and endpoint.
    pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            endpoint_id: Some(endpoint_id.into()),
            ..Default::default()
        }
    }
}

impl Operation for ListEndpointSourcesOptions {
    type Output = SourceStatus;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::get("/v1/locations/{location_id}/endpoints/{endpoint_id}/sources")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .headers(&self.headers),
        )
    }
}

/// Options for `update_endpoint_sources`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateEndpointSourcesOptions {
    #[serde(skip)]
    pub location_id: Option<String>,

    #[serde(skip)]
    pub endpoint_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceStatusRequestObject>>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateEndpointSourcesOptions {
    /// Creates the options for the given location and endpoint.
    pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            endpoint_id: Some(endpoint_id.into()),
            ..Default::default()
        }
    }

    /// Sets the sources to enable or disable for the endpoint.
    pub fn with_sources(mut self, sources: Vec<SourceStatusRequestObject>) -> Self {
        self.sources = Some(sources);
        self
    }
}

impl Operation for UpdateEndpointSourcesOptions {
    type Output = SourceStatus;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::patch("/v1/locations/{location_id}/endpoints/{endpoint_id}/sources")
            .path_param("location_id", self.location_id.as_deref())
            .path_param("endpoint_id", self.endpoint_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

/// Options for `list_sources`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSourcesOptions {
    pub location_id: Option<String>,

    /// Filter by source type, e.g. `user`.
    pub type_: Option<String>,

    pub headers: HashMap<String, String>,
}

impl ListSourcesOptions {
    /// Creates the options for the given location.
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            ..Default::default()
        }
    }

    /// Only returns items of the given type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }
}

impl Operation for ListSourcesOptions {
    type Output = Sources;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(OperationDescriptor::get("/v1/locations/{location_id}/sources")
            .path_param("location_id", self.location_id.as_deref())
            .query("type", self.type_.as_deref())
            .headers(&self.headers))
    }
}

/// Options for `create_sources`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSourcesOptions {
    #[serde(skip)]
    pub location_id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateSourcesOptions {
    /// Creates the options for the given location.
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            ..Default::default()
        }
    }

    /// Sets the source type, e.g. `user` or `service`.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Sets the source name.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Sets the CIDR ranges of the source.
    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = Some(addresses);
        self
    }
}

impl Operation for CreateSourcesOptions {
    type Output = Source;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::post("/v1/locations/{location_id}/sources")
            .path_param("location_id", self.location_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

/// Options for `update_sources`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSourcesOptions {
    #[serde(skip)]
    pub location_id: Option<String>,

    #[serde(skip)]
    pub source_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateSourcesOptions {
    /// Creates the options for the given location and source.
    pub fn new(location_id: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            source_id: Some(source_id.into()),
            ..Default::default()
        }
    }

    /// Sets the source name.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Sets the CIDR ranges of the source.
    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = Some(addresses);
        self
    }
}

impl Operation for UpdateSourcesOptions {
    type Output = Source;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::patch("/v1/locations/{location_id}/sources/{source_id}")
            .path_param("location_id", self.location_id.as_deref())
            .path_param("source_id", self.source_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

/// Options for `delete_sources`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteSourcesOptions {
    pub location_id: Option<String>,
    pub source_id: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteSourcesOptions {
    /// Creates the options for the given location and source.
    pub fn new(location_id: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            source_id: Some(source_id.into()),
            ..Default::default()
        }
    }
}

impl Operation for DeleteSourcesOptions {
    type Output = ExecutionResult;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::delete("/v1/locations/{location_id}/sources/{source_id}")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("source_id", self.source_id.as_deref())
                .headers(&self.headers),
        )
    }
}

/// Options for `list_source_endpoints`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSourceEndpointsOptions {
    pub location_id: Option<String>,
    pub source_id: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListSourceEndpointsOptions {
    /// Creates the options for the given location and source.
    pub fn new(location_id: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            source_id: Some(source_id.into()),
            ..Default::default()
        }
    }
}

impl Operation for ListSourceEndpointsOptions {
    type Output = EndpointSourceStatus;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::get("/v1/locations/{location_id}/sources/{source_id}/endpoints")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("source_id", self.source_id.as_deref())
                .headers(&self.headers),
        )
    }
}

/// Options for `update_source_endpoints`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSourceEndpointsOptions {
    #[serde(skip)]
    pub location_id: Option<String>,

    #[serde(skip)]
    pub source_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointSourceStatusEndpointsItem>>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateSourceEndpointsOptions {
    /// Creates the options for the given location and source.
    pub fn new(location_id: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            source_id: Some(source_id.into()),
            ..Default::default()
        }
    }

    /// Sets the endpoints to enable or disable for the source.
    pub fn with_endpoints(mut self, endpoints: Vec<EndpointSourceStatusEndpointsItem>) -> Self {
        self.endpoints = Some(endpoints);
        self
    }
}

impl Operation for UpdateSourceEndpointsOptions {
    type Output = ExecutionResult;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::patch("/v1/locations/{location_id}/sources/{source_id}/endpoints")
            .path_param("location_id", self.location_id.as_deref())
            .path_param("source_id", self.source_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

impl_headers!(
    ListEndpointSourcesOptions,
    UpdateEndpointSourcesOptions,
    ListSourcesOptions,
    CreateSourcesOptions,
    UpdateSourcesOptions,
    DeleteSourcesOptions,
    ListSourceEndpointsOptions,
    UpdateSourceEndpointsOptions,
);
