//
//  satellite-link
//  api/v1/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Satellite Link API v1
//!
//! Typed options and resources for every operation of the v1 API, and the
//! corresponding methods on [`SatelliteLinkClient`].
//!
//! ## Resources
//!
//! - [`links`]: Links (locations), the top-level tunnel context
//! - [`endpoints`]: Endpoints reachable through a link, import and export
//! - [`certs`]: Endpoint certificate download, upload and removal
//! - [`sources`]: Sources and their association with endpoints
//!
//! ## Calling Convention
//!
//! Every operation takes a reference to its options struct and comes in two
//! flavours:
//!
//! - `operation(&options)` runs without a deadline
//! - `operation_with_context(&options, &ctx)` runs under a [`CallContext`]
//!
//! Options structs are built with `new(required...)` followed by `with_*`
//! setters. Every options struct accepts per-call headers with
//! `with_header`, which override the client's default headers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use satellite_link::api::v1::{CreateSourcesOptions, ListSourcesOptions};
//! use satellite_link::{CallContext, SatelliteLinkClient};
//!
//! # async fn example(client: &SatelliteLinkClient) -> Result<(), satellite_link::Error> {
//! let created = client
//!     .create_sources(
//!         &CreateSourcesOptions::new("my-location")
//!             .with_type("user")
//!             .with_source_name("DB2")
//!             .with_addresses(vec!["192.168.20.1/24".to_string()]),
//!     )
//!     .await?;
//! println!("created source {:?}", created.result.source_id);
//!
//! let ctx = CallContext::background().with_timeout(Duration::from_secs(5));
//! let sources = client
//!     .list_sources_with_context(&ListSourcesOptions::new("my-location"), &ctx)
//!     .await?;
//! for source in sources.result.sources.unwrap_or_default() {
//!     println!("{:?}", source.source_name);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::SatelliteLinkClient;
use crate::api::common::{ApiResponse, Error};
use crate::api::context::CallContext;
use crate::api::operation::{json_body, Operation};

/// Adds the per-call header setters shared by every options struct.
macro_rules! impl_headers {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Adds a header sent with this call only.
                pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                    self.headers.insert(name.into(), value.into());
                    self
                }

                /// Replaces the headers sent with this call only.
                pub fn with_headers(mut self, headers: std::collections::HashMap<String, String>) -> Self {
                    self.headers = headers;
                    self
                }
            }
        )+
    };
}

/// Generates the plain and `_with_context` client method for each operation.
macro_rules! client_operations {
    ($( $(#[$meta:meta])* $name:ident / $with_context:ident => $options:ty; )+) => {
        impl SatelliteLinkClient {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    options: &$options,
                ) -> Result<ApiResponse<<$options as Operation>::Output>, Error> {
                    self.execute(Some(options), &CallContext::background()).await
                }

                #[doc = concat!("Same as [`", stringify!($name), "`](Self::", stringify!($name), "), under the given [`CallContext`].")]
                pub async fn $with_context(
                    &self,
                    options: &$options,
                    ctx: &CallContext,
                ) -> Result<ApiResponse<<$options as Operation>::Output>, Error> {
                    self.execute(Some(options), ctx).await
                }
            )+
        }
    };
}

pub mod certs;
pub mod endpoints;
pub mod links;
pub mod sources;

pub use certs::*;
pub use endpoints::*;
pub use links::*;
pub use sources::*;

/// Outcome of a delete operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Result status reported by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Additional detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

json_body!(ExecutionResult);

client_operations! {
    /// Creates a link for a location.
    create_link / create_link_with_context => CreateLinkOptions;
    /// Reads a link.
    get_link / get_link_with_context => GetLinkOptions;
    /// Updates a link.
    update_link / update_link_with_context => UpdateLinkOptions;
    /// Deletes a link.
    delete_link / delete_link_with_context => DeleteLinkOptions;

    /// Lists the endpoints of a location, optionally filtered by type.
    list_endpoints / list_endpoints_with_context => ListEndpointsOptions;
    /// Creates an endpoint.
    create_endpoints / create_endpoints_with_context => CreateEndpointsOptions;
    /// Imports an endpoint from a previously exported state file.
    import_endpoints / import_endpoints_with_context => ImportEndpointsOptions;
    /// Exports an endpoint's configuration.
    export_endpoints / export_endpoints_with_context => ExportEndpointsOptions;
    /// Reads an endpoint.
    get_endpoints / get_endpoints_with_context => GetEndpointsOptions;
    /// Updates an endpoint.
    update_endpoints / update_endpoints_with_context => UpdateEndpointsOptions;
    /// Deletes an endpoint.
    delete_endpoints / delete_endpoints_with_context => DeleteEndpointsOptions;

    /// Downloads an endpoint's certificates, zipped unless `no_zip` is set.
    get_endpoint_certs / get_endpoint_certs_with_context => GetEndpointCertsOptions;
    /// Uploads certificates for an endpoint.
    upload_endpoint_certs / upload_endpoint_certs_with_context => UploadEndpointCertsOptions;
    /// Removes all certificates of an endpoint.
    delete_endpoint_certs / delete_endpoint_certs_with_context => DeleteEndpointCertsOptions;

    /// Lists the sources of an endpoint and whether each is enabled.
    list_endpoint_sources / list_endpoint_sources_with_context => ListEndpointSourcesOptions;
    /// Enables or disables sources for an endpoint.
    update_endpoint_sources / update_endpoint_sources_with_context => UpdateEndpointSourcesOptions;

    /// Lists the sources of a location, optionally filtered by type.
    list_sources / list_sources_with_context => ListSourcesOptions;
    /// Creates a source.
    create_sources / create_sources_with_context => CreateSourcesOptions;
    /// Updates a source.
    update_sources / update_sources_with_context => UpdateSourcesOptions;
    /// Deletes a source.
    delete_sources / delete_sources_with_context => DeleteSourcesOptions;
    /// Lists the endpoints a source is associated with.
    list_source_endpoints / list_source_endpoints_with_context => ListSourceEndpointsOptions;
    /// Enables or disables a source for several endpoints.
    update_source_endpoints / update_source_endpoints_with_context => UpdateSourceEndpointsOptions;
}
