//
//  satellite-link
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Satellite Link Client Library
//!
//! An async client for the Satellite Link v1 configuration API, which manages
//! links, endpoints, endpoint certificates and sources for a remote-connectivity
//! service.
//!
//! ## Overview
//!
//! Every API operation is a one-to-one mapping from a typed options object to an
//! HTTP request, and from the HTTP response back to a typed result. The shared
//! plumbing (request building, authentication, retries, timeouts and response
//! decoding) lives in [`api::client`] and is reused by every operation.
//!
//! ## Module Structure
//!
//! - [`api`]: The service client, the request/response pipeline and the v1 resources
//! - [`auth`]: Pluggable authenticators (no auth, HTTP Basic, bearer token)
//! - [`config`]: External configuration from credentials files and environment variables
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use satellite_link::api::v1::GetLinkOptions;
//! use satellite_link::auth::Credential;
//! use satellite_link::{SatelliteLinkClient, SatelliteLinkOptions};
//!
//! # async fn example() -> Result<(), satellite_link::Error> {
//! let client = SatelliteLinkClient::new(SatelliteLinkOptions {
//!     authenticator: Some(Arc::new(Credential::bearer("my-token"))),
//!     ..Default::default()
//! })?;
//!
//! let response = client.get_link(&GetLinkOptions::new("my-location")).await?;
//! println!("status: {}", response.status_code());
//! println!("link host: {:?}", response.result.satellite_link_host);
//! # Ok(())
//! # }
//! ```

/// Service client, request pipeline and API resources.
///
/// Contains the [`SatelliteLinkClient`], the operation descriptor used to build
/// requests, the retry policy, per-call contexts, region resolution and the
/// typed v1 resources.
pub mod api;

/// Authentication strategies.
///
/// Authenticators mutate every outgoing request before it is sent, typically by
/// injecting an `Authorization` header.
pub mod auth;

/// External configuration loading.
///
/// Reads service properties from an `ibm-credentials.env` style credentials file
/// or from environment variables, and turns them into a configured client.
pub mod config;

/// Logging setup based on `tracing-subscriber`.
pub mod logging;

pub use api::common::{ApiResponse, Error, ResponseEnvelope};
pub use api::{CallContext, RetryPolicy, SatelliteLinkClient, SatelliteLinkOptions};

/// Default service name used to look up external configuration properties.
///
/// Property keys are derived from it, e.g. `SATELLITE_LINK_URL`.
pub const DEFAULT_SERVICE_NAME: &str = "satellite_link";

/// Default service URL used when none is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://api.link.satellite.cloud.ibm.com";

/// Library version constant.
///
/// Derived from Cargo.toml at compile time and sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
