//
//  satellite-link
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Satellite Link v1 REST API.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: The service client and the request/response pipeline
//! - [`operation`]: Declarative request descriptors every operation produces
//! - [`retry`]: Retry policy for transient failures
//! - [`context`]: Per-call deadlines and cancellation
//! - [`region`]: Region to service URL resolution
//! - [`common`]: Shared types (errors, response envelope)
//! - [`v1`]: Typed options and resources of the v1 API
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use satellite_link::api::{service_url_for_region, SatelliteLinkClient, SatelliteLinkOptions};
//! use satellite_link::auth::Credential;
//!
//! let client = SatelliteLinkClient::new(SatelliteLinkOptions {
//!     url: Some(service_url_for_region("us-south")?),
//!     authenticator: Some(Arc::new(Credential::bearer("your-token"))),
//!     ..Default::default()
//! })?;
//! # Ok::<(), satellite_link::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<ApiResponse<T>, Error>`. See [`Error`] for the
//! failure taxonomy.

/// Core HTTP client.
///
/// Provides the [`SatelliteLinkClient`] struct which handles:
/// - Request building from operation descriptors
/// - Authentication header injection
/// - Retries, deadlines and cancellation
/// - Response decoding and error mapping
pub mod client;

/// Common types shared by every operation.
///
/// Includes:
/// - [`Error`]: Unified error type
/// - [`ApiResponse`]: Decoded result with its envelope
/// - [`ResponseEnvelope`]: Raw status, headers and body
pub mod common;

pub mod context;
pub mod operation;
pub mod region;
pub mod retry;

/// Satellite Link API v1 resources and operations.
pub mod v1;

pub use client::{SatelliteLinkClient, SatelliteLinkOptions, DEFAULT_REQUEST_TIMEOUT};
pub use common::{ApiResponse, Error, ResponseEnvelope};
pub use context::CallContext;
pub use region::service_url_for_region;
pub use retry::RetryPolicy;
