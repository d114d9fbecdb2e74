//
//  satellite-link
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides the types shared by every operation of the Satellite Link
//! API: the error taxonomy, the response envelope and the successful response
//! wrapper.
//!
//! # Overview
//!
//! - [`Error`] - Unified error type for all client operations
//! - [`ResponseEnvelope`] - Raw status, headers and body of an HTTP response
//! - [`ApiResponse`] - A decoded result together with its envelope
//!
//! # Example
//!
//! ```rust
//! use satellite_link::Error;
//!
//! fn describe(err: &Error) -> String {
//!     match err {
//!         Error::Validation(reason) => format!("fix your request: {}", reason),
//!         Error::Api { status, message, .. } => format!("{}: {}", status, message),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - An envelope is attached to an error whenever the request reached the network
//!   and a response came back
//! - Validation and configuration errors never carry an envelope

use std::borrow::Cow;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all Satellite Link client operations.
///
/// # Variants
///
/// | Variant | Description | Envelope |
/// |---------|-------------|----------|
/// | `Validation` | Caller mistake, nothing was sent | No |
/// | `Configuration` | Bad client setup (URL, credentials, region) | No |
/// | `Authentication` | Authenticator rejected the request before send | No |
/// | `Timeout` | Deadline exceeded, per attempt or overall | No |
/// | `Cancelled` | The caller cancelled the call | No |
/// | `Transport` | Connection-level failure | No |
/// | `Api` | Server returned a non-2xx status | Yes |
/// | `ResponseProcessing` | 2xx response whose body could not be decoded | Yes |
///
/// # Example
///
/// ```rust
/// use satellite_link::Error;
///
/// let err = Error::Validation("location_id must be provided".to_string());
/// assert!(err.response().is_none());
/// assert_eq!(err.status_code(), None);
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The request was rejected locally before any network I/O.
    ///
    /// Raised for absent options objects, missing required fields and
    /// malformed header names or values.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The client is not configured correctly.
    ///
    /// Raised for malformed service URLs, unknown regions, unrecognized
    /// authentication types and authenticators that fail validation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The authenticator could not authenticate the outgoing request.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A deadline was exceeded.
    ///
    /// Either the per-call context deadline elapsed (possibly across several
    /// retry attempts) or a single attempt hit the per-request timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The call was cancelled through its [`CallContext`](crate::CallContext).
    #[error("Request cancelled")]
    Cancelled,

    /// A connection-level failure occurred while sending the request or reading
    /// the response.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service returned a non-success status code.
    ///
    /// `message` is extracted from the structured error body when possible,
    /// otherwise it is built from the status and the raw body.
    #[error("{message}")]
    Api {
        /// The HTTP status returned by the service.
        status: StatusCode,
        /// Human readable error message.
        message: String,
        /// The full response, for inspecting headers or the raw body.
        response: Box<ResponseEnvelope>,
    },

    /// The service returned a success status but the body could not be decoded
    /// into the expected result shape.
    #[error("Error processing the HTTP response: {source}")]
    ResponseProcessing {
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
        /// The full response that failed to decode.
        response: Box<ResponseEnvelope>,
    },
}

impl Error {
    /// Returns the response envelope attached to this error, if the request
    /// reached the service and a response came back.
    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Api { response, .. } | Self::ResponseProcessing { response, .. } => {
                Some(response.as_ref())
            }
            _ => None,
        }
    }

    /// Returns the HTTP status code attached to this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(ResponseEnvelope::status_code)
    }

    /// Returns `true` for deadline-exceeded errors.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns `true` if the retry policy would consider this failure transient.
    ///
    /// Useful for callers that drive their own retry loop on top of the client.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(err) => crate::api::retry::is_transient_error(err),
            Self::Api { status, .. } => crate::api::retry::is_transient_status(*status),
            _ => false,
        }
    }
}

/// The raw HTTP response of a call.
///
/// Returned alongside the decoded result on success, and attached to
/// [`Error::Api`] and [`Error::ResponseProcessing`] on failure, so callers can
/// always inspect the status code and headers once the service answered.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `status` | `StatusCode` | The HTTP status of the response |
/// | `headers` | `HeaderMap` | All response headers |
/// | `body` | `Vec<u8>` | The raw, undecoded response body |
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// The HTTP status of the response.
    pub status: StatusCode,

    /// All response headers.
    pub headers: HeaderMap,

    /// The raw response body.
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    /// Returns the numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    ///
    /// Header names are matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns the `Content-Type` of the response, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// A successfully decoded API response.
///
/// # Type Parameters
///
/// - `T` - The typed result of the operation
///
/// # Example
///
/// ```rust,no_run
/// use satellite_link::api::v1::{GetLinkOptions, Location};
/// use satellite_link::{ApiResponse, SatelliteLinkClient};
///
/// # async fn example(client: &SatelliteLinkClient) -> Result<(), satellite_link::Error> {
/// let response: ApiResponse<Location> = client.get_link(&GetLinkOptions::new("loc")).await?;
/// assert_eq!(response.status_code(), 200);
/// let location = response.into_result();
/// println!("{:?}", location.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded response payload.
    pub result: T,

    /// The raw response the payload was decoded from.
    pub envelope: ResponseEnvelope,
}

impl<T> ApiResponse<T> {
    /// Returns the numeric status code of the response.
    pub fn status_code(&self) -> u16 {
        self.envelope.status_code()
    }

    /// Consumes the response and returns the decoded payload.
    pub fn into_result(self) -> T {
        self.result
    }
}

/// Extracts a user-friendly message from an API error response body.
///
/// The service returns errors in the format:
/// ```json
/// {"errors": [{"code": "not_found", "message": "Human readable message"}], "trace": "..."}
/// ```
///
/// Older gateways and proxies in front of it may instead answer with
/// `{"error": "..."}`, `{"message": "..."}` or `{"errorMessage": "..."}`.
/// This function tries each format in turn. When the body is not JSON, or no
/// message is found, it falls back to the status and the raw body.
///
/// # Parameters
///
/// * `status` - The HTTP status code
/// * `body` - The raw error response body
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use satellite_link::api::common::format_api_error;
///
/// let body = r#"{"errors":[{"code":"not_found","message":"Location not found"}]}"#;
/// assert_eq!(format_api_error(StatusCode::NOT_FOUND, body), "Location not found");
///
/// let message = format_api_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
/// assert_eq!(message, "API error (502 Bad Gateway): <html>oops</html>");
/// ```
pub fn format_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        // {"errors": [{"message": "..."}]}
        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        // {"error": "..."} or {"error": {"message": "..."}}
        if let Some(error) = json.get("error") {
            if let Some(message) = error.as_str() {
                return message.to_string();
            }
            if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }

        for key in ["message", "errorMessage"] {
            if let Some(message) = json.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }

    if body.trim().is_empty() {
        return format!("API error ({})", status);
    }

    format!("API error ({}): {}", status, body.trim())
}
