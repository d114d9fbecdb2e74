//
//  satellite-link
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module loads service properties from outside the program, so a client
//! can be built without hard-coding the URL or credentials.
//!
//! ## Overview
//!
//! Properties are keyed by the upper-cased service name followed by the
//! property name. For the default service name `satellite_link`:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `SATELLITE_LINK_URL` | Service URL |
//! | `SATELLITE_LINK_AUTH_TYPE` | `noAuth`, `basic` or `bearerToken` (case-insensitive) |
//! | `SATELLITE_LINK_BEARER_TOKEN` | Token for `bearerToken` |
//! | `SATELLITE_LINK_USERNAME` / `SATELLITE_LINK_PASSWORD` | Credentials for `basic` |
//! | `SATELLITE_LINK_ENABLE_RETRIES` | `true` to enable retries |
//! | `SATELLITE_LINK_MAX_RETRIES` | Retry budget |
//! | `SATELLITE_LINK_RETRY_INTERVAL` | Maximum backoff, in seconds |
//! | `SATELLITE_LINK_DISABLE_SSL` | `true` to skip TLS verification |
//!
//! ## Sources
//!
//! The credentials file is consulted first (see [`file`]), then the process
//! environment. The first source that has any property for the service is used
//! on its own; sources are never merged.
//!
//! ## Usage
//!
//! ```rust
//! use satellite_link::auth::Authenticator;
//! use satellite_link::config::ServiceProperties;
//!
//! let properties = ServiceProperties::from_pairs(
//!     "satellite_link",
//!     [
//!         ("SATELLITE_LINK_URL", "https://link.example.com"),
//!         ("SATELLITE_LINK_AUTH_TYPE", "noauth"),
//!     ],
//! );
//! assert_eq!(properties.url(), Some("https://link.example.com"));
//! assert_eq!(properties.authenticator()?.auth_type(), "noAuth");
//! # Ok::<(), satellite_link::Error>(())
//! ```

pub mod file;

pub use file::*;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::api::common::Error;
use crate::api::retry::RetryPolicy;
use crate::auth::{Authenticator, Credential};

/// Properties of one service, loaded from external configuration.
///
/// Keys are stored without the service prefix, upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProperties {
    service_name: String,
    properties: HashMap<String, String>,
}

impl ServiceProperties {
    /// Loads the properties of `service_name` from the credentials file or the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `IBM_CREDENTIALS_FILE` names a file
    /// that cannot be read.
    pub fn load(service_name: &str) -> Result<Self, Error> {
        let explicit = std::env::var(CREDENTIALS_FILE_ENV).ok();
        let credentials_file = locate_credentials_file(explicit.as_deref());
        Self::from_sources(service_name, credentials_file.as_deref(), std::env::vars())
    }

    /// Loads properties from an explicit credentials file and environment.
    ///
    /// This is [`load`](Self::load) with its inputs injected.
    pub fn from_sources<I>(
        service_name: &str,
        credentials_file: Option<&Path>,
        env: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if let Some(path) = credentials_file {
            let entries = parse_credentials(&read_credentials_file(path)?);
            let properties = Self::from_pairs(service_name, entries);
            if !properties.is_empty() {
                debug!(
                    service = service_name,
                    path = %path.display(),
                    "loaded service properties from credentials file"
                );
                return Ok(properties);
            }
        }

        let properties = Self::from_pairs(service_name, env);
        if !properties.is_empty() {
            debug!(service = service_name, "loaded service properties from environment");
        }
        Ok(properties)
    }

    /// Builds properties from `(key, value)` pairs, keeping only keys prefixed
    /// with the service name.
    pub fn from_pairs<I, K, V>(service_name: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let prefix = property_prefix(service_name);
        let properties = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref().to_ascii_uppercase();
                key.strip_prefix(&prefix)
                    .filter(|property| !property.is_empty())
                    .map(|property| (property.to_string(), value.into()))
            })
            .collect();

        Self {
            service_name: service_name.to_string(),
            properties,
        }
    }

    /// The service name the properties belong to.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns `true` if no property was found for the service.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns a property by name, without the service prefix, e.g. `"URL"`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties
            .get(&property.to_ascii_uppercase())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The configured service URL.
    pub fn url(&self) -> Option<&str> {
        self.get("URL")
    }

    /// Builds the configured authenticator.
    ///
    /// When `AUTH_TYPE` is absent it is inferred: a bearer token selects
    /// `bearerToken`, a username selects `basic`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unrecognized authentication type,
    /// or when no authentication is configured at all.
    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>, Error> {
        let auth_type = match self.get("AUTH_TYPE") {
            Some(auth_type) => auth_type.to_ascii_lowercase(),
            None if self.get("BEARER_TOKEN").is_some() => "bearertoken".to_string(),
            None if self.get("USERNAME").is_some() => "basic".to_string(),
            None => {
                return Err(Error::Configuration(format!(
                    "no authentication configured for service '{}'",
                    self.service_name
                )))
            }
        };

        let credential = match auth_type.as_str() {
            "noauth" => Credential::NoAuth,
            "basic" => Credential::basic(
                self.get("USERNAME").unwrap_or_default(),
                self.get("PASSWORD").unwrap_or_default(),
            ),
            "bearertoken" => Credential::bearer(self.get("BEARER_TOKEN").unwrap_or_default()),
            other => {
                return Err(Error::Configuration(format!(
                    "unrecognized authentication type '{}'",
                    other
                )))
            }
        };

        Ok(Arc::new(credential))
    }

    /// Returns the configured retry policy, or `None` unless `ENABLE_RETRIES`
    /// is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for non-numeric retry settings.
    pub fn retry_policy(&self) -> Result<Option<RetryPolicy>, Error> {
        if !self.flag("ENABLE_RETRIES") {
            return Ok(None);
        }

        let max_retries = self.number("MAX_RETRIES")?.unwrap_or(0);
        let interval = self.number("RETRY_INTERVAL")?.unwrap_or(0);
        Ok(Some(RetryPolicy::new(
            u32::try_from(max_retries).unwrap_or(u32::MAX),
            Duration::from_secs(interval),
        )))
    }

    /// Returns `true` if `DISABLE_SSL` is `true`.
    pub fn disable_ssl(&self) -> bool {
        self.flag("DISABLE_SSL")
    }

    fn flag(&self, property: &str) -> bool {
        self.get(property)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    fn number(&self, property: &str) -> Result<Option<u64>, Error> {
        self.get(property)
            .map(|value| {
                value.parse::<u64>().map_err(|_| {
                    Error::Configuration(format!(
                        "{}{} must be a non-negative integer, got '{}'",
                        property_prefix(&self.service_name),
                        property,
                        value
                    ))
                })
            })
            .transpose()
    }
}

fn property_prefix(service_name: &str) -> String {
    format!("{}_", service_name.to_ascii_uppercase().replace('-', "_"))
}
