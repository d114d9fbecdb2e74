//
//  satellite-link
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Authenticators inject credentials into every outgoing request right before it
//! is sent. The client holds its authenticator behind an `Arc`, so clones of a
//! client share the same authenticator instance.
//!
//! ## Supported Authentication Methods
//!
//! - **No authentication**: requests are sent as built
//! - **Basic**: HTTP Basic authentication with username and password
//! - **Bearer token**: a caller-managed access token
//!
//! Other schemes plug in by implementing [`Authenticator`].
//!
//! ## Example
//!
//! ```rust
//! use satellite_link::auth::{Authenticator, Credential};
//!
//! let credential = Credential::bearer("my-access-token");
//! assert_eq!(credential.auth_type(), "bearerToken");
//! assert!(credential.validate().is_ok());
//!
//! let broken = Credential::basic("", "secret");
//! assert!(broken.validate().is_err());
//! ```

use std::fmt;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;

use crate::api::common::Error;

/// Authentication type name for [`Credential::NoAuth`].
pub const AUTH_TYPE_NOAUTH: &str = "noAuth";

/// Authentication type name for [`Credential::Basic`].
pub const AUTH_TYPE_BASIC: &str = "basic";

/// Authentication type name for [`Credential::BearerToken`].
pub const AUTH_TYPE_BEARER_TOKEN: &str = "bearerToken";

/// A pluggable credential-injection strategy.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use reqwest::Request;
/// use satellite_link::auth::Authenticator;
/// use satellite_link::Error;
///
/// #[derive(Debug)]
/// struct ApiKeyHeader(String);
///
/// #[async_trait]
/// impl Authenticator for ApiKeyHeader {
///     fn auth_type(&self) -> &str {
///         "apiKeyHeader"
///     }
///
///     fn validate(&self) -> Result<(), Error> {
///         Ok(())
///     }
///
///     async fn authenticate(&self, request: &mut Request) -> Result<(), Error> {
///         let value = self
///             .0
///             .parse()
///             .map_err(|_| Error::Authentication("invalid api key".to_string()))?;
///         request.headers_mut().insert("x-api-key", value);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Authenticator: fmt::Debug + Send + Sync {
    /// A short name for the authentication scheme.
    fn auth_type(&self) -> &str;

    /// Checks that the authenticator has everything it needs.
    ///
    /// Called once when a client is constructed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the missing or invalid field.
    fn validate(&self) -> Result<(), Error>;

    /// Adds credentials to an outgoing request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the request cannot be authenticated.
    /// The request is not sent in that case.
    async fn authenticate(&self, request: &mut Request) -> Result<(), Error>;
}

/// Built-in authentication credentials.
///
/// # Variants
///
/// - `NoAuth`: sends requests unauthenticated, useful against local mocks
/// - `Basic`: HTTP Basic authentication
/// - `BearerToken`: `Authorization: Bearer <token>`
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// No credentials are added.
    NoAuth,
    /// HTTP Basic authentication.
    Basic {
        /// The username.
        username: String,
        /// The password.
        password: String,
    },
    /// Bearer token authentication.
    BearerToken {
        /// The access token.
        token: String,
    },
}

impl Credential {
    /// Creates a bearer token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: token.into(),
        }
    }

    /// Creates a Basic credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    fn header_value(&self) -> Result<Option<HeaderValue>, Error> {
        let value = match self {
            Self::NoAuth => return Ok(None),
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
            }
            Self::BearerToken { token } => format!("Bearer {}", token),
        };

        let mut header = HeaderValue::from_str(&value).map_err(|_| {
            Error::Authentication(format!(
                "{} credentials contain characters not allowed in a header",
                self.auth_type()
            ))
        })?;
        header.set_sensitive(true);
        Ok(Some(header))
    }
}

// Keep secrets out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAuth => f.write_str("NoAuth"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::BearerToken { .. } => f
                .debug_struct("BearerToken")
                .field("token", &"***")
                .finish(),
        }
    }
}

#[async_trait]
impl Authenticator for Credential {
    fn auth_type(&self) -> &str {
        match self {
            Self::NoAuth => AUTH_TYPE_NOAUTH,
            Self::Basic { .. } => AUTH_TYPE_BASIC,
            Self::BearerToken { .. } => AUTH_TYPE_BEARER_TOKEN,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        match self {
            Self::NoAuth => Ok(()),
            Self::Basic { username, password } => {
                check_property(username, "username")?;
                check_property(password, "password")
            }
            Self::BearerToken { token } => {
                check_property(token, "bearer token")?;
                if token.chars().any(char::is_whitespace) {
                    return Err(Error::Configuration(
                        "the bearer token must not contain whitespace".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    async fn authenticate(&self, request: &mut Request) -> Result<(), Error> {
        if let Some(value) = self.header_value()? {
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

/// Rejects empty credential properties and values that still carry surrounding
/// braces or quotes from a copy-pasted template.
fn check_property(value: &str, name: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::Configuration(format!("the {} must be provided", name)));
    }
    let wrapped = |open: char, close: char| value.starts_with(open) && value.ends_with(close);
    if wrapped('{', '}') || wrapped('"', '"') {
        return Err(Error::Configuration(format!(
            "the {} must not be wrapped in braces or quotes",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Client, Method};

    fn request() -> Request {
        Client::new()
            .request(Method::GET, "https://link.example.com/v1/locations")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_bearer_sets_authorization() {
        let mut req = request();
        Credential::bearer("abc123").authenticate(&mut req).await.unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc123");
    }

    #[tokio::test]
    async fn test_basic_sets_authorization() {
        let mut req = request();
        Credential::basic("user", "pass")
            .authenticate(&mut req)
            .await
            .unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Basic dXNlcjpwYXNz");
    }

    #[tokio::test]
    async fn test_noauth_leaves_request_untouched() {
        let mut req = request();
        Credential::NoAuth.authenticate(&mut req).await.unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_unencodable_token_fails_authentication() {
        let mut req = request();
        let err = Credential::bearer("bad\ntoken")
            .authenticate(&mut req)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_validate() {
        assert!(Credential::NoAuth.validate().is_ok());
        assert!(Credential::basic("user", "pass").validate().is_ok());
        assert!(Credential::basic("user", "").validate().is_err());
        assert!(Credential::basic("{username}", "pass").validate().is_err());
        assert!(Credential::bearer("").validate().is_err());
        assert!(Credential::bearer("has space").validate().is_err());
        assert!(Credential::bearer("\"quoted\"").validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", Credential::basic("user", "hunter2"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!format!("{:?}", Credential::bearer("s3cr3t")).contains("s3cr3t"));
    }
}
