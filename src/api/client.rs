//
//  satellite-link
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Satellite Link API
//!
//! This module provides the service client and the request/response pipeline
//! every operation goes through.
//!
//! ## Pipeline
//!
//! 1. **Validate**: the options object must be present and its descriptor valid
//! 2. **Build**: path parameters are escaped into the URL, set query parameters
//!    are appended, default headers are merged with per-call headers (per-call
//!    headers win) and the body is serialized
//! 3. **Authenticate**: the authenticator mutates the outgoing request
//! 4. **Send**: the request is sent under the call's [`CallContext`]
//! 5. **Retry**: transient failures are retried with exponential backoff when
//!    retries are enabled
//! 6. **Decode**: 2xx bodies decode into the typed result, anything else becomes
//!    an [`Error::Api`]
//!
//! ## Features
//!
//! - Authentication header injection through a shared [`Authenticator`]
//! - Per-call deadlines and cancellation
//! - Exponential backoff with jitter for transient failures
//! - Custom `User-Agent` header

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Request};
use tracing::{debug, warn};
use url::Url;

use crate::api::common::{format_api_error, ApiResponse, Error, ResponseEnvelope};
use crate::api::context::CallContext;
use crate::api::operation::{DecodeBody, Operation, OperationDescriptor, RequestBody};
use crate::api::retry::RetryPolicy;
use crate::auth::Authenticator;
use crate::config::ServiceProperties;

/// Per-attempt timeout applied to every request unless changed with
/// [`SatelliteLinkClient::set_request_timeout`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for constructing a [`SatelliteLinkClient`].
///
/// # Fields
///
/// * `service_name` - Name used to look up external configuration, defaults to
///   [`DEFAULT_SERVICE_NAME`](crate::DEFAULT_SERVICE_NAME)
/// * `url` - Service URL, defaults to [`DEFAULT_SERVICE_URL`](crate::DEFAULT_SERVICE_URL)
/// * `authenticator` - Credential injection strategy, required unless loaded
///   from external configuration
#[derive(Debug, Clone, Default)]
pub struct SatelliteLinkOptions {
    /// Name used to look up external configuration properties.
    pub service_name: Option<String>,

    /// The service URL.
    pub url: Option<String>,

    /// The authenticator shared by every request of the client and its clones.
    pub authenticator: Option<Arc<dyn Authenticator>>,
}

/// The Satellite Link v1 service client.
///
/// The client holds no per-call state, so a shared reference can be used from
/// many tasks at once. Configuration changes take `&mut self` and therefore can
/// never race in-flight calls.
///
/// Cloning a client produces an independent configuration (URL, retry policy,
/// headers, timeouts) that shares the same authenticator instance.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use satellite_link::auth::Credential;
/// use satellite_link::{SatelliteLinkClient, SatelliteLinkOptions};
///
/// let mut client = SatelliteLinkClient::new(SatelliteLinkOptions {
///     url: Some("https://api.link.satellite.cloud.ibm.com".to_string()),
///     authenticator: Some(Arc::new(Credential::bearer("token"))),
///     ..Default::default()
/// })?;
/// client.enable_retries(3, Duration::from_secs(10));
///
/// let mut staging = client.clone();
/// staging.set_service_url("https://staging.example.com")?;
/// assert_ne!(client.service_url(), staging.service_url());
/// # Ok::<(), satellite_link::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SatelliteLinkClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL every operation path is resolved against
    service_url: Url,
    /// The service URL exactly as the caller configured it
    configured_url: String,
    /// Shared credential injection strategy
    authenticator: Arc<dyn Authenticator>,
    /// Retry policy, `None` when retries are disabled
    retry_policy: Option<RetryPolicy>,
    /// Headers sent with every request
    default_headers: HeaderMap,
    /// Per-attempt timeout
    request_timeout: Option<Duration>,
}

impl SatelliteLinkClient {
    /// Creates a new client.
    ///
    /// # Parameters
    ///
    /// * `options` - The service URL and authenticator
    ///
    /// # Returns
    ///
    /// Returns the configured client with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if:
    /// - no authenticator was supplied
    /// - the authenticator fails validation
    /// - the service URL is not a valid absolute http(s) URL
    pub fn new(options: SatelliteLinkOptions) -> Result<Self, Error> {
        let authenticator = options.authenticator.ok_or_else(|| {
            Error::Configuration("an authenticator must be provided".to_string())
        })?;
        authenticator.validate()?;

        let url = options.url.as_deref().unwrap_or(crate::DEFAULT_SERVICE_URL);

        Ok(Self {
            http: build_http_client(false)?,
            service_url: parse_service_url(url)?,
            configured_url: url.to_string(),
            authenticator,
            retry_policy: None,
            default_headers: HeaderMap::new(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// Creates a client from external configuration.
    ///
    /// Properties are read from the credentials file or the environment (see
    /// [`ServiceProperties::load`]). A URL or authenticator set in `options`
    /// takes precedence over the loaded properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the properties cannot be loaded, the
    /// authentication type is unrecognized, or the configured URL is malformed.
    pub fn new_using_external_config(options: SatelliteLinkOptions) -> Result<Self, Error> {
        let service_name = options
            .service_name
            .clone()
            .unwrap_or_else(|| crate::DEFAULT_SERVICE_NAME.to_string());
        let properties = ServiceProperties::load(&service_name)?;
        Self::from_properties(options, &properties)
    }

    /// Creates a client from already loaded service properties.
    ///
    /// This is what [`new_using_external_config`](Self::new_using_external_config)
    /// calls once the properties are loaded.
    pub fn from_properties(
        mut options: SatelliteLinkOptions,
        properties: &ServiceProperties,
    ) -> Result<Self, Error> {
        if options.authenticator.is_none() {
            options.authenticator = Some(properties.authenticator()?);
        }
        let explicit_url = options.url.take();

        let mut client = Self::new(options)?;
        if let Some(url) = properties.url() {
            client.set_service_url(url)?;
        }
        if let Some(url) = explicit_url {
            client.set_service_url(&url)?;
        }
        if let Some(policy) = properties.retry_policy()? {
            client.retry_policy = Some(policy);
        }
        if properties.disable_ssl() {
            client.disable_ssl_verification()?;
        }

        debug!(
            service = properties.service_name(),
            url = %client.service_url,
            auth_type = client.authenticator.auth_type(),
            "configured client from external properties"
        );
        Ok(client)
    }

    /// Returns the service URL as it was configured.
    ///
    /// The string is kept verbatim. Requests are resolved against its parsed
    /// form, which may differ cosmetically (e.g. a trailing `/` on a bare host).
    pub fn service_url(&self) -> &str {
        &self.configured_url
    }

    /// Replaces the service URL for all subsequent calls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `url` is not a valid absolute http(s)
    /// URL, or carries a query string or fragment. The current URL is kept in
    /// that case.
    pub fn set_service_url(&mut self, url: &str) -> Result<(), Error> {
        self.service_url = parse_service_url(url)?;
        self.configured_url = url.to_string();
        Ok(())
    }

    /// Returns the authenticator shared by this client and its clones.
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Enables retries of transient failures.
    ///
    /// Zero values select the defaults of [`RetryPolicy::new`].
    pub fn enable_retries(&mut self, max_retries: u32, max_retry_interval: Duration) {
        self.retry_policy = Some(RetryPolicy::new(max_retries, max_retry_interval));
    }

    /// Disables retries.
    pub fn disable_retries(&mut self) {
        self.retry_policy = None;
    }

    /// Returns the retry policy, or `None` when retries are disabled.
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.retry_policy.as_ref()
    }

    /// Replaces the headers sent with every request.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    /// Adds one header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for invalid header names or values.
    pub fn add_default_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::Validation(format!("invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::Validation(format!("invalid value for header '{}'", name)))?;
        self.default_headers.insert(name, value);
        Ok(())
    }

    /// Returns the headers sent with every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Sets the per-attempt timeout. `None` lets an attempt run until the call's
    /// context deadline, if any.
    pub fn set_request_timeout(&mut self, timeout: Option<Duration>) {
        self.request_timeout = timeout;
    }

    /// Disables TLS certificate verification.
    ///
    /// Only meant for test environments with self-signed certificates.
    pub fn disable_ssl_verification(&mut self) -> Result<(), Error> {
        warn!("TLS certificate verification is disabled");
        self.http = build_http_client(true)?;
        Ok(())
    }

    /// Executes an operation.
    ///
    /// This is the shared pipeline behind every generated operation method. It is
    /// public so operations can be driven generically, for example from a table of
    /// options values.
    ///
    /// # Parameters
    ///
    /// * `options` - The operation's options object; `None` is rejected
    /// * `ctx` - Deadline and cancellation for this call
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for an absent options object or a missing required
    ///   field; nothing is sent
    /// - [`Error::Authentication`] if the authenticator rejects the request
    /// - [`Error::Timeout`] / [`Error::Cancelled`] from the context
    /// - [`Error::Transport`] for connection-level failures
    /// - [`Error::Api`] for non-2xx responses
    /// - [`Error::ResponseProcessing`] for 2xx responses that fail to decode
    pub async fn execute<O>(
        &self,
        options: Option<&O>,
        ctx: &CallContext,
    ) -> Result<ApiResponse<O::Output>, Error>
    where
        O: Operation + ?Sized,
    {
        let options = options
            .ok_or_else(|| Error::Validation("options object is required".to_string()))?;

        let descriptor = options.descriptor()?;
        let url = descriptor.resolve_url(&self.service_url)?;
        let headers = descriptor.header_map()?;

        let envelope = ctx
            .run(self.send_with_retries(&descriptor, &url, &headers))
            .await?;

        decode_response(envelope)
    }

    async fn send_with_retries(
        &self,
        descriptor: &OperationDescriptor,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<ResponseEnvelope, Error> {
        let mut attempt: u32 = 1;
        loop {
            let request = self.build_request(descriptor, url, headers).await?;
            debug!(method = %descriptor.method(), %url, attempt, "sending request");

            let outcome = self.send(request).await;

            let retry = self
                .retry_policy
                .filter(|policy| policy.should_retry(attempt, &outcome));
            let Some(policy) = retry else {
                return outcome.map_err(transport_error);
            };

            let delay = policy.backoff(attempt, outcome.as_ref().ok());
            match &outcome {
                Ok(envelope) => warn!(
                    status = envelope.status_code(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after transient status"
                ),
                Err(err) => warn!(
                    error = %err,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after transport failure"
                ),
            }
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn build_request(
        &self,
        descriptor: &OperationDescriptor,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<Request, Error> {
        // The form sets its own content type with the boundary.
        let mut defaults = self.default_headers.clone();
        if matches!(descriptor.body(), RequestBody::Multipart(_)) {
            defaults.remove(CONTENT_TYPE);
        }

        let mut builder = self
            .http
            .request(descriptor.method().clone(), url.clone())
            .headers(defaults);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        let mut request = descriptor
            .apply_body(builder)?
            .headers(headers.clone())
            .build()
            .map_err(|e| Error::Validation(format!("malformed request: {}", e)))?;

        self.authenticator.authenticate(&mut request).await?;
        Ok(request)
    }

    async fn send(&self, request: Request) -> Result<ResponseEnvelope, reqwest::Error> {
        let response = self.http.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(ResponseEnvelope {
            status,
            headers,
            body,
        })
    }
}

/// Converts a response envelope into a typed result or an error.
fn decode_response<T: DecodeBody>(envelope: ResponseEnvelope) -> Result<ApiResponse<T>, Error> {
    if !envelope.status.is_success() {
        let message = format_api_error(envelope.status, &envelope.body_text());
        return Err(Error::Api {
            status: envelope.status,
            message,
            response: Box::new(envelope),
        });
    }

    match T::decode_body(&envelope.body) {
        Ok(result) => Ok(ApiResponse { result, envelope }),
        Err(source) => {
            debug!(status = envelope.status_code(), error = %source, "failed to decode response body");
            Err(Error::ResponseProcessing {
                source,
                response: Box::new(envelope),
            })
        }
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(format!("request deadline exceeded: {}", err))
    } else {
        Error::Transport(err)
    }
}

fn parse_service_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::Configuration(format!("invalid service URL '{}': {}", url, e)))?;

    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Configuration(format!(
            "service URL '{}' must be an absolute http or https URL",
            url
        )));
    }

    // Operation query parameters are appended to the base URL.
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(Error::Configuration(format!(
            "service URL '{}' must not carry a query string or fragment",
            url
        )));
    }

    Ok(parsed)
}

fn build_http_client(accept_invalid_certs: bool) -> Result<Client, Error> {
    Client::builder()
        .user_agent(format!("satellite-link-rust/{}", crate::VERSION))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operation::{FormPart, FormPartContent};
    use crate::auth::Credential;
    use reqwest::StatusCode;

    fn client() -> SatelliteLinkClient {
        SatelliteLinkClient::new(SatelliteLinkOptions {
            authenticator: Some(Arc::new(Credential::NoAuth)),
            ..Default::default()
        })
        .unwrap()
    }

    fn envelope(status: u16, body: &str) -> ResponseEnvelope {
        ResponseEnvelope {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_new_uses_default_url() {
        assert_eq!(client().service_url(), crate::DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_new_requires_valid_authenticator() {
        let missing = SatelliteLinkClient::new(SatelliteLinkOptions::default());
        assert!(matches!(missing, Err(Error::Configuration(_))));

        let invalid = SatelliteLinkClient::new(SatelliteLinkOptions {
            authenticator: Some(Arc::new(Credential::bearer(""))),
            ..Default::default()
        });
        assert!(matches!(invalid, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_service_url_validation() {
        for bad in ["", "not a url", "/v1/locations", "mailto:ops@example.com", "ftp://example.com"] {
            assert!(parse_service_url(bad).is_err(), "{bad} should be rejected");
        }

        let mut client = client();
        assert!(client.set_service_url("::bad::").is_err());
        assert_eq!(client.service_url(), crate::DEFAULT_SERVICE_URL);
        client.set_service_url("http://localhost:8080/api").unwrap();
        assert_eq!(client.service_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_service_url_rejects_query_and_fragment() {
        let mut client = client();
        for bad in [
            "https://h.example.com/api?token=1#frag",
            "https://h.example.com/api?token=1",
            "https://h.example.com/api#frag",
            "https://h.example.com/api?",
        ] {
            let err = client.set_service_url(bad).unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "{bad}: {err:?}");
        }
        assert_eq!(client.service_url(), crate::DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_service_url_is_kept_verbatim() {
        let mut client = client();
        client.set_service_url("https://h.example.com").unwrap();
        assert_eq!(client.service_url(), "https://h.example.com");
        assert_eq!(client.service_url.as_str(), "https://h.example.com/");
    }

    #[tokio::test]
    async fn test_multipart_body_replaces_default_content_type() {
        let mut client = client();
        client.add_default_header("Content-Type", "application/json").unwrap();

        let descriptor = OperationDescriptor::post("/v1/upload").multipart(vec![FormPart {
            name: "state".to_string(),
            content: FormPartContent::Text("{}".to_string()),
        }]);
        let url = descriptor.resolve_url(&client.service_url).unwrap();
        let request = client
            .build_request(&descriptor, &url, &HeaderMap::new())
            .await
            .unwrap();

        let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types.len(), 1);
        assert!(content_types[0]
            .to_str()
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
    }

    #[tokio::test]
    async fn test_json_body_replaces_default_content_type() {
        let mut client = client();
        client.add_default_header("Content-Type", "text/plain").unwrap();

        let descriptor = OperationDescriptor::post("/v1/upload")
            .json_body(&serde_json::json!({"a": 1}))
            .unwrap();
        let url = descriptor.resolve_url(&client.service_url).unwrap();
        let request = client
            .build_request(&descriptor, &url, &HeaderMap::new())
            .await
            .unwrap();

        let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0], "application/json");
    }

    #[test]
    fn test_retry_toggles() {
        let mut client = client();
        assert!(client.retry_policy().is_none());
        client.enable_retries(2, Duration::from_millis(50));
        assert_eq!(client.retry_policy().unwrap().max_retries(), 2);
        client.disable_retries();
        assert!(client.retry_policy().is_none());
    }

    #[test]
    fn test_default_headers() {
        let mut client = client();
        client.add_default_header("X-Correlation-Id", "abc").unwrap();
        assert_eq!(client.default_headers()["x-correlation-id"], "abc");
        assert!(client.add_default_header("bad header", "x").is_err());
    }

    #[test]
    fn test_decode_response_paths() {
        #[derive(Debug, Default, serde::Deserialize, PartialEq)]
        struct Thing {
            name: Option<String>,
        }
        crate::api::operation::json_body!(Thing);

        let ok: ApiResponse<Thing> = decode_response(envelope(200, r#"{"name":"a"}"#)).unwrap();
        assert_eq!(ok.result.name.as_deref(), Some("a"));

        let empty: ApiResponse<Thing> = decode_response(envelope(204, "")).unwrap();
        assert_eq!(empty.result, Thing::default());

        let garbage = decode_response::<Thing>(envelope(200, "not json")).unwrap_err();
        assert!(matches!(garbage, Error::ResponseProcessing { .. }));
        assert_eq!(garbage.status_code(), Some(200));

        let api = decode_response::<Thing>(envelope(
            409,
            r#"{"errors":[{"code":"conflict","message":"already exists"}]}"#,
        ))
        .unwrap_err();
        match api {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(message, "already exists");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }
}
