//
//  satellite-link
//  api/operation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Operation Descriptors
//!
//! An [`OperationDescriptor`] is the declarative description of one API call:
//! the HTTP method, the path template and its parameters, the query parameters,
//! the per-call headers and the request body. Every options type implements
//! [`Operation`] by producing a descriptor, and the client turns that
//! descriptor into an HTTP request.
//!
//! ## Validation
//!
//! Descriptors are validated before any network I/O:
//!
//! - every path parameter must be present and non-empty
//! - header names and values must be valid HTTP header tokens
//! - the path template must only reference declared parameters
//!
//! ## Example
//!
//! ```rust
//! use satellite_link::api::operation::OperationDescriptor;
//! use url::Url;
//!
//! let descriptor = OperationDescriptor::get("/v1/locations/{location_id}/endpoints")
//!     .path_param("location_id", Some("loc 1"))
//!     .query("type", Some("enabled"));
//!
//! let base = Url::parse("https://example.com/api").unwrap();
//! let url = descriptor.resolve_url(&base).unwrap();
//! assert_eq!(url.as_str(), "https://example.com/api/v1/locations/loc%201/endpoints?type=enabled");
//! ```

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::api::common::Error;

/// Content type of JSON request and response bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type used for binary form parts that do not declare their own.
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// An API operation that can be executed by the client.
///
/// Implemented by every options type. The descriptor is produced fresh for each
/// call, and producing it is where required fields are checked.
pub trait Operation {
    /// The typed result the response body decodes into.
    type Output: DecodeBody;

    /// Builds the request descriptor for this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a required field is missing or the body
    /// cannot be serialized.
    fn descriptor(&self) -> Result<OperationDescriptor, Error>;
}

/// Decodes a successful response body into a typed result.
pub trait DecodeBody: Sized {
    /// Decodes the raw body.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json::Error` for bodies that do not match the
    /// expected shape.
    fn decode_body(body: &[u8]) -> Result<Self, serde_json::Error>;
}

/// Implements [`DecodeBody`] for JSON resource types.
///
/// An empty body decodes into the type's `Default` value, so every type passed
/// here must derive `Default`.
macro_rules! json_body {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::api::operation::DecodeBody for $ty {
                fn decode_body(body: &[u8]) -> Result<Self, serde_json::Error> {
                    if body.iter().all(u8::is_ascii_whitespace) {
                        return Ok(Self::default());
                    }
                    serde_json::from_slice(body)
                }
            }
        )+
    };
}

pub(crate) use json_body;

/// The body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A serialized JSON document, with fields in declaration order.
    Json(Vec<u8>),
    /// A `multipart/form-data` form.
    Multipart(Vec<FormPart>),
}

/// One named part of a multipart form.
#[derive(Debug, Clone)]
pub struct FormPart {
    /// The form field name.
    pub name: String,
    /// The part content.
    pub content: FormPartContent,
}

/// Content of a multipart form part.
#[derive(Debug, Clone)]
pub enum FormPartContent {
    /// A plain text field.
    Text(String),
    /// A binary file.
    File(FileUpload),
}

/// A binary file sent as a multipart form part.
///
/// # Example
///
/// ```rust
/// use satellite_link::api::operation::FileUpload;
///
/// let cert = FileUpload::new(b"-----BEGIN CERTIFICATE-----".to_vec())
///     .with_content_type("application/x-pem-file")
///     .with_filename("server.pem");
/// assert_eq!(cert.content_type(), "application/x-pem-file");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileUpload {
    /// The raw file bytes.
    pub data: Vec<u8>,
    /// Optional file name sent in the part's `Content-Disposition`.
    pub filename: Option<String>,
    /// Optional declared content type, defaults to `application/octet-stream`.
    pub content_type: Option<String>,
}

impl FileUpload {
    /// Creates an upload from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Sets the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Returns the declared content type or `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(OCTET_STREAM_CONTENT_TYPE)
    }
}

#[derive(Debug, Clone)]
struct PathParam {
    name: &'static str,
    value: Option<String>,
}

/// Declarative description of one HTTP request.
///
/// Built with the constructor for the HTTP method and chained setters. Nothing is
/// validated until [`resolve_url`](Self::resolve_url) or
/// [`header_map`](Self::header_map) is called, which the client does before
/// sending anything.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    method: Method,
    path_template: &'static str,
    path_params: Vec<PathParam>,
    query_params: Vec<(&'static str, String)>,
    header_params: Vec<(String, String)>,
    accept: Option<&'static str>,
    body: RequestBody,
}

impl OperationDescriptor {
    /// Creates a descriptor for the given method and path template.
    ///
    /// Placeholders in the template are written as `{name}` and filled with
    /// [`path_param`](Self::path_param).
    pub fn new(method: Method, path_template: &'static str) -> Self {
        Self {
            method,
            path_template,
            path_params: Vec::new(),
            query_params: Vec::new(),
            header_params: Vec::new(),
            accept: Some(JSON_CONTENT_TYPE),
            body: RequestBody::Empty,
        }
    }

    /// Creates a `GET` descriptor.
    pub fn get(path_template: &'static str) -> Self {
        Self::new(Method::GET, path_template)
    }

    /// Creates a `POST` descriptor.
    pub fn post(path_template: &'static str) -> Self {
        Self::new(Method::POST, path_template)
    }

    /// Creates a `PATCH` descriptor.
    pub fn patch(path_template: &'static str) -> Self {
        Self::new(Method::PATCH, path_template)
    }

    /// Creates a `DELETE` descriptor.
    pub fn delete(path_template: &'static str) -> Self {
        Self::new(Method::DELETE, path_template)
    }

    /// Adds a required path parameter.
    ///
    /// A `None` or empty value makes the descriptor invalid.
    pub fn path_param(mut self, name: &'static str, value: Option<&str>) -> Self {
        self.path_params.push(PathParam {
            name,
            value: value.map(str::to_string),
        });
        self
    }

    /// Adds a query parameter. `None` values are omitted entirely.
    pub fn query<V: ToString>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query_params.push((name, value.to_string()));
        }
        self
    }

    /// Adds per-call headers. They override the client's default headers.
    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.header_params
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Sets the `Accept` header sent with the request.
    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if serialization fails.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(|e| {
            Error::Validation(format!("failed to serialize request body: {}", e))
        })?;
        self.body = RequestBody::Json(bytes);
        Ok(self)
    }

    /// Sets a multipart form as the request body.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path template.
    pub fn path_template(&self) -> &'static str {
        self.path_template
    }

    /// Returns the request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns the query parameters that were set, in insertion order.
    pub fn query_params(&self) -> &[(&'static str, String)] {
        &self.query_params
    }

    /// Resolves the full request URL against a service base URL.
    ///
    /// Each path parameter value is percent-encoded as a single path segment, so
    /// values containing `/` or spaces cannot escape their segment.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if a path parameter is missing or empty, or the
    ///   template references an undeclared parameter
    /// - [`Error::Configuration`] if the base URL cannot carry a path
    pub fn resolve_url(&self, base: &Url) -> Result<Url, Error> {
        let mut segments = Vec::new();
        for segment in self.path_template.split('/').filter(|s| !s.is_empty()) {
            match segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                Some(name) => segments.push(self.path_value(name)?),
                None => segments.push(segment),
            }
        }

        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::Configuration(format!("service URL '{}' cannot be a base URL", base))
            })?;
            path.pop_if_empty().extend(segments);
        }

        if !self.query_params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in &self.query_params {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    fn path_value(&self, name: &str) -> Result<&str, Error> {
        let param = self
            .path_params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "path template '{}' references undeclared parameter '{}'",
                    self.path_template, name
                ))
            })?;

        match param.value.as_deref() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::Validation(format!("{} must be provided", name))),
        }
    }

    /// Converts the per-call headers into a header map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for invalid header names or values.
    pub fn header_map(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.header_params {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Validation(format!("invalid header name '{}'", name)))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                Error::Validation(format!("invalid value for header '{}'", name))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Applies the accept header and body to a request builder.
    ///
    /// Multipart forms are rebuilt for every attempt because a form can only be
    /// sent once.
    pub(crate) fn apply_body(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let mut headers = HeaderMap::new();
        if let Some(accept) = self.accept {
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }

        let builder = match &self.body {
            RequestBody::Empty => builder.headers(headers),
            RequestBody::Json(bytes) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                builder.headers(headers).body(bytes.clone())
            }
            RequestBody::Multipart(parts) => builder.headers(headers).multipart(build_form(parts)?),
        };

        Ok(builder)
    }
}

fn build_form(parts: &[FormPart]) -> Result<Form, Error> {
    let mut form = Form::new();
    for part in parts {
        let built = match &part.content {
            FormPartContent::Text(text) => Part::text(text.clone()),
            FormPartContent::File(file) => Part::bytes(file.data.clone())
                .file_name(file.filename.clone().unwrap_or_else(|| part.name.clone()))
                .mime_str(file.content_type())
                .map_err(|_| {
                    Error::Validation(format!(
                        "invalid content type '{}' for form part '{}'",
                        file.content_type(),
                        part.name
                    ))
                })?,
        };
        form = form.part(part.name.clone(), built);
    }
    Ok(form)
}

/// Returns the value of a required field, or a validation error naming it.
pub(crate) fn require<'a, T>(value: &'a Option<T>, field: &str) -> Result<&'a T, Error> {
    value
        .as_ref()
        .ok_or_else(|| Error::Validation(format!("{} must be provided", field)))
}

/// Like [`require`], but also rejects empty strings.
pub(crate) fn require_str<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, Error> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(format!("{} must be provided", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://link.example.com").unwrap()
    }

    #[test]
    fn test_resolve_url_substitutes_and_escapes() {
        let url = OperationDescriptor::get("/v1/locations/{location_id}/sources/{source_id}")
            .path_param("location_id", Some("a/b"))
            .path_param("source_id", Some("s 1"))
            .resolve_url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://link.example.com/v1/locations/a%2Fb/sources/s%201"
        );
    }

    #[test]
    fn test_resolve_url_keeps_base_path() {
        let base = Url::parse("https://link.example.com/proxy/").unwrap();
        let url = OperationDescriptor::get("/v1/locations")
            .resolve_url(&base)
            .unwrap();
        assert_eq!(url.as_str(), "https://link.example.com/proxy/v1/locations");
    }

    #[test]
    fn test_missing_or_empty_path_param_is_invalid() {
        let missing = OperationDescriptor::get("/v1/locations/{location_id}")
            .path_param("location_id", None)
            .resolve_url(&base());
        assert!(matches!(missing, Err(Error::Validation(ref m)) if m == "location_id must be provided"));

        let empty = OperationDescriptor::get("/v1/locations/{location_id}")
            .path_param("location_id", Some(""))
            .resolve_url(&base());
        assert!(matches!(empty, Err(Error::Validation(_))));

        let undeclared = OperationDescriptor::get("/v1/locations/{location_id}").resolve_url(&base());
        assert!(matches!(undeclared, Err(Error::Validation(_))));
    }

    #[test]
    fn test_unset_query_params_are_omitted() {
        let descriptor = OperationDescriptor::get("/v1/locations/{location_id}/endpoints")
            .path_param("location_id", Some("loc"))
            .query("type", None::<&str>)
            .query("no_zip", Some(true));
        assert_eq!(descriptor.query_params(), &[("no_zip", "true".to_string())]);

        let url = descriptor.resolve_url(&base()).unwrap();
        assert_eq!(url.query(), Some("no_zip=true"));
    }

    #[test]
    fn test_json_body_keeps_declaration_order() {
        #[derive(Serialize)]
        struct Body {
            zeta: u8,
            alpha: u8,
        }

        let descriptor = OperationDescriptor::post("/v1/locations")
            .json_body(&Body { zeta: 1, alpha: 2 })
            .unwrap();
        match descriptor.body() {
            RequestBody::Json(bytes) => assert_eq!(bytes, br#"{"zeta":1,"alpha":2}"#),
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_headers_are_rejected() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "value".to_string());
        let descriptor = OperationDescriptor::get("/v1/locations").headers(&headers);
        assert!(matches!(descriptor.header_map(), Err(Error::Validation(_))));

        let mut headers = HashMap::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());
        let map = OperationDescriptor::get("/v1/locations")
            .headers(&headers)
            .header_map()
            .unwrap();
        assert_eq!(map.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn test_require_helpers() {
        assert_eq!(*require(&Some(3), "port").unwrap(), 3);
        assert!(matches!(require::<u8>(&None, "port"), Err(Error::Validation(m)) if m == "port must be provided"));
        assert!(require_str(&Some(String::new()), "name").is_err());
        assert_eq!(require_str(&Some("x".to_string()), "name").unwrap(), "x");
    }

    #[test]
    fn test_file_upload_defaults() {
        let upload = FileUpload::new(vec![1, 2, 3]);
        assert_eq!(upload.content_type(), OCTET_STREAM_CONTENT_TYPE);
        assert!(build_form(&[FormPart {
            name: "state".to_string(),
            content: FormPartContent::File(upload),
        }])
        .is_ok());

        let bad = FileUpload::new(vec![1]).with_content_type("not a mime");
        assert!(build_form(&[FormPart {
            name: "state".to_string(),
            content: FormPartContent::File(bad),
        }])
        .is_err());
    }
}
