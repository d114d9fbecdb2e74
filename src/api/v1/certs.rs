//
//  satellite-link
//  api/v1/certs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint certificates: download, upload and removal.
//!
//! Certificate bundles are downloaded as raw bytes, either a zip archive or,
//! with `no_zip`, the plain PEM text. Uploads are multipart forms with one file
//! part per certificate.

use std::collections::HashMap;

use crate::api::common::Error;
use crate::api::operation::{
    DecodeBody, FileUpload, FormPart, FormPartContent, Operation, OperationDescriptor,
};
use crate::api::v1::Endpoint;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// A downloaded certificate bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadedCerts {
    /// The raw bundle bytes.
    pub data: Vec<u8>,
}

impl DownloadedCerts {
    /// Returns `true` if the bundle is a zip archive.
    pub fn is_zip(&self) -> bool {
        self.data.starts_with(ZIP_MAGIC)
    }

    /// Returns the bundle as text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

impl DecodeBody for DownloadedCerts {
    fn decode_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: body.to_vec(),
        })
    }
}

/// Options for `get_endpoint_certs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEndpointCertsOptions {
    pub location_id: Option<String>,
    pub endpoint_id: Option<String>,

    /// Download the plain certificate text instead of a zip archive.
    pub no_zip: Option<bool>,

    pub headers: HashMap<String, String>,
}

impl GetEndpointCertsOptions {
    /// Creates the options for the given location and endpoint.
    pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            endpoint_id: Some(endpoint_id.into()),
            ..Default::default()
        }
    }

    /// Requests the certificates as plain PEM text instead of a zip archive when `true`.
    pub fn with_no_zip(mut self, no_zip: bool) -> Self {
        self.no_zip = Some(no_zip);
        self
    }
}

impl Operation for GetEndpointCertsOptions {
    type Output = DownloadedCerts;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        let accept = if self.no_zip == Some(true) {
            "text/plain"
        } else {
            "application/zip"
        };

        Ok(
            OperationDescriptor::get("/v1/locations/{location_id}/endpoints/{endpoint_id}/cert")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .query("no_zip", self.no_zip)
                .accept(accept)
                .headers(&self.headers),
        )
    }
}

/// Options for `upload_endpoint_certs`.
///
/// At least one of the four certificate parts must be set.
///
/// # Example
///
/// ```rust
/// use satellite_link::api::operation::{FileUpload, Operation};
/// use satellite_link::api::v1::UploadEndpointCertsOptions;
///
/// let options = UploadEndpointCertsOptions::new("loc", "ep")
///     .with_server_cert(FileUpload::new(b"-----BEGIN CERTIFICATE-----".to_vec()));
/// assert!(options.descriptor().is_ok());
///
/// let empty = UploadEndpointCertsOptions::new("loc", "ep");
/// assert!(empty.descriptor().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadEndpointCertsOptions {
    pub location_id: Option<String>,
    pub endpoint_id: Option<String>,
    pub client_cert: Option<FileUpload>,
    pub server_cert: Option<FileUpload>,
    pub connector_cert: Option<FileUpload>,
    pub connector_key: Option<FileUpload>,
    pub headers: HashMap<String, String>,
}

impl UploadEndpointCertsOptions {
    /// Creates the options for the given location and endpoint.
    pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            endpoint_id: Some(endpoint_id.into()),
            ..Default::default()
        }
    }

    /// Sets the client certificate.
    pub fn with_client_cert(mut self, file: FileUpload) -> Self {
        self.client_cert = Some(file);
        self
    }

    /// Sets the server certificate.
    pub fn with_server_cert(mut self, file: FileUpload) -> Self {
        self.server_cert = Some(file);
        self
    }

    /// Sets the connector certificate.
    pub fn with_connector_cert(mut self, file: FileUpload) -> Self {
        self.connector_cert = Some(file);
        self
    }

    /// Sets the connector private key.
    pub fn with_connector_key(mut self, file: FileUpload) -> Self {
        self.connector_key = Some(file);
        self
    }
}

impl Operation for UploadEndpointCertsOptions {
    type Output = Endpoint;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        let parts: Vec<FormPart> = [
            ("client_cert", &self.client_cert),
            ("server_cert", &self.server_cert),
            ("connector_cert", &self.connector_cert),
            ("connector_key", &self.connector_key),
        ]
        .into_iter()
        .filter_map(|(name, file)| {
            file.as_ref().map(|file| FormPart {
                name: name.to_string(),
                content: FormPartContent::File(file.clone()),
            })
        })
        .collect();

        if parts.is_empty() {
            return Err(Error::Validation(
                "at least one of client_cert, server_cert, connector_cert or connector_key must be provided"
                    .to_string(),
            ));
        }

        Ok(
            OperationDescriptor::post("/v1/locations/{location_id}/endpoints/{endpoint_id}/cert")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .headers(&self.headers)
                .multipart(parts),
        )
    }
}

/// Options for `delete_endpoint_certs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteEndpointCertsOptions {
    pub location_id: Option<String>,
    pub endpoint_id: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteEndpointCertsOptions {
    /// Creates the options for the given location and endpoint.
    pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            endpoint_id: Some(endpoint_id.into()),
            ..Default::default()
        }
    }
}

impl Operation for DeleteEndpointCertsOptions {
    type Output = Endpoint;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::delete("/v1/locations/{location_id}/endpoints/{endpoint_id}/cert")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .headers(&self.headers),
        )
    }
}

impl_headers!(
    GetEndpointCertsOptions,
    UploadEndpointCertsOptions,
    DeleteEndpointCertsOptions,
);
