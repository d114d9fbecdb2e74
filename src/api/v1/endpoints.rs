//
//  satellite-link
//  api/v1/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Endpoints
//!
//! An endpoint is a network destination (host, port and protocol) reachable
//! through a link, together with its TLS certificate material.
//!
//! ## Connection Types
//!
//! - `cloud`: the destination lives in the cloud and is reached from the location
//! - `location`: the destination lives in the location and is reached from the cloud
//!
//! ## Import and Export
//!
//! [`ExportEndpointsOptions`] returns the endpoint configuration as an opaque
//! state document, which [`ImportEndpointsOptions`] uploads as a multipart
//! `state` part to recreate the endpoint, possibly under another location.
//!
//! ## Example
//!
//! ```rust,no_run
//! use satellite_link::api::v1::{CreateEndpointsOptions, EndpointCerts, CertFile};
//! use satellite_link::SatelliteLinkClient;
//!
//! # async fn example(client: &SatelliteLinkClient) -> Result<(), satellite_link::Error> {
//! let options = CreateEndpointsOptions::new("my-location", "cloud", "My endpoint", "example.com", 443)
//!     .with_client_protocol("https")
//!     .with_server_protocol("tls")
//!     .with_certs(EndpointCerts::default().with_server_cert(CertFile::new(
//!         "serverEndpointCert.pem",
//!         "-----BEGIN CERTIFICATE-----\n...\n-----END CERTIFICATE-----\n",
//!     )));
//!
//! let endpoint = client.create_endpoints(&options).await?.into_result();
//! println!("created {:?}", endpoint.endpoint_id);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::common::Error;
use crate::api::operation::{
    json_body, require, require_str, FileUpload, FormPart, FormPartContent, Operation,
    OperationDescriptor,
};
use crate::api::v1::{ExecutionResult, SourceStatusObject};

/// An endpoint.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `conn_type` | `cloud` or `location` |
/// | `display_name` | Human readable name |
/// | `server_host` / `server_port` | The destination |
/// | `sni` | Server name indication sent to the destination |
/// | `client_protocol` / `server_protocol` | Protocols on either side of the tunnel |
/// | `client_mutual_auth` / `server_mutual_auth` | Mutual TLS on either side |
/// | `reject_unauth` | Reject destinations with unverifiable certificates |
/// | `timeout` | Inactivity timeout in seconds |
/// | `client_host` / `client_port` | Address clients connect to, assigned by the service |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_port: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_protocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mutual_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_protocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_mutual_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_unauth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceStatusObject>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certs: Option<EndpointCerts>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_port: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<EndpointPerformance>,
}

/// Traffic metrics of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointPerformance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_bandwidth: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_bandwidth: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectors: Option<Vec<EndpointConnectorPerformance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConnectorPerformance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<i64>,

    #[serde(rename = "rxBW", skip_serializing_if = "Option::is_none")]
    pub rx_bw: Option<i64>,

    #[serde(rename = "txBW", skip_serializing_if = "Option::is_none")]
    pub tx_bw: Option<i64>,
}

/// A list of endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
}

/// A certificate or key file embedded in an endpoint body.
///
/// Responses only carry the `filename`; `file_contents` is write-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_contents: Option<String>,
}

impl CertFile {
    /// A certificate file and its PEM contents.
    pub fn new(filename: impl Into<String>, file_contents: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            file_contents: Some(file_contents.into()),
        }
    }
}

/// The certificate of one side of the tunnel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerCerts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<CertFile>,
}

/// The certificate and private key the connector presents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorCerts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<CertFile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<CertFile>,
}

/// Certificate material of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointCerts {
    /// Client certificate, used for mutual TLS with clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<PeerCerts>,

    /// Server certificate, used to verify the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<PeerCerts>,

    /// Certificate and key the connector presents to the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<ConnectorCerts>,
}

impl EndpointCerts {
    /// Sets the client certificate.
    pub fn with_client_cert(mut self, cert: CertFile) -> Self {
        self.client = Some(PeerCerts { cert: Some(cert) });
        self
    }

    /// Sets the server certificate.
    pub fn with_server_cert(mut self, cert: CertFile) -> Self {
        self.server = Some(PeerCerts { cert: Some(cert) });
        self
    }

    /// Sets the connector certificate and its private key.
    pub fn with_connector(mut self, cert: CertFile, key: CertFile) -> Self {
        self.connector = Some(ConnectorCerts {
            cert: Some(cert),
            key: Some(key),
        });
        self
    }
}

/// The exported configuration of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportEndpointsResponse {
    /// Suggested file name for the export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The opaque state document, suitable for `import_endpoints`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

json_body!(Endpoint, Endpoints, ExportEndpointsResponse);

/// Options for `list_endpoints`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEndpointsOptions {
    pub location_id: Option<String>,

    /// Filter by endpoint type, e.g. `enabled`.
    pub type_: Option<String>,

    pub headers: HashMap<String, String>,
}

impl ListEndpointsOptions {
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

impl Operation for ListEndpointsOptions {
    type Output = Endpoints;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(OperationDescriptor::get("/v1/locations/{location_id}/endpoints")
            .path_param("location_id", self.location_id.as_deref())
            .query("type", self.type_.as_deref())
            .headers(&self.headers))
    }
}

/// Options for `create_endpoints`.
///
/// `conn_type`, `display_name`, `server_host` and `server_port` are required and
/// taken by [`new`](Self::new).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateEndpointsOptions {
    #[serde(skip)]
    pub location_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_port: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_protocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mutual_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_protocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_mutual_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_unauth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certs: Option<EndpointCerts>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateEndpointsOptions {
    /// Creates the options with every field a new endpoint requires.
    pub fn new(
        location_id: impl Into<String>,
        conn_type: impl Into<String>,
        display_name: impl Into<String>,
        server_host: impl Into<String>,
        server_port: i64,
    ) -> Self {
        Self {
            location_id: Some(location_id.into()),
            conn_type: Some(conn_type.into()),
            display_name: Some(display_name.into()),
            server_host: Some(server_host.into()),
            server_port: Some(server_port),
            ..Default::default()
        }
    }

    /// Sets the server name indication sent during the TLS handshake.
    pub fn with_sni(mut self, sni: impl Into<String>) -> Self {
        self.sni = Some(sni.into());
        self
    }

    /// Sets the protocol clients use to reach the endpoint, e.g. `https`.
    pub fn with_client_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.client_protocol = Some(protocol.into());
        self
    }

    /// Requires clients to present a certificate.
    pub fn with_client_mutual_auth(mut self, enabled: bool) -> Self {
        self.client_mutual_auth = Some(enabled);
        self
    }

    /// Sets the protocol used towards the destination server, e.g. `tls`.
    pub fn with_server_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.server_protocol = Some(protocol.into());
        self
    }

    /// Presents a client certificate to the destination server.
    pub fn with_server_mutual_auth(mut self, enabled: bool) -> Self {
        self.server_mutual_auth = Some(enabled);
        self
    }

    /// Rejects destination servers whose certificate cannot be verified.
    pub fn with_reject_unauth(mut self, reject: bool) -> Self {
        self.reject_unauth = Some(reject);
        self
    }

    /// Sets the inactivity timeout, in seconds.
    pub fn with_timeout(mut self, seconds: i64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Records the service or user that created the endpoint.
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Sets the endpoint certificates.
    pub fn with_certs(mut self, certs: EndpointCerts) -> Self {
        self.certs = Some(certs);
        self
    }
}

impl Operation for CreateEndpointsOptions {
    type Output = Endpoint;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        require_str(&self.conn_type, "conn_type")?;
        require_str(&self.display_name, "display_name")?;
        require_str(&self.server_host, "server_host")?;
        require(&self.server_port, "server_port")?;

        OperationDescriptor::post("/v1/locations/{location_id}/endpoints")
            .path_param("location_id", self.location_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

/// Options for `import_endpoints`.
///
/// The `state` part is sent as a multipart file and is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportEndpointsOptions {
    pub location_id: Option<String>,

    /// The exported state document.
    pub state: Option<FileUpload>,

    pub headers: HashMap<String, String>,
}

impl ImportEndpointsOptions {
    /// Creates the options with the exported endpoint state to import.
    pub fn new(location_id: impl Into<String>, state: FileUpload) -> Self {
        Self {
            location_id: Some(location_id.into()),
            state: Some(state),
            ..Default::default()
        }
    }
}

impl Operation for ImportEndpointsOptions {
    type Output = Endpoint;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        let state = require(&self.state, "state")?;

        Ok(
            OperationDescriptor::post("/v1/locations/{location_id}/endpoints/import")
                .path_param("location_id", self.location_id.as_deref())
                .headers(&self.headers)
                .multipart(vec![FormPart {
                    name: "state".to_string(),
                    content: FormPartContent::File(state.clone()),
                }]),
        )
    }
}

macro_rules! endpoint_options {
    ($( $(#[$meta:meta])* $name:ident; )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $name {
                pub location_id: Option<String>,
                pub endpoint_id: Option<String>,
                pub headers: HashMap<String, String>,
            }

            impl $name {
                /// Creates the options for the given location and endpoint.
                pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
                    Self {
                        location_id: Some(location_id.into()),
                        endpoint_id: Some(endpoint_id.into()),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

endpoint_options! {
    /// Options for `export_endpoints`.
    ExportEndpointsOptions;
    /// Options for `get_endpoints`.
    GetEndpointsOptions;
    /// Options for `delete_endpoints`.
    DeleteEndpointsOptions;
}

impl Operation for ExportEndpointsOptions {
    type Output = ExportEndpointsResponse;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::get("/v1/locations/{location_id}/endpoints/{endpoint_id}/export")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .headers(&self.headers),
        )
    }
}

impl Operation for GetEndpointsOptions {
    type Output = Endpoint;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::get("/v1/locations/{location_id}/endpoints/{endpoint_id}")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .headers(&self.headers),
        )
    }
}

impl Operation for DeleteEndpointsOptions {
    type Output = ExecutionResult;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        Ok(
            OperationDescriptor::delete("/v1/locations/{location_id}/endpoints/{endpoint_id}")
                .path_param("location_id", self.location_id.as_deref())
                .path_param("endpoint_id", self.endpoint_id.as_deref())
                .headers(&self.headers),
        )
    }
}

/// Options for `update_endpoints`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateEndpointsOptions {
    #[serde(skip)]
    pub location_id: Option<String>,

    #[serde(skip)]
    pub endpoint_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_port: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_protocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mutual_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_protocol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_mutual_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_unauth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certs: Option<EndpointCerts>,

    /// Enables or disables the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateEndpointsOptions {
    /// Creates the options for the given location and endpoint.
    pub fn new(location_id: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            location_id: Some(location_id.into()),
            endpoint_id: Some(endpoint_id.into()),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the destination host.
    pub fn with_server_host(mut self, server_host: impl Into<String>) -> Self {
        self.server_host = Some(server_host.into());
        self
    }

    /// Sets the destination port.
    pub fn with_server_port(mut self, server_port: i64) -> Self {
        self.server_port = Some(server_port);
        self
    }

    /// Sets the server name indication sent during the TLS handshake.
    pub fn with_sni(mut self, sni: impl Into<String>) -> Self {
        self.sni = Some(sni.into());
        self
    }

    /// Sets the protocol clients use to reach the endpoint, e.g. `https`.
    pub fn with_client_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.client_protocol = Some(protocol.into());
        self
    }

    /// Requires clients to present a certificate.
    pub fn with_client_mutual_auth(mut self, enabled: bool) -> Self {
        self.client_mutual_auth = Some(enabled);
        self
    }

    /// Sets the protocol used towards the destination server, e.g. `tls`.
    pub fn with_server_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.server_protocol = Some(protocol.into());
        self
    }

    /// Presents a client certificate to the destination server.
    pub fn with_server_mutual_auth(mut self, enabled: bool) -> Self {
        self.server_mutual_auth = Some(enabled);
        self
    }

    /// Rejects destination servers whose certificate cannot be verified.
    pub fn with_reject_unauth(mut self, reject: bool) -> Self {
        self.reject_unauth = Some(reject);
        self
    }

    /// Sets the inactivity timeout, in seconds.
    pub fn with_timeout(mut self, seconds: i64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Records the service or user that created the endpoint.
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Sets the endpoint certificates.
    pub fn with_certs(mut self, certs: EndpointCerts) -> Self {
        self.certs = Some(certs);
        self
    }

    /// Enables or disables the endpoint.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

impl Operation for UpdateEndpointsOptions {
    type Output = Endpoint;

    fn descriptor(&self) -> Result<OperationDescriptor, Error> {
        OperationDescriptor::patch("/v1/locations/{location_id}/endpoints/{endpoint_id}")
            .path_param("location_id", self.location_id.as_deref())
            .path_param("endpoint_id", self.endpoint_id.as_deref())
            .headers(&self.headers)
            .json_body(self)
    }
}

impl_headers!(
    ListEndpointsOptions,
    CreateEndpointsOptions,
    ImportEndpointsOptions,
    ExportEndpointsOptions,
    GetEndpointsOptions,
    UpdateEndpointsOptions,
    DeleteEndpointsOptions,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operation::RequestBody;

    fn json(descriptor: &OperationDescriptor) -> serde_json::Value {
        match descriptor.body() {
            RequestBody::Json(bytes) => serde_json::from_slice(bytes).unwrap(),
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_create_endpoints_requires_destination() {
        let mut options = CreateEndpointsOptions::new("loc", "cloud", "My endpoint", "example.com", 443);
        assert!(options.descriptor().is_ok());

        options.server_port = None;
        match options.descriptor() {
            Err(Error::Validation(message)) => assert_eq!(message, "server_port must be provided"),
            other => panic!("expected validation error, got {:?}", other),
        }

        options.server_port = Some(443);
        options.display_name = Some(String::new());
        assert!(matches!(options.descriptor(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_create_endpoints_body_nests_certs() {
        let options = CreateEndpointsOptions::new("loc", "cloud", "My endpoint", "example.com", 443)
            .with_certs(EndpointCerts::default().with_connector(
                CertFile::new("ConnectorCert.pem", "CERT"),
                CertFile::new("ConnectorPrivateKey.pem", "KEY"),
            ));
        let body = json(&options.descriptor().unwrap());
        assert_eq!(body["certs"]["connector"]["key"]["filename"], "ConnectorPrivateKey.pem");
        assert!(body.get("location_id").is_none());
        assert!(body["certs"].get("client").is_none());
    }

    #[test]
    fn test_import_endpoints_requires_state() {
        let options = ImportEndpointsOptions {
            location_id: Some("loc".to_string()),
            ..Default::default()
        };
        assert!(matches!(options.descriptor(), Err(Error::Validation(m)) if m == "state must be provided"));

        let options = ImportEndpointsOptions::new("loc", FileUpload::new(b"state".to_vec()));
        match options.descriptor().unwrap().body() {
            RequestBody::Multipart(parts) => assert_eq!(parts[0].name, "state"),
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn test_update_endpoints_only_sends_set_fields() {
        let options = UpdateEndpointsOptions::new("loc", "ep").with_enabled(false);
        assert_eq!(json(&options.descriptor().unwrap()), serde_json::json!({"enabled": false}));
    }
}
