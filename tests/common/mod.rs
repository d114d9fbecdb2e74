//
//  satellite-link
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use satellite_link::auth::{Authenticator, Credential};
use satellite_link::{SatelliteLinkClient, SatelliteLinkOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A client without credentials pointed at `url`.
pub fn client(url: &str) -> SatelliteLinkClient {
    client_with(url, Arc::new(Credential::NoAuth))
}

pub fn client_with(url: &str, authenticator: Arc<dyn Authenticator>) -> SatelliteLinkClient {
    SatelliteLinkClient::new(SatelliteLinkOptions {
        url: Some(url.to_string()),
        authenticator: Some(authenticator),
        ..Default::default()
    })
    .expect("client should build")
}

/// Starts a server that answers every request with `200 {}` after `delay`.
///
/// Returns the base URL of the server.
pub async fn slow_server(delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind slow server");
    let addr = listener.local_addr().expect("slow server address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 8192];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(delay).await;
                let body = "{}";
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

pub const LOCATION_ID: &str = "brbats7009sqna3dtest";
pub const ENDPOINT_ID: &str = "us-south--K9kQEVFmqNpP-Endpoint-Q87fe";
pub const SOURCE_ID: &str = "us-south--K9kQEVFmqNpP-Source-Q87fe";

pub const CERT_PEM: &str =
    "-----BEGIN CERTIFICATE-----\r\n<the-content-of-the-cert>-----END CERTIFICATE-----\r\n";
