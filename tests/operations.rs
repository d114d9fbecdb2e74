//
//  satellite-link
//  tests/operations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Runs the same scenarios over every operation of the v1 API.

mod common;

use std::time::Duration;

use mockito::{Matcher, Mock, Server};
use satellite_link::api::operation::{DecodeBody, FileUpload, Operation};
use satellite_link::api::v1::*;
use satellite_link::{CallContext, Error};

use common::{client, slow_server, CERT_PEM, ENDPOINT_ID, LOCATION_ID, SOURCE_ID};

struct Case<O, F> {
    name: &'static str,
    method: &'static str,
    path: String,
    options: O,
    /// Clears a required field; returns `false` for operations without one.
    strip_required: F,
}

fn case<O, F>(name: &'static str, method: &'static str, path: String, options: O, strip_required: F) -> Case<O, F>
where
    O: Operation,
    F: Fn(&mut O) -> bool,
{
    Case {
        name,
        method,
        path,
        options,
        strip_required,
    }
}

fn location_path(suffix: &str) -> String {
    format!("/v1/locations/{}{}", LOCATION_ID, suffix)
}

fn endpoint_path(suffix: &str) -> String {
    location_path(&format!("/endpoints/{}{}", ENDPOINT_ID, suffix))
}

fn source_path(suffix: &str) -> String {
    location_path(&format!("/sources/{}{}", SOURCE_ID, suffix))
}

macro_rules! for_each_operation {
    ($scenario:ident) => {{
        $scenario(case(
            "create_link",
            "POST",
            "/v1/locations".to_string(),
            CreateLinkOptions::new()
                .with_crn("crn:v1:staging:public:satellite:us-south:a/1ae4eb57181a46ceade4846519678888::location:brbats7009sqna3dtest")
                .with_location_id(LOCATION_ID)
                .with_header("X-Source", "call"),
            |_: &mut CreateLinkOptions| false,
        ))
        .await;

        $scenario(case(
            "get_link",
            "GET",
            location_path(""),
            GetLinkOptions::new(LOCATION_ID).with_header("X-Source", "call"),
            |o: &mut GetLinkOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "update_link",
            "PATCH",
            location_path(""),
            UpdateLinkOptions::new(LOCATION_ID)
                .with_ws_endpoint("{satellite-link-tunnel-server}")
                .with_header("X-Source", "call"),
            |o: &mut UpdateLinkOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "delete_link",
            "DELETE",
            location_path(""),
            DeleteLinkOptions::new(LOCATION_ID).with_header("X-Source", "call"),
            |o: &mut DeleteLinkOptions| {
                o.location_id = Some(String::new());
                true
            },
        ))
        .await;

        $scenario(case(
            "list_endpoints",
            "GET",
            location_path("/endpoints"),
            ListEndpointsOptions::new(LOCATION_ID)
                .with_type("enabled")
                .with_header("X-Source", "call"),
            |o: &mut ListEndpointsOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "create_endpoints",
            "POST",
            location_path("/endpoints"),
            CreateEndpointsOptions::new(LOCATION_ID, "cloud", "My endpoint", "example.com", 443)
                .with_sni("example.com")
                .with_client_protocol("https")
                .with_server_protocol("tls")
                .with_certs(EndpointCerts::default().with_server_cert(CertFile::new("serverEndpointCert.pem", CERT_PEM)))
                .with_header("X-Source", "call"),
            |o: &mut CreateEndpointsOptions| {
                o.server_host = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "import_endpoints",
            "POST",
            location_path("/endpoints/import"),
            ImportEndpointsOptions::new(LOCATION_ID, FileUpload::new(b"This is a mock file.".to_vec()))
                .with_header("X-Source", "call"),
            |o: &mut ImportEndpointsOptions| {
                o.state = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "export_endpoints",
            "GET",
            endpoint_path("/export"),
            ExportEndpointsOptions::new(LOCATION_ID, ENDPOINT_ID).with_header("X-Source", "call"),
            |o: &mut ExportEndpointsOptions| {
                o.endpoint_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "get_endpoints",
            "GET",
            endpoint_path(""),
            GetEndpointsOptions::new(LOCATION_ID, ENDPOINT_ID).with_header("X-Source", "call"),
            |o: &mut GetEndpointsOptions| {
                o.endpoint_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "update_endpoints",
            "PATCH",
            endpoint_path(""),
            UpdateEndpointsOptions::new(LOCATION_ID, ENDPOINT_ID)
                .with_display_name("My endpoint")
                .with_timeout(60)
                .with_enabled(true)
                .with_header("X-Source", "call"),
            |o: &mut UpdateEndpointsOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "delete_endpoints",
            "DELETE",
            endpoint_path(""),
            DeleteEndpointsOptions::new(LOCATION_ID, ENDPOINT_ID).with_header("X-Source", "call"),
            |o: &mut DeleteEndpointsOptions| {
                o.endpoint_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "get_endpoint_certs",
            "GET",
            endpoint_path("/cert"),
            GetEndpointCertsOptions::new(LOCATION_ID, ENDPOINT_ID)
                .with_no_zip(true)
                .with_header("X-Source", "call"),
            |o: &mut GetEndpointCertsOptions| {
                o.endpoint_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "upload_endpoint_certs",
            "POST",
            endpoint_path("/cert"),
            UploadEndpointCertsOptions::new(LOCATION_ID, ENDPOINT_ID)
                .with_client_cert(FileUpload::new(b"This is a mock file.".to_vec()))
                .with_connector_key(FileUpload::new(b"This is a mock file.".to_vec()))
                .with_header("X-Source", "call"),
            |o: &mut UploadEndpointCertsOptions| {
                o.client_cert = None;
                o.connector_key = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "delete_endpoint_certs",
            "DELETE",
            endpoint_path("/cert"),
            DeleteEndpointCertsOptions::new(LOCATION_ID, ENDPOINT_ID).with_header("X-Source", "call"),
            |o: &mut DeleteEndpointCertsOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "list_endpoint_sources",
            "GET",
            endpoint_path("/sources"),
            ListEndpointSourcesOptions::new(LOCATION_ID, ENDPOINT_ID).with_header("X-Source", "call"),
            |o: &mut ListEndpointSourcesOptions| {
                o.endpoint_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "update_endpoint_sources",
            "PATCH",
            endpoint_path("/sources"),
            UpdateEndpointSourcesOptions::new(LOCATION_ID, ENDPOINT_ID)
                .with_sources(vec![SourceStatusRequestObject::new(SOURCE_ID, true)])
                .with_header("X-Source", "call"),
            |o: &mut UpdateEndpointSourcesOptions| {
                o.endpoint_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "list_sources",
            "GET",
            location_path("/sources"),
            ListSourcesOptions::new(LOCATION_ID)
                .with_type("user")
                .with_header("X-Source", "call"),
            |o: &mut ListSourcesOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "create_sources",
            "POST",
            location_path("/sources"),
            CreateSourcesOptions::new(LOCATION_ID)
                .with_type("user")
                .with_source_name("DB2")
                .with_addresses(vec!["192.168.20.1/24".to_string()])
                .with_header("X-Source", "call"),
            |o: &mut CreateSourcesOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "update_sources",
            "PATCH",
            source_path(""),
            UpdateSourcesOptions::new(LOCATION_ID, SOURCE_ID)
                .with_source_name("DB2")
                .with_header("X-Source", "call"),
            |o: &mut UpdateSourcesOptions| {
                o.source_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "delete_sources",
            "DELETE",
            source_path(""),
            DeleteSourcesOptions::new(LOCATION_ID, SOURCE_ID).with_header("X-Source", "call"),
            |o: &mut DeleteSourcesOptions| {
                o.source_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "list_source_endpoints",
            "GET",
            source_path("/endpoints"),
            ListSourceEndpointsOptions::new(LOCATION_ID, SOURCE_ID).with_header("X-Source", "call"),
            |o: &mut ListSourceEndpointsOptions| {
                o.source_id = None;
                true
            },
        ))
        .await;

        $scenario(case(
            "update_source_endpoints",
            "PATCH",
            source_path("/endpoints"),
            UpdateSourceEndpointsOptions::new(LOCATION_ID, SOURCE_ID)
                .with_endpoints(vec![EndpointSourceStatusEndpointsItem::new(ENDPOINT_ID, false)])
                .with_header("X-Source", "call"),
            |o: &mut UpdateSourceEndpointsOptions| {
                o.location_id = None;
                true
            },
        ))
        .await;
    }};
}

/// Mocks that fail the test if any request reaches the server.
async fn reject_all(server: &mut Server) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for method in ["GET", "POST", "PATCH", "DELETE"] {
        mocks.push(
            server
                .mock(method, Matcher::Any)
                .expect(0)
                .create_async()
                .await,
        );
    }
    mocks
}

async fn absent_options<O, F>(case: Case<O, F>)
where
    O: Operation,
    F: Fn(&mut O) -> bool,
{
    let mut server = Server::new_async().await;
    let mocks = reject_all(&mut server).await;
    let client = client(&server.url());

    let result = client
        .execute::<O>(None, &CallContext::background())
        .await;
    match result.err() {
        Some(Error::Validation(message)) => {
            assert_eq!(message, "options object is required", "{}", case.name)
        }
        other => panic!("{}: expected validation error, got {:?}", case.name, other),
    }

    for mock in mocks {
        mock.assert_async().await;
    }
}

async fn missing_required_field<O, F>(mut case: Case<O, F>)
where
    O: Operation,
    F: Fn(&mut O) -> bool,
{
    if !(case.strip_required)(&mut case.options) {
        return;
    }

    let mut server = Server::new_async().await;
    let mocks = reject_all(&mut server).await;
    let client = client(&server.url());

    let result = client
        .execute(Some(&case.options), &CallContext::background())
        .await;
    match result.err() {
        Some(error @ Error::Validation(_)) => {
            assert!(error.response().is_none(), "{}", case.name);
            assert!(error.to_string().contains("must be provided"), "{}: {}", case.name, error);
        }
        other => panic!("{}: expected validation error, got {:?}", case.name, other),
    }

    for mock in mocks {
        mock.assert_async().await;
    }
}

async fn routes_and_merges_headers<O, F>(case: Case<O, F>)
where
    O: Operation,
    F: Fn(&mut O) -> bool,
{
    let mut server = Server::new_async().await;
    let mock = server
        .mock(case.method, case.path.as_str())
        .match_query(Matcher::Any)
        .match_header("x-source", "call")
        .match_header("x-client", "default")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let mut client = client(&server.url());
    client.add_default_header("X-Source", "default").unwrap();
    client.add_default_header("X-Client", "default").unwrap();

    let response = client
        .execute(Some(&case.options), &CallContext::background())
        .await
        .unwrap_or_else(|e| panic!("{}: {}", case.name, e));
    assert_eq!(response.status_code(), 200, "{}", case.name);
    assert_eq!(response.envelope.body, b"{}", "{}", case.name);

    mock.assert_async().await;
}

async fn deadline_exceeded<O, F>(case: Case<O, F>)
where
    O: Operation,
    F: Fn(&mut O) -> bool,
{
    for retries in [false, true] {
        let url = slow_server(Duration::from_millis(100)).await;
        let mut client = client(&url);
        if retries {
            client.enable_retries(3, Duration::from_millis(10));
        }

        let ctx = CallContext::background().with_timeout(Duration::from_millis(80));
        match client.execute(Some(&case.options), &ctx).await.err() {
            Some(error @ Error::Timeout(_)) => {
                assert!(error.to_string().contains("deadline exceeded"), "{}: {}", case.name, error);
                assert!(error.response().is_none(), "{}", case.name);
            }
            other => panic!("{} (retries: {}): expected timeout, got {:?}", case.name, retries, other),
        }
    }
}

async fn undecodable_body_is_not_retried<O, F>(case: Case<O, F>)
where
    O: Operation,
    F: Fn(&mut O) -> bool,
{
    const BODY: &[u8] = b"this is not JSON";

    let mut server = Server::new_async().await;
    let mock = server
        .mock(case.method, case.path.as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BODY)
        .expect(1)
        .create_async()
        .await;

    let mut client = client(&server.url());
    client.enable_retries(3, Duration::from_millis(10));

    let result = client
        .execute(Some(&case.options), &CallContext::background())
        .await;
    if <O::Output as DecodeBody>::decode_body(BODY).is_ok() {
        // Raw downloads accept any body.
        let response = result.unwrap_or_else(|e| panic!("{}: {}", case.name, e));
        assert_eq!(response.envelope.body, BODY, "{}", case.name);
    } else {
        match result.err() {
            Some(error @ Error::ResponseProcessing { .. }) => {
                assert_eq!(error.status_code(), Some(200), "{}", case.name);
                assert_eq!(error.response().map(|r| r.body.as_slice()), Some(BODY), "{}", case.name);
            }
            other => panic!("{}: expected response processing error, got {:?}", case.name, other),
        }
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_absent_options_are_rejected_without_io() {
    for_each_operation!(absent_options);
}

#[tokio::test]
async fn test_missing_required_field_is_rejected_without_io() {
    for_each_operation!(missing_required_field);
}

#[tokio::test]
async fn test_operations_hit_their_route_with_merged_headers() {
    for_each_operation!(routes_and_merges_headers);
}

#[tokio::test]
async fn test_context_deadline_is_reported_as_timeout() {
    for_each_operation!(deadline_exceeded);
}

#[tokio::test]
async fn test_undecodable_success_body_is_not_retried() {
    for_each_operation!(undecodable_body_is_not_retried);
}
