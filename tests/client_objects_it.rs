// crates.io
use httpmock::prelude::*;
// self
use conoha_object_client::{
	_preludet::*,
	error::{Error, OperationKind},
	serde_json::json,
};

const TOKEN_PATH: &str = "/v2.0/tokens";

async fn mock_identity<'a>(server: &'a MockServer, token: &'a str) -> httpmock::Mock<'a> {
	let expires = rfc3339_in(Duration::days(1));
	let body = format!(r#"{{"access":{{"token":{{"id":"{token}","expires":"{expires}"}}}}}}"#);

	server
		.mock_async(move |when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

#[tokio::test]
async fn list_issues_one_get_and_returns_the_json_body_unchanged() {
	let server = MockServer::start_async().await;
	let _identity = mock_identity(&server, "dummy_token").await;
	let listing = json!([
		{"name": "report.pdf", "bytes": 1024, "content_type": "application/pdf"},
		{"name": "image.png", "bytes": 2048, "content_type": "image/png"},
	]);
	let body = listing.to_string();
	let mock = server
		.mock_async(move |when, then| {
			when.method(GET)
				.path("/v1/nc_test-tenant/container")
				.header("accept", "application/json")
				.header("x-auth-token", "dummy_token");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await;
	let client = connect_reqwest_test_client(test_storage_config(&server.base_url()), None)
		.await
		.expect("Construction should resolve a token.");
	let parsed = client.list("container").await.expect("Listing should succeed.");

	mock.assert_async().await;

	assert_eq!(parsed, listing);
}

#[tokio::test]
async fn download_returns_the_raw_response() {
	let server = MockServer::start_async().await;
	let _identity = mock_identity(&server, "dummy_token").await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/nc_test-tenant/container/report.pdf")
				.header("x-auth-token", "dummy_token");
			then.status(200).header("content-type", "application/pdf").body("%PDF-1.7 payload");
		})
		.await;
	let client = connect_reqwest_test_client(test_storage_config(&server.base_url()), None)
		.await
		.expect("Construction should resolve a token.");
	let response = client
		.download("container", "report.pdf")
		.await
		.expect("Download should succeed.");

	mock.assert_async().await;

	assert_eq!(response.status, 200);
	assert_eq!(response.header("content-type"), Some("application/pdf"));
	assert_eq!(response.body, b"%PDF-1.7 payload");
}

#[tokio::test]
async fn delete_issues_one_delete_with_the_token_header() {
	let server = MockServer::start_async().await;
	let _identity = mock_identity(&server, "dummy_token").await;
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/v1/nc_test-tenant/container/stale.log")
				.header("accept", "application/json")
				.header("x-auth-token", "dummy_token");
			then.status(204);
		})
		.await;
	let client = connect_reqwest_test_client(test_storage_config(&server.base_url()), None)
		.await
		.expect("Construction should resolve a token.");

	client.delete("container", "stale.log").await.expect("Deletion should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn delete_failure_wraps_the_transport_error() {
	let server = MockServer::start_async().await;
	let _identity = mock_identity(&server, "dummy_token").await;
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v1/nc_test-tenant/container/ghost");
			then.status(404)
				.header("content-type", "application/json")
				.body(r#"{"message":"Not Found"}"#);
		})
		.await;
	let client = connect_reqwest_test_client(test_storage_config(&server.base_url()), None)
		.await
		.expect("Construction should resolve a token.");
	let error = client
		.delete("container", "ghost")
		.await
		.expect_err("Deleting a missing object should fail.");

	mock.assert_async().await;

	match error {
		Error::Operation(operation) => {
			assert_eq!(operation.kind, OperationKind::Delete);
			assert_eq!(operation.status, Some(404));
			assert_eq!(operation.target, "nc_test-tenant/container/ghost");
		},
		other => panic!("Expected a delete operation error, got {other:?}."),
	}
}

#[tokio::test]
async fn list_failure_wraps_the_transport_error() {
	let server = MockServer::start_async().await;
	let _identity = mock_identity(&server, "dummy_token").await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/nc_test-tenant/container");
			then.status(500).body("upstream exploded");
		})
		.await;
	let client = connect_reqwest_test_client(test_storage_config(&server.base_url()), None)
		.await
		.expect("Construction should resolve a token.");
	let error = client.list("container").await.expect_err("Listing should fail on HTTP 500.");

	mock.assert_async().await;

	match error {
		Error::Operation(operation) => {
			assert_eq!(operation.kind, OperationKind::List);
			assert_eq!(operation.status, Some(500));
		},
		other => panic!("Expected a list operation error, got {other:?}."),
	}
}

#[tokio::test]
async fn operations_reuse_the_token_resolved_at_construction() {
	let server = MockServer::start_async().await;
	let identity = mock_identity(&server, "dummy_token").await;
	let listing = json!([]);
	let body = listing.to_string();
	let mock = server
		.mock_async(move |when, then| {
			when.method(GET)
				.path("/v1/nc_test-tenant/container")
				.header("x-auth-token", "dummy_token");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await;
	let client = connect_reqwest_test_client(test_storage_config(&server.base_url()), None)
		.await
		.expect("Construction should resolve a token.");

	client.list("container").await.expect("First listing should succeed.");
	client.list("container").await.expect("Second listing should succeed.");

	identity.assert_calls_async(1).await;
	mock.assert_calls_async(2).await;
}
