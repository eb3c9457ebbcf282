//! Identity v2 token exchange and its wire contract.
//!
//! The identity endpoint takes tenant-scoped password credentials and answers with a token id
//! plus an absolute expiry:
//!
//! ```json
//! {"auth": {"tenantId": "...", "passwordCredentials": {"username": "...", "password": "..."}}}
//! {"access": {"token": {"id": "...", "expires": "2026-01-01T09:00:00Z"}}}
//! ```
//!
//! Responses are deserialized through `serde_path_to_error` so malformed payloads report the
//! exact JSON path that failed.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	config::StorageConfig,
	error::AuthError,
	http::StorageHttpClient,
};

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
	auth: AuthPayload<'a>,
}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthPayload<'a> {
	tenant_id: &'a str,
	password_credentials: PasswordCredentials<'a>,
}
#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
	username: &'a str,
	password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
	access: Access,
}
#[derive(Debug, Deserialize)]
struct Access {
	token: WireToken,
}
#[derive(Debug, Deserialize)]
struct WireToken {
	id: String,
	expires: String,
}

/// Performs one password authentication call and returns the issued token record.
///
/// Transport failures, non-success statuses, malformed JSON, and unparseable expiry strings
/// all surface as [`AuthError`]; no retry is attempted at this layer.
pub(crate) async fn authenticate<C>(
	http: &C,
	config: &StorageConfig,
) -> Result<TokenRecord, AuthError>
where
	C: ?Sized + StorageHttpClient,
{
	let body = request_body(config)?;
	let response = http.post_json(&config.auth_endpoint, &body).await?;
	let response = response.error_for_status()?;

	parse_response(response.status, &response.body)
}

fn request_body(config: &StorageConfig) -> Result<serde_json::Value, AuthError> {
	let request = AuthRequest {
		auth: AuthPayload {
			tenant_id: config.tenant.as_ref(),
			password_credentials: PasswordCredentials {
				username: config.credentials.username(),
				password: config.credentials.password().expose(),
			},
		},
	};

	serde_json::to_value(&request).map_err(|source| AuthError::EncodeRequest { source })
}

fn parse_response(status: u16, body: &[u8]) -> Result<TokenRecord, AuthError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let payload: AuthResponse = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| AuthError::ResponseParse { source, status: Some(status) })?;
	let WireToken { id, expires } = payload.access.token;
	let expires_at = OffsetDateTime::parse(&expires, &Rfc3339)
		.map_err(|source| AuthError::ExpiryParse { value: expires.clone(), source })?;

	Ok(TokenRecord::new(id, expires_at))
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::auth::{Credentials, TenantId};

	fn test_config() -> StorageConfig {
		StorageConfig::builder()
			.tenant(TenantId::new("t").expect("Tenant fixture should be valid."))
			.credentials(Credentials::new("u", "p"))
			.storage_endpoint(
				Url::parse("https://object-storage.example/v1/")
					.expect("Storage endpoint fixture should parse."),
			)
			.auth_endpoint(
				Url::parse("https://identity.example/v2.0/tokens")
					.expect("Identity endpoint fixture should parse."),
			)
			.build()
			.expect("Config fixture should build.")
	}

	#[test]
	fn request_body_matches_the_wire_contract() {
		let body = request_body(&test_config()).expect("Request body should encode.");

		assert_eq!(
			body,
			serde_json::json!({
				"auth": {
					"tenantId": "t",
					"passwordCredentials": {"username": "u", "password": "p"},
				},
			})
		);
	}

	#[test]
	fn parse_response_extracts_token_and_expiry() {
		let body = br#"{"access":{"token":{"id":"dummy_token","expires":"2026-01-01T09:00:00Z"}}}"#;
		let record = parse_response(200, body).expect("Well-formed response should parse.");

		assert_eq!(record.id.expose(), "dummy_token");
		assert_eq!(record.expires_at, macros::datetime!(2026-01-01 09:00 UTC));
	}

	#[test]
	fn parse_response_reports_the_failing_json_path() {
		let body = br#"{"access":{"token":{"expires":"2026-01-01T09:00:00Z"}}}"#;
		let error = parse_response(200, body).expect_err("Missing token id should fail.");

		match error {
			AuthError::ResponseParse { source, status } => {
				assert_eq!(status, Some(200));
				assert!(source.path().to_string().starts_with("access.token"));
			},
			other => panic!("Expected a response parse error, got {other:?}."),
		}
	}

	#[test]
	fn parse_response_rejects_unparseable_expiry() {
		let body = br#"{"access":{"token":{"id":"dummy_token","expires":"next tuesday"}}}"#;
		let error = parse_response(200, body).expect_err("Bogus expiry should fail.");

		assert!(matches!(error, AuthError::ExpiryParse { value, .. } if value == "next tuesday"));
	}
}
