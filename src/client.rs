//! Object storage client: token lifecycle plus the four container operations.
//!
//! Every public operation first ensures a valid token (instance state, then cache, then a
//! fresh identity call) and only then issues its REST exchange with the token attached as
//! `X-Auth-Token`. Token state is instance-local; client instances sharing one cache key
//! revalidate independently and race with last-write-wins semantics on the shared store.

// std
use std::{fs, io, path::Path};
// self
use crate::{
	_prelude::*,
	auth::{SecretString, TokenRecord},
	config::StorageConfig,
	error::{ConfigError, OperationError, OperationKind},
	http::{RawResponse, StorageHttpClient},
	identity,
	obs::{self, OpKind, OpOutcome, OpSpan},
	store::TokenCache,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Literal prefix the storage provider applies to tenant namespaces.
const TENANT_PATH_PREFIX: &str = "nc_";
const HEADER_ACCEPT: &str = "Accept";
const HEADER_AUTH_TOKEN: &str = "X-Auth-Token";
const HEADER_CONTENT_TYPE: &str = "Content-Type";
const MIME_JSON: &str = "application/json";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestStorageClient = ObjectStorageClient<ReqwestHttpClient>;

/// Tenant-scoped object storage client.
///
/// The client owns an HTTP transport handle, an optional [`TokenCache`], and the
/// instance-local token state. Construction resolves a valid token immediately, so a client
/// is never handed out without having authenticated (or loaded a cached token) once.
pub struct ObjectStorageClient<C>
where
	C: ?Sized + StorageHttpClient,
{
	config: StorageConfig,
	http_client: Arc<C>,
	cache: Option<TokenCache>,
	token: Mutex<Option<TokenRecord>>,
}
impl<C> ObjectStorageClient<C>
where
	C: ?Sized + StorageHttpClient,
{
	/// Creates a client that reuses the caller-provided transport, resolving a token before
	/// returning.
	///
	/// Passing `None` for `cache` disables persistence entirely; the client then performs a
	/// fresh authentication call whenever its in-memory token expires.
	pub async fn with_http_client(
		config: StorageConfig,
		cache: Option<TokenCache>,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let client =
			Self { config, http_client: http_client.into(), cache, token: Mutex::new(None) };

		client.refresh_token().await?;

		Ok(client)
	}

	/// Returns the configuration this client was built with.
	pub fn config(&self) -> &StorageConfig {
		&self.config
	}

	/// Returns a snapshot of the current token record, if one is held.
	pub fn current_token(&self) -> Option<TokenRecord> {
		self.token.lock().clone()
	}

	/// Lists the objects in `container`, returning the parsed JSON body unchanged.
	pub async fn list(&self, container: &str) -> Result<serde_json::Value> {
		const KIND: OpKind = OpKind::List;

		let span = OpSpan::new(KIND, "list");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.ensure_valid_token().await?;
				let path = self.resource_path(container, None);
				let url = self.resource_url(&path)?;
				let headers =
					[(HEADER_ACCEPT, MIME_JSON), (HEADER_AUTH_TOKEN, token.expose())];
				let response = self
					.http_client
					.get(&url, &headers)
					.await
					.and_then(RawResponse::error_for_status)
					.map_err(|e| OperationError::transport(OperationKind::List, &path, e))?;

				serde_json::from_slice(&response.body).map_err(|e| {
					OperationError::decode(OperationKind::List, &path, response.status, e).into()
				})
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Uploads the file at `file_path` as `container`/`object` with the supplied content type.
	///
	/// The local file must exist and must not be a directory; both checks fail before any
	/// network call happens.
	pub async fn upload(
		&self,
		container: &str,
		object: &str,
		file_path: impl AsRef<Path>,
		content_type: &str,
	) -> Result<()> {
		const KIND: OpKind = OpKind::Upload;

		let span = OpSpan::new(KIND, "upload");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let body = read_upload_body(file_path.as_ref())?;
				let token = self.ensure_valid_token().await?;
				let path = self.resource_path(container, Some(object));
				let url = self.resource_url(&path)?;
				let headers =
					[(HEADER_AUTH_TOKEN, token.expose()), (HEADER_CONTENT_TYPE, content_type)];

				self.http_client
					.put(&url, &headers, body)
					.await
					.and_then(RawResponse::error_for_status)
					.map_err(|e| OperationError::transport(OperationKind::Upload, &path, e))?;

				Ok(())
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Downloads `container`/`object`, returning the raw response for the caller to consume.
	pub async fn download(&self, container: &str, object: &str) -> Result<RawResponse> {
		const KIND: OpKind = OpKind::Download;

		let span = OpSpan::new(KIND, "download");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.ensure_valid_token().await?;
				let path = self.resource_path(container, Some(object));
				let url = self.resource_url(&path)?;
				let headers = [(HEADER_AUTH_TOKEN, token.expose())];

				self.http_client
					.get(&url, &headers)
					.await
					.and_then(RawResponse::error_for_status)
					.map_err(|e| {
						OperationError::transport(OperationKind::Download, &path, e).into()
					})
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Deletes `container`/`object`.
	pub async fn delete(&self, container: &str, object: &str) -> Result<()> {
		const KIND: OpKind = OpKind::Delete;

		let span = OpSpan::new(KIND, "delete");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.ensure_valid_token().await?;
				let path = self.resource_path(container, Some(object));
				let url = self.resource_url(&path)?;
				let headers =
					[(HEADER_ACCEPT, MIME_JSON), (HEADER_AUTH_TOKEN, token.expose())];

				self.http_client
					.delete(&url, &headers)
					.await
					.and_then(RawResponse::error_for_status)
					.map_err(|e| OperationError::transport(OperationKind::Delete, &path, e))?;

				Ok(())
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Returns a usable token id, refreshing through the cache or the identity endpoint when
	/// the instance-local record is missing or expired.
	async fn ensure_valid_token(&self) -> Result<SecretString> {
		let now = OffsetDateTime::now_utc();

		{
			let guard = self.token.lock();

			if let Some(record) = guard.as_ref().filter(|record| record.is_valid_at(now)) {
				return Ok(record.id.clone());
			}
		}

		self.refresh_token().await
	}

	/// Cache lookup, validity check, then a fresh authentication call; spec'd order of the
	/// original `_setToken`.
	async fn refresh_token(&self) -> Result<SecretString> {
		const KIND: OpKind = OpKind::Authenticate;

		let span = OpSpan::new(KIND, "refresh_token");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let now = OffsetDateTime::now_utc();

				// An expired cached record still primes local state before re-authenticating.
				if let Some(cache) = &self.cache {
					if let Some(record) = cache.lookup().await? {
						let valid = record.is_valid_at(now);
						let id = record.id.clone();

						*self.token.lock() = Some(record);

						if valid {
							return Ok(id);
						}
					}
				}

				let record =
					identity::authenticate(self.http_client.as_ref(), &self.config).await?;

				if let Some(cache) = &self.cache {
					cache.persist(&record).await?;
				}

				let id = record.id.clone();

				*self.token.lock() = Some(record);

				Ok(id)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	fn resource_path(&self, container: &str, object: Option<&str>) -> String {
		let tenant = self.config.tenant.as_ref();

		match object {
			Some(object) => format!("{TENANT_PATH_PREFIX}{tenant}/{container}/{object}"),
			None => format!("{TENANT_PATH_PREFIX}{tenant}/{container}"),
		}
	}

	fn resource_url(&self, path: &str) -> Result<Url, ConfigError> {
		self.config
			.storage_endpoint
			.join(path)
			.map_err(|source| ConfigError::InvalidResourcePath { path: path.to_owned(), source })
	}
}
#[cfg(feature = "reqwest")]
impl ObjectStorageClient<ReqwestHttpClient> {
	/// Connects using the crate's default reqwest transport.
	///
	/// Use [`ObjectStorageClient::with_http_client`] to supply a custom transport, e.g. one
	/// with timeouts or proxy settings configured.
	pub async fn connect(config: StorageConfig, cache: Option<TokenCache>) -> Result<Self> {
		Self::with_http_client(config, cache, ReqwestHttpClient::default()).await
	}
}
impl<C> Debug for ObjectStorageClient<C>
where
	C: ?Sized + StorageHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ObjectStorageClient")
			.field("config", &self.config)
			.field("cache", &self.cache)
			.field("token_held", &self.token.lock().is_some())
			.finish()
	}
}

fn record_result<T>(kind: OpKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_op_outcome(kind, OpOutcome::Success),
		Err(_) => obs::record_op_outcome(kind, OpOutcome::Failure),
	}
}

/// Validates the local file reference and reads the upload body.
fn read_upload_body(path: &Path) -> Result<Vec<u8>> {
	let metadata = fs::metadata(path).map_err(|e| match e.kind() {
		io::ErrorKind::NotFound => Error::InvalidArgument {
			reason: format!("file `{}` does not exist", path.display()),
		},
		_ => Error::Io { path: path.to_path_buf(), source: e },
	})?;

	if metadata.is_dir() {
		return Err(Error::InvalidArgument {
			reason: format!("`{}` is a directory", path.display()),
		});
	}

	fs::read(path).map_err(|e| Error::Io { path: path.to_path_buf(), source: e })
}
