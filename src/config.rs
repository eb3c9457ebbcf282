//! Storage configuration supplied by the host application.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, TenantId},
};

/// Complete configuration for one storage account.
///
/// Replaces the original framework-managed configuration with an explicit struct; there is no
/// ambient global state. Values are immutable once built.
#[derive(Clone, Debug)]
pub struct StorageConfig {
	/// Tenant whose namespace prefixes every resource path.
	pub tenant: TenantId,
	/// API credentials for the identity endpoint.
	pub credentials: Credentials,
	/// Base URI of the object storage service; always normalized to a trailing slash.
	pub storage_endpoint: Url,
	/// Identity v2 token endpoint.
	pub auth_endpoint: Url,
}
impl StorageConfig {
	/// Returns a builder for assembling a configuration.
	pub fn builder() -> StorageConfigBuilder {
		StorageConfigBuilder::new()
	}
}

/// Errors raised while constructing or validating a [`StorageConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StorageConfigBuilderError {
	/// Tenant identifier is mandatory.
	#[error("Missing tenant identifier.")]
	MissingTenant,
	/// Account credentials are mandatory.
	#[error("Missing account credentials.")]
	MissingCredentials,
	/// Storage endpoint is mandatory.
	#[error("Missing storage endpoint.")]
	MissingStorageEndpoint,
	/// Identity endpoint is mandatory.
	#[error("Missing identity endpoint.")]
	MissingAuthEndpoint,
	/// Storage endpoint must be able to carry container/object path segments.
	#[error("The storage endpoint `{url}` cannot serve as a base for resource paths.")]
	UnusableStorageEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`StorageConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct StorageConfigBuilder {
	/// Tenant identifier being configured.
	pub tenant: Option<TenantId>,
	/// Account credentials being configured.
	pub credentials: Option<Credentials>,
	/// Storage endpoint being configured.
	pub storage_endpoint: Option<Url>,
	/// Identity endpoint being configured.
	pub auth_endpoint: Option<Url>,
}
impl StorageConfigBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the tenant identifier.
	pub fn tenant(mut self, tenant: TenantId) -> Self {
		self.tenant = Some(tenant);

		self
	}

	/// Sets the account credentials.
	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = Some(credentials);

		self
	}

	/// Sets the object storage base URI.
	pub fn storage_endpoint(mut self, url: Url) -> Self {
		self.storage_endpoint = Some(url);

		self
	}

	/// Sets the identity token endpoint.
	pub fn auth_endpoint(mut self, url: Url) -> Self {
		self.auth_endpoint = Some(url);

		self
	}

	/// Consumes the builder and produces a validated [`StorageConfig`].
	pub fn build(self) -> Result<StorageConfig, StorageConfigBuilderError> {
		let tenant = self.tenant.ok_or(StorageConfigBuilderError::MissingTenant)?;
		let credentials = self.credentials.ok_or(StorageConfigBuilderError::MissingCredentials)?;
		let storage_endpoint =
			self.storage_endpoint.ok_or(StorageConfigBuilderError::MissingStorageEndpoint)?;
		let auth_endpoint =
			self.auth_endpoint.ok_or(StorageConfigBuilderError::MissingAuthEndpoint)?;
		let storage_endpoint = normalize_base(storage_endpoint)?;

		Ok(StorageConfig { tenant, credentials, storage_endpoint, auth_endpoint })
	}
}

// `Url::join` replaces the last path segment unless the base ends with a slash, so the
// storage endpoint is normalized here once instead of at every request site.
fn normalize_base(mut url: Url) -> Result<Url, StorageConfigBuilderError> {
	if url.cannot_be_a_base() {
		return Err(StorageConfigBuilderError::UnusableStorageEndpoint { url: url.to_string() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}
