//! Client-level error types shared across authentication, operations, and stores.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Authentication against the identity endpoint failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// A storage operation failed after reaching the transport.
	#[error(transparent)]
	Operation(#[from] OperationError),

	/// Caller supplied an invalid local file reference.
	#[error("Invalid argument: {reason}.")]
	InvalidArgument {
		/// Human-readable description of the rejected argument.
		reason: String,
	},
	/// Local file could not be opened or read while preparing a request body.
	#[error("Failed to read local file `{}`.", .path.display())]
	Io {
		/// Path of the file that could not be read.
		path: PathBuf,
		/// Underlying filesystem failure.
		#[source]
		source: std::io::Error,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Storage configuration builder validation failed.
	#[error("Unable to build storage configuration.")]
	Builder(#[from] crate::config::StorageConfigBuilderError),
	/// A container/object path could not be joined onto the storage endpoint.
	#[error("Resource path `{path}` is invalid.")]
	InvalidResourcePath {
		/// Tenant-prefixed path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while obtaining a token from the identity endpoint.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Authentication request body could not be encoded.
	#[error("Authentication request could not be encoded.")]
	EncodeRequest {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Transport failure while calling the identity endpoint.
	#[error("Identity endpoint could not be reached.")]
	Transport(#[from] TransportError),
	/// Identity endpoint responded with malformed JSON that could not be parsed.
	#[error("Identity endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token expiry string from the identity response could not be parsed.
	#[error("Identity endpoint returned an unparseable token expiry `{value}`.")]
	ExpiryParse {
		/// Raw expiry string as received on the wire.
		value: String,
		/// Underlying timestamp parsing failure.
		#[source]
		source: time::error::Parse,
	},
}
impl AuthError {
	/// HTTP status code attached to the failure, when the exchange got that far.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport(transport) => transport.status(),
			Self::ResponseParse { status, .. } => *status,
			_ => None,
		}
	}
}

/// Per-verb storage operation failure wrapping the original transport error.
#[derive(Debug, ThisError)]
#[error("Failed to {} `{}`.", .kind.verb_phrase(), .target)]
pub struct OperationError {
	/// Which storage verb failed.
	pub kind: OperationKind,
	/// Tenant-prefixed resource path the operation targeted.
	pub target: String,
	/// HTTP status code, when the endpoint answered at all.
	pub status: Option<u16>,
	/// Original failure, kept as the error source.
	#[source]
	pub source: BoxError,
}
impl OperationError {
	/// Wraps a transport failure for the given verb and target path.
	pub fn transport(kind: OperationKind, target: impl Into<String>, source: TransportError) -> Self {
		let status = source.status();

		Self { kind, target: target.into(), status, source: Box::new(source) }
	}

	/// Wraps a body-decoding failure observed after a successful exchange.
	pub fn decode(
		kind: OperationKind,
		target: impl Into<String>,
		status: u16,
		source: serde_json::Error,
	) -> Self {
		Self { kind, target: target.into(), status: Some(status), source: Box::new(source) }
	}
}

/// Storage verbs distinguished by the error taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Container listing.
	List,
	/// Object upload.
	Upload,
	/// Object download.
	Download,
	/// Object deletion.
	Delete,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::List => "list",
			OperationKind::Upload => "upload",
			OperationKind::Download => "download",
			OperationKind::Delete => "delete",
		}
	}

	/// Returns the verb phrase used in failure messages.
	pub const fn verb_phrase(self) -> &'static str {
		match self {
			OperationKind::List => "list objects in",
			OperationKind::Upload => "upload",
			OperationKind::Download => "download",
			OperationKind::Delete => "delete",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the endpoint.")]
	Io(#[from] std::io::Error),
	/// Endpoint answered with a non-success HTTP status.
	#[error("Endpoint returned HTTP status {status}.")]
	Status {
		/// HTTP status code carried by the response.
		status: u16,
		/// Response body, decoded lossily for diagnostics.
		body: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status code carried by the failure, when the endpoint answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn operation_error_extracts_status_from_transport() {
		let source = TransportError::Status { status: 404, body: "not found".into() };
		let error = OperationError::transport(OperationKind::Delete, "nc_t/c/o", source);

		assert_eq!(error.status, Some(404));
		assert_eq!(error.to_string(), "Failed to delete `nc_t/c/o`.");

		let source = StdError::source(&error)
			.expect("Operation error should expose the transport failure as its source.");

		assert!(source.to_string().contains("404"));
	}

	#[test]
	fn network_failures_carry_no_status() {
		let source = TransportError::Io(std::io::Error::other("connection reset"));
		let error = OperationError::transport(OperationKind::List, "nc_t/c", source);

		assert_eq!(error.status, None);
		assert_eq!(error.to_string(), "Failed to list objects in `nc_t/c`.");
	}
}
