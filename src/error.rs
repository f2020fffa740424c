//! Interceptor-level error types shared across the registry, configuration, and middleware.

// self
use crate::{_prelude::*, acquire::AcquireError};

/// Interceptor-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical interceptor error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token acquisition failed on the last path attempted.
	#[error("Token acquisition failed.")]
	Acquisition {
		/// Failure reported by the authentication library.
		#[source]
		source: AcquireError,
	},
	/// Acquired token cannot be encoded as an `Authorization` header value.
	#[error("Access token cannot be used as an Authorization header value.")]
	InvalidHeader {
		/// Underlying header encoding failure.
		#[source]
		source: reqwest::header::InvalidHeaderValue,
	},
}
impl From<AcquireError> for Error {
	fn from(source: AcquireError) -> Self {
		Self::Acquisition { source }
	}
}
impl From<Error> for reqwest_middleware::Error {
	fn from(e: Error) -> Self {
		reqwest_middleware::Error::middleware(e)
	}
}

/// Configuration and validation failures raised while building a registry.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Two registry entries share the same pattern key.
	#[error("Protected resource pattern `{pattern}` is registered more than once.")]
	DuplicatePattern {
		/// Offending pattern key.
		pattern: String,
	},
	/// Pattern keys cannot be empty; an empty key would match every URL.
	#[error("Protected resource patterns cannot be empty.")]
	EmptyPattern,
	/// Scope list attached to a pattern cannot be normalized.
	#[error("Scopes for a protected resource are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Configuration document is malformed.
	#[error("Interceptor configuration is malformed.")]
	Parse {
		/// Structured parsing failure naming the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Configuration file could not be read.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
