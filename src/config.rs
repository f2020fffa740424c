//! Externally supplied interceptor configuration.
//!
//! Configuration documents are JSON. The protected resource list is ordered, and that order
//! becomes the registry's match precedence:
//!
//! ```json
//! {
//!   "protected_resources": [
//!     { "pattern": "https://graph.microsoft.com/v1.0/me/photo", "scopes": [] },
//!     { "pattern": "https://graph.microsoft.com/v1.0/me", "scopes": ["user.read"] }
//!   ],
//!   "interactive_fallback": true
//! }
//! ```

// std
use std::path::Path;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	registry::{
		DEFAULT_PROTECTED_RESOURCE, DEFAULT_PROTECTED_SCOPE, ProtectedResource,
		ProtectedResourceRegistry,
	},
};

/// One `pattern -> scopes` entry as it appears in a configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResourceConfig {
	/// Glob pattern or URL fragment identifying the endpoint.
	pub pattern: String,
	/// Scopes to request; an empty list marks the endpoint as public.
	#[serde(default)]
	pub scopes: Vec<String>,
}

/// Top-level interceptor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptorConfig {
	/// Protected resources in match-precedence order.
	#[serde(default)]
	pub protected_resources: Vec<ProtectedResourceConfig>,
	/// Falls back to interactive acquisition when silent acquisition fails.
	#[serde(default = "default_interactive_fallback")]
	pub interactive_fallback: bool,
}
impl InterceptorConfig {
	/// Parses a JSON configuration document.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		Self::from_json_slice(raw.as_bytes())
	}

	/// Parses a JSON configuration document from raw bytes.
	pub fn from_json_slice(raw: &[u8]) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_slice(raw);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ConfigError::Parse { source })
	}

	/// Reads and parses a JSON configuration file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let raw = std::fs::read(path)?;

		Self::from_json_slice(&raw)
	}

	/// Validates the protected resource list and compiles it into a registry.
	pub fn to_registry(&self) -> Result<ProtectedResourceRegistry, ConfigError> {
		let entries = self
			.protected_resources
			.iter()
			.map(|entry| {
				ProtectedResource::new(entry.pattern.clone(), entry.scopes.clone().try_into()?)
			})
			.collect::<Result<Vec<_>, ConfigError>>()?;

		ProtectedResourceRegistry::from_entries(entries)
	}
}
impl Default for InterceptorConfig {
	fn default() -> Self {
		Self {
			protected_resources: vec![ProtectedResourceConfig {
				pattern: DEFAULT_PROTECTED_RESOURCE.into(),
				scopes: vec![DEFAULT_PROTECTED_SCOPE.into()],
			}],
			interactive_fallback: default_interactive_fallback(),
		}
	}
}

fn default_interactive_fallback() -> bool {
	true
}
