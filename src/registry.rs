//! Protected resource registry and endpoint-to-scope matching.
//!
//! The registry is an ordered list of `pattern -> scopes` entries. A URL matches an entry when
//! the pattern, read as a glob, matches the whole URL, or when the pattern occurs verbatim
//! anywhere inside the URL. Entries are consulted in insertion order and the first match wins;
//! glob and substring matches carry equal weight. Keys that do not compile as globs (for example
//! an unbalanced `[`) still match as substrings.

// crates.io
use glob::{MatchOptions, Pattern};
// self
use crate::{_prelude::*, auth::ScopeSet, error::ConfigError};

/// Endpoint protected by Microsoft Graph's `/me` resource, registered by default.
pub const DEFAULT_PROTECTED_RESOURCE: &str = "https://graph.microsoft.com/v1.0/me";
/// Scope required by [`DEFAULT_PROTECTED_RESOURCE`].
pub const DEFAULT_PROTECTED_SCOPE: &str = "user.read";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
	case_sensitive: true,
	require_literal_separator: true,
	require_literal_leading_dot: true,
};

/// Single registry entry pairing an endpoint pattern with its required scopes.
#[derive(Clone, Debug)]
pub struct ProtectedResource {
	pattern: String,
	glob: Option<Pattern>,
	scopes: ScopeSet,
}
impl ProtectedResource {
	/// Compiles a registry entry.
	///
	/// An empty scope list is allowed and marks matching URLs as explicitly unprotected.
	pub fn new(pattern: impl Into<String>, scopes: ScopeSet) -> Result<Self, ConfigError> {
		let pattern = pattern.into();

		if pattern.is_empty() {
			return Err(ConfigError::EmptyPattern);
		}

		let glob = Pattern::new(&pattern).ok();

		Ok(Self { pattern, glob, scopes })
	}

	fn default_graph_me() -> Self {
		Self {
			pattern: DEFAULT_PROTECTED_RESOURCE.into(),
			glob: Pattern::new(DEFAULT_PROTECTED_RESOURCE).ok(),
			scopes: ScopeSet::from_static(&[DEFAULT_PROTECTED_SCOPE]),
		}
	}

	/// Pattern key as configured.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Scopes required by URLs matching this entry.
	pub fn scopes(&self) -> &ScopeSet {
		&self.scopes
	}

	/// Returns `true` if the pattern compiled as a glob.
	pub fn is_glob(&self) -> bool {
		self.glob.is_some()
	}

	/// Returns `true` if the entry's glob matches `url`, or the pattern occurs inside `url`.
	pub fn matches(&self, url: &str) -> bool {
		self.glob.as_ref().is_some_and(|glob| glob.matches_with(url, MATCH_OPTIONS))
			|| url.contains(self.pattern.as_str())
	}
}

/// Result of looking up a URL in a [`ProtectedResourceRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeLookup<'a> {
	/// No entry matched; the endpoint is public.
	NoMatch,
	/// An entry matched but lists no scopes; the endpoint is explicitly public.
	Unprotected {
		/// Pattern of the matching entry.
		pattern: &'a str,
	},
	/// An entry matched and requires the listed scopes.
	Protected {
		/// Pattern of the matching entry.
		pattern: &'a str,
		/// Scopes to request before forwarding.
		scopes: &'a ScopeSet,
	},
}
impl<'a> ScopeLookup<'a> {
	/// Scopes to acquire, or `None` when no token should be attached.
	pub fn required_scopes(&self) -> Option<&'a ScopeSet> {
		match self {
			Self::Protected { scopes, .. } => Some(scopes),
			Self::NoMatch | Self::Unprotected { .. } => None,
		}
	}

	/// Pattern of the matching entry, if any.
	pub fn pattern(&self) -> Option<&'a str> {
		match self {
			Self::NoMatch => None,
			Self::Unprotected { pattern } | Self::Protected { pattern, .. } => Some(pattern),
		}
	}
}

/// Ordered, immutable mapping from endpoint patterns to required scopes.
#[derive(Clone, Debug)]
pub struct ProtectedResourceRegistry {
	entries: Vec<ProtectedResource>,
}
impl ProtectedResourceRegistry {
	/// Returns a builder that collects entries in insertion order.
	pub fn builder() -> ProtectedResourceRegistryBuilder {
		ProtectedResourceRegistryBuilder::default()
	}

	/// Registry with no entries; every request passes through untouched.
	pub fn empty() -> Self {
		Self { entries: Vec::new() }
	}

	/// Builds a registry from pre-compiled entries, rejecting duplicate patterns.
	pub fn from_entries(
		entries: impl IntoIterator<Item = ProtectedResource>,
	) -> Result<Self, ConfigError> {
		let mut registry = Self::empty();

		for entry in entries {
			if registry.entries.iter().any(|existing| existing.pattern == entry.pattern) {
				return Err(ConfigError::DuplicatePattern { pattern: entry.pattern });
			}

			registry.entries.push(entry);
		}

		Ok(registry)
	}

	/// Number of registered entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if no entries are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &ProtectedResource> {
		self.entries.iter()
	}

	/// Pattern keys in insertion order.
	pub fn patterns(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(ProtectedResource::pattern)
	}

	/// Every entry matching `url`, in insertion order.
	pub fn matching_patterns<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a str> {
		self.entries.iter().filter(move |entry| entry.matches(url)).map(ProtectedResource::pattern)
	}

	/// Resolves the scopes required for `url`; the first matching entry wins.
	pub fn lookup(&self, url: &str) -> ScopeLookup<'_> {
		match self.entries.iter().find(|entry| entry.matches(url)) {
			None => ScopeLookup::NoMatch,
			Some(entry) if entry.scopes.is_empty() =>
				ScopeLookup::Unprotected { pattern: &entry.pattern },
			Some(entry) =>
				ScopeLookup::Protected { pattern: &entry.pattern, scopes: &entry.scopes },
		}
	}

	/// Convenience wrapper returning only the required scopes for `url`.
	pub fn scopes_for(&self, url: &str) -> Option<&ScopeSet> {
		self.lookup(url).required_scopes()
	}
}
impl Default for ProtectedResourceRegistry {
	fn default() -> Self {
		Self { entries: vec![ProtectedResource::default_graph_me()] }
	}
}

/// Builder for [`ProtectedResourceRegistry`] that defers validation until [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ProtectedResourceRegistryBuilder {
	pending: Vec<(String, Vec<String>)>,
}
impl ProtectedResourceRegistryBuilder {
	/// Appends an entry requiring `scopes` for URLs matching `pattern`.
	pub fn protect<I, S>(mut self, pattern: impl Into<String>, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.pending.push((pattern.into(), scopes.into_iter().map(Into::into).collect()));

		self
	}

	/// Appends an entry that marks URLs matching `pattern` as public.
	pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
		self.pending.push((pattern.into(), Vec::new()));

		self
	}

	/// Validates every entry and produces the registry.
	pub fn build(self) -> Result<ProtectedResourceRegistry, ConfigError> {
		let entries = self
			.pending
			.into_iter()
			.map(|(pattern, scopes)| ProtectedResource::new(pattern, ScopeSet::new(scopes)?))
			.collect::<Result<Vec<_>, ConfigError>>()?;

		ProtectedResourceRegistry::from_entries(entries)
	}
}
