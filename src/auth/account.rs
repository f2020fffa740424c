//! Account handles surfaced by the authentication library.

// self
use crate::_prelude::*;

/// Signed-in identity reported by a [`TokenAcquirer`](crate::acquire::TokenAcquirer).
///
/// The interceptor treats accounts as opaque: it forwards the first one it sees to silent
/// acquisition and never inspects it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account {
	home_account_id: String,
}
impl Account {
	/// Wraps the library's home account identifier.
	pub fn new(home_account_id: impl Into<String>) -> Self {
		Self { home_account_id: home_account_id.into() }
	}

	/// Home account identifier as reported by the library.
	pub fn home_account_id(&self) -> &str {
		&self.home_account_id
	}
}
