//! Authorization results returned by the authentication library.

// self
use crate::{
	_prelude::*,
	auth::{Account, ScopeSet, token::secret::TokenSecret},
};

/// Outcome of a successful token acquisition.
///
/// Only [`access_token`](Self::access_token) is required by the interceptor; the remaining
/// fields are informational and never cached.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthorizationResult {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Scopes the token was granted for, when reported.
	pub scopes: Option<ScopeSet>,
	/// Account the token was issued to, when reported.
	pub account: Option<Account>,
	/// Expiry instant, when reported.
	pub expires_on: Option<OffsetDateTime>,
}
impl AuthorizationResult {
	/// Creates a result carrying only an access token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			scopes: None,
			account: None,
			expires_on: None,
		}
	}

	/// Records the granted scopes.
	pub fn with_scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = Some(scopes);

		self
	}

	/// Records the account the token belongs to.
	pub fn with_account(mut self, account: Account) -> Self {
		self.account = Some(account);

		self
	}

	/// Records the expiry instant.
	pub fn with_expires_on(mut self, instant: OffsetDateTime) -> Self {
		self.expires_on = Some(instant);

		self
	}

	/// Returns `true` if an expiry is known and has passed at `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_on.is_some_and(|expires_on| instant >= expires_on)
	}
}
impl Debug for AuthorizationResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationResult")
			.field("access_token", &"<redacted>")
			.field("scopes", &self.scopes)
			.field("account", &self.account)
			.field("expires_on", &self.expires_on)
			.finish()
	}
}
