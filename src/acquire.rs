//! Token acquisition contract implemented by authentication libraries.
//!
//! The interceptor never caches, renews, or validates tokens itself. Everything of that kind
//! lives behind [`TokenAcquirer`], so downstream crates can plug in whatever token cache and
//! interactive sign-in flow their platform offers.

// self
use crate::{
	_prelude::*,
	auth::{Account, AuthorizationResult, ScopeSet},
};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Boxed future returned by [`TokenAcquirer`] acquisition methods.
pub type AcquireFuture<'a> =
	Pin<Box<dyn Future<Output = Result<AuthorizationResult, AcquireError>> + 'a + Send>>;

/// Contract for authentication libraries that hand out access tokens.
pub trait TokenAcquirer
where
	Self: Send + Sync,
{
	/// Accounts currently known to the library, in the library's own order.
	fn accounts(&self) -> Vec<Account>;

	/// Obtains a token without user interaction (cache or refresh token).
	fn acquire_token_silent(&self, request: SilentTokenRequest) -> AcquireFuture<'_>;

	/// Obtains a token through a user-facing sign-in flow.
	fn acquire_token_interactive(&self, request: InteractiveTokenRequest) -> AcquireFuture<'_>;
}

/// Parameters for [`TokenAcquirer::acquire_token_silent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilentTokenRequest {
	/// Scopes required by the protected resource.
	pub scopes: ScopeSet,
	/// Account to acquire for; `None` when the library reported no accounts.
	pub account: Option<Account>,
}
impl SilentTokenRequest {
	/// Creates a silent request for the provided scopes and account.
	pub fn new(scopes: ScopeSet, account: Option<Account>) -> Self {
		Self { scopes, account }
	}
}

/// Parameters for [`TokenAcquirer::acquire_token_interactive`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractiveTokenRequest {
	/// Scopes required by the protected resource.
	pub scopes: ScopeSet,
}
impl InteractiveTokenRequest {
	/// Creates an interactive request for the provided scopes.
	pub fn new(scopes: ScopeSet) -> Self {
		Self { scopes }
	}
}

/// Acquisition failures reported by a [`TokenAcquirer`].
///
/// The classification is informational. The interceptor falls back from silent to interactive
/// acquisition on every variant alike.
#[derive(Debug, ThisError)]
pub enum AcquireError {
	/// User interaction (sign-in, consent) is needed before a token can be issued.
	#[error("User interaction is required: {reason}.")]
	InteractionRequired {
		/// Library-supplied reason string.
		reason: String,
	},
	/// No account was supplied and the library could not pick one.
	#[error("No signed-in account is available.")]
	NoAccount,
	/// The user dismissed or abandoned the interactive flow.
	#[error("Interactive sign-in was cancelled.")]
	Cancelled,
	/// Any other failure raised by the library or the identity provider.
	#[error("Authentication library reported a failure.")]
	Provider {
		/// Library-specific failure.
		#[source]
		source: BoxError,
	},
}
impl AcquireError {
	/// Wraps a library-specific failure.
	pub fn provider(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Provider { source: Box::new(src) }
	}

	/// Returns a stable label suitable for log fields.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::InteractionRequired { .. } => "interaction_required",
			Self::NoAccount => "no_account",
			Self::Cancelled => "cancelled",
			Self::Provider { .. } => "provider",
		}
	}
}
