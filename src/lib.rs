//! Scope-aware bearer token interceptor for reqwest. Outgoing requests are matched against a
//! registry of protected resources and receive tokens acquired silently, or interactively when
//! silent acquisition fails.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod acquire;
pub mod auth;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod obs;
pub mod registry;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		acquire::{
			AcquireError, AcquireFuture, InteractiveTokenRequest, SilentTokenRequest,
			TokenAcquirer,
		},
		auth::{Account, AuthorizationResult},
		interceptor::AuthInterceptor,
		registry::ProtectedResourceRegistry,
	};

	/// Scripted outcome returned by [`ScriptedAcquirer`] for a single call.
	pub type ScriptedOutcome = Result<AuthorizationResult, AcquireError>;

	/// In-memory [`TokenAcquirer`] that replays scripted outcomes and records every call.
	///
	/// Calls beyond the scripted queue fail with [`AcquireError::InteractionRequired`] so tests
	/// notice unexpected acquisitions.
	#[derive(Debug, Default)]
	pub struct ScriptedAcquirer {
		accounts: Vec<Account>,
		silent: Mutex<VecDeque<ScriptedOutcome>>,
		interactive: Mutex<VecDeque<ScriptedOutcome>>,
		silent_calls: Mutex<Vec<SilentTokenRequest>>,
		interactive_calls: Mutex<Vec<InteractiveTokenRequest>>,
	}
	impl ScriptedAcquirer {
		/// Sets the account list returned by [`TokenAcquirer::accounts`].
		pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Account>) -> Self {
			self.accounts = accounts.into_iter().collect();

			self
		}

		/// Queues an outcome for the next silent acquisition.
		pub fn push_silent(self, outcome: ScriptedOutcome) -> Self {
			self.silent.lock().push_back(outcome);

			self
		}

		/// Queues an outcome for the next interactive acquisition.
		pub fn push_interactive(self, outcome: ScriptedOutcome) -> Self {
			self.interactive.lock().push_back(outcome);

			self
		}

		/// Silent requests observed so far.
		pub fn silent_calls(&self) -> Vec<SilentTokenRequest> {
			self.silent_calls.lock().clone()
		}

		/// Interactive requests observed so far.
		pub fn interactive_calls(&self) -> Vec<InteractiveTokenRequest> {
			self.interactive_calls.lock().clone()
		}

		fn next_outcome(queue: &Mutex<VecDeque<ScriptedOutcome>>) -> ScriptedOutcome {
			queue.lock().pop_front().unwrap_or_else(|| {
				Err(AcquireError::InteractionRequired { reason: "no scripted outcome".into() })
			})
		}
	}
	impl TokenAcquirer for ScriptedAcquirer {
		fn accounts(&self) -> Vec<Account> {
			self.accounts.clone()
		}

		fn acquire_token_silent(&self, request: SilentTokenRequest) -> AcquireFuture<'_> {
			self.silent_calls.lock().push(request);

			let outcome = Self::next_outcome(&self.silent);

			Box::pin(async move { outcome })
		}

		fn acquire_token_interactive(&self, request: InteractiveTokenRequest) -> AcquireFuture<'_> {
			self.interactive_calls.lock().push(request);

			let outcome = Self::next_outcome(&self.interactive);

			Box::pin(async move { outcome })
		}
	}

	/// Builds an [`AuthorizationResult`] carrying only the provided access token.
	pub fn token(value: &str) -> AuthorizationResult {
		AuthorizationResult::new(value)
	}

	/// Builds a provider failure suitable for scripting rejected acquisitions.
	pub fn provider_failure(message: &str) -> AcquireError {
		AcquireError::provider(std::io::Error::other(message.to_owned()))
	}

	/// Wraps `acquirer` in an interceptor plus a reqwest client that routes through it.
	pub fn build_test_client(
		acquirer: Arc<ScriptedAcquirer>,
		registry: ProtectedResourceRegistry,
	) -> ClientWithMiddleware {
		let interceptor: AuthInterceptor<ScriptedAcquirer> =
			AuthInterceptor::new(acquirer, registry);

		ClientBuilder::new(ReqwestClient::new()).with(interceptor).build()
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Request as ReqwestRequest};
	pub use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use reqwest_middleware;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, oauth2_interceptor as _};
