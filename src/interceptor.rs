//! Bearer token interceptor for `reqwest-middleware` client stacks.
//!
//! [`AuthInterceptor`] looks up each outgoing request's URL in a
//! [`ProtectedResourceRegistry`]. Requests that match no entry, or match an entry without
//! scopes, are forwarded untouched. Otherwise the interceptor asks its [`TokenAcquirer`] for a
//! token silently, falls back to a single interactive acquisition on any silent failure, and
//! forwards the request with `Authorization: Bearer <token>`. When the last path attempted
//! fails the request is never sent and the failure surfaces as
//! [`reqwest_middleware::Error::Middleware`].
//!
//! The interceptor keeps no token state between requests and does not coalesce concurrent
//! acquisitions; caching and deduplication belong to the acquirer.

// crates.io
use http::Extensions;
use reqwest::{
	Response,
	header::{AUTHORIZATION, HeaderValue},
};
use reqwest_middleware::{Middleware, Next};
// self
use crate::{
	_prelude::*,
	acquire::{InteractiveTokenRequest, SilentTokenRequest, TokenAcquirer},
	auth::{AuthorizationResult, ScopeSet},
	config::InterceptorConfig,
	obs::{self, AcquisitionOutcome, AcquisitionPath, InterceptSpan},
	registry::ProtectedResourceRegistry,
};

/// Middleware that attaches bearer tokens to requests targeting protected resources.
pub struct AuthInterceptor<A>
where
	A: ?Sized + TokenAcquirer,
{
	acquirer: Arc<A>,
	registry: Arc<ProtectedResourceRegistry>,
	interactive_fallback: bool,
}
impl<A> AuthInterceptor<A>
where
	A: ?Sized + TokenAcquirer,
{
	/// Creates an interceptor over `registry` with interactive fallback enabled.
	pub fn new(acquirer: impl Into<Arc<A>>, registry: ProtectedResourceRegistry) -> Self {
		Self {
			acquirer: acquirer.into(),
			registry: Arc::new(registry),
			interactive_fallback: true,
		}
	}

	/// Creates an interceptor from a configuration document.
	pub fn from_config(acquirer: impl Into<Arc<A>>, config: &InterceptorConfig) -> Result<Self> {
		let registry = config.to_registry()?;

		Ok(Self::new(acquirer, registry).with_interactive_fallback(config.interactive_fallback))
	}

	/// Enables or disables the interactive fallback after a silent failure.
	pub fn with_interactive_fallback(mut self, enabled: bool) -> Self {
		self.interactive_fallback = enabled;

		self
	}

	/// Returns `true` if silent failures fall back to interactive acquisition.
	pub fn interactive_fallback(&self) -> bool {
		self.interactive_fallback
	}

	/// Authentication library handing out tokens.
	pub fn acquirer(&self) -> &Arc<A> {
		&self.acquirer
	}

	/// Registry fixed at construction.
	pub fn registry(&self) -> &ProtectedResourceRegistry {
		&self.registry
	}

	/// Obtains a token for `scopes`, trying silent acquisition first.
	///
	/// Silent acquisition uses the first account the acquirer reports, or `None` when it
	/// reports none. Any silent failure triggers exactly one interactive attempt (unless
	/// disabled), whose outcome is returned as is.
	pub async fn acquire(
		&self,
		scopes: &ScopeSet,
	) -> Result<(AuthorizationResult, AcquisitionPath)> {
		let account = self.acquirer.accounts().into_iter().next();

		obs::record_acquisition(AcquisitionPath::Silent, AcquisitionOutcome::Attempt);

		let silent = self
			.acquirer
			.acquire_token_silent(SilentTokenRequest::new(scopes.clone(), account))
			.await;

		match silent {
			Ok(result) => {
				obs::record_acquisition(AcquisitionPath::Silent, AcquisitionOutcome::Success);

				return Ok((result, AcquisitionPath::Silent));
			},
			Err(e) => {
				obs::record_acquisition(AcquisitionPath::Silent, AcquisitionOutcome::Failure);
				obs::trace_silent_failure(&e, self.interactive_fallback);

				if !self.interactive_fallback {
					obs::trace_acquisition_failure(AcquisitionPath::Silent, &e);

					return Err(e.into());
				}
			},
		}

		obs::record_acquisition(AcquisitionPath::Interactive, AcquisitionOutcome::Attempt);

		let interactive = self
			.acquirer
			.acquire_token_interactive(InteractiveTokenRequest::new(scopes.clone()))
			.await;

		match interactive {
			Ok(result) => {
				obs::record_acquisition(AcquisitionPath::Interactive, AcquisitionOutcome::Success);

				Ok((result, AcquisitionPath::Interactive))
			},
			Err(e) => {
				obs::record_acquisition(AcquisitionPath::Interactive, AcquisitionOutcome::Failure);
				obs::trace_acquisition_failure(AcquisitionPath::Interactive, &e);

				Err(e.into())
			},
		}
	}

	/// Attaches a bearer token to `request` when its URL targets a protected resource.
	///
	/// Unprotected requests are returned unchanged. An existing `Authorization` header is
	/// replaced on protected requests.
	pub async fn authorize(&self, mut request: ReqwestRequest) -> Result<ReqwestRequest> {
		let lookup = self.registry.lookup(request.url().as_str());
		let Some(scopes) = lookup.required_scopes() else {
			obs::trace_pass_through(lookup.pattern());

			return Ok(request);
		};
		let span = InterceptSpan::new(
			request.method().as_str(),
			&obs::loggable_url(request.url()),
			lookup.pattern(),
		);
		let (result, path) = span.instrument(self.acquire(scopes)).await?;
		let mut value = HeaderValue::from_str(&result.access_token.bearer())
			.map_err(|source| Error::InvalidHeader { source })?;

		value.set_sensitive(true);
		request.headers_mut().insert(AUTHORIZATION, value);
		obs::trace_token_attached(path, &scopes.fingerprint());

		Ok(request)
	}
}
impl<A> Clone for AuthInterceptor<A>
where
	A: ?Sized + TokenAcquirer,
{
	fn clone(&self) -> Self {
		Self {
			acquirer: self.acquirer.clone(),
			registry: self.registry.clone(),
			interactive_fallback: self.interactive_fallback,
		}
	}
}
impl<A> Debug for AuthInterceptor<A>
where
	A: ?Sized + TokenAcquirer,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthInterceptor")
			.field("registry", &self.registry)
			.field("interactive_fallback", &self.interactive_fallback)
			.finish()
	}
}
#[async_trait::async_trait]
impl<A> Middleware for AuthInterceptor<A>
where
	A: 'static + ?Sized + TokenAcquirer,
{
	async fn handle(
		&self,
		req: ReqwestRequest,
		extensions: &mut Extensions,
		next: Next<'_>,
	) -> reqwest_middleware::Result<Response> {
		let req = self.authorize(req).await?;

		next.run(req, extensions).await
	}
}
