// self
use crate::{_prelude::*, acquire::AcquireError, obs::AcquisitionPath};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedIntercept<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedIntercept<F> = F;

/// Span wrapping a single intercepted request.
#[derive(Clone, Debug)]
pub struct InterceptSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl InterceptSpan {
	/// Creates a span tagged with the request method, loggable URL, and matched pattern.
	pub fn new(method: &str, url: &str, pattern: Option<&str>) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_interceptor.intercept",
				method,
				url,
				pattern = pattern.unwrap_or("-")
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, url, pattern);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedIntercept<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Notes that a request was forwarded without a token.
pub fn trace_pass_through(pattern: Option<&str>) {
	#[cfg(feature = "tracing")]
	{
		match pattern {
			Some(pattern) => tracing::debug!(pattern, "Matched unprotected resource."),
			None => tracing::trace!("No protected resource matched."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = pattern;
	}
}

/// Notes that silent acquisition failed and whether the interactive path follows.
pub fn trace_silent_failure(err: &AcquireError, falling_back: bool) {
	#[cfg(feature = "tracing")]
	{
		if falling_back {
			tracing::info!(kind = err.kind(), "Silent acquisition failed; trying interactive.");
		} else {
			tracing::warn!(kind = err.kind(), "Silent acquisition failed; fallback disabled.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (err, falling_back);
	}
}

/// Notes that the final acquisition path failed and the request will not be sent.
pub fn trace_acquisition_failure(path: AcquisitionPath, err: &AcquireError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			path = path.as_str(),
			kind = err.kind(),
			error = %err,
			"Token acquisition failed."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (path, err);
	}
}

/// Notes that a token was attached; only the scope fingerprint is logged.
pub fn trace_token_attached(path: AcquisitionPath, scope_fingerprint: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(path = path.as_str(), scope = scope_fingerprint, "Attached bearer token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (path, scope_fingerprint);
	}
}
