//! Optional observability helpers for the interceptor.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to wrap each intercepted request in a span named
//!   `oauth2_interceptor.intercept` with `method`, `url` (query stripped), and `pattern` fields,
//!   and to emit events on pass-through, fallback, and terminal failure.
//! - Enable `metrics` to increment the `oauth2_interceptor_acquisition_total` counter for every
//!   attempt/success/failure, labeled by `path` + `outcome`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Token acquisition paths taken by the interceptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AcquisitionPath {
	/// Cached or refreshed token, no user interaction.
	Silent,
	/// User-facing sign-in flow.
	Interactive,
}
impl AcquisitionPath {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AcquisitionPath::Silent => "silent",
			AcquisitionPath::Interactive => "interactive",
		}
	}
}
impl Display for AcquisitionPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AcquisitionOutcome {
	/// Acquisition started.
	Attempt,
	/// Token obtained.
	Success,
	/// Acquisition rejected.
	Failure,
}
impl AcquisitionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AcquisitionOutcome::Attempt => "attempt",
			AcquisitionOutcome::Success => "success",
			AcquisitionOutcome::Failure => "failure",
		}
	}
}
impl Display for AcquisitionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Renders `url` without credentials, query, or fragment so it is safe to log.
pub fn loggable_url(url: &Url) -> String {
	let mut rendered = format!("{}://", url.scheme());

	if let Some(host) = url.host_str() {
		rendered.push_str(host);
	}
	if let Some(port) = url.port() {
		rendered.push_str(&format!(":{port}"));
	}

	rendered.push_str(url.path());

	rendered
}
