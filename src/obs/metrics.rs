// self
use crate::obs::{AcquisitionOutcome, AcquisitionPath};

/// Records an acquisition outcome via the global metrics recorder (when enabled).
pub fn record_acquisition(path: AcquisitionPath, outcome: AcquisitionOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_interceptor_acquisition_total",
			"path" => path.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (path, outcome);
	}
}
