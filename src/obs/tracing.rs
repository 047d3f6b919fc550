// crates.io
use http::Method;
// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping one facade operation.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation.
	pub fn new(operation: Operation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("authflow.operation", operation = operation.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
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

/// Emits a debug event for a received HTTP response.
pub fn log_response(method: &Method, url: &Url, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(method = method.as_str(), url = url.as_str(), status, "Authflow response.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, url, status);
	}
}

/// Warns that a malformed server timestamp was replaced with the current time.
pub fn log_timestamp_fallback(raw: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(raw, "Malformed timestamp replaced with the current time.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = raw;
	}
}
