// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span wrapping one logical call (all of its attempts).
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the call kind and operation name.
	pub fn new(kind: CallKind, operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("autharmor_client.call", kind = kind.as_str(), operation);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, operation);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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

/// Emits a debug event for a request about to be sent.
pub(crate) fn trace_attempt(method: &Method, url: &Url, attempt: u32) {
	#[cfg(feature = "tracing")]
	tracing::debug!(%method, url = url.as_str(), attempt, "sending request");
	#[cfg(not(feature = "tracing"))]
	let _ = (method, url, attempt);
}

/// Emits a debug event for a throttled response that will be retried.
pub(crate) fn trace_retry(status: u16, attempt: u32, delay: StdDuration) {
	#[cfg(feature = "tracing")]
	tracing::debug!(status, attempt, delay_ms = delay.as_millis() as u64, "retrying request");
	#[cfg(not(feature = "tracing"))]
	let _ = (status, attempt, delay);
}

/// Emits a warning for a failure surfaced to the caller.
pub(crate) fn trace_failure(error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(status = error.status(), error = %error, "call failed");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}
