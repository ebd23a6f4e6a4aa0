//! Error logging and monitoring
//!
//! The [`Renderer`](crate::Renderer) hands every error response to an
//! optional [`ErrorLogger`] before the response body is written. Any closure
//! with the right shape is a logger; [`MonitoringReporter`] is the reference
//! implementation that forwards server faults to a [`MonitoringClient`] and
//! ignores expected client conditions.

use pagecraft_http::{Request, Response, StatusCode};
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Result type for monitoring operations.
pub type MonitoringResult<T> = Result<T, MonitoringError>;

/// Errors raised while logging or reporting a failure.
///
/// The renderer never surfaces these to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MonitoringError {
	/// The monitoring backend rejected or failed to receive a report.
	#[error("failed to submit error report: {message}")]
	Submit {
		/// Backend specific detail.
		message: String,
	},

	/// A custom logger failed.
	#[error("error logger failed: {0}")]
	Logger(String),
}

impl MonitoringError {
	/// Convenience constructor for submission failures.
	pub fn submit(message: impl Into<String>) -> Self {
		Self::Submit {
			message: message.into(),
		}
	}
}

/// Callback invoked for every error response.
///
/// Receives the response under construction (headers may be added), the
/// request, the status being served and the underlying error, if any.
pub trait ErrorLogger: Send + Sync {
	/// Record the failure.
	fn log(
		&self,
		response: &mut Response,
		request: &Request,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
	) -> MonitoringResult<()>;
}

impl<F> ErrorLogger for F
where
	F: Fn(
			&mut Response,
			&Request,
			StatusCode,
			Option<&(dyn Error + 'static)>,
		) -> MonitoringResult<()>
		+ Send
		+ Sync,
{
	fn log(
		&self,
		response: &mut Response,
		request: &Request,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
	) -> MonitoringResult<()> {
		self(response, request, status, error)
	}
}

/// Stand-in error for responses served without an underlying failure.
#[derive(Debug, Clone, Copy, Error)]
#[error("HTTP error {}", .0.as_u16())]
pub struct HttpStatusError(pub StatusCode);

/// A failure report with the request context attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
	/// Numeric status code served to the client.
	pub status: u16,
	/// Top-level error message.
	pub message: String,
	/// Messages of the error's source chain, outermost first.
	pub causes: Vec<String>,
	/// Request method.
	pub method: String,
	/// Request URL as received.
	pub url: String,
	/// Request headers; values that are not valid text are omitted.
	pub headers: Vec<(String, String)>,
}

impl ErrorReport {
	/// Build a report for `error`, or a synthesized [`HttpStatusError`] when
	/// no error was supplied.
	pub fn new(request: &Request, status: StatusCode, error: Option<&(dyn Error + 'static)>) -> Self {
		let synthesized = HttpStatusError(status);
		let error: &(dyn Error + 'static) = error.unwrap_or(&synthesized);

		let mut causes = Vec::new();
		let mut current = error.source();
		while let Some(cause) = current {
			causes.push(cause.to_string());
			current = cause.source();
		}

		let headers = request
			.headers
			.iter()
			.filter_map(|(name, value)| {
				value
					.to_str()
					.ok()
					.map(|v| (name.as_str().to_string(), v.to_string()))
			})
			.collect();

		Self {
			status: status.as_u16(),
			message: error.to_string(),
			causes,
			method: request.method.to_string(),
			url: request.uri.to_string(),
			headers,
		}
	}
}

/// Destination for error reports, such as a crash reporting service.
pub trait MonitoringClient: Send + Sync {
	/// Deliver one report.
	fn submit(&self, report: ErrorReport) -> MonitoringResult<()>;
}

impl<C: MonitoringClient + ?Sized> MonitoringClient for Arc<C> {
	fn submit(&self, report: ErrorReport) -> MonitoringResult<()> {
		(**self).submit(report)
	}
}

/// Emits reports as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMonitoringClient;

impl MonitoringClient for TracingMonitoringClient {
	fn submit(&self, report: ErrorReport) -> MonitoringResult<()> {
		tracing::error!(
			status = report.status,
			method = %report.method,
			url = %report.url,
			causes = ?report.causes,
			"{}",
			report.message
		);
		Ok(())
	}
}

/// Statuses that describe expected client conditions rather than faults.
pub const DEFAULT_SUPPRESSED_STATUSES: [StatusCode; 3] = [
	StatusCode::UNAUTHORIZED,
	StatusCode::FORBIDDEN,
	StatusCode::NOT_FOUND,
];

/// Forwards error responses to a [`MonitoringClient`].
///
/// Suppressed statuses (401, 403 and 404 by default) are never reported.
/// Submission failures are logged and swallowed, so [`ErrorLogger::log`]
/// always succeeds.
///
/// # Examples
///
/// ```
/// use pagecraft_render::{MonitoringReporter, Renderer, TracingMonitoringClient};
/// use pagecraft_assets::AssetResolver;
///
/// let mut renderer = Renderer::new(AssetResolver::new());
/// renderer.set_error_logger(MonitoringReporter::new(TracingMonitoringClient));
/// ```
#[derive(Debug, Clone)]
pub struct MonitoringReporter<C> {
	client: C,
	suppressed: HashSet<StatusCode>,
}

impl<C: MonitoringClient> MonitoringReporter<C> {
	/// Create a reporter with the default suppressed statuses.
	pub fn new(client: C) -> Self {
		Self {
			client,
			suppressed: DEFAULT_SUPPRESSED_STATUSES.into_iter().collect(),
		}
	}

	/// Replace the set of statuses that are never reported.
	pub fn with_suppressed(mut self, statuses: impl IntoIterator<Item = StatusCode>) -> Self {
		self.suppressed = statuses.into_iter().collect();
		self
	}

	/// Returns true if `status` is never reported.
	pub fn is_suppressed(&self, status: StatusCode) -> bool {
		self.suppressed.contains(&status)
	}

	/// The wrapped client.
	pub fn client(&self) -> &C {
		&self.client
	}
}

impl<C: MonitoringClient> ErrorLogger for MonitoringReporter<C> {
	fn log(
		&self,
		_response: &mut Response,
		request: &Request,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
	) -> MonitoringResult<()> {
		if self.is_suppressed(status) {
			return Ok(());
		}

		let report = ErrorReport::new(request, status, error);
		if let Err(e) = self.client.submit(report) {
			tracing::error!(status = status.as_u16(), error = %e, "dropping error report");
		}
		Ok(())
	}
}
