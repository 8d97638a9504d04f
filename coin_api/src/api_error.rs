use {
	crate::{api_types::ErrorResponse, coingecko::UpstreamError},
	axum::{
		Json,
		http::StatusCode,
		response::{IntoResponse, Response},
	},
	thiserror::Error,
};

/// Errors the coin detail and chart endpoints surface to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	#[error("Cryptocurrency not found")]
	NotFound,

	#[error("API rate limit exceeded. Please try again in a few minutes.")]
	RateLimited { retry_after: Option<String> },

	#[error("Market data provider is not reachable")]
	ServiceUnavailable,

	#[error("Internal server error")]
	InternalError,
}

impl ApiError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ApiError::NotFound => StatusCode::NOT_FOUND,
			ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
			ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<UpstreamError> for ApiError {
	fn from(e: UpstreamError) -> Self {
		match e {
			UpstreamError::NotFound => ApiError::NotFound,
			UpstreamError::RateLimited { retry_after } => ApiError::RateLimited { retry_after },
			UpstreamError::NetworkUnreachable(_) => ApiError::ServiceUnavailable,
			UpstreamError::Status { .. } | UpstreamError::Transport(_) | UpstreamError::InvalidPayload(_) => ApiError::InternalError,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let retry_after = match &self {
			ApiError::RateLimited { retry_after } => retry_after.clone(),
			_ => None,
		};
		let body = ErrorResponse { message: self.to_string(), retry_after };
		(self.status_code(), Json(body)).into_response()
	}
}
