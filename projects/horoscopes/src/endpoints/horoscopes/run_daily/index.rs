use std::sync::Arc;

use axum::{
	extract::{Extension, Json},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::job::{DailyHoroscopeJob, RunError, RunReport};

#[derive(Serialize)]
pub struct RunSucceeded {
	success: bool,
	message: String,
	timestamp: String,
	report: RunReport,
}

#[derive(Serialize)]
pub struct RunFailed {
	success: bool,
	error: String,
	details: String,
	timestamp: String,
}

impl IntoResponse for RunError {
	fn into_response(self) -> Response {
		let body = RunFailed {
			success: false,
			error: "Daily horoscope run failed".to_string(),
			details: self.to_string(),
			timestamp: timestamp(),
		};
		(StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
	}
}

fn timestamp() -> String {
	Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Axum handler: any method on /daily-horoscope. Request body is ignored.
pub async fn handler(Extension(job): Extension<Arc<DailyHoroscopeJob>>) -> Response {
	info!(started_at = %timestamp(), "daily-horoscope invocation");

	let today = Utc::now().date_naive();
	match job.run(today).await {
		Ok(report) => {
			let message = format!(
				"Daily horoscopes updated: {} stored, {} skipped, {} failed",
				report.stored(),
				report.skipped(),
				report.failed()
			);
			let body = RunSucceeded { success: true, message, timestamp: timestamp(), report };
			(StatusCode::OK, Json(body)).into_response()
		}
		Err(err) => {
			error!(error = %err, "daily horoscope run aborted");
			err.into_response()
		}
	}
}
