use std::sync::Arc;

use axum::{
	extract::{Extension, Json, Path, Query},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::{
	job::DailyHoroscopeJob,
	sign::{ParseSignError, Sign},
	store::StoreError,
};

#[derive(Debug, Error)]
pub enum HandlerError {
	#[error(transparent)]
	UnknownSign {
		#[from]
		source: ParseSignError,
	},
	#[error("FindHoroscope: {source}")]
	FindHoroscope {
		#[from]
		source: StoreError,
	},
	#[error("HoroscopeNotInDatabase: {sign} on {date}")]
	HoroscopeNotInDatabase {
		sign: Sign,
		date: NaiveDate,
	},
}

impl IntoResponse for HandlerError {
	fn into_response(self) -> Response {
		match self {
			HandlerError::UnknownSign{ source } => (StatusCode::BAD_REQUEST, source.to_string()).into_response(),
			HandlerError::FindHoroscope{ source } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response(),
			HandlerError::HoroscopeNotInDatabase{ sign, date } => (StatusCode::NOT_FOUND, format!("No horoscope for {sign} on {date}")).into_response(),
		}
	}
}

#[derive(Deserialize)]
pub struct DateQuery {
	date: Option<NaiveDate>,
}

/// Axum handler: GET /horoscopes/{sign}?date=YYYY-MM-DD
pub async fn handler(
	Extension(job): Extension<Arc<DailyHoroscopeJob>>,
	Path(sign): Path<String>,
	Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, HandlerError> {
	let sign: Sign = sign.parse()?;
	let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

	let record = job
		.store()
		.find(sign, date)
		.await?
		.ok_or(HandlerError::HoroscopeNotInDatabase { sign, date })?;

	Ok((StatusCode::OK, Json(record)))
}
