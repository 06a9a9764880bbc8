//! Daily horoscope service
//!
//! - Once a day, for each of the twelve signs, fetch a horoscope from the
//!   first provider that has one, translate it to Turkish if needed, and
//!   upsert it keyed by `(sign, date)`
//! - REST endpoints in `endpoints/`
//! - PostgreSQL models and queries in `db/`
//! - Requires DATABASE_URL and OPENAI_API_KEY env vars

pub mod config;
pub mod db;
pub mod endpoints;
pub mod job;
pub mod language;
pub mod sign;
pub mod sources;
pub mod store;
pub mod translator;

use std::sync::Arc;

use axum::{
	routing::{any, get},
	Extension, Router,
};

use crate::endpoints::horoscopes::{
	read_by_sign::index::handler as horoscopes_read_by_sign_handler,
	run_daily::index::handler as horoscopes_run_daily_handler,
};
use crate::job::DailyHoroscopeJob;

pub fn router(job: Arc<DailyHoroscopeJob>) -> Router {
	Router::new()
		.route("/daily-horoscope", any(horoscopes_run_daily_handler))
		.route("/horoscopes/{sign}", get(horoscopes_read_by_sign_handler))
		.layer(Extension(job))
}
