use std::sync::Arc;

use axum::serve;
use interfaces_openai_chat::index::ChatClient;
use projects_horoscopes::{
	config::{Config, ConfigError},
	db::build_pool,
	job::DailyHoroscopeJob,
	router,
	sources::default_sources,
	store::PgHoroscopeStore,
	translator::OpenAiTranslator,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("Config: {source}")]
	Config {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("HttpClient: {source}")]
	HttpClient {
		#[source]
		source: reqwest::Error,
	},
	#[error("DatabasePool: {source}")]
	DatabasePool {
		#[source]
		source: r2d2::Error,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	}
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	let config = Config::from_env()
		.map_err(|source| MainError::Config { source })?;

	utils_trace::init(&config.log_level, config.log_format)
		.map_err(|source| MainError::TracingInit { source })?;

	let http = reqwest::Client::builder()
		.user_agent("projects_horoscopes")
		.build()
		.map_err(|source| MainError::HttpClient { source })?;

	let pool = build_pool(&config.database_url)
		.map_err(|source| MainError::DatabasePool { source })?;

	let chat = ChatClient::new(http.clone(), &config.openai_api_key)
		.with_base_url(&config.openai_base_url);

	let job = DailyHoroscopeJob::new(
		default_sources(&http),
		Box::new(OpenAiTranslator::new(chat, &config.openai_model)),
		Arc::new(PgHoroscopeStore::new(pool)),
		config.job,
	);

	info!(
		prune_stale_dates = config.job.prune_stale_dates,
		reuse_stored_translation = config.job.reuse_stored_translation,
		"daily horoscope job configured"
	);

	let app = router(Arc::new(job));

	let listener = tokio::net::TcpListener::bind(config.bind_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", config.bind_addr);

	serve(listener, app)
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}
