//! HTTP surface: trigger and read endpoints through the full router.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use common::{FakeSource, FakeTranslator, MemoryStore};
use projects_horoscopes::{
    job::{DailyHoroscopeJob, JobOptions},
    router,
    sign::Sign,
    store::{HoroscopeRecord, HoroscopeStore},
};
use serde_json::Value;
use tower::ServiceExt;

fn app(store: Arc<MemoryStore>) -> axum::Router {
    app_with(store, JobOptions::default())
}

fn app_with(store: Arc<MemoryStore>, options: JobOptions) -> axum::Router {
    let job = DailyHoroscopeJob::new(
        vec![Box::new(FakeSource::new("a").with(Sign::Aries, "Great day ahead"))],
        Box::new(FakeTranslator::working()),
        store,
        options,
    );
    router(Arc::new(job))
}

async fn send(app: axum::Router, method: Method, uri: &str) -> Result<(StatusCode, Vec<u8>)> {
    let request = Request::builder().method(method).uri(uri).body(Body::empty())?;
    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

#[tokio::test]
async fn trigger_accepts_any_method_and_reports() -> Result<()> {
    for method in [Method::POST, Method::GET] {
        let store = Arc::new(MemoryStore::default());
        let (status, body) = send(app(store.clone()), method, "/daily-horoscope").await?;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body)?;
        assert_eq!(json["success"], Value::Bool(true));
        assert!(json["message"].as_str().unwrap().contains("1 stored"));
        assert!(json["timestamp"].as_str().is_some());
        assert_eq!(json["report"]["outcomes"].as_array().unwrap().len(), 12);
        assert_eq!(json["report"]["outcomes"][0]["status"], "stored");

        let today = Utc::now().date_naive();
        assert!(store.find(Sign::Aries, today).await?.is_some());
    }
    Ok(())
}

#[tokio::test]
async fn failed_prune_returns_server_error() -> Result<()> {
    let store = Arc::new(MemoryStore { fail_prune: true, ..MemoryStore::default() });
    let options = JobOptions { prune_stale_dates: true, ..JobOptions::default() };

    let (status, body) =
        send(app_with(store.clone(), options), Method::POST, "/daily-horoscope").await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body)?;
    assert_eq!(json["success"], Value::Bool(false));
    assert_eq!(json["error"], "Daily horoscope run failed");
    assert!(json["details"].as_str().unwrap().starts_with("PruneStaleHoroscopes"));
    assert!(json["timestamp"].as_str().is_some());

    // The run stops before any sign is processed.
    assert_eq!(store.upserts.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn read_returns_stored_record() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    store
        .upsert(&HoroscopeRecord {
            sign: Sign::Aries,
            date,
            text: "Great day ahead".to_string(),
            translated_text: "Önünüzde harika bir gün var".to_string(),
        })
        .await?;

    let (status, body) = send(app(store), Method::GET, "/horoscopes/Aries?date=2024-05-01").await?;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body)?;
    assert_eq!(json["sign"], "aries");
    assert_eq!(json["date"], "2024-05-01");
    assert_eq!(json["text"], "Great day ahead");
    assert_eq!(json["translated_text"], "Önünüzde harika bir gün var");
    Ok(())
}

#[tokio::test]
async fn read_missing_record_is_not_found() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let (status, _) = send(app(store), Method::GET, "/horoscopes/leo?date=2024-05-01").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn read_unknown_sign_is_bad_request() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let (status, _) = send(app(store), Method::GET, "/horoscopes/ophiuchus").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
