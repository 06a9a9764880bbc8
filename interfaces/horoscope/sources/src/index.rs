use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub const HOROSCOPE_APP_URL: &str = "https://horoscope-app-api.vercel.app";
pub const AZTRO_URL: &str = "https://aztro.sameerkumar.website";
pub const BURC_YORUMLARI_URL: &str = "https://burc-yorumlari.vercel.app";

pub struct ProviderResult {
    pub body: String,
    pub status: StatusCode,
}

impl ProviderResult {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// `GET /api/v1/get-horoscope/daily?sign=..&day=today`
pub async fn fetch_horoscope_app(
    client: &Client,
    base_url: &str,
    sign: &str,
) -> Result<ProviderResult, FetchHoroscopeError> {
    let request = client
        .get(format!("{base_url}/api/v1/get-horoscope/daily"))
        .query(&[("sign", sign), ("day", "today")]);

    send(request).await
}

/// `POST /?sign=..&day=today`, no body.
pub async fn fetch_aztro(
    client: &Client,
    base_url: &str,
    sign: &str,
) -> Result<ProviderResult, FetchHoroscopeError> {
    let request = client
        .post(format!("{base_url}/"))
        .query(&[("sign", sign), ("day", "today")]);

    send(request).await
}

/// `GET /get/{sign}`
pub async fn fetch_burc_yorumlari(
    client: &Client,
    base_url: &str,
    sign: &str,
) -> Result<ProviderResult, FetchHoroscopeError> {
    send(client.get(format!("{base_url}/get/{sign}"))).await
}

async fn send(request: reqwest::RequestBuilder) -> Result<ProviderResult, FetchHoroscopeError> {
    let response = request
        .send()
        .await
        .map_err(|source| FetchHoroscopeError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchHoroscopeError::ResponseRead { source })?;

    Ok(ProviderResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchHoroscopeError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}

#[derive(Deserialize)]
struct HoroscopeAppResponse {
    data: Option<HoroscopeAppData>,
}

#[derive(Deserialize)]
struct HoroscopeAppData {
    horoscope_data: Option<String>,
}

#[derive(Deserialize)]
struct AztroResponse {
    description: Option<String>,
}

#[derive(Deserialize)]
struct BurcYorumu {
    #[serde(rename = "GunlukYorum")]
    gunluk_yorum: Option<String>,
}

/// `{"data": {"horoscope_data": "..."}}`
pub fn parse_horoscope_app(body: &str) -> Option<String> {
    let parsed: HoroscopeAppResponse = serde_json::from_str(body).ok()?;
    non_empty(parsed.data?.horoscope_data?)
}

/// `{"description": "..."}`
pub fn parse_aztro(body: &str) -> Option<String> {
    let parsed: AztroResponse = serde_json::from_str(body).ok()?;
    non_empty(parsed.description?)
}

/// `[{"GunlukYorum": "..."}]`, only the first element counts.
pub fn parse_burc_yorumlari(body: &str) -> Option<String> {
    let parsed: Vec<BurcYorumu> = serde_json::from_str(body).ok()?;
    non_empty(parsed.into_iter().next()?.gunluk_yorum?)
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
