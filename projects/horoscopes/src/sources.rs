//! Horoscope providers behind a single `fetch(sign) -> Option<String>` contract.
//!
//! Transport faults, non-success statuses and unexpected bodies all collapse
//! into `None`; nothing here returns an error to the caller.

use async_trait::async_trait;
use interfaces_horoscope_sources::index::{
    fetch_aztro, fetch_burc_yorumlari, fetch_horoscope_app, parse_aztro, parse_burc_yorumlari,
    parse_horoscope_app, FetchHoroscopeError, ProviderResult, AZTRO_URL, BURC_YORUMLARI_URL,
    HOROSCOPE_APP_URL,
};
use reqwest::Client;
use tracing::{debug, warn};

use crate::sign::Sign;

#[async_trait]
pub trait HoroscopeSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, sign: Sign) -> Option<String>;
}

/// Consults `sources` in order and returns the first text found, with the
/// name of the source that produced it.
pub async fn first_available(
    sources: &[Box<dyn HoroscopeSource>],
    sign: Sign,
) -> Option<(&'static str, String)> {
    for source in sources {
        if let Some(text) = source.fetch(sign).await {
            if !text.trim().is_empty() {
                return Some((source.name(), text));
            }
        }
    }
    None
}

fn absorb(
    source: &'static str,
    sign: Sign,
    result: Result<ProviderResult, FetchHoroscopeError>,
    parse: fn(&str) -> Option<String>,
) -> Option<String> {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            warn!(source, %sign, error = %err, "horoscope source unreachable");
            return None;
        }
    };

    if !response.is_success() {
        debug!(source, %sign, status = %response.status, "horoscope source returned non-success");
        return None;
    }

    let text = parse(&response.body);
    if text.is_none() {
        debug!(source, %sign, "horoscope source had no usable text");
    }
    text
}

pub struct HoroscopeAppSource {
    client: Client,
    base_url: String,
}

impl HoroscopeAppSource {
    pub fn new(client: Client) -> Self {
        Self { client, base_url: HOROSCOPE_APP_URL.to_string() }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl HoroscopeSource for HoroscopeAppSource {
    fn name(&self) -> &'static str {
        "horoscope-app"
    }

    async fn fetch(&self, sign: Sign) -> Option<String> {
        let result = fetch_horoscope_app(&self.client, &self.base_url, sign.as_str()).await;
        absorb(self.name(), sign, result, parse_horoscope_app)
    }
}

pub struct AztroSource {
    client: Client,
    base_url: String,
}

impl AztroSource {
    pub fn new(client: Client) -> Self {
        Self { client, base_url: AZTRO_URL.to_string() }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl HoroscopeSource for AztroSource {
    fn name(&self) -> &'static str {
        "aztro"
    }

    async fn fetch(&self, sign: Sign) -> Option<String> {
        let result = fetch_aztro(&self.client, &self.base_url, sign.as_str()).await;
        absorb(self.name(), sign, result, parse_aztro)
    }
}

pub struct BurcYorumlariSource {
    client: Client,
    base_url: String,
}

impl BurcYorumlariSource {
    pub fn new(client: Client) -> Self {
        Self { client, base_url: BURC_YORUMLARI_URL.to_string() }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl HoroscopeSource for BurcYorumlariSource {
    fn name(&self) -> &'static str {
        "burc-yorumlari"
    }

    async fn fetch(&self, sign: Sign) -> Option<String> {
        let result = fetch_burc_yorumlari(&self.client, &self.base_url, sign.as_str()).await;
        absorb(self.name(), sign, result, parse_burc_yorumlari)
    }
}

/// The production chain, in fallback order.
pub fn default_sources(client: &Client) -> Vec<Box<dyn HoroscopeSource>> {
    vec![
        Box::new(HoroscopeAppSource::new(client.clone())),
        Box::new(AztroSource::new(client.clone())),
        Box::new(BurcYorumlariSource::new(client.clone())),
    ]
}
