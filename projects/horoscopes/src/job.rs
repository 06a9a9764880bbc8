//! The daily batch: for every sign, fetch through the fallback chain,
//! translate when the text is not Turkish yet, and upsert `(sign, today)`.
//!
//! Failures inside one sign are logged and recorded in the [`RunReport`];
//! they never stop the remaining signs. Only the optional prune step can
//! fail a whole run.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::language::needs_translation;
use crate::sign::Sign;
use crate::sources::{first_available, HoroscopeSource};
use crate::store::{HoroscopeRecord, HoroscopeStore, StoreError};
use crate::translator::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOptions {
    /// Delete every record not dated today before processing.
    pub prune_stale_dates: bool,
    /// Reuse a non-empty stored translation for `(sign, today)` instead of
    /// calling the translator again.
    pub reuse_stored_translation: bool,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self { prune_stale_dates: false, reuse_stored_translation: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Translation {
    /// Text already contained Turkish letters.
    NotNeeded,
    Translated,
    Reused,
    /// Translator failed; the original text was stored as the translation.
    KeptOriginal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignOutcome {
    Stored {
        sign: Sign,
        source: &'static str,
        translation: Translation,
    },
    /// Every source came back empty.
    Skipped { sign: Sign },
    Failed { sign: Sign, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub date: NaiveDate,
    pub pruned: Option<usize>,
    pub outcomes: Vec<SignOutcome>,
}

impl RunReport {
    pub fn stored(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SignOutcome::Stored { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SignOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SignOutcome::Failed { .. }))
            .count()
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("PruneStaleHoroscopes: {source}")]
    PruneStaleHoroscopes {
        #[source]
        source: StoreError,
    },
}

pub struct DailyHoroscopeJob {
    sources: Vec<Box<dyn HoroscopeSource>>,
    translator: Box<dyn Translator>,
    store: Arc<dyn HoroscopeStore>,
    options: JobOptions,
}

impl DailyHoroscopeJob {
    pub fn new(
        sources: Vec<Box<dyn HoroscopeSource>>,
        translator: Box<dyn Translator>,
        store: Arc<dyn HoroscopeStore>,
        options: JobOptions,
    ) -> Self {
        Self { sources, translator, store, options }
    }

    pub fn store(&self) -> &Arc<dyn HoroscopeStore> {
        &self.store
    }

    /// Processes all twelve signs sequentially for `today`.
    pub async fn run(&self, today: NaiveDate) -> Result<RunReport, RunError> {
        info!(%today, "daily horoscope run started");

        let pruned = if self.options.prune_stale_dates {
            let removed = self
                .store
                .prune_except(today)
                .await
                .map_err(|source| RunError::PruneStaleHoroscopes { source })?;
            info!(removed, "pruned stale horoscopes");
            Some(removed)
        } else {
            None
        };

        let mut outcomes = Vec::with_capacity(Sign::ALL.len());
        for sign in Sign::ALL {
            outcomes.push(self.process_sign(sign, today).await);
        }

        let report = RunReport { date: today, pruned, outcomes };
        info!(
            stored = report.stored(),
            skipped = report.skipped(),
            failed = report.failed(),
            "daily horoscope run finished"
        );
        Ok(report)
    }

    async fn process_sign(&self, sign: Sign, today: NaiveDate) -> SignOutcome {
        let Some((source, text)) = first_available(&self.sources, sign).await else {
            warn!(%sign, "no source returned text");
            return SignOutcome::Skipped { sign };
        };
        info!(%sign, source, "fetched horoscope");

        let (translated_text, translation) = match self.stored_translation(sign, today).await {
            Some(existing) => (existing, Translation::Reused),
            None => self.translate(sign, &text).await,
        };

        let record = HoroscopeRecord { sign, date: today, text, translated_text };
        match self.store.upsert(&record).await {
            Ok(()) => {
                info!(%sign, %today, ?translation, "horoscope stored");
                SignOutcome::Stored { sign, source, translation }
            }
            Err(err) => {
                error!(%sign, %today, error = %err, "horoscope upsert failed");
                SignOutcome::Failed { sign, error: err.to_string() }
            }
        }
    }

    async fn stored_translation(&self, sign: Sign, today: NaiveDate) -> Option<String> {
        if !self.options.reuse_stored_translation {
            return None;
        }

        match self.store.find(sign, today).await {
            Ok(Some(existing)) if !existing.translated_text.trim().is_empty() => {
                info!(%sign, "reusing stored translation");
                Some(existing.translated_text)
            }
            Ok(_) => None,
            Err(err) => {
                warn!(%sign, error = %err, "stored translation lookup failed");
                None
            }
        }
    }

    async fn translate(&self, sign: Sign, text: &str) -> (String, Translation) {
        if !needs_translation(text) {
            return (text.to_string(), Translation::NotNeeded);
        }

        info!(%sign, "translating");
        match self.translator.translate(text).await {
            Some(translated) => (translated, Translation::Translated),
            None => {
                warn!(%sign, "translation failed, keeping original text");
                (text.to_string(), Translation::KeptOriginal)
            }
        }
    }
}
