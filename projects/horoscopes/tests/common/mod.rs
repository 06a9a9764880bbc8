//! In-memory sources, translator and store shared by the integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use projects_horoscopes::{
    sign::{ParseSignError, Sign},
    sources::HoroscopeSource,
    store::{HoroscopeRecord, HoroscopeStore, StoreError},
    translator::Translator,
};

/// Returns a fixed text per sign and counts calls.
pub struct FakeSource {
    pub name: &'static str,
    pub texts: HashMap<Sign, String>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn new(name: &'static str) -> Self {
        Self { name, texts: HashMap::new(), calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn with(mut self, sign: Sign, text: &str) -> Self {
        self.texts.insert(sign, text.to_string());
        self
    }

    pub fn with_all(mut self, text: &str) -> Self {
        for sign in Sign::ALL {
            self.texts.insert(sign, text.to_string());
        }
        self
    }
}

#[async_trait]
impl HoroscopeSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, sign: Sign) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.get(&sign).cloned()
    }
}

/// Prefixes the text, or fails every call when `fail` is set.
pub struct FakeTranslator {
    pub fail: bool,
    pub seen: Arc<Mutex<Vec<String>>>,
}

impl FakeTranslator {
    pub fn working() -> Self {
        Self { fail: false, seen: Arc::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, seen: Arc::default() }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str) -> Option<String> {
        self.seen.lock().unwrap().push(text.to_string());
        if self.fail {
            None
        } else {
            Some(format!("TR: {text}"))
        }
    }
}

/// Keyed map standing in for the `horoscopes` table.
#[derive(Default)]
pub struct MemoryStore {
    pub rows: Mutex<BTreeMap<(Sign, NaiveDate), HoroscopeRecord>>,
    pub upserts: AtomicUsize,
    pub fail_for: Option<Sign>,
    pub fail_prune: bool,
}

#[async_trait]
impl HoroscopeStore for MemoryStore {
    async fn upsert(&self, record: &HoroscopeRecord) -> Result<(), StoreError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_for == Some(record.sign) {
            return Err(StoreError::CorruptRow {
                source: ParseSignError { value: "rejected".to_string() },
            });
        }
        self.rows
            .lock()
            .unwrap()
            .insert((record.sign, record.date), record.clone());
        Ok(())
    }

    async fn find(&self, sign: Sign, date: NaiveDate) -> Result<Option<HoroscopeRecord>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&(sign, date)).cloned())
    }

    async fn prune_except(&self, today: NaiveDate) -> Result<usize, StoreError> {
        if self.fail_prune {
            return Err(StoreError::CorruptRow {
                source: ParseSignError { value: "unreadable".to_string() },
            });
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(_, date), _| *date == today);
        Ok(before - rows.len())
    }
}
