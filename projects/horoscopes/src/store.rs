use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::db::{
    horoscope::{
        models::{Horoscope, NewHoroscope},
        queries::{
            delete_horoscopes_not_on, get_horoscope, upsert_horoscope,
            DeleteHoroscopesNotOnError, GetHoroscopeError, UpsertHoroscopeError,
        },
    },
    PgPool,
};
use crate::sign::{ParseSignError, Sign};

/// One stored horoscope, keyed by `(sign, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoroscopeRecord {
    pub sign: Sign,
    pub date: NaiveDate,
    pub text: String,
    pub translated_text: String,
}

impl TryFrom<Horoscope> for HoroscopeRecord {
    type Error = ParseSignError;

    fn try_from(row: Horoscope) -> Result<Self, Self::Error> {
        Ok(HoroscopeRecord {
            sign: row.sign.parse()?,
            date: row.date,
            text: row.text,
            translated_text: row.translated_text,
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error(transparent)]
    Upsert {
        #[from]
        source: UpsertHoroscopeError,
    },
    #[error(transparent)]
    Get {
        #[from]
        source: GetHoroscopeError,
    },
    #[error(transparent)]
    Prune {
        #[from]
        source: DeleteHoroscopesNotOnError,
    },
    #[error("CorruptRow: {source}")]
    CorruptRow {
        #[from]
        source: ParseSignError,
    },
    #[error("BlockingTask: {source}")]
    BlockingTask {
        #[from]
        source: tokio::task::JoinError,
    },
}

#[async_trait]
pub trait HoroscopeStore: Send + Sync {
    /// Atomic insert-or-overwrite on `(sign, date)`.
    async fn upsert(&self, record: &HoroscopeRecord) -> Result<(), StoreError>;

    async fn find(&self, sign: Sign, date: NaiveDate) -> Result<Option<HoroscopeRecord>, StoreError>;

    /// Deletes every record not dated `today`, returning how many went.
    async fn prune_except(&self, today: NaiveDate) -> Result<usize, StoreError>;
}

/// Postgres-backed store; diesel calls run on the blocking pool.
#[derive(Clone)]
pub struct PgHoroscopeStore {
    pool: PgPool,
}

impl PgHoroscopeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut diesel::PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl HoroscopeStore for PgHoroscopeStore {
    async fn upsert(&self, record: &HoroscopeRecord) -> Result<(), StoreError> {
        let record = record.clone();
        self.with_conn(move |conn| {
            let new = NewHoroscope {
                sign: record.sign.as_str(),
                date: record.date,
                text: &record.text,
                translated_text: &record.translated_text,
            };
            upsert_horoscope(conn, &new)?;
            Ok(())
        })
        .await
    }

    async fn find(&self, sign: Sign, date: NaiveDate) -> Result<Option<HoroscopeRecord>, StoreError> {
        self.with_conn(move |conn| {
            get_horoscope(conn, sign.as_str(), date)?
                .map(HoroscopeRecord::try_from)
                .transpose()
                .map_err(StoreError::from)
        })
        .await
    }

    async fn prune_except(&self, today: NaiveDate) -> Result<usize, StoreError> {
        self.with_conn(move |conn| Ok(delete_horoscopes_not_on(conn, today)?))
            .await
    }
}
