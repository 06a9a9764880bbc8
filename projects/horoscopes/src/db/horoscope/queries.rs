use chrono::NaiveDate;
use diesel::{
    dsl::now, pg::Pg, prelude::*, query_builder::QueryFragment, query_dsl::LoadQuery,
    upsert::excluded,
};
use thiserror::Error;
use crate::db::{horoscope::models::*, schema::horoscopes::dsl::*};

#[derive(Debug, Error)]
pub enum UpsertHoroscopeError {
    #[error("UpsertHoroscope: {source}")]
    UpsertHoroscope{
        #[from]
        source: diesel::result::Error
    },
}

/// Single `INSERT .. ON CONFLICT (sign, date) DO UPDATE`.
pub fn upsert_horoscope(
    conn: &mut PgConnection,
    new: &NewHoroscope
) -> Result<Horoscope, UpsertHoroscopeError> {
    upsert_statement(new)
        .get_result(conn)
        .map_err(|source| UpsertHoroscopeError::UpsertHoroscope{ source })
}

fn upsert_statement<'a>(
    new: &'a NewHoroscope<'a>
) -> impl RunQueryDsl<PgConnection> + LoadQuery<'a, PgConnection, Horoscope> + QueryFragment<Pg> + 'a {
    diesel::insert_into(horoscopes)
        .values(new)
        .on_conflict((sign, date))
        .do_update()
        .set((
            text.eq(excluded(text)),
            translated_text.eq(excluded(translated_text)),
            updated_at.eq(now),
        ))
        .returning(Horoscope::as_returning())
}

#[derive(Debug, Error)]
pub enum GetHoroscopeError {
    #[error("GetHoroscope: {source}")]
    GetHoroscope{
        #[from]
        source: diesel::result::Error
    },
}

pub fn get_horoscope(
    conn: &mut PgConnection,
    sign_val: &str,
    date_val: NaiveDate
) -> Result<Option<Horoscope>, GetHoroscopeError> {
    horoscopes
        .filter(sign.eq(sign_val))
        .filter(date.eq(date_val))
        .select(Horoscope::as_select())
        .first::<Horoscope>(conn)
        .optional()
        .map_err(|source| GetHoroscopeError::GetHoroscope{ source })
}

#[derive(Debug, Error)]
pub enum DeleteHoroscopesNotOnError {
    #[error("DeleteHoroscopesNotOn: {source}")]
    DeleteHoroscopesNotOn{
        #[from]
        source: diesel::result::Error
    },
}

/// Removes every row whose date differs from `date_val`; returns the count.
pub fn delete_horoscopes_not_on(
    conn: &mut PgConnection,
    date_val: NaiveDate
) -> Result<usize, DeleteHoroscopesNotOnError> {
    diesel::delete(horoscopes.filter(date.ne(date_val)))
        .execute(conn)
        .map_err(|source| DeleteHoroscopesNotOnError::DeleteHoroscopesNotOn{ source })
}
