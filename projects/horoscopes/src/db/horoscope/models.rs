use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use crate::db::schema::horoscopes;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = horoscopes)]
pub struct Horoscope {
    pub sign: String,
    pub date: NaiveDate,
    pub text: String,
    pub translated_text: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = horoscopes)]
pub struct NewHoroscope<'a> {
    pub sign: &'a str,
    pub date: NaiveDate,
    pub text: &'a str,
    pub translated_text: &'a str,
}
