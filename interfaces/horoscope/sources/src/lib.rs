//! HTTP bindings for the third-party daily horoscope providers.
//!
//! Each provider is a `fetch_*` call returning the raw body and status, plus a
//! `parse_*` function turning a body into the horoscope text, if any.

pub mod index;
