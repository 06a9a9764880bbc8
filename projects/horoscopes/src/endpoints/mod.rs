pub mod horoscopes;
