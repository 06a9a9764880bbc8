pub mod run_daily;
pub mod read_by_sign;
