pub mod date_utils;
pub mod number_format;

pub use date_utils::{format_short_date, period_range_text, today_local};
pub use number_format::{format_grouped, format_value, format_with_affix};
