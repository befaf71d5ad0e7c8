use num_format::{Locale, ToFormattedString};

/// `1234567.891` -> `"1,234,567.89"`. Rounds to cents first so `0.999` becomes
/// `"1.00"` rather than carrying a hundredth into the fraction.
///
/// Amounts must stay within `i64` cents (about 9.2e16); larger values would
/// saturate in the cast.
pub fn format_comma_float(val: f64) -> String {
    debug_assert!(
        (val * 100.0).abs() < i64::MAX as f64,
        "amount {val} exceeds the formattable range"
    );
    let cents = (val * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{sign}{}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

pub fn format_currency(val: f64) -> String {
    format!("{} $", format_comma_float(val))
}
