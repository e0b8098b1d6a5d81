//! Yen formatting that mirrors `Intl.NumberFormat("ja-JP", { currency: "JPY" })`.
//!
//! JPY carries no minor units, so display amounts round to whole yen with
//! halves rounded away from zero, exactly as the browser formatter does.

pub const YEN_SYMBOL: &str = "¥";

/// `¥1,234,567` style formatting. The sign of `value` is ignored; callers
/// decide how to present negatives.
pub fn format_yen(value: f64) -> String {
    format!("{}{}", YEN_SYMBOL, group_digits(value.abs().round() as i64))
}

/// Like [`format_yen`] but keeps a leading minus for negative values.
pub fn format_signed_yen(value: f64) -> String {
    if value < 0.0 {
        format!("-{}", format_yen(value))
    } else {
        format_yen(value)
    }
}

/// Inserts thousands separators into a non-negative integer.
pub fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
