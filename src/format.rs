//! Locale-aware number formatting for tooltip lines and axis labels.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format with two decimals and locale digit grouping, e.g. `1,234.50` or `1.234,50`.
pub fn format_value(v: f64, locale_tag: &str) -> String {
    if !v.is_finite() {
        return "N/A".to_string();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let cents = (v.abs() * 100.0).round() as u64;
    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{}{dec_sep}{:02}",
        (cents / 100).to_formatted_string(locale),
        cents % 100
    )
}

/// Whole-number tick label with locale grouping, e.g. `-100` or `2,000`.
pub fn format_tick(v: f64, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    let r = v.round() as i64;
    r.to_formatted_string(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimals_with_grouping() {
        assert_eq!(format_value(610.0, "en"), "610.00");
        assert_eq!(format_value(1234.5, "en"), "1,234.50");
        assert_eq!(format_value(1234.5, "de"), "1.234,50");
        assert_eq!(format_value(-12.346, "en"), "-12.35");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_value(-0.001, "en"), "0.00");
    }

    #[test]
    fn non_finite_values_read_na() {
        assert_eq!(format_value(f64::NAN, "en"), "N/A");
    }

    #[test]
    fn ticks_are_whole_numbers() {
        assert_eq!(format_tick(-100.0, "en"), "-100");
        assert_eq!(format_tick(600.0, "en"), "600");
    }
}
