//! Display formatting for table cells, card values, and tooltips.
//!
//! Numbers get locale-aware grouping (`1,234,567` vs `1.234.567`) and at most three
//! fraction digits; everything else is shown in its natural string form.

use crate::models::Scalar;
use num_format::{Locale, ToFormattedString};

const MAX_FRACTION_DIGITS: u32 = 3;

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

/// Stateless value formatter bound to one locale.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    locale: &'static Locale,
    decimal: char,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Formatter {
    pub fn new(locale_tag: &str) -> Self {
        let (locale, decimal) = map_locale(locale_tag);
        Self { locale, decimal }
    }

    /// Numbers are grouped; text, booleans, and nulls are shown as-is.
    pub fn format_scalar(&self, value: &Scalar) -> String {
        match value {
            Scalar::Number(n) => self.format_number(*n),
            other => other.to_string(),
        }
    }

    pub fn format_number(&self, v: f64) -> String {
        if v.is_nan() {
            return "NaN".to_string();
        }
        if v.is_infinite() {
            return if v > 0.0 { "∞".into() } else { "-∞".into() };
        }

        let scale = 10f64.powi(MAX_FRACTION_DIGITS as i32);
        let scaled_abs = (v.abs() * scale).round();
        // i128 covers ~1.7e38; beyond that grouping is meaningless anyway.
        if scaled_abs >= 1.0e37 {
            return format!("{v:e}");
        }
        let scaled = scaled_abs as i128;
        let unit = 10i128.pow(MAX_FRACTION_DIGITS);
        let (int_part, frac_part) = (scaled / unit, scaled % unit);

        let mut out = String::new();
        if v < 0.0 && scaled != 0 {
            out.push('-');
        }
        out.push_str(&int_part.to_formatted_string(self.locale));
        if frac_part != 0 {
            let digits = format!("{:0width$}", frac_part, width = MAX_FRACTION_DIGITS as usize);
            out.push(self.decimal);
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }
}

/// Format with the default (`en`) locale.
pub fn format_scalar(value: &Scalar) -> String {
    Formatter::default().format_scalar(value)
}
