//! Income extraction from free-text questions.
//!
//! Tolerates the informal notations people actually type: "R20,000",
//! "20000", "R 20k", "7.5k". Patterns are compiled once at program start
//! using `once_cell::sync::Lazy`.

use once_cell::sync::Lazy;
use regex::Regex;

// Shorthand amounts with a "k" suffix, optionally prefixed by a rand
// marker: "20k", "r20k", "r 7.5 k". Tried first; its match wins even when
// a plain digit run appears elsewhere in the text.
static K_SHORTHAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:r\s*)?(\d+(?:\.\d+)?)\s*k\b").unwrap());

// Plain amounts of 4 to 7 digits, optionally prefixed by a rand marker.
// The word boundaries reject longer digit runs outright (phone numbers,
// ID numbers) instead of extracting a 7-digit slice from them.
static PLAIN_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:r\s*)?(\d{4,7})\b").unwrap());

/// Extract a likely gross monthly income from free text.
///
/// Returns the amount in rand if a recognizable pattern is found, `None`
/// otherwise. Only the first match in the text is used. Never panics and
/// never errors; unparseable text is simply a miss.
pub fn extract_income(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    // Normalize: case-insensitive matching, thousands separators removed
    // so "R20,000" reads as a single digit run.
    let t = text.to_lowercase().replace(',', "");

    if let Some(caps) = K_SHORTHAND.captures(&t) {
        // Shorthand matched; the plain pattern is not consulted even if
        // parsing fails here.
        let income = caps[1].parse::<f64>().ok().map(|v| v * 1000.0);
        tracing::debug!(?income, "income extracted via k-shorthand");
        return income;
    }

    let caps = PLAIN_AMOUNT.captures(&t)?;
    let income = caps[1].parse::<f64>().ok();
    tracing::debug!(?income, "income extracted via plain digits");
    income
}
