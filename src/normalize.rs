// normalize.rs
//
// Field normalizers applied by every adapter before a record is emitted.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

/// Mis-decoded Latin-1/UTF-8 byte sequences that show up in scraped text.
static ENCODING_ARTIFACTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ã‚Â©ª«¬®°±²³µ¶·¸¹º»¼½¾¿]").expect("artifact pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Strips encoding artifacts, collapses whitespace runs to one space and trims.
pub fn clean_text(text: &str) -> String {
    let stripped = ENCODING_ARTIFACTS.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Keeps only digits and thousands-separator commas.
pub fn extract_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect()
}

/// Re-renders an all-digit value (commas ignored) with comma grouping.
/// Anything else comes back untouched.
pub fn format_price(price: &str) -> String {
    let digits: String = price.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return price.to_string();
    }

    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };

    let mut grouped = String::with_capacity(significant.len() + significant.len() / 3);
    for (i, c) in significant.chars().enumerate() {
        if i > 0 && (significant.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Parses a size-like value, returning 0.0 for missing, empty, non-numeric,
/// negative or non-finite input.
pub fn to_float_safe(value: Option<&str>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };

    let without_commas: String = value.chars().filter(|c| *c != ',').collect();
    match without_commas.trim().parse::<f64>() {
        // `+ 0.0` folds -0.0 into 0.0
        Ok(v) if v.is_finite() && v >= 0.0 => v + 0.0,
        _ => 0.0,
    }
}

/// Builds the display price: `"{currency} 1,250,000"`, or `"N/A"` when the raw
/// value carries no usable amount.
pub fn price_with_currency(currency: &str, raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "N/A".to_string();
    };

    let cleaned = extract_numeric(raw);
    if !cleaned.chars().any(|c| c.is_ascii_digit() && c != '0') {
        return "N/A".to_string();
    }

    format!("{currency} {}", format_price(&cleaned))
}

/// Resolves `href` against the source's base URL. Only http(s) results are accepted.
pub fn absolute_link(base: &Url, href: &str) -> Option<String> {
    let joined = base.join(href.trim()).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}

/// Text form of a scalar JSON value; `None` for null, objects and arrays.
///
/// Whole floats render without a fractional part so `1500000.0` does not turn
/// into `15000000` once non-digits are stripped.
pub fn json_scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f.abs() < 1e15 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
