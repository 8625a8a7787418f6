//! Text scanning for budget requests: category mentions and amounts.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

use super::categories::CategoryDef;

static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();

/// Digits with optional `,` thousands groups and an optional fraction, e.g.
/// `500000`, `1,250,000`, `99.50`. The whole fraction belongs to the match so
/// `12.345` never leaves a stray `5` behind.
fn amount_regex() -> &'static Regex {
    AMOUNT_RE.get_or_init(|| Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?").expect("valid amount regex"))
}

/// Numeric literals in order of appearance. Fractions longer than two
/// digits are rounded to cents.
pub fn extract_amounts(text: &str) -> VecDeque<f64> {
    amount_regex()
        .find_iter(text)
        .filter_map(|m| parse_amount(m.as_str()))
        .collect()
}

fn parse_amount(literal: &str) -> Option<f64> {
    let value = literal.replace(',', "").parse::<f64>().ok()?;
    let cents = literal
        .split_once('.')
        .map_or(true, |(_, fraction)| fraction.len() <= 2);
    Some(if cents { value } else { (value * 100.0).round() / 100.0 })
}

/// Categories whose keywords appear in `text`, in table order.
pub fn mentioned_categories<'a>(table: &'a [CategoryDef], text: &str) -> Vec<&'a CategoryDef> {
    let normalized = text.to_lowercase();
    table.iter().filter(|def| def.is_mentioned_in(&normalized)).collect()
}
