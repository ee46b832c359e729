use rust_decimal::Decimal;
use scraper::Selector;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::document::{element_text, ParsedDocument};
use crate::extractors::compile;

static PRICE: LazyLock<Selector> = LazyLock::new(|| {
    compile(r#"p[class="price"] span[class="woocommerce-Price-amount amount"]"#)
});

const PERSIAN_ZERO: u32 = '۰' as u32;

/// Normalized amount of the first price span. Empty when absent.
pub fn extract_price(document: &ParsedDocument) -> String {
    document
        .select_first(&PRICE)
        .map(|node| normalize_price(&element_text(node)))
        .unwrap_or_default()
}

fn is_price_digit(c: char) -> bool {
    c.is_ascii_digit() || ('۰'..='۹').contains(&c)
}

/// Strips everything except digits (Latin and Persian) and a single decimal point.
///
/// Only the first `.` that is directly followed by a digit is kept. Currency
/// symbols, grouping commas and stray dots from words like "incl." are dropped.
pub fn normalize_price(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut normalized = String::with_capacity(text.len());
    let mut has_separator = false;

    for (i, &c) in chars.iter().enumerate() {
        if is_price_digit(c) {
            normalized.push(c);
        } else if c == '.' && !has_separator {
            if chars.get(i + 1).is_some_and(|next| is_price_digit(*next)) {
                normalized.push(c);
                has_separator = true;
            }
        }
    }

    normalized
}

/// Maps Persian digits to their ASCII equivalents, leaving everything else as is.
pub fn latin_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('۰'..='۹').contains(&c) {
                char::from_digit(c as u32 - PERSIAN_ZERO, 10).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Parses a normalized price into a decimal, if it holds a usable amount.
pub fn price_decimal(price: &str) -> Option<Decimal> {
    let latin = latin_digits(price);
    if latin.is_empty() {
        return None;
    }
    Decimal::from_str(&latin).ok()
}
