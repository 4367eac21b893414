//! Formatting helpers shared by the tellerweb crates

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to two places and render with exactly two decimals.
///
/// `100.5` becomes `"100.50"`, `75` becomes `"75.00"`.
pub fn fixed2(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// `{symbol}{amount:.2}`, with a leading minus kept in front of the symbol
pub fn money(symbol: &str, amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}{}", symbol, fixed2(amount.abs()))
    } else {
        format!("{}{}", symbol, fixed2(amount))
    }
}

/// Money with an explicit `+`/`-` sign prefix
pub fn signed_money(sign: char, symbol: &str, amount: Decimal) -> String {
    format!("{}{}{}", sign, symbol, fixed2(amount))
}

/// Last four characters of an account or card number
pub fn last4(number: &str) -> &str {
    let count = number.chars().count();
    if count <= 4 {
        return number;
    }
    let skip = count - 4;
    let start = number
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &number[start..]
}

/// Escape text for inclusion in HTML element content or attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fixed2() {
        assert_eq!(fixed2(dec("100.5")), "100.50");
        assert_eq!(fixed2(dec("75")), "75.00");
        assert_eq!(fixed2(dec("0.125")), "0.13");
        assert_eq!(fixed2(dec("2.004")), "2.00");
    }

    #[test]
    fn test_money() {
        assert_eq!(money("$", dec("1500")), "$1500.00");
        assert_eq!(money("$", dec("-20.1")), "-$20.10");
        assert_eq!(signed_money('+', "$", dec("100.5")), "+$100.50");
    }

    #[test]
    fn test_last4() {
        assert_eq!(last4("1234567890"), "7890");
        assert_eq!(last4("12"), "12");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }
}
