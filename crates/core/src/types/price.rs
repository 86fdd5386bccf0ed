//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] in the currency's standard unit
//! (dollars, not cents) and only turned into strings at the presentation
//! edge via [`Price::display`].

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a US dollar price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Sum a sequence of amounts into a single price.
    ///
    /// An empty sequence yields a zero price.
    #[must_use]
    pub fn total<I>(amounts: I, currency_code: CurrencyCode) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let amount = amounts.into_iter().fold(Decimal::ZERO, |acc, a| acc + a);
        Self::new(amount, currency_code)
    }

    /// Format for display with the currency symbol, thousands grouping and
    /// two fraction digits (e.g., `$1,234.50`, `-$3.00`).
    ///
    /// Rounds half away from zero, matching en-US currency formatting.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        format!(
            "{sign}{symbol}{whole}.{fraction}",
            symbol = self.currency_code.symbol(),
            whole = group_thousands(whole),
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol as rendered by an en-US formatter.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::CAD => "CA$",
            Self::AUD => "A$",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap_or_default()
    }

    #[test]
    fn test_display_small_amount() {
        assert_eq!(Price::usd(dec("9.5")).display(), "$9.50");
        assert_eq!(Price::usd(Decimal::ZERO).display(), "$0.00");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::usd(dec("1234.5")).display(), "$1,234.50");
        assert_eq!(Price::usd(dec("1234567.891")).display(), "$1,234,567.89");
        assert_eq!(Price::usd(dec("100000")).display(), "$100,000.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(dec("2.005")).display(), "$2.01");
        assert_eq!(Price::usd(dec("-2.005")).display(), "-$2.01");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Price::usd(dec("-3")).display(), "-$3.00");
    }

    #[test]
    fn test_display_other_currency() {
        assert_eq!(Price::new(dec("12"), CurrencyCode::EUR).display(), "€12.00");
    }

    #[test]
    fn test_total_sums_amounts() {
        let total = Price::total([dec("10.00"), dec("15.50")], CurrencyCode::USD);
        assert_eq!(total.display(), "$25.50");
    }

    #[test]
    fn test_total_of_nothing_is_zero() {
        let total = Price::total(Vec::new(), CurrencyCode::USD);
        assert_eq!(total.display(), "$0.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
