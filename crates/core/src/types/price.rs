//! Type-safe price representation using decimal arithmetic.
//!
//! Cart totals are accumulated across many additions, so prices use
//! [`rust_decimal::Decimal`] rather than floating point: `9.99 + 9.99 + 9.99`
//! is exactly `29.97`, never `29.970000000000002`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// The amount is in the currency's standard unit (e.g., dollars, not cents).
/// Arithmetic between prices assumes a single currency per cart; the catalog
/// service serves one currency per storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit.
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

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code,
        }
    }

    /// The zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Multiply this price by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            amount: self.amount + rhs.amount,
            currency_code: self.currency_code,
        }
    }
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
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code as a string.
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
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(999, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::new(999, 2));
        assert_eq!(price.display(), "$9.99");
    }

    #[test]
    fn test_times_is_exact() {
        let price = Price::from_cents(999, CurrencyCode::USD);
        assert_eq!(price.times(3).amount, Decimal::new(2997, 2));
    }

    #[test]
    fn test_add() {
        let a = Price::from_cents(1000, CurrencyCode::USD);
        let b = Price::from_cents(500, CurrencyCode::USD);
        assert_eq!((a + b).amount, Decimal::new(1500, 2));
    }

    #[test]
    fn test_serde_amount_is_string() {
        let price = Price::from_cents(999, CurrencyCode::USD);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":"9.99","currencyCode":"USD"}"#);

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
