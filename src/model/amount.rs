//! Amount type for handling expense values with an optional currency prefix.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include a currency prefix and commas.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Currency prefixes that are tolerated, and discarded, when parsing an amount.
const CURRENCY_PREFIXES: &[&str] = &["Rs.", "Rs", "$"];

/// Represents an expense amount. Amounts are currency-agnostic, the currency symbol is a display
/// concern handled by `Config::currency`.
///
/// Equality and ordering are numeric, so `500` and `500.00` are the same amount.
///
/// # Examples
///
/// ```
/// # use spendtrack::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("Rs. 1,200.50").unwrap();
/// let b = Amount::from_str("1200.5").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1,200.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError {
    input: String,
    source: Option<rust_decimal::Error>,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountError")
            .field("input", &self.input)
            .field("source", &self.source)
            .finish()
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a number", self.input)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn Error + 'static))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |source| AmountError {
            input: s.to_string(),
            source,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(err(None));
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let without_currency = CURRENCY_PREFIXES
            .iter()
            .find_map(|prefix| unsigned.strip_prefix(prefix))
            .unwrap_or(unsigned)
            .trim_start();

        // Remove commas (thousand separators)
        let without_commas = without_currency.replace(',', "");
        let value = Decimal::from_str(&without_commas).map_err(|e| err(Some(e)))?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        write!(f, "{sign}{}.{fraction:0<2}", group_thousands(whole))
    }
}

/// Inserts a comma between every group of three digits, counting from the right.
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

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // An exact JSON number with trailing zeros dropped, so `500.00` is written as `500`.
        rust_decimal::serde::arbitrary_precision::serialize(&self.0.normalize(), serializer)
    }
}

/// Reads amounts from JSON numbers of any precision, and from strings in the forms `FromStr`
/// accepts.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("an amount as a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Decimal::from_f64(v)
            .map(Amount)
            .ok_or_else(|| E::custom(format!("{v} is not a finite amount")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Amount, A::Error> {
        // serde_json hands exact numbers over as a single-entry map holding the digits
        <Decimal as Deserialize>::deserialize(MapAccessDeserializer::new(map)).map(Amount)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("500").unwrap();
        assert_eq!(amount.value(), dec("500"));
    }

    #[test]
    fn test_parse_with_currency_prefix() {
        assert_eq!(Amount::from_str("Rs. 50.25").unwrap().value(), dec("50.25"));
        assert_eq!(Amount::from_str("Rs50").unwrap().value(), dec("50"));
        assert_eq!(Amount::from_str("$50.00").unwrap().value(), dec("50.00"));
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-5").unwrap();
        assert_eq!(amount.value(), dec("-5"));
        assert!(amount.is_negative());
        assert!(!amount.is_positive());
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  75.5  ").unwrap();
        assert_eq!(amount.value(), dec("75.5"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("   ").is_err());
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("12abc").is_err());
        let err = Amount::from_str("lunch").unwrap_err();
        assert_eq!(err.to_string(), "'lunch' is not a number");
    }

    #[test]
    fn test_zero_is_not_positive_or_negative() {
        let zero = Amount::from_str("0.00").unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Amount::from_str("1234.5").unwrap().to_string(), "1,234.50");
        assert_eq!(Amount::from_str("-60000").unwrap().to_string(), "-60,000.00");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!(Amount::from_str("999").unwrap().to_string(), "999.00");
        assert_eq!(Amount::from_str("0.005").unwrap().to_string(), "0.01");
        assert_eq!(Amount::from_str("-0.001").unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_display_does_not_lose_digits() {
        let max = Amount::from_str("79228162514264337593543950335").unwrap();
        assert_eq!(max.to_string(), "79,228,162,514,264,337,593,543,950,335.00");
        let fine = Amount::from_str("1234567.891").unwrap();
        assert_eq!(fine.to_string(), "1,234,567.89");
    }

    #[test]
    fn test_numeric_equality() {
        assert_eq!(Amount::from_str("500").unwrap(), Amount::from_str("500.00").unwrap());
        assert!(Amount::from_str("30").unwrap() < Amount::from_str("50").unwrap());
    }

    #[test]
    fn test_serialize_whole_as_integer() {
        let amount = Amount::from_str("500").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "500");
    }

    #[test]
    fn test_serialize_fraction_exactly() {
        let amount = Amount::from_str("12.750").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "12.75");
        let precise = Amount::from_str("0.1234567890123456789").unwrap();
        assert_eq!(
            serde_json::to_string(&precise).unwrap(),
            "0.1234567890123456789"
        );
    }

    #[test]
    fn test_json_keeps_every_digit() {
        for text in [
            "0.1234567890123456789",
            "79228162514264337593543950335",
            "9007199254740993",
        ] {
            let amount = Amount::from_str(text).unwrap();
            let json = serde_json::to_string(&amount).unwrap();
            let back: Amount = serde_json::from_str(&json).unwrap();
            assert_eq!(back.value(), amount.value(), "{text}");
        }
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let a: Amount = serde_json::from_str("250").unwrap();
        assert_eq!(a.value(), dec("250"));
        let b: Amount = serde_json::from_str("99.5").unwrap();
        assert_eq!(b.value(), dec("99.5"));
        let c: Amount = serde_json::from_str("\"1,000\"").unwrap();
        assert_eq!(c.value(), dec("1000"));
    }

    #[test]
    fn test_deserialize_rejects_non_numbers() {
        assert!(serde_json::from_str::<Amount>("true").is_err());
        assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = ["100", "200.5", "0.5"].map(|s| Amount::from_str(s).unwrap());
        let total: Amount = amounts.iter().sum();
        assert_eq!(total.value(), dec("301"));
        let empty: Vec<Amount> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Amount>(), Amount::ZERO);
    }
}
