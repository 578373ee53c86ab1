//! Arbitrary-precision token amounts.
//!
//! On-chain supplies routinely exceed `u128` once multiplied by elapsed
//! milliseconds, so every amount is carried as a `BigInt`. Addition,
//! subtraction and multiplication are exact; division truncates toward
//! zero, the same rounding the distributor contract applies.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};
use core::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Num, Signed, Zero};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::errors::DistroError;

/// Largest integer an IEEE-754 double represents exactly (2^53).
pub const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Token amount in base units (wei).
///
/// Signed so that reconciliation results such as an over-claimed balance can
/// be represented; parsed inputs are always non-negative.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(BigInt);

impl TokenAmount {
    pub fn zero() -> Self {
        TokenAmount(BigInt::zero())
    }

    pub fn from_bigint(value: BigInt) -> Self {
        TokenAmount(value)
    }

    /// Parse a non-negative decimal (`"1000"`) or hex (`"0x3e8"`) string.
    pub fn parse(input: &str) -> Result<Self, DistroError> {
        let trimmed = input.trim();
        if let Some(rest) = trimmed.strip_prefix('-') {
            if rest.starts_with('-') {
                return Err(DistroError::InvalidAmount);
            }
            // "-5" is a well-formed but negative amount, "-abc" is garbage.
            return match Self::parse(rest) {
                Ok(v) if v.is_zero() => Ok(v),
                Ok(_) => Err(DistroError::NegativeAmount),
                Err(err) => Err(err),
            };
        }

        let (digits, radix) = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (trimmed, 10),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(DistroError::InvalidAmount);
        }

        BigInt::from_str_radix(digits, radix)
            .map(TokenAmount)
            .map_err(|_| DistroError::InvalidAmount)
    }

    /// Accept a JSON float only when it holds an integer that survived the
    /// trip through a double unchanged.
    pub fn from_f64(value: f64) -> Result<Self, DistroError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DistroError::InvalidAmount);
        }
        if value < 0.0 {
            return Err(DistroError::NegativeAmount);
        }
        if value > MAX_EXACT_FLOAT_INT {
            return Err(DistroError::InvalidAmount);
        }
        Ok(TokenAmount(BigInt::from(value as u64)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    /// Lossless conversion for decimal rate math.
    pub fn to_decimal(&self) -> BigDecimal {
        BigDecimal::new(self.0.clone(), 0)
    }

    /// `self * numerator / denominator` with truncation toward zero.
    ///
    /// Returns `None` when `denominator` is zero.
    pub fn mul_div(&self, numerator: &BigInt, denominator: &BigInt) -> Option<TokenAmount> {
        if denominator.is_zero() {
            return None;
        }
        if self.0.is_zero() || numerator.is_zero() {
            return Some(TokenAmount::zero());
        }
        Some(TokenAmount((&self.0 * numerator) / denominator))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TokenAmount {
    type Err = DistroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenAmount::parse(s)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        TokenAmount(BigInt::from(value))
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        TokenAmount(BigInt::from(value))
    }
}

impl From<i64> for TokenAmount {
    fn from(value: i64) -> Self {
        TokenAmount(BigInt::from(value))
    }
}

impl From<BigInt> for TokenAmount {
    fn from(value: BigInt) -> Self {
        TokenAmount(value)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl<'a> $trait<&'a TokenAmount> for &'a TokenAmount {
            type Output = TokenAmount;

            fn $method(self, rhs: &'a TokenAmount) -> TokenAmount {
                TokenAmount($trait::$method(&self.0, &rhs.0))
            }
        }

        impl $trait for TokenAmount {
            type Output = TokenAmount;

            fn $method(self, rhs: TokenAmount) -> TokenAmount {
                TokenAmount($trait::$method(self.0, rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
// Truncates toward zero and panics on a zero divisor, like `BigInt`.
forward_binop!(Div, div);

impl Neg for TokenAmount {
    type Output = TokenAmount;

    fn neg(self) -> TokenAmount {
        TokenAmount(-self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AmountInput::deserialize(deserializer)?
            .into_amount()
            .map_err(de::Error::custom)
    }
}

/// Raw amount as it arrives from the subgraph or a caller.
#[derive(Clone, Debug, PartialEq)]
pub enum AmountInput {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    /// JSON number literal, kept as its exact decimal text.
    Number(Number),
    Text(String),
    Amount(TokenAmount),
}

impl<'de> Deserialize<'de> for AmountInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(AmountInput::Number(n)),
            Value::String(s) => Ok(AmountInput::Text(s)),
            other => Err(de::Error::custom(format_args!(
                "expected a token amount, found {other}"
            ))),
        }
    }
}

impl AmountInput {
    pub fn into_amount(self) -> Result<TokenAmount, DistroError> {
        match self {
            AmountInput::Unsigned(v) => Ok(TokenAmount::from(v)),
            AmountInput::Signed(v) if v < 0 => Err(DistroError::NegativeAmount),
            AmountInput::Signed(v) => Ok(TokenAmount::from(v)),
            AmountInput::Float(v) => TokenAmount::from_f64(v),
            AmountInput::Number(n) => number_to_amount(&n),
            AmountInput::Text(s) => TokenAmount::parse(&s),
            AmountInput::Amount(a) if a.is_negative() => Err(DistroError::NegativeAmount),
            AmountInput::Amount(a) => Ok(a),
        }
    }
}

/// Integer literals of any length are read exactly; fraction or exponent
/// forms go through `f64` and must hold an exact integer.
fn number_to_amount(n: &Number) -> Result<TokenAmount, DistroError> {
    let text = n.to_string();
    if !text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        return TokenAmount::parse(&text);
    }
    n.as_f64()
        .ok_or(DistroError::InvalidAmount)
        .and_then(TokenAmount::from_f64)
}

impl From<TokenAmount> for AmountInput {
    fn from(value: TokenAmount) -> Self {
        AmountInput::Amount(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_owned())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Unsigned(value)
    }
}

impl From<u128> for AmountInput {
    fn from(value: u128) -> Self {
        AmountInput::Amount(TokenAmount::from(value))
    }
}
