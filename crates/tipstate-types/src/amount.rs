use num_bigint::BigUint;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::AddAssign;

/// Arbitrary-precision currency amount.
///
/// Wraps an unsigned big integer and serializes as a canonical decimal
/// string (no exponent, no sign, no leading zeros), so balances at
/// arbitrary token denominations survive JSON round trips without
/// precision loss. Raw input may be a JSON integer or a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Amount(BigUint::default())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::default()
    }

    /// Parse a plain base-10 digit string. Rejects signs, exponents,
    /// separators, and the empty string.
    pub fn from_decimal(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        BigUint::parse_bytes(s.as_bytes(), 10).map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigUint::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(BigUint::from(value))
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer or decimal string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Amount::from(v))
            }

            fn visit_u128<E>(self, v: u128) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Amount::from(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(Amount::from)
                    .map_err(|_| E::custom(format!("negative amount: {}", v)))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Amount::from_decimal(v)
                    .ok_or_else(|| E::custom(format!("invalid decimal amount: {:?}", v)))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// A (token contract, amount) pair as carried by token tips and the
/// per-URL claims ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: String,
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_canonical_decimal() {
        assert_eq!(Amount::zero().to_string(), "0");
        assert_eq!(Amount::from(10000u64).to_string(), "10000");

        // Larger than u128, must survive without truncation or exponent
        let huge = "340282366920938463463374607431768211456999";
        assert_eq!(Amount::from_decimal(huge).unwrap().to_string(), huge);
    }

    #[test]
    fn test_from_decimal_rejects_non_digits() {
        assert!(Amount::from_decimal("").is_none());
        assert!(Amount::from_decimal("-5").is_none());
        assert!(Amount::from_decimal("1e18").is_none());
        assert!(Amount::from_decimal("1_000").is_none());
    }

    #[test]
    fn test_add_assign() {
        let mut total = Amount::from(100u64);
        total += &Amount::from(77u64);
        assert_eq!(total, Amount::from(177u64));
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: Amount = serde_json::from_str("333").unwrap();
        let from_string: Amount = serde_json::from_str("\"333\"").unwrap();
        assert_eq!(from_number, from_string);

        assert!(serde_json::from_str::<Amount>("-1").is_err());
        assert!(serde_json::from_str::<Amount>("\"1.5\"").is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Amount::from(123456u64)).unwrap();
        assert_eq!(json, "\"123456\"");
    }
}
