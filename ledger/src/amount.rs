//! # Fixed-Point Amounts
//!
//! Money on the Aurum ledger is an arbitrary-precision signed integer scaled
//! by 10^18: the *scaled value*. `1 GOLD` is stored as
//! `1_000_000_000_000_000_000`. No floating point is involved anywhere in the
//! protocol path — [`Amount::to_f64`] exists for display and approximation
//! only, and the packed wire encoding (see [`crate::codec`]) round-trips the
//! scaled integer exactly.
//!
//! Parsing a decimal string with more than 18 fraction digits rounds the 19th
//! digit half-up (away from zero) into the 18th; an `Amount` therefore never
//! carries more precision than its wire form can.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::AMOUNT_PRECISION;

/// Failure to parse an [`Amount`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("malformed amount `{0}`")]
    Parse(String),
}

/// The scaling factor, 10^18. Fits comfortably in an `i64`.
fn scale() -> BigInt {
    BigInt::from(1_000_000_000_000_000_000_i64)
}

/// A fixed-point decimal value with 18 fraction digits.
///
/// The wrapped integer is public on purpose: arithmetic is the caller's
/// business and is performed directly on `value`. The type only guarantees
/// the representation and the codecs around it.
///
/// # Examples
///
/// ```
/// use aurum_ledger::Amount;
///
/// let a = Amount::from_string("1.5").unwrap();
/// assert_eq!(a.to_string(), "1.500000000000000000");
/// assert_eq!(Amount::from_integer(100).integer_part(0), "100");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount {
    /// The scaled value: real value × 10^18.
    pub value: BigInt,
}

impl Amount {
    /// Zero.
    pub fn zero() -> Self {
        Self {
            value: BigInt::zero(),
        }
    }

    /// From a whole number of units: `100` becomes `100.000000000000000000`.
    pub fn from_integer(units: i64) -> Self {
        Self {
            value: BigInt::from(units) * scale(),
        }
    }

    /// From a raw scaled integer: `100` becomes `0.000000000000000100`.
    pub fn from_raw(value: BigInt) -> Self {
        Self { value }
    }

    /// Parses a signed decimal string with any number of fraction digits.
    ///
    /// The 19th and later fraction digits are rounded half-up (away from
    /// zero) into the 18th:
    ///
    /// ```
    /// use aurum_ledger::Amount;
    ///
    /// let a = Amount::from_string("1.000000000000000000999").unwrap();
    /// assert_eq!(a.to_string(), "1.000000000000000001");
    /// ```
    pub fn from_string(s: &str) -> Result<Self, AmountError> {
        let malformed = || AmountError::Parse(s.to_string());

        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (int_digits, frac_digits) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(malformed());
        }
        if !int_digits.bytes().all(|b| b.is_ascii_digit())
            || !frac_digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        // Scaled magnitude: integer digits followed by exactly 18 fraction
        // digits, right-padded with zeros.
        let kept = &frac_digits[..frac_digits.len().min(AMOUNT_PRECISION)];
        let mut scaled = format!("{int_digits}{kept:0<width$}", width = AMOUNT_PRECISION);
        if scaled.is_empty() {
            scaled.push('0');
        }
        let mut value = BigInt::parse_bytes(scaled.as_bytes(), 10).ok_or_else(malformed)?;

        // Round half-up on the magnitude.
        if frac_digits.len() > AMOUNT_PRECISION
            && frac_digits.as_bytes()[AMOUNT_PRECISION] >= b'5'
        {
            value += 1;
        }

        if negative {
            value = -value;
        }
        Ok(Self { value })
    }

    /// Parses a *raw scaled* integer string in the given radix.
    ///
    /// With `radix == 0` the base is auto-detected from the literal prefix:
    /// `0x`/`0X` is hex, `0b`/`0B` binary, `0o`/`0O` or a bare leading zero
    /// octal, anything else decimal. `"100"` therefore becomes
    /// `0.000000000000000100` and `"0x3e8"` becomes `0.000000000000001000`.
    pub fn from_radix_string(s: &str, radix: u32) -> Result<Self, AmountError> {
        let malformed = || AmountError::Parse(s.to_string());

        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (radix, digits) = if radix == 0 {
            match rest.as_bytes() {
                [b'0', b'x' | b'X', ..] => (16, &rest[2..]),
                [b'0', b'b' | b'B', ..] => (2, &rest[2..]),
                [b'0', b'o' | b'O', ..] => (8, &rest[2..]),
                [b'0', _, ..] => (8, &rest[1..]),
                _ => (10, rest),
            }
        } else if (2..=36).contains(&radix) {
            (radix, rest)
        } else {
            return Err(malformed());
        };
        if digits.is_empty() {
            return Err(malformed());
        }

        let mut value = BigInt::parse_bytes(digits.as_bytes(), radix).ok_or_else(malformed)?;
        if negative {
            value = -value;
        }
        Ok(Self { value })
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    /// Absolute integer part as a decimal string, left-zero-padded to at
    /// least `width` characters. Significant digits are never truncated.
    pub fn integer_part(&self, width: usize) -> String {
        let part = (self.value.magnitude() / scale().magnitude()).to_string();
        format!("{part:0>width$}")
    }

    /// Absolute fraction part (as a scaled-integer remainder) rendered the
    /// same way as [`integer_part`](Self::integer_part).
    pub fn fraction_part(&self, width: usize) -> String {
        let part = (self.value.magnitude() % scale().magnitude()).to_string();
        format!("{part:0>width$}")
    }

    /// Lossy conversion for display and approximate math only.
    ///
    /// Truncates to 6 fraction digits first (toward zero), so the result is
    /// stable regardless of how much precision the amount carries.
    pub fn to_f64(&self) -> f64 {
        // 10^12 strips the 12 least significant fraction digits.
        let micro = &self.value / BigInt::from(1_000_000_000_000_i64);
        micro.to_f64().unwrap_or(f64::NAN) / 1e6
    }
}

impl fmt::Display for Amount {
    /// Canonical form: `[-]<integer>.<exactly 18 fraction digits>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value.is_negative() { "-" } else { "" };
        let digits = self.value.magnitude().to_string();
        let padded = format!("{digits:0>width$}", width = AMOUNT_PRECISION + 1);
        let split = padded.len() - AMOUNT_PRECISION;
        write!(f, "{sign}{}.{}", &padded[..split], &padded[split..])
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({self})")
    }
}

// JSON carries the canonical decimal string, never the packed binary form.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Amount::from_string(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        Amount::from_string(s).expect(s)
    }

    #[test]
    fn canonical_rendering() {
        assert_eq!(Amount::from_integer(1).to_string(), "1.000000000000000000");
        assert_eq!(
            Amount::from_integer(123).to_string(),
            "123.000000000000000000"
        );
        assert_eq!(
            Amount::from_raw(BigInt::from(123_456)).to_string(),
            "0.000000000000123456"
        );
        assert_eq!(
            Amount::from_raw(BigInt::from(-666)).to_string(),
            "-0.000000000000000666"
        );
        assert_eq!(amt("0.1").to_string(), "0.100000000000000000");
    }

    #[test]
    fn rendering_of_composed_value() {
        let mut a = Amount::from_raw(BigInt::from(123_456));
        a.value += Amount::from_integer(123_456).value;
        a.value = -a.value;
        assert_eq!(a.to_string(), "-123456.000000000000123456");
    }

    #[test]
    fn nineteenth_digit_rounds_half_up() {
        assert_eq!(
            amt("-123456.000000000000123456444").to_string(),
            "-123456.000000000000123456"
        );
        assert_eq!(
            amt("-123456.000000000000123456999").to_string(),
            "-123456.000000000000123457"
        );
        assert_eq!(
            amt("1.000000000000000000123").to_string(),
            "1.000000000000000000"
        );
    }

    #[test]
    fn malformed_strings_are_errors() {
        for bad in ["", ".", "-", "--1", "1,5", "1.2.3", "abc", "1e3"] {
            assert!(Amount::from_string(bad).is_err(), "should reject {bad:?}");
        }
    }

    #[test]
    fn radix_parsing() {
        let cases = [
            ("01000", 10, "0.000000000000001000"),
            ("003e8", 16, "0.000000000000001000"),
            ("01750", 8, "0.000000000000001000"),
            ("-1000", 0, "-0.000000000000001000"),
            ("-0x3e8", 0, "-0.000000000000001000"),
            ("-01750", 0, "-0.000000000000001000"),
        ];
        for (s, radix, want) in cases {
            assert_eq!(
                Amount::from_radix_string(s, radix).unwrap().to_string(),
                want,
                "input {s:?} radix {radix}"
            );
        }
        assert!(Amount::from_radix_string("0xZZ", 0).is_err());
        assert!(Amount::from_radix_string("", 0).is_err());
    }

    #[test]
    fn integer_and_fraction_parts() {
        let cases: [(&str, usize, usize, &str, &str); 6] = [
            ("0", 10, 18, "0000000000", "000000000000000000"),
            ("-123.456", 0, 18, "123", "456000000000000000"),
            ("0.000000000000000001", 0, 18, "0", "000000000000000001"),
            ("666", 0, 18, "666", "000000000000000000"),
            (
                "616.000000000000000000666",
                10,
                18,
                "0000000616",
                "000000000000000001",
            ),
            (
                "-999999999999999999.111222333444555666444",
                0,
                18,
                "999999999999999999",
                "111222333444555666",
            ),
        ];
        for (s, w1, w2, int, frac) in cases {
            let a = amt(s);
            assert_eq!(a.integer_part(w1), int, "integer of {s}");
            assert_eq!(a.fraction_part(w2), frac, "fraction of {s}");
        }
    }

    #[test]
    fn lossy_float_conversion() {
        let cases = [
            ("1.0000011", 1.000001),
            ("1234.0000019", 1234.000001),
            ("-1234.0000019", -1234.000001),
            ("123123123123.123123", 123123123123.123123),
            ("123123123123.1231231", 123123123123.12312),
            ("-123123123123.1231239", -123123123123.12312),
        ];
        for (s, want) in cases {
            assert_eq!(amt(s).to_f64(), want, "input {s}");
        }
    }

    #[test]
    fn json_roundtrip_uses_decimal_string() {
        let a = amt("-987654321987654321.123456789123456789");
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"-987654321987654321.123456789123456789\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn json_rejects_malformed_string() {
        assert!(serde_json::from_str::<Amount>("\"not money\"").is_err());
        assert!(serde_json::from_str::<Amount>("42").is_err());
    }

    #[test]
    fn json_embedded_in_struct() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Payout {
            gross: Amount,
            net: Amount,
        }
        let p = Payout {
            gross: amt("666"),
            net: amt("-0.25"),
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: Payout = serde_json::from_str(&json).unwrap();
        assert_eq!(back.gross, p.gross);
        assert_eq!(back.net, p.net);
    }
}
