use super::yen::mul_div;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Relative tolerance used when recovering a fraction from a float.
const APPROXIMATION_TOLERANCE: f64 = 1e-6;
const MAX_CONVERGENTS: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShareError {
    #[error("invalid share: {0}")]
    Invalid(String),
    #[error("share denominator cannot be zero: {0}")]
    ZeroDenominator(String),
}

/// Statutory inheritance share held as an exact, reduced fraction.
///
/// Shares are only ever converted to yen at the point an amount is needed,
/// so 1/3 of an estate stays 1/3 until it is multiplied out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Share {
    numer: u64,
    denom: u64,
}

impl Share {
    pub const ZERO: Share = Share { numer: 0, denom: 1 };
    pub const ONE: Share = Share { numer: 1, denom: 1 };

    /// Build a reduced share. Returns `None` for a zero denominator.
    pub fn new(numer: u64, denom: u64) -> Option<Share> {
        if denom == 0 {
            return None;
        }
        Some(Share::reduced(numer as u128, denom as u128))
    }

    fn reduced(numer: u128, denom: u128) -> Share {
        if numer == 0 {
            return Share::ZERO;
        }
        let divisor = gcd(numer, denom);
        Share {
            numer: (numer / divisor) as u64,
            denom: (denom / divisor) as u64,
        }
    }

    pub fn numer(&self) -> u64 {
        self.numer
    }

    pub fn denom(&self) -> u64 {
        self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    /// `1 - self`, saturating at zero.
    pub fn complement(self) -> Share {
        if self.numer >= self.denom {
            return Share::ZERO;
        }
        Share::reduced((self.denom - self.numer) as u128, self.denom as u128)
    }

    /// Split the share evenly between `parts` people. Dividing by zero yields zero.
    pub fn divide_by(self, parts: u64) -> Share {
        if parts == 0 {
            return Share::ZERO;
        }
        Share::reduced(self.numer as u128, self.denom as u128 * parts as u128)
    }

    /// Scale by `numer / denom`.
    pub fn scale(self, numer: u64, denom: u64) -> Share {
        if denom == 0 {
            return Share::ZERO;
        }
        Share::reduced(
            self.numer as u128 * numer as u128,
            self.denom as u128 * denom as u128,
        )
    }

    /// Apply the share to a yen amount without rounding.
    ///
    /// Exact while `amount x numer` fits in a `Decimal`; beyond that the
    /// amount is divided first. Shares above one can still overflow there.
    pub fn of(self, amount: Decimal) -> Decimal {
        if self.is_zero() {
            return Decimal::ZERO;
        }
        mul_div(amount, Decimal::from(self.numer), Decimal::from(self.denom))
    }

    pub fn to_decimal(self) -> Decimal {
        self.of(Decimal::ONE)
    }

    /// Recover a fraction from a float by continued-fraction expansion,
    /// stopping at the first convergent within 1e-6 relative error.
    pub fn approximate(value: f64) -> Share {
        if !value.is_finite() || value <= 0.0 {
            return Share::ZERO;
        }

        let (mut h_prev, mut h) = (0.0_f64, 1.0_f64);
        let (mut k_prev, mut k) = (1.0_f64, 0.0_f64);
        let mut x = value;

        for _ in 0..MAX_CONVERGENTS {
            let a = x.floor();
            let h_next = a * h + h_prev;
            let k_next = a * k + k_prev;
            h_prev = h;
            h = h_next;
            k_prev = k;
            k = k_next;

            if (value - h / k).abs() <= APPROXIMATION_TOLERANCE * value {
                break;
            }
            let remainder = x - a;
            if remainder <= f64::EPSILON {
                break;
            }
            x = 1.0 / remainder;
        }

        log::trace!("approximated {} as {}/{}", value, h, k);
        Share::new(h as u64, k as u64).unwrap_or(Share::ZERO)
    }
}

impl Default for Share {
    fn default() -> Self {
        Share::ZERO
    }
}

impl Add for Share {
    type Output = Share;

    fn add(self, rhs: Share) -> Share {
        let numer = self.numer as u128 * rhs.denom as u128 + rhs.numer as u128 * self.denom as u128;
        let denom = self.denom as u128 * rhs.denom as u128;
        Share::reduced(numer, denom)
    }
}

impl std::iter::Sum for Share {
    fn sum<I: Iterator<Item = Share>>(iter: I) -> Share {
        iter.fold(Share::ZERO, |acc, s| acc + s)
    }
}

impl Ord for Share {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer as u128 * other.denom as u128).cmp(&(other.numer as u128 * self.denom as u128))
    }
}

impl PartialOrd for Share {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl FromStr for Share {
    type Err = ShareError;

    /// Accepts `"n/d"`, a whole number, or a decimal such as `"0.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((numer, denom)) = trimmed.split_once('/') {
            let numer: u64 = numer
                .trim()
                .parse()
                .map_err(|_| ShareError::Invalid(s.to_string()))?;
            let denom: u64 = denom
                .trim()
                .parse()
                .map_err(|_| ShareError::Invalid(s.to_string()))?;
            return Share::new(numer, denom).ok_or_else(|| ShareError::ZeroDenominator(s.to_string()));
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| ShareError::Invalid(s.to_string()))?;
        if value < 0.0 {
            return Err(ShareError::Invalid(s.to_string()));
        }
        Ok(Share::approximate(value))
    }
}

impl Serialize for Share {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShareRepr {
    Text(String),
    Number(f64),
}

impl<'de> Deserialize<'de> for Share {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ShareRepr::deserialize(deserializer)? {
            ShareRepr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            ShareRepr::Number(n) if n < 0.0 => Err(serde::de::Error::custom(format!(
                "share cannot be negative: {n}"
            ))),
            ShareRepr::Number(n) => Ok(Share::approximate(n)),
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
