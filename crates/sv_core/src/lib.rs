//! sv_core: Core types, union declarations, exact ratios, and parameters.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`sv_algo`, `sv_io`, `sv_pipeline`, `sv_report`, `sv_cli`).
//!
//! - Base data: `Group`, `Union`, `UnionType`, `BaseData`
//! - Competing units after union resolution: `EffectiveEntity`
//! - Method tokens: `Method` (D_HONDT, HARE_NIEMEYER, SAINTE_LAGUE_SCHEPERS)
//! - Integer-first numerics: `rounding::Ratio`
//! - Engine knobs: `variables::Params`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod entities;
pub mod variables;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain numerics & parameter domains.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidRatio,
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidRatio => write!(f, "invalid ratio"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}

    /// Invalid input shape. Raised before any allocation starts.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum ConfigurationError {
        NegativeCommitteeSize(i64),
        CommitteeSizeTooLarge(i64),
        /// Two competing entities (groups or unions) share a name.
        DuplicateName(String),
        UnknownGroupIndex { union: String, index: i64 },
        /// A group is listed in more than one FRACTION union.
        MultipleFractionUnions { group: String },
        UnionTooSmall { union: String, members: usize },
        DuplicateUnionMember { union: String, index: usize },
        /// Pooled union weight does not fit the weight type.
        WeightOverflow { union: String },
    }

    impl fmt::Display for ConfigurationError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            use ConfigurationError::*;
            match self {
                NegativeCommitteeSize(n) => write!(f, "committee size must not be negative (got {n})"),
                CommitteeSizeTooLarge(n) => write!(f, "committee size out of range (got {n})"),
                DuplicateName(name) => write!(f, "duplicate name \"{name}\""),
                UnknownGroupIndex { union, index } => {
                    write!(f, "union \"{union}\" references invalid group index {index}")
                }
                MultipleFractionUnions { group } => {
                    write!(f, "group \"{group}\" belongs to more than one fraction union")
                }
                UnionTooSmall { union, members } => {
                    write!(f, "union \"{union}\" needs at least two groups (got {members})")
                }
                DuplicateUnionMember { union, index } => {
                    write!(f, "union \"{union}\" lists group index {index} twice")
                }
                WeightOverflow { union } => write!(f, "pooled weight of union \"{union}\" overflows"),
            }
        }
    }

    impl std::error::Error for ConfigurationError {}
}

pub mod method {
    //! The three apportionment methods and their wire tokens.

    use core::fmt;
    use core::str::FromStr;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// Ord follows declaration order; result maps iterate in this order.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum Method {
        #[cfg_attr(feature = "serde", serde(rename = "D_HONDT"))]
        DHondt,
        #[cfg_attr(feature = "serde", serde(rename = "HARE_NIEMEYER"))]
        HareNiemeyer,
        #[cfg_attr(feature = "serde", serde(rename = "SAINTE_LAGUE_SCHEPERS"))]
        SainteLagueSchepers,
    }

    impl Method {
        pub const ALL: [Method; 3] = [Method::DHondt, Method::HareNiemeyer, Method::SainteLagueSchepers];

        /// Wire token, e.g. `D_HONDT`.
        pub fn token(self) -> &'static str {
            match self {
                Method::DHondt => "D_HONDT",
                Method::HareNiemeyer => "HARE_NIEMEYER",
                Method::SainteLagueSchepers => "SAINTE_LAGUE_SCHEPERS",
            }
        }

        /// Human-readable name used in reports.
        pub fn display_name(self) -> &'static str {
            match self {
                Method::DHondt => "D'Hondt",
                Method::HareNiemeyer => "Hare/Niemeyer",
                Method::SainteLagueSchepers => "Sainte-Laguë/Schepers",
            }
        }
    }

    impl fmt::Display for Method {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.token())
        }
    }

    impl FromStr for Method {
        type Err = String;

        /// Accepts wire tokens and short CLI spellings, case-insensitive.
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let norm: String = s
                .trim()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            match norm.as_str() {
                "dhondt" => Ok(Method::DHondt),
                "hareniemeyer" | "hare" => Ok(Method::HareNiemeyer),
                "saintelagueschepers" | "saintelague" | "sls" => Ok(Method::SainteLagueSchepers),
                _ => Err(format!("unknown method: {s}")),
            }
        }
    }
}

pub mod rounding {
    //! Exact non-negative ratio type and helpers.
    //!
    //! Quotients and remainders are compared as fractions, never as floats,
    //! so a tie is reported only when two values are mathematically equal.

    use crate::errors::CoreError;
    use core::cmp::Ordering;

    /// Reduced fraction with `den > 0`. Structural equality is value equality.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub struct Ratio {
        num: u128,
        den: u128,
    }

    fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        if a == 0 { 1 } else { a }
    }

    impl Ratio {
        pub const ZERO: Ratio = Ratio { num: 0, den: 1 };

        /// Construct a ratio, reducing by GCD.
        pub fn new(num: u128, den: u128) -> Result<Ratio, CoreError> {
            if den == 0 {
                return Err(CoreError::InvalidRatio);
            }
            let g = gcd_u128(num, den);
            Ok(Ratio { num: num / g, den: den / g })
        }

        pub fn from_integer(n: u128) -> Ratio {
            Ratio { num: n, den: 1 }
        }

        #[inline] pub fn is_zero(&self) -> bool { self.num == 0 }

        /// Integer part.
        pub fn floor(&self) -> u128 {
            self.num / self.den
        }

        /// Fractional part in `[0, 1)`.
        pub fn fract(&self) -> Ratio {
            let rem = self.num % self.den;
            if rem == 0 {
                return Ratio::ZERO;
            }
            // gcd(num % den, den) == gcd(num, den) == 1
            Ratio { num: rem, den: self.den }
        }

        pub fn to_f64(&self) -> f64 {
            self.num as f64 / self.den as f64
        }

        /// Round half-up to `decimals` places, computed on integers when it fits.
        pub fn round_to(&self, decimals: u8) -> f64 {
            let scale = match 10u128.checked_pow(decimals as u32) {
                Some(s) => s,
                None => return self.to_f64(),
            };
            match self.num.checked_mul(scale) {
                Some(scaled) => {
                    let q = scaled / self.den;
                    let r = scaled % self.den;
                    let rounded = if r >= self.den - r { q + 1 } else { q };
                    rounded as f64 / scale as f64
                }
                None => {
                    let f = self.to_f64() * scale as f64;
                    f.round() / scale as f64
                }
            }
        }
    }

    impl Ord for Ratio {
        /// Exact comparison. Cross-multiplies when that fits in u128; otherwise
        /// walks the continued-fraction expansion (no overflow, no floats).
        fn cmp(&self, other: &Self) -> Ordering {
            if let (Some(l), Some(r)) = (self.num.checked_mul(other.den), other.num.checked_mul(self.den)) {
                return l.cmp(&r);
            }
            cmp_continued(self.num, self.den, other.num, other.den)
        }
    }

    impl PartialOrd for Ratio {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    /// Compare a/b with c/d (b, d > 0) via integer parts and reciprocal remainders.
    fn cmp_continued(mut a: u128, mut b: u128, mut c: u128, mut d: u128) -> Ordering {
        let mut flipped = false;
        loop {
            let (qa, ra) = (a / b, a % b);
            let (qc, rc) = (c / d, c % d);
            let ord = qa.cmp(&qc);
            if ord != Ordering::Equal {
                return if flipped { ord.reverse() } else { ord };
            }
            let ord = match (ra == 0, rc == 0) {
                (true, true) => Some(Ordering::Equal),
                (true, false) => Some(Ordering::Less),
                (false, true) => Some(Ordering::Greater),
                (false, false) => None,
            };
            if let Some(o) = ord {
                return if flipped { o.reverse() } else { o };
            }
            // ra/b vs rc/d  <=>  d/rc vs b/ra (reversed)
            let (na, nb, nc, nd) = (b, ra, d, rc);
            a = na;
            b = nb;
            c = nc;
            d = nd;
            flipped = !flipped;
        }
    }

}

pub use entities::{BaseData, EffectiveEntity, Group, GroupIndex, Union, UnionType};
pub use errors::{ConfigurationError, CoreError};
pub use method::Method;
pub use rounding::Ratio;
pub use variables::Params;
