//! variables.rs
//! Engine parameters with safe defaults, plus domain validation.
//!
//! Params never influence which seats are awarded; they select the methods to
//! run and the display precision of recorded values.

use crate::errors::CoreError;
use crate::method::Method;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound for any decimals knob (10^9 keeps scaled ratios well inside u128).
pub const MAX_DECIMALS: u8 = 9;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase", deny_unknown_fields))]
pub struct Params {
    /// Decimals kept for quotient values in the seat order (comparison uses full precision).
    pub order_decimals: u8,
    /// Decimals kept for proportions in report rows.
    pub proportion_decimals: u8,
    /// Methods to run, in output order.
    pub methods: Vec<Method>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            order_decimals: 2,
            proportion_decimals: 3,
            methods: Method::ALL.to_vec(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.order_decimals > MAX_DECIMALS {
            return Err(CoreError::DomainOutOfRange("orderDecimals"));
        }
        if self.proportion_decimals > MAX_DECIMALS {
            return Err(CoreError::DomainOutOfRange("proportionDecimals"));
        }
        if self.methods.is_empty() {
            return Err(CoreError::DomainOutOfRange("methods"));
        }
        for (i, m) in self.methods.iter().enumerate() {
            if self.methods[..i].contains(m) {
                return Err(CoreError::DomainOutOfRange("methods"));
            }
        }
        Ok(())
    }
}
