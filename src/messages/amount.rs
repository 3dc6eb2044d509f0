//! Coin amounts and the `fund` to `nund` conversion.

use std::fmt;
use std::str::FromStr;

use und_types::cosmos::base::v1beta1 as base;

use crate::error::{SignerError, SignerResult};

/// On-chain base denomination.
pub const BASE_DENOM: &str = "nund";
/// Human display denomination, 10^9 `nund`.
pub const DISPLAY_DENOM: &str = "fund";
pub const DISPLAY_EXPONENT: u32 = 9;

/// Amounts must stay strictly below 2^63.
const MAX_AMOUNT: u128 = 1 << 63;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn nund(amount: u128) -> Self {
        Self::new(amount, BASE_DENOM)
    }

    /// Checks the amount bounds and that a denom is present.
    pub fn validate(&self, field: &'static str) -> SignerResult<()> {
        if self.denom.trim().is_empty() {
            return Err(SignerError::MissingRequiredField("denom"));
        }
        check_amount(field, self.amount)
    }

    pub(crate) fn to_proto(&self) -> base::Coin {
        base::Coin {
            denom: self.denom.clone(),
            amount: self.amount.to_string(),
        }
    }

    pub(crate) fn to_cosmos(&self) -> SignerResult<cosmrs::Coin> {
        let denom = self
            .denom
            .parse()
            .map_err(|_| SignerError::invalid_amount("denom", format!("invalid denom {}", self.denom)))?;
        Ok(cosmrs::Coin {
            denom,
            amount: self.amount,
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Parses `"<amount><denom>"`, e.g. `25000000nund` or `1.5fund`.
impl FromStr for Coin {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or(SignerError::MissingRequiredField("denom"))?;
        let (amount, denom) = s.split_at(split);
        parse_amount(amount, denom)
    }
}

/// Reject zero and anything at or above 2^63.
pub fn check_amount(field: &'static str, amount: u128) -> SignerResult<()> {
    if amount == 0 {
        return Err(SignerError::invalid_amount(field, "should be a positive number"));
    }
    if amount >= MAX_AMOUNT {
        return Err(SignerError::invalid_amount(field, "should be less than 2^63"));
    }
    Ok(())
}

/// Turn a user-supplied amount into a base-denom [`Coin`].
///
/// `fund` amounts may carry up to nine decimal places and are scaled to
/// `nund`. Any other denom must be a whole number and passes through as is.
pub fn parse_amount(amount: &str, denom: &str) -> SignerResult<Coin> {
    let amount = amount.trim();
    let denom = denom.trim();
    if denom.is_empty() {
        return Err(SignerError::MissingRequiredField("denom"));
    }

    let coin = if denom.eq_ignore_ascii_case(DISPLAY_DENOM) {
        Coin::nund(parse_decimal(amount)?)
    } else {
        let value = parse_integer(amount)?;
        Coin::new(value, denom)
    };
    check_amount("amount", coin.amount)?;
    Ok(coin)
}

fn parse_integer(digits: &str) -> SignerResult<u128> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SignerError::invalid_amount(
            "amount",
            format!("{digits:?} is not a whole number"),
        ));
    }
    digits
        .parse::<u128>()
        .map_err(|e| SignerError::invalid_amount("amount", e.to_string()))
}

fn parse_decimal(value: &str) -> SignerResult<u128> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    if fraction.len() > DISPLAY_EXPONENT as usize {
        return Err(SignerError::invalid_amount(
            "amount",
            format!("at most {DISPLAY_EXPONENT} decimal places"),
        ));
    }
    let whole = if whole.is_empty() { 0 } else { parse_integer(whole)? };
    let fraction = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<width$}", width = DISPLAY_EXPONENT as usize);
        parse_integer(&padded)?
    };
    whole
        .checked_mul(10u128.pow(DISPLAY_EXPONENT))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| SignerError::invalid_amount("amount", "overflow"))
}
