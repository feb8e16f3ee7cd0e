//! Money amounts as the commerce API reports them.
//!
//! Amounts travel in minor currency units (`centAmount`) together with the
//! number of fraction digits for the currency. Conversion to a decimal value
//! uses `rust_decimal` so no precision is lost on the way to a display string.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Largest scale a [`Decimal`] can carry.
pub const MAX_FRACTION_DIGITS: u32 = 28;

const fn default_fraction_digits() -> u32 {
    2
}

fn fraction_digits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let digits = u32::deserialize(deserializer)?;
    if digits > MAX_FRACTION_DIGITS {
        return Err(serde::de::Error::custom(format!(
            "fractionDigits {digits} exceeds {MAX_FRACTION_DIGITS}"
        )));
    }
    Ok(digits)
}

/// A money amount in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// ISO 4217 currency code (e.g. `EUR`).
    pub currency_code: String,
    /// Amount in the smallest currency unit (e.g. cents).
    pub cent_amount: i64,
    /// Number of digits after the decimal point for this currency.
    #[serde(
        default = "default_fraction_digits",
        deserialize_with = "fraction_digits"
    )]
    pub fraction_digits: u32,
}

impl Money {
    /// Create a money amount with the usual two fraction digits.
    #[must_use]
    pub fn from_cents(cent_amount: i64, currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            cent_amount,
            fraction_digits: default_fraction_digits(),
        }
    }

    /// The amount in the currency's standard unit (e.g. euros, not cents).
    ///
    /// `None` if `fraction_digits` is above [`MAX_FRACTION_DIGITS`].
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        Decimal::try_new(self.cent_amount, self.fraction_digits).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{amount} {}", self.currency_code),
            None => write!(
                f,
                "{}e-{} {}",
                self.cent_amount, self.fraction_digits, self.currency_code
            ),
        }
    }
}
