//! Countries the storefront ships to, with their postal code formats.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static FIVE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("Invalid regex"));
static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("Invalid regex"));
static UNITED_KINGDOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{1,2}[0-9]{1,2}[A-Za-z]?\s?[0-9][A-Za-z]{2}$").expect("Invalid regex")
});
static POLAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").expect("Invalid regex"));
static PORTUGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{3}$").expect("Invalid regex"));

/// Error returned when a country name is not one the storefront supports.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported country: {0}")]
pub struct CountryError(pub String);

/// A supported shipping/billing country.
///
/// Names match the selector values exactly (`UnitedKingdom` has no space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Germany,
    France,
    UnitedKingdom,
    Italy,
    Spain,
    Ukraine,
    Poland,
    Sweden,
    Norway,
    Finland,
    Denmark,
    Switzerland,
    Austria,
    Greece,
    Portugal,
}

impl Country {
    /// Every supported country, in selector order.
    pub const ALL: [Self; 15] = [
        Self::Germany,
        Self::France,
        Self::UnitedKingdom,
        Self::Italy,
        Self::Spain,
        Self::Ukraine,
        Self::Poland,
        Self::Sweden,
        Self::Norway,
        Self::Finland,
        Self::Denmark,
        Self::Switzerland,
        Self::Austria,
        Self::Greece,
        Self::Portugal,
    ];

    /// Selector name of the country.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Germany => "Germany",
            Self::France => "France",
            Self::UnitedKingdom => "UnitedKingdom",
            Self::Italy => "Italy",
            Self::Spain => "Spain",
            Self::Ukraine => "Ukraine",
            Self::Poland => "Poland",
            Self::Sweden => "Sweden",
            Self::Norway => "Norway",
            Self::Finland => "Finland",
            Self::Denmark => "Denmark",
            Self::Switzerland => "Switzerland",
            Self::Austria => "Austria",
            Self::Greece => "Greece",
            Self::Portugal => "Portugal",
        }
    }

    /// ISO 3166-1 alpha-2 code, as the commerce API expects in addresses.
    #[must_use]
    pub const fn iso_code(self) -> &'static str {
        match self {
            Self::Germany => "DE",
            Self::France => "FR",
            Self::UnitedKingdom => "GB",
            Self::Italy => "IT",
            Self::Spain => "ES",
            Self::Ukraine => "UA",
            Self::Poland => "PL",
            Self::Sweden => "SE",
            Self::Norway => "NO",
            Self::Finland => "FI",
            Self::Denmark => "DK",
            Self::Switzerland => "CH",
            Self::Austria => "AT",
            Self::Greece => "GR",
            Self::Portugal => "PT",
        }
    }

    fn postal_code_pattern(self) -> &'static Regex {
        match self {
            Self::Germany
            | Self::France
            | Self::Italy
            | Self::Spain
            | Self::Ukraine
            | Self::Sweden
            | Self::Finland
            | Self::Greece => &FIVE_DIGITS,
            Self::Norway | Self::Denmark | Self::Switzerland | Self::Austria => &FOUR_DIGITS,
            Self::UnitedKingdom => &UNITED_KINGDOM,
            Self::Poland => &POLAND,
            Self::Portugal => &PORTUGAL,
        }
    }

    /// Check a postal code against this country's format.
    #[must_use]
    pub fn accepts_postal_code(self, postal_code: &str) -> bool {
        self.postal_code_pattern().is_match(postal_code)
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Country {
    type Err = CountryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|country| country.name() == s)
            .ok_or_else(|| CountryError(s.to_owned()))
    }
}
