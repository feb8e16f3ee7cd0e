//! Registration form data and validation.
//!
//! [`validate_sign_up`] checks a snapshot of the form against static rules and
//! returns every problem at once, keyed by field, so the form can show them
//! next to the inputs. An empty result means the form is acceptable.
//!
//! # Example
//!
//! ```
//! use cartwheel_core::{SignUpData, SignUpField, validate_sign_up};
//! use chrono::NaiveDate;
//!
//! let data = SignUpData {
//!     email: "a@b.com".into(),
//!     password: "Abcdefg1".into(),
//!     first_name: "Jane".into(),
//!     last_name: "Doe".into(),
//!     bd: "2000-01-01".into(),
//!     billing_street: "Main".into(),
//!     billing_city: "Berlin".into(),
//!     billing_postal_code: "10115".into(),
//!     same_address: true,
//!     ..SignUpData::default()
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! assert!(validate_sign_up(&data, Some("Germany"), None, today).is_empty());
//!
//! let errors = validate_sign_up(&SignUpData::default(), None, None, today);
//! assert_eq!(errors.get(SignUpField::Email), Some("Email is required"));
//! ```

use core::fmt;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Country, Email, EmailError};

/// Minimum customer age in years.
pub const MIN_AGE_YEARS: i32 = 13;

/// Minimum password length, counted in UTF-16 code units as browsers do.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("Invalid regex"));
static CITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("Invalid regex"));

/// Registration form contents, as typed by the user.
///
/// `Debug` is implemented manually to redact the password.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Birth date as `YYYY-MM-DD`.
    pub bd: String,
    pub billing_street: String,
    pub billing_city: String,
    pub billing_postal_code: String,
    pub billing_country: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
    /// Use the billing address for shipping too.
    pub same_address: bool,
    /// Make the billing address the customer's default billing address.
    pub default_billing_address: bool,
    /// Make the shipping address the customer's default shipping address.
    pub default_shipping_address: bool,
}

impl fmt::Debug for SignUpData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpData")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("bd", &self.bd)
            .field("billing_street", &self.billing_street)
            .field("billing_city", &self.billing_city)
            .field("billing_postal_code", &self.billing_postal_code)
            .field("billing_country", &self.billing_country)
            .field("shipping_street", &self.shipping_street)
            .field("shipping_city", &self.shipping_city)
            .field("shipping_postal_code", &self.shipping_postal_code)
            .field("shipping_country", &self.shipping_country)
            .field("same_address", &self.same_address)
            .field("default_billing_address", &self.default_billing_address)
            .field("default_shipping_address", &self.default_shipping_address)
            .finish()
    }
}

/// A form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignUpField {
    Email,
    Password,
    FirstName,
    LastName,
    Bd,
    BillingStreet,
    BillingCity,
    BillingPostalCode,
    BillingCountry,
    ShippingStreet,
    ShippingCity,
    ShippingPostalCode,
    ShippingCountry,
}

impl SignUpField {
    /// Form field name (matches the serialized key).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Bd => "bd",
            Self::BillingStreet => "billingStreet",
            Self::BillingCity => "billingCity",
            Self::BillingPostalCode => "billingPostalCode",
            Self::BillingCountry => "billingCountry",
            Self::ShippingStreet => "shippingStreet",
            Self::ShippingCity => "shippingCity",
            Self::ShippingPostalCode => "shippingPostalCode",
            Self::ShippingCountry => "shippingCountry",
        }
    }
}

impl fmt::Display for SignUpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors keyed by field, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignUpErrors(BTreeMap<SignUpField, &'static str>);

impl SignUpErrors {
    /// `true` when the form is acceptable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error message for a field, if any.
    #[must_use]
    pub fn get(&self, field: SignUpField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Whether a field has an error.
    #[must_use]
    pub fn contains(&self, field: SignUpField) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterate over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (SignUpField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: SignUpField, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// Check a postal code against the format of a country given by name.
///
/// Unknown countries (including an empty name) never validate.
#[must_use]
pub fn validate_postal_code(postal_code: &str, country: &str) -> bool {
    country
        .parse::<Country>()
        .is_ok_and(|country| country.accepts_postal_code(postal_code))
}

/// Validate a registration form snapshot.
///
/// `billing_country` and `shipping_country` are the countries picked in the
/// selectors (`None` when nothing is selected). `today` anchors the minimum
/// age check.
#[must_use]
pub fn validate_sign_up(
    data: &SignUpData,
    billing_country: Option<&str>,
    shipping_country: Option<&str>,
    today: NaiveDate,
) -> SignUpErrors {
    let mut errors = SignUpErrors::default();
    let same = data.same_address;

    match Email::parse(&data.email) {
        Ok(_) => {}
        Err(EmailError::Empty) => errors.insert(SignUpField::Email, "Email is required"),
        Err(EmailError::InvalidFormat) => {
            errors.insert(SignUpField::Email, "Invalid email format");
        }
    }

    if data.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            SignUpField::Password,
            "Password should have at least 8 characters",
        );
    } else if !is_strong_password(&data.password) {
        errors.insert(
            SignUpField::Password,
            "Password should have at least one uppercase letter, one lowercase letter, and one number",
        );
    }

    if data.first_name.is_empty() {
        errors.insert(SignUpField::FirstName, "First name is required");
    } else if !NAME_PATTERN.is_match(&data.first_name) {
        errors.insert(
            SignUpField::FirstName,
            "First name should only contain letters",
        );
    }

    if data.last_name.is_empty() {
        errors.insert(SignUpField::LastName, "Last name is required");
    } else if !NAME_PATTERN.is_match(&data.last_name) {
        errors.insert(SignUpField::LastName, "Last name should only contain letters");
    }

    if data.bd.is_empty() {
        errors.insert(SignUpField::Bd, "Date of Birth is required");
    } else {
        match NaiveDate::parse_from_str(&data.bd, "%Y-%m-%d") {
            Ok(birth_date) => {
                if min_age_date(today).is_none_or(|min| birth_date > min) {
                    errors.insert(SignUpField::Bd, "You must be at least 13 years old");
                }
            }
            Err(_) => errors.insert(SignUpField::Bd, "Invalid date of birth"),
        }
    }

    if data.billing_street.is_empty() {
        errors.insert(SignUpField::BillingStreet, "Street is required");
    }
    if data.shipping_street.is_empty() && !same {
        errors.insert(SignUpField::ShippingStreet, "Street is required");
    }

    // The billing address is the one kept when `same_address` is set, so its
    // city format is checked either way.
    if data.billing_city.is_empty() && !same {
        errors.insert(SignUpField::BillingCity, "City is required");
    } else if !CITY_PATTERN.is_match(&data.billing_city) {
        errors.insert(
            SignUpField::BillingCity,
            "City should only contain letters and spaces",
        );
    }
    if data.shipping_city.is_empty() && !same {
        errors.insert(SignUpField::ShippingCity, "City is required");
    } else if !same && !CITY_PATTERN.is_match(&data.shipping_city) {
        errors.insert(
            SignUpField::ShippingCity,
            "City should only contain letters and spaces",
        );
    }

    if !same {
        if !validate_postal_code(&data.billing_postal_code, billing_country.unwrap_or("")) {
            errors.insert(
                SignUpField::BillingPostalCode,
                "Invalid postal code format for the selected country",
            );
        }
        if !validate_postal_code(&data.shipping_postal_code, shipping_country.unwrap_or("")) {
            errors.insert(
                SignUpField::ShippingPostalCode,
                "Invalid postal code format for the selected country",
            );
        }
        if is_unselected(billing_country) {
            errors.insert(SignUpField::BillingCountry, "Country is required");
        }
        if is_unselected(shipping_country) {
            errors.insert(SignUpField::ShippingCountry, "Country is required");
        }
    }

    errors
}

fn is_unselected(country: Option<&str>) -> bool {
    country.is_none_or(str::is_empty)
}

/// At least one digit, one lowercase and one uppercase ASCII letter.
fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
}

/// Latest birth date that is old enough: `today` minus [`MIN_AGE_YEARS`],
/// same month and day. Feb 29 rolls over to Mar 1 in non-leap years.
fn min_age_date(today: NaiveDate) -> Option<NaiveDate> {
    let year = today.year() - MIN_AGE_YEARS;
    today
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

// =============================================================================
// Customer draft
// =============================================================================

/// An address in a customer sign-up draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    pub street_name: String,
    pub city: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 code.
    pub country: &'static str,
}

/// Customer sign-up payload for the commerce API.
///
/// Default address fields are indexes into `addresses`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub addresses: Vec<AddressDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_billing_address: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_shipping_address: Option<usize>,
}

impl fmt::Debug for CustomerDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerDraft")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("addresses", &self.addresses)
            .field("default_billing_address", &self.default_billing_address)
            .field("default_shipping_address", &self.default_shipping_address)
            .finish()
    }
}

impl SignUpData {
    /// Build the sign-up payload from validated form data.
    ///
    /// With `same_address` set only the billing address is sent and it serves
    /// as both; otherwise billing is `addresses[0]` and shipping is
    /// `addresses[1]`. `shipping_country` is ignored with `same_address`.
    #[must_use]
    pub fn customer_draft(
        &self,
        billing_country: Country,
        shipping_country: Country,
    ) -> CustomerDraft {
        let mut addresses = vec![AddressDraft {
            street_name: self.billing_street.clone(),
            city: self.billing_city.clone(),
            postal_code: self.billing_postal_code.clone(),
            country: billing_country.iso_code(),
        }];

        let shipping_index = if self.same_address {
            0
        } else {
            addresses.push(AddressDraft {
                street_name: self.shipping_street.clone(),
                city: self.shipping_city.clone(),
                postal_code: self.shipping_postal_code.clone(),
                country: shipping_country.iso_code(),
            });
            1
        };

        CustomerDraft {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.bd.clone(),
            addresses,
            default_billing_address: self.default_billing_address.then_some(0),
            default_shipping_address: self.default_shipping_address.then_some(shipping_index),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_same_address() -> SignUpData {
        SignUpData {
            email: "a@b.com".into(),
            password: "Abcdefg1".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            bd: "2000-01-01".into(),
            billing_street: "Main".into(),
            billing_city: "Berlin".into(),
            billing_postal_code: "10115".into(),
            billing_country: "Germany".into(),
            same_address: true,
            ..SignUpData::default()
        }
    }

    fn valid_separate_addresses() -> SignUpData {
        SignUpData {
            shipping_street: "Rue de Rivoli".into(),
            shipping_city: "Paris".into(),
            shipping_postal_code: "75001".into(),
            shipping_country: "France".into(),
            same_address: false,
            ..valid_same_address()
        }
    }

    #[test]
    fn test_valid_same_address_has_no_errors() {
        let errors = validate_sign_up(&valid_same_address(), Some("Germany"), None, today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_valid_separate_addresses_has_no_errors() {
        let errors = validate_sign_up(
            &valid_separate_addresses(),
            Some("Germany"),
            Some("France"),
            today(),
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let errors = validate_sign_up(&SignUpData::default(), None, None, today());
        assert_eq!(errors.get(SignUpField::Email), Some("Email is required"));
        assert_eq!(
            errors.get(SignUpField::Password),
            Some("Password should have at least 8 characters")
        );
        assert_eq!(errors.get(SignUpField::FirstName), Some("First name is required"));
        assert_eq!(errors.get(SignUpField::LastName), Some("Last name is required"));
        assert_eq!(errors.get(SignUpField::Bd), Some("Date of Birth is required"));
        assert_eq!(errors.get(SignUpField::BillingStreet), Some("Street is required"));
        assert_eq!(errors.get(SignUpField::ShippingStreet), Some("Street is required"));
        assert_eq!(errors.get(SignUpField::BillingCity), Some("City is required"));
        assert_eq!(errors.get(SignUpField::ShippingCity), Some("City is required"));
        assert_eq!(errors.get(SignUpField::BillingCountry), Some("Country is required"));
        assert_eq!(errors.get(SignUpField::ShippingCountry), Some("Country is required"));
        assert_eq!(errors.len(), 13);
    }

    #[test]
    fn test_email_format() {
        let data = SignUpData {
            email: "user@localhost".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        assert_eq!(errors.get(SignUpField::Email), Some("Invalid email format"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        // Four characters outside the BMP take two units each.
        let data = SignUpData {
            password: "Ab1\u{1F600}\u{1F600}\u{1F600}\u{1F600}".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        assert_eq!(errors.get(SignUpField::Password), None);

        let data = SignUpData {
            password: "Ab1\u{e9}\u{e9}\u{e9}\u{e9}".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        assert_eq!(
            errors.get(SignUpField::Password),
            Some("Password should have at least 8 characters")
        );
    }

    #[test]
    fn test_password_rules() {
        let cases = [
            ("Abc1", "Password should have at least 8 characters"),
            (
                "abcdefg1",
                "Password should have at least one uppercase letter, one lowercase letter, and one number",
            ),
            (
                "ABCDEFG1",
                "Password should have at least one uppercase letter, one lowercase letter, and one number",
            ),
            (
                "Abcdefgh",
                "Password should have at least one uppercase letter, one lowercase letter, and one number",
            ),
        ];
        for (password, expected) in cases {
            let data = SignUpData {
                password: password.into(),
                ..valid_same_address()
            };
            let errors = validate_sign_up(&data, Some("Germany"), None, today());
            assert_eq!(errors.get(SignUpField::Password), Some(expected), "{password}");
        }

        let data = SignUpData {
            password: "1aA-----".into(),
            ..valid_same_address()
        };
        assert!(validate_sign_up(&data, Some("Germany"), None, today()).is_empty());
    }

    #[test]
    fn test_names_letters_only() {
        let data = SignUpData {
            first_name: "Jane2".into(),
            last_name: "O'Neil".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        assert_eq!(
            errors.get(SignUpField::FirstName),
            Some("First name should only contain letters")
        );
        assert_eq!(
            errors.get(SignUpField::LastName),
            Some("Last name should only contain letters")
        );
    }

    #[test]
    fn test_age_boundary() {
        let exactly_thirteen = SignUpData {
            bd: "2011-06-15".into(),
            ..valid_same_address()
        };
        assert!(validate_sign_up(&exactly_thirteen, Some("Germany"), None, today()).is_empty());

        let one_day_short = SignUpData {
            bd: "2011-06-16".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&one_day_short, Some("Germany"), None, today());
        assert_eq!(
            errors.get(SignUpField::Bd),
            Some("You must be at least 13 years old")
        );
    }

    #[test]
    fn test_age_leap_day_rolls_over() {
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            min_age_date(leap_day),
            NaiveDate::from_ymd_opt(2011, 3, 1)
        );
    }

    #[test]
    fn test_unparseable_birth_date() {
        let data = SignUpData {
            bd: "01/01/2000".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        assert_eq!(errors.get(SignUpField::Bd), Some("Invalid date of birth"));
    }

    #[test]
    fn test_same_address_suppresses_shipping_errors() {
        let data = SignUpData {
            shipping_street: String::new(),
            shipping_city: "Paris 1".into(),
            shipping_postal_code: "nope".into(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), Some("Atlantis"), today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_same_address_still_checks_billing_city_format() {
        let data = SignUpData {
            billing_city: String::new(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        assert_eq!(
            errors.get(SignUpField::BillingCity),
            Some("City should only contain letters and spaces")
        );
    }

    #[test]
    fn test_city_format() {
        let data = SignUpData {
            billing_city: "Frankfurt am Main".into(),
            shipping_city: "St-Denis".into(),
            ..valid_separate_addresses()
        };
        let errors = validate_sign_up(&data, Some("Germany"), Some("France"), today());
        assert!(!errors.contains(SignUpField::BillingCity));
        assert_eq!(
            errors.get(SignUpField::ShippingCity),
            Some("City should only contain letters and spaces")
        );
    }

    #[test]
    fn test_postal_code_checked_against_selected_country() {
        let data = SignUpData {
            billing_postal_code: "00-001".into(),
            ..valid_separate_addresses()
        };
        let errors = validate_sign_up(&data, Some("Germany"), Some("France"), today());
        assert_eq!(
            errors.get(SignUpField::BillingPostalCode),
            Some("Invalid postal code format for the selected country")
        );

        let errors = validate_sign_up(&data, Some("Poland"), Some("France"), today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_shipping_country_has_its_own_error() {
        let errors = validate_sign_up(&valid_separate_addresses(), Some("Germany"), None, today());
        assert_eq!(
            errors.get(SignUpField::ShippingCountry),
            Some("Country is required")
        );
        assert!(!errors.contains(SignUpField::ShippingCity));
    }

    #[test]
    fn test_validate_postal_code_table() {
        assert!(validate_postal_code("10115", "Germany"));
        assert!(!validate_postal_code("1011", "Germany"));
        assert!(validate_postal_code("00-001", "Poland"));
        assert!(!validate_postal_code("00001", "Poland"));
        assert!(validate_postal_code("0150", "Norway"));
        assert!(validate_postal_code("1000-001", "Portugal"));
        assert!(!validate_postal_code("10115", "Atlantis"));
        assert!(!validate_postal_code("10115", ""));
    }

    #[test]
    fn test_errors_serialize_with_field_names() {
        let data = SignUpData {
            email: String::new(),
            ..valid_same_address()
        };
        let errors = validate_sign_up(&data, Some("Germany"), None, today());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"email": "Email is required"}));
    }

    #[test]
    fn test_signup_data_camel_case_input() {
        let data: SignUpData = serde_json::from_str(
            r#"{"email":"a@b.com","firstName":"Jane","sameAddress":true,"billingPostalCode":"10115"}"#,
        )
        .unwrap();
        assert_eq!(data.first_name, "Jane");
        assert!(data.same_address);
        assert_eq!(data.billing_postal_code, "10115");
        assert!(data.password.is_empty());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", valid_same_address());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("Abcdefg1"));
    }

    #[test]
    fn test_customer_draft_same_address() {
        let data = SignUpData {
            default_billing_address: true,
            default_shipping_address: true,
            ..valid_same_address()
        };
        let draft = data.customer_draft(Country::Germany, Country::France);
        assert_eq!(draft.addresses.len(), 1);
        assert_eq!(draft.addresses[0].country, "DE");
        assert_eq!(draft.default_billing_address, Some(0));
        assert_eq!(draft.default_shipping_address, Some(0));
    }

    #[test]
    fn test_customer_draft_separate_addresses() {
        let data = SignUpData {
            default_shipping_address: true,
            ..valid_separate_addresses()
        };
        let draft = data.customer_draft(Country::Germany, Country::France);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["addresses"][1]["country"], "FR");
        assert_eq!(json["addresses"][1]["streetName"], "Rue de Rivoli");
        assert_eq!(json["dateOfBirth"], "2000-01-01");
        assert_eq!(json["defaultShippingAddress"], 1);
        assert!(json.get("defaultBillingAddress").is_none());
    }
}
