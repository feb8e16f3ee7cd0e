//! Sign-up form commands.
//!
//! The form file is JSON with the registration form's field names
//! (`email`, `password`, `firstName`, `bd`, `billingCity`, `sameAddress`, ...).
//! Missing fields count as empty. Countries given on the command line win
//! over the `billingCountry`/`shippingCountry` fields in the file.

use std::path::Path;

use cartwheel_core::{Country, CustomerDraft, SignUpData, validate_postal_code, validate_sign_up};
use cartwheel_storefront::auth::TokenRefresher;
use cartwheel_storefront::commerce::CommerceClient;
use cartwheel_storefront::config::StorefrontConfig;
use cartwheel_storefront::storage::{FileStore, Identity, KeyValueStore};

use super::{CliError, print_json, refresher};

fn read_form(path: &Path) -> Result<SignUpData, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// The selected country: the flag if given, else the form's own field.
fn selected<'a>(flag: Option<&'a str>, field: &'a str) -> Option<&'a str> {
    flag.or(Some(field)).filter(|country| !country.is_empty())
}

/// Validate the form, printing the errors (an empty object when valid).
fn check(
    data: &SignUpData,
    billing_country: Option<&str>,
    shipping_country: Option<&str>,
) -> Result<(), CliError> {
    let today = chrono::Local::now().date_naive();
    let errors = validate_sign_up(data, billing_country, shipping_country, today);

    if errors.is_empty() {
        return Ok(());
    }

    for (field, message) in errors.iter() {
        tracing::warn!(field = %field, "{message}");
    }
    print_json(&errors)?;
    Err(CliError::InvalidForm(errors.len()))
}

/// Build the customer draft for a form that passes validation.
fn build_draft(
    data: &SignUpData,
    billing_country: Option<&str>,
    shipping_country: Option<&str>,
) -> Result<CustomerDraft, CliError> {
    let billing_country = selected(billing_country, &data.billing_country);
    let shipping_country = selected(shipping_country, &data.shipping_country);

    check(data, billing_country, shipping_country)?;

    let billing: Country = billing_country
        .ok_or(CliError::MissingCountry("billing"))?
        .parse()?;
    let shipping = if data.same_address {
        billing
    } else {
        shipping_country
            .ok_or(CliError::MissingCountry("shipping"))?
            .parse()?
    };

    Ok(data.customer_draft(billing, shipping))
}

/// Report the validation errors of a sign-up form.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the form is invalid.
pub fn validate(
    path: &Path,
    billing_country: Option<&str>,
    shipping_country: Option<&str>,
) -> Result<(), CliError> {
    let data = read_form(path)?;
    check(
        &data,
        selected(billing_country, &data.billing_country),
        selected(shipping_country, &data.shipping_country),
    )?;

    tracing::info!("Sign-up form is valid");
    print_json(&serde_json::json!({}))
}

/// Print the customer draft for a valid sign-up form.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the form is invalid, or a
/// country is missing or unsupported.
pub fn draft(
    path: &Path,
    billing_country: Option<&str>,
    shipping_country: Option<&str>,
) -> Result<(), CliError> {
    let data = read_form(path)?;
    let draft = build_draft(&data, billing_country, shipping_country)?;
    print_json(&draft)
}

/// Register a customer from a valid sign-up form.
///
/// Uses the access token of the current session (anonymous unless a
/// customer is logged in).
///
/// # Errors
///
/// Returns an error if the form is invalid, configuration is missing, no
/// token is stored, or the API rejects the registration.
pub async fn submit(
    path: &Path,
    billing_country: Option<&str>,
    shipping_country: Option<&str>,
) -> Result<(), CliError> {
    let data = read_form(path)?;
    let draft = build_draft(&data, billing_country, shipping_country)?;

    let config = StorefrontConfig::from_env()?;
    let store = FileStore::new(config.storage_path.clone());
    let keys = Identity::detect(&store)?.keys();

    refresher(&config)?
        .schedule_token_refresh(&store, &keys)
        .await;
    let token = store
        .get(keys.access_token)?
        .filter(|token| !token.is_empty())
        .ok_or(CliError::MissingToken)?;

    let client = CommerceClient::new(&config.commerce);
    let result = client.sign_up(&token, &draft).await?;

    tracing::info!(email = %draft.email, "Customer registered");
    print_json(&result)
}

/// Check a postal code against a country's format.
///
/// # Errors
///
/// Returns an error if the country is unsupported or the code does not
/// match its format.
pub fn postal_code(country: &str, code: &str) -> Result<(), CliError> {
    country.parse::<Country>()?;

    if !validate_postal_code(code, country) {
        return Err(CliError::InvalidPostalCode {
            country: country.to_string(),
            code: code.to_string(),
        });
    }

    tracing::info!(country, code, "Postal code is valid");
    Ok(())
}
