//! Integration tests for customer sign-up.
//!
//! A form that passes validation becomes a customer draft, which is posted
//! to the `/me/signup` resource with the session's token.

#![allow(clippy::unwrap_used)]

use cartwheel_core::{Country, SignUpData, SignUpField, validate_sign_up};
use cartwheel_integration_tests::{MockCommerce, PROJECT_KEY};
use cartwheel_storefront::commerce::CommerceError;
use chrono::NaiveDate;
use serde_json::json;

/// A fixed "today" so the age check does not drift.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// A complete form with different billing and shipping addresses.
fn form() -> SignUpData {
    SignUpData {
        email: "jane@example.com".into(),
        password: "Sup3rSecret".into(),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        bd: "1990-05-17".into(),
        billing_street: "Invalidenstrasse 1".into(),
        billing_city: "Berlin".into(),
        billing_postal_code: "10115".into(),
        shipping_street: "Baker Street 221".into(),
        shipping_city: "London".into(),
        shipping_postal_code: "NW1 6XE".into(),
        default_billing_address: true,
        default_shipping_address: true,
        ..SignUpData::default()
    }
}

fn signup_path() -> String {
    format!("/{PROJECT_KEY}/me/signup")
}

#[tokio::test]
async fn test_valid_form_is_registered() {
    let data = form();
    let errors = validate_sign_up(&data, Some("Germany"), Some("UnitedKingdom"), today());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let mock = MockCommerce::start().await;
    mock.respond(
        &signup_path(),
        201,
        json!({"customer": {"id": "cust-1", "email": "jane@example.com"}}).to_string(),
    );

    let draft = data.customer_draft(Country::Germany, Country::UnitedKingdom);
    let result = mock.client().sign_up("anon-token", &draft).await.unwrap();
    assert_eq!(result["customer"]["id"], "cust-1");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer anon-token"));
    assert_eq!(
        requests[0].json(),
        json!({
            "email": "jane@example.com",
            "password": "Sup3rSecret",
            "firstName": "Jane",
            "lastName": "Doe",
            "dateOfBirth": "1990-05-17",
            "addresses": [
                {"streetName": "Invalidenstrasse 1", "city": "Berlin", "postalCode": "10115", "country": "DE"},
                {"streetName": "Baker Street 221", "city": "London", "postalCode": "NW1 6XE", "country": "GB"}
            ],
            "defaultBillingAddress": 0,
            "defaultShippingAddress": 1
        })
    );
}

#[tokio::test]
async fn test_same_address_sends_one_address() {
    let data = SignUpData {
        same_address: true,
        shipping_street: String::new(),
        shipping_city: String::new(),
        shipping_postal_code: String::new(),
        ..form()
    };
    assert!(validate_sign_up(&data, Some("Germany"), None, today()).is_empty());

    let mock = MockCommerce::start().await;
    mock.respond(&signup_path(), 201, json!({"customer": {"id": "cust-2"}}).to_string());

    let draft = data.customer_draft(Country::Germany, Country::Germany);
    mock.client().sign_up("anon-token", &draft).await.unwrap();

    let body = mock.requests()[0].json();
    assert_eq!(body["addresses"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["defaultBillingAddress"], 0);
    assert_eq!(body["defaultShippingAddress"], 0);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let mock = MockCommerce::start().await;
    mock.respond(
        &signup_path(),
        400,
        json!({
            "statusCode": 400,
            "message": "There is already an existing customer with the provided email.",
            "errors": [{"code": "DuplicateField", "field": "email"}]
        })
        .to_string(),
    );

    let draft = form().customer_draft(Country::Germany, Country::UnitedKingdom);
    let result = mock.client().sign_up("anon-token", &draft).await;

    match result {
        Err(CommerceError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("existing customer"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[test]
fn test_invalid_form_reports_every_field() {
    let data = SignUpData {
        email: "jane.example.com".into(),
        password: "short".into(),
        billing_postal_code: "ABCDE".into(),
        ..form()
    };

    let errors = validate_sign_up(&data, Some("Germany"), None, today());

    assert_eq!(errors.get(SignUpField::Email), Some("Invalid email format"));
    assert_eq!(
        errors.get(SignUpField::Password),
        Some("Password should have at least 8 characters")
    );
    assert_eq!(
        errors.get(SignUpField::BillingPostalCode),
        Some("Invalid postal code format for the selected country")
    );
    assert_eq!(errors.get(SignUpField::ShippingCountry), Some("Country is required"));
    assert_eq!(errors.len(), 5);
}
