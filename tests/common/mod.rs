//! Shared fixtures for the integration tests

#![allow(dead_code)]

use mockito::{Mock, ServerGuard};
use ng_payments::{PaymentConfig, Paystack};
use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Paystack client pointed at a mock server
pub fn paystack(server: &ServerGuard) -> Paystack {
    init_tracing();
    let config = PaymentConfig::new("public", "secret")
        .with_app_env("testing")
        .with_base_url(server.url());
    Paystack::from_config(&config).unwrap()
}

/// JSON object literal as an attribute set
pub fn attributes(value: Value) -> ng_payments::AttributeSet {
    value.as_object().cloned().unwrap()
}

/// Mock answering `method path` with a JSON body
pub async fn mock_json(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: Value,
) -> Mock {
    server
        .mock(method, path)
        .match_header("authorization", "Bearer secret")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Mock answering `method path` with a bare status
pub async fn mock_status(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
) -> Mock {
    server
        .mock(method, path)
        .with_status(status)
        .create_async()
        .await
}

pub fn initialize_payment_response() -> Value {
    json!({
        "status": true,
        "message": "Authorization URL created",
        "data": {
            "authorization_url": "https://example.com/mock_checkout",
            "access_code": "mock_access_code",
            "reference": "mock_reference"
        }
    })
}

pub fn verify_payment_response(status: &str, amount: i64) -> Value {
    let gateway_response = if status == "success" {
        "Successful"
    } else {
        "The transaction was not completed"
    };
    json!({
        "status": true,
        "message": "Verification successful",
        "data": {
            "id": 1504248187,
            "domain": "test",
            "status": status,
            "reference": "mock_reference",
            "amount": amount,
            "gateway_response": gateway_response,
            "currency": "NGN",
            "authorization": {
                "authorization_code": "AUTH_8dfhjjdt",
                "card_type": "visa",
                "last4": "4081",
                "reusable": true
            }
        }
    })
}

pub fn create_plan_response() -> Value {
    json!({
        "status": true,
        "message": "Plan created",
        "data": {
            "name": "Mock Plan",
            "amount": 30000,
            "interval": "weekly",
            "integration": 100032,
            "domain": "test",
            "plan_code": "PLN_gx2wn530m0i3w3m",
            "send_invoices": true,
            "send_sms": true,
            "hosted_page": false,
            "currency": "NGN",
            "id": 37425
        }
    })
}

pub fn update_response() -> Value {
    json!({
        "status": true,
        "message": "Plan updated. 1 subscription(s) affected"
    })
}

pub fn list_plans_response() -> Value {
    json!({
        "status": true,
        "message": "Plans retrieved",
        "data": [
            {"id": 37425, "name": "Mock Plan", "plan_code": "PLN_gx2wn530m0i3w3m", "amount": 30000, "interval": "weekly", "currency": "NGN"},
            {"id": 37426, "name": "Monthly retainer", "plan_code": "PLN_zwj1f3yx6ieq5kh", "amount": 50000, "interval": "monthly", "currency": "NGN"}
        ],
        "meta": {"total": 2, "skipped": 0, "perPage": 50, "page": 1, "pageCount": 1}
    })
}

pub fn fetch_plan_response() -> Value {
    json!({
        "status": true,
        "message": "Plan retrieved",
        "data": {
            "id": 37426,
            "name": "Monthly retainer",
            "plan_code": "PLN_zwj1f3yx6ieq5kh",
            "description": null,
            "amount": 50000,
            "interval": "monthly",
            "send_invoices": true,
            "currency": "NGN",
            "subscriptions": []
        }
    })
}

pub fn create_sub_account_response() -> Value {
    json!({
        "status": true,
        "message": "Subaccount created",
        "data": {
            "integration": 100973,
            "domain": "test",
            "subaccount_code": "ACCT_4hl4xenwpjy5wb",
            "business_name": "mock business",
            "description": null,
            "primary_contact_name": null,
            "primary_contact_email": null,
            "primary_contact_phone": null,
            "metadata": null,
            "percentage_charge": 3,
            "is_verified": false,
            "settlement_bank": "mock bank",
            "account_number": "0000000000",
            "settlement_schedule": "AUTO",
            "active": true,
            "migrate": false,
            "id": 55
        }
    })
}

pub fn list_sub_accounts_response() -> Value {
    json!({
        "status": true,
        "message": "Subaccounts retrieved",
        "data": [
            {"id": 55, "subaccount_code": "ACCT_4hl4xenwpjy5wb", "business_name": "mock business", "settlement_bank": "mock bank", "account_number": "0000000000", "percentage_charge": 3},
            {"id": 56, "subaccount_code": "ACCT_8f4s1eq7ml6rlzj", "business_name": "Sunshine Studios", "settlement_bank": "Zenith Bank", "account_number": "0123456047", "percentage_charge": 18.2},
            {"id": 57, "subaccount_code": "ACCT_6uujpqtzmnufzkw", "business_name": "Cheese Sticks", "settlement_bank": "Guaranty Trust Bank", "account_number": "0123456789", "percentage_charge": 10}
        ]
    })
}

pub fn fetch_sub_account_response() -> Value {
    json!({
        "status": true,
        "message": "Subaccount retrieved",
        "data": {
            "id": 55,
            "subaccount_code": "ACCT_4hl4xenwpjy5wb",
            "business_name": "mock business",
            "settlement_bank": "Zenith Bank",
            "account_number": "0000000000",
            "percentage_charge": 3,
            "primary_contact_email": "contact@email.com",
            "primary_contact_name": "Contact Name",
            "active": true
        }
    })
}
