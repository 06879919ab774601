//! Provider-agnostic payment client interface

use crate::attributes::{AttributeSet, ResourceId};
use crate::response::lookup;
use crate::transport::HttpResponse;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Operations every payment gateway client exposes
///
/// Clients hold two flags that persist across calls until toggled:
/// HTTP exceptions (non-2xx responses become errors) and transaction exceptions
/// (unsuccessful verifications become errors). Every call replaces the stored
/// last response that the accessor methods read from.
#[async_trait]
pub trait PaymentProvider: Send {
    /// Start a payment; read the outcome with [`Self::payment_page_url`] and
    /// [`Self::payment_reference`]
    async fn initialize_payment(&mut self, params: AttributeSet) -> Result<()>;

    /// Verify a transaction and return its status
    ///
    /// When `expected_amount` (minor units) is given, a different paid amount is an
    /// error whatever the transaction-exception setting.
    async fn verify_payment(&mut self, reference: &str, expected_amount: Option<i64>)
        -> Result<String>;

    /// Checkout URL of the last initialized payment, empty when unavailable
    fn payment_page_url(&self) -> String;

    /// Reference of the last initialized payment, empty when unavailable
    fn payment_reference(&self) -> String;

    /// Reusable authorization code of the last verified payment
    fn payment_authorization_code(&self) -> Option<String>;

    /// Create a plan, or update it when the params carry an identifier
    async fn save_plan(&mut self, params: AttributeSet) -> Result<Option<ResourceId>>;

    /// Plans on the gateway, filtered by `query`
    async fn list_plans(&mut self, query: AttributeSet) -> Result<Vec<AttributeSet>>;

    /// A single plan record; empty when the gateway has none
    async fn fetch_plan(&mut self, plan_id: &str) -> Result<AttributeSet>;

    /// Create a sub-account, or update it when the params carry an identifier
    async fn save_sub_account(&mut self, params: AttributeSet) -> Result<Option<ResourceId>>;

    /// Sub-accounts on the gateway, filtered by `query`
    async fn list_sub_accounts(&mut self, query: AttributeSet) -> Result<Vec<AttributeSet>>;

    /// A single sub-account record; empty when the gateway has none
    async fn fetch_sub_account(&mut self, sub_account_id: &str) -> Result<AttributeSet>;

    /// Last raw gateway response
    fn http_response(&self) -> Option<&HttpResponse>;

    /// Nested value of the last raw gateway response
    fn last_response_value(&self, path: &[&str]) -> Option<&Value> {
        self.http_response()
            .and_then(|response| lookup(&response.body, path))
    }

    fn enable_http_exceptions(&mut self);

    fn disable_http_exceptions(&mut self);

    fn enable_transaction_exceptions(&mut self);

    fn disable_transaction_exceptions(&mut self);

    fn http_exceptions(&self) -> bool;

    fn transaction_exceptions(&self) -> bool;
}
