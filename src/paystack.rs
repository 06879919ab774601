//! Paystack client
//!
//! Adapts generic billing attributes to the Paystack REST API and normalizes its
//! `{status, message, data}` envelopes.

use crate::adapter::{adapt, convert_major_units, RenameTable};
use crate::attributes::{AttributeSet, ResourceId};
use crate::config::PaymentConfig;
use crate::provider::PaymentProvider;
use crate::response::{extract, lookup};
use crate::transport::{HttpResponse, Payload, ReqwestTransport, RequestOptions, Transport};
use crate::validation::require_fields;
use crate::{NgPaymentsError, Result};
use async_trait::async_trait;
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use tracing::{debug, warn};

/// Generic attribute names Paystack knows under another name
pub const PAYSTACK_PARAMS: RenameTable = &[("customer_email", "email")];

const INITIALIZE_PATH: &str = "/initialize";
const VERIFY_PATH: &str = "/transaction/verify";
const PLAN_PATH: &str = "/plan";
const SUB_ACCOUNT_PATH: &str = "/subaccount";

const INITIALIZE_REQUIRED: &[&str] = &["email", "amount"];
const PLAN_REQUIRED: &[&str] = &["name", "amount", "interval"];
const SUB_ACCOUNT_REQUIRED: &[&str] = &[
    "business_name",
    "settlement_bank",
    "account_number",
    "percentage_charge",
];

/// Message of the error raised when the paid amount differs from the expected one
pub const AMOUNT_MISMATCH: &str =
    "The amount paid by the customer does not match the required amount";

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Paystack payment provider client
pub struct Paystack<T = ReqwestTransport> {
    public_key: String,
    secret_key: String,
    app_env: String,
    transport: T,
    http_exceptions: bool,
    transaction_exceptions: bool,
    http_response: Option<HttpResponse>,
}

impl<T> std::fmt::Debug for Paystack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paystack")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("app_env", &self.app_env)
            .field("http_exceptions", &self.http_exceptions)
            .field("transaction_exceptions", &self.transaction_exceptions)
            .field("http_response", &self.http_response)
            .finish()
    }
}

impl Paystack<ReqwestTransport> {
    /// Create a client against the public Paystack API
    pub fn new(
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
        app_env: impl Into<String>,
    ) -> Result<Self> {
        let config = PaymentConfig::new(public_key, secret_key).with_app_env(app_env);
        Self::from_config(&config)
    }

    /// Create a client from configuration
    pub fn from_config(config: &PaymentConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.base_url.clone(), config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Paystack<T> {
    /// Create a client over a custom transport
    pub fn with_transport(config: &PaymentConfig, transport: T) -> Self {
        Self {
            public_key: config.public_key.clone(),
            secret_key: config.secret_key.clone(),
            app_env: config.app_env.clone(),
            transport,
            http_exceptions: config.http_exceptions,
            transaction_exceptions: config.transaction_exceptions,
            http_response: None,
        }
    }

    /// Public key, as configured
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Application environment, e.g. `production` or `testing`
    pub fn app_env(&self) -> &str {
        &self.app_env
    }

    /// Transport the client sends requests through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the transport, e.g. to point at a different host
    pub fn set_transport(&mut self, transport: T) {
        self.transport = transport;
        self.http_response = None;
    }

    /// Map generic attributes to Paystack parameters; amounts go out in kobo
    pub fn adapt_params(&self, params: &AttributeSet) -> AttributeSet {
        let mut adapted = adapt(params, PAYSTACK_PARAMS);
        convert_major_units(&mut adapted, "naira_amount", "amount");
        adapted
    }

    fn request_options(&self, payload: Payload) -> RequestOptions {
        let mut options = RequestOptions::new()
            .header("authorization", format!("Bearer {}", self.secret_key))
            .http_errors(self.http_exceptions);

        if matches!(payload, Payload::Json(_)) {
            options = options.header("cache-control", "no-cache");
        }

        RequestOptions { payload, ..options }
    }

    /// Issue a request and keep its response as the last response
    async fn request(&mut self, method: Method, path: &str, payload: Payload) -> Result<()> {
        let options = self.request_options(payload);
        let result = self.transport.send(method.clone(), path, options).await;

        match result {
            Ok(response) => {
                if !response.is_success() {
                    warn!(
                        %method,
                        %path,
                        status = response.status,
                        "gateway request failed; keeping response"
                    );
                }
                self.http_response = Some(response);
                Ok(())
            }
            Err(error) => {
                self.http_response = match &error {
                    NgPaymentsError::Transport { status, body } => {
                        Some(HttpResponse::new(*status, body.clone()))
                    }
                    _ => None,
                };
                Err(error)
            }
        }
    }

    fn body(&self) -> &Value {
        self.http_response
            .as_ref()
            .map_or(&Value::Null, |response| &response.body)
    }

    async fn create(
        &mut self,
        path: &str,
        params: AttributeSet,
        required: &[&str],
    ) -> Result<Option<ResourceId>> {
        require_fields(&params, required)?;
        self.request(Method::POST, path, Payload::Json(Value::Object(params)))
            .await?;

        let id = lookup(self.body(), &["data", "id"]).and_then(ResourceId::from_value);
        debug!(%path, ?id, "created gateway resource");
        Ok(id)
    }

    async fn update(
        &mut self,
        path: &str,
        params: AttributeSet,
        id: ResourceId,
    ) -> Result<Option<ResourceId>> {
        let path = format!("{}/{}", path, encode_segment(&id.to_string()));
        self.request(Method::PUT, &path, Payload::Json(Value::Object(params)))
            .await?;

        if extract(self.body(), &["status"], false) {
            Ok(Some(id))
        } else {
            Ok(None)
        }
    }

    async fn save(
        &mut self,
        path: &str,
        params: AttributeSet,
        code_key: &str,
        required: &[&str],
    ) -> Result<Option<ResourceId>> {
        let params = self.adapt_params(&params);
        match identifier(&params, code_key) {
            Some(id) => self.update(path, params, id).await,
            None => self.create(path, params, required).await,
        }
    }

    async fn list(&mut self, path: &str, query: AttributeSet) -> Result<Vec<AttributeSet>> {
        let query = self.adapt_params(&query);
        self.request(Method::GET, path, Payload::Query(query)).await?;
        let records = match lookup(self.body(), &["data"]) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        Ok(records)
    }

    async fn fetch(&mut self, path: &str, id: &str) -> Result<AttributeSet> {
        let path = format!("{}/{}", path, encode_segment(id));
        self.request(Method::GET, &path, Payload::None).await?;
        Ok(extract(self.body(), &["data"], AttributeSet::new()))
    }
}

#[async_trait]
impl<T: Transport> PaymentProvider for Paystack<T> {
    async fn initialize_payment(&mut self, params: AttributeSet) -> Result<()> {
        let params = self.adapt_params(&params);
        require_fields(&params, INITIALIZE_REQUIRED)?;
        self.request(
            Method::POST,
            INITIALIZE_PATH,
            Payload::Json(Value::Object(params)),
        )
        .await
    }

    async fn verify_payment(
        &mut self,
        reference: &str,
        expected_amount: Option<i64>,
    ) -> Result<String> {
        let path = format!("{}/{}", VERIFY_PATH, encode_segment(reference));
        self.request(Method::GET, &path, Payload::None).await?;

        let body = self.body();
        let status: String = extract(body, &["data", "status"], String::new());

        if self.transaction_exceptions && status != "success" {
            warn!(%reference, %status, "transaction verification failed");
            let reason = extract(
                body,
                &["data", "gateway_response"],
                format!("Transaction status is '{}'", status),
            );
            return Err(NgPaymentsError::failed_transaction(reason, body.clone()));
        }

        // zero means no amount to check
        if let Some(expected) = expected_amount.filter(|amount| *amount != 0) {
            let paid = lookup(body, &["data", "amount"]);
            if !amount_matches(paid, expected) {
                warn!(%reference, expected, ?paid, "paid amount mismatch");
                return Err(NgPaymentsError::failed_transaction(
                    AMOUNT_MISMATCH,
                    body.clone(),
                ));
            }
        }

        Ok(status)
    }

    fn payment_page_url(&self) -> String {
        extract(self.body(), &["data", "authorization_url"], String::new())
    }

    fn payment_reference(&self) -> String {
        extract(self.body(), &["data", "reference"], String::new())
    }

    fn payment_authorization_code(&self) -> Option<String> {
        extract(
            self.body(),
            &["data", "authorization", "authorization_code"],
            None,
        )
    }

    async fn save_plan(&mut self, params: AttributeSet) -> Result<Option<ResourceId>> {
        self.save(PLAN_PATH, params, "plan_code", PLAN_REQUIRED).await
    }

    async fn list_plans(&mut self, query: AttributeSet) -> Result<Vec<AttributeSet>> {
        self.list(PLAN_PATH, query).await
    }

    async fn fetch_plan(&mut self, plan_id: &str) -> Result<AttributeSet> {
        self.fetch(PLAN_PATH, plan_id).await
    }

    async fn save_sub_account(&mut self, params: AttributeSet) -> Result<Option<ResourceId>> {
        self.save(
            SUB_ACCOUNT_PATH,
            params,
            "subaccount_code",
            SUB_ACCOUNT_REQUIRED,
        )
        .await
    }

    async fn list_sub_accounts(&mut self, query: AttributeSet) -> Result<Vec<AttributeSet>> {
        self.list(SUB_ACCOUNT_PATH, query).await
    }

    async fn fetch_sub_account(&mut self, sub_account_id: &str) -> Result<AttributeSet> {
        self.fetch(SUB_ACCOUNT_PATH, sub_account_id).await
    }

    fn http_response(&self) -> Option<&HttpResponse> {
        self.http_response.as_ref()
    }

    fn enable_http_exceptions(&mut self) {
        self.http_exceptions = true;
    }

    fn disable_http_exceptions(&mut self) {
        self.http_exceptions = false;
    }

    fn enable_transaction_exceptions(&mut self) {
        self.transaction_exceptions = true;
    }

    fn disable_transaction_exceptions(&mut self) {
        self.transaction_exceptions = false;
    }

    fn http_exceptions(&self) -> bool {
        self.http_exceptions
    }

    fn transaction_exceptions(&self) -> bool {
        self.transaction_exceptions
    }
}

/// Identifier selecting update over create: `id` first, then the resource code
fn identifier(params: &AttributeSet, code_key: &str) -> Option<ResourceId> {
    params
        .get("id")
        .and_then(ResourceId::from_value)
        .or_else(|| params.get(code_key).and_then(ResourceId::from_value))
}

fn amount_matches(paid: Option<&Value>, expected: i64) -> bool {
    match paid {
        Some(Value::Number(number)) => {
            number.as_i64() == Some(expected) || number.as_f64() == Some(expected as f64)
        }
        Some(Value::String(text)) => text.trim().parse::<i64>().ok() == Some(expected),
        _ => false,
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
