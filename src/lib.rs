//! # ng-payments - billing client for Nigerian payment gateways
//!
//! Callers describe payments, plans and sub-accounts with provider-agnostic
//! attributes (`customer_email`, `naira_amount`, ...). A [`PaymentProvider`]
//! adapts them to its gateway's field names and units, validates what the
//! gateway requires, performs the HTTP call, and normalizes the response.

pub mod adapter;
pub mod attributes;
pub mod bill;
pub mod config;
pub mod error;
pub mod paystack;
pub mod plan;
pub mod provider;
pub mod response;
pub mod sub_account;
pub mod transport;
pub mod validation;

// Re-exports for convenience
pub use attributes::{AttributeSet, Attributes, ResourceId};
pub use bill::Bill;
pub use config::{PaymentConfig, ProviderKind};
pub use error::{NgPaymentsError, Result};
pub use paystack::Paystack;
pub use plan::Plan;
pub use provider::PaymentProvider;
pub use sub_account::SubAccount;
pub use transport::{HttpResponse, Payload, ReqwestTransport, RequestOptions, Transport};

/// Current version of the ng-payments library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the client selected by `config`
pub fn payment_provider(config: &PaymentConfig) -> Result<Box<dyn PaymentProvider>> {
    match config.provider {
        ProviderKind::Paystack => Ok(Box::new(Paystack::from_config(config)?)),
    }
}
