//! One-off charges and plan subscriptions

use crate::adapter::to_minor_units;
use crate::attributes::{AttributeSet, Attributes};
use crate::provider::PaymentProvider;
use crate::{NgPaymentsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A bill presented to a customer through the gateway's checkout page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naira_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Plan code to subscribe the customer to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(flatten)]
    pub extra: AttributeSet,
    #[serde(skip)]
    payment_reference: Option<String>,
    #[serde(skip)]
    payment_page_url: Option<String>,
}

impl Attributes for Bill {
    /// Set an attribute, keeping the results of the last charge
    fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut attributes = self.attributes();
        attributes.insert(key.to_string(), value.into());
        let rebuilt = Self::from_attributes(attributes)
            .map_err(|e| NgPaymentsError::invalid_attribute(key, e.to_string()))?;

        *self = Self {
            payment_reference: self.payment_reference.take(),
            payment_page_url: self.payment_page_url.take(),
            ..rebuilt
        };
        Ok(())
    }
}

impl Bill {
    /// Create a new bill for `naira_amount` naira
    pub fn new(customer_email: impl Into<String>, naira_amount: f64) -> Self {
        Self {
            customer_email: Some(customer_email.into()),
            naira_amount: Some(naira_amount),
            ..Self::default()
        }
    }

    /// Initialize the payment with the gateway
    ///
    /// The reference and checkout URL returned by the gateway are kept on the bill.
    pub async fn charge<P>(&mut self, provider: &mut P) -> Result<&mut Self>
    where
        P: PaymentProvider + ?Sized,
    {
        provider.initialize_payment(self.attributes()).await?;

        self.payment_reference = non_empty(provider.payment_reference());
        self.payment_page_url = non_empty(provider.payment_page_url());
        debug!(reference = ?self.payment_reference, "bill charged");

        Ok(self)
    }

    /// Charge the bill as the first payment of a plan subscription
    pub async fn subscribe<P>(&mut self, provider: &mut P, plan_code: &str) -> Result<&mut Self>
    where
        P: PaymentProvider + ?Sized,
    {
        self.plan = Some(plan_code.to_string());
        self.charge(provider).await
    }

    /// Reference of the last charge
    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_reference.as_deref()
    }

    /// Checkout URL of the last charge
    pub fn payment_page_url(&self) -> Option<&str> {
        self.payment_page_url.as_deref()
    }

    /// Whether the transaction succeeded for exactly `naira_amount` naira
    ///
    /// Failures surface as errors instead of `false` when the provider has
    /// transaction exceptions enabled. An amount mismatch is always an error.
    pub async fn is_payment_valid<P>(
        provider: &mut P,
        reference: &str,
        naira_amount: f64,
    ) -> Result<bool>
    where
        P: PaymentProvider + ?Sized,
    {
        let expected = to_minor_units(&Value::from(naira_amount)).ok_or_else(|| {
            NgPaymentsError::invalid_attribute("naira_amount", "amount is not a finite number")
        })?;

        let status = provider.verify_payment(reference, Some(expected)).await?;
        Ok(status == "success")
    }

    /// Reusable authorization code of a valid payment, for charging the card again
    pub async fn payment_authorization_code<P>(
        provider: &mut P,
        reference: &str,
        naira_amount: f64,
    ) -> Result<Option<String>>
    where
        P: PaymentProvider + ?Sized,
    {
        if Self::is_payment_valid(provider, reference, naira_amount).await? {
            Ok(provider.payment_authorization_code())
        } else {
            Ok(None)
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
