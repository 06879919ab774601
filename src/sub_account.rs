//! Merchant sub-accounts for split payments

use crate::attributes::{AttributeSet, Attributes, ResourceId};
use crate::provider::PaymentProvider;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A split-payment destination registered with the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    /// Share of each payment kept by the main account, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_name: Option<String>,
    #[serde(flatten)]
    pub extra: AttributeSet,
}

impl Attributes for SubAccount {}

impl SubAccount {
    /// Create a new sub-account settling into `account_number`
    pub fn new(
        business_name: impl Into<String>,
        settlement_bank: impl Into<String>,
        account_number: impl Into<String>,
        percentage_charge: f64,
    ) -> Self {
        Self {
            business_name: Some(business_name.into()),
            settlement_bank: Some(settlement_bank.into()),
            account_number: Some(account_number.into()),
            percentage_charge: Some(percentage_charge),
            ..Self::default()
        }
    }

    /// Create or update the sub-account; see [`crate::Plan::save`]
    pub async fn save<P>(&mut self, provider: &mut P) -> Result<Option<ResourceId>>
    where
        P: PaymentProvider + ?Sized,
    {
        let id = provider.save_sub_account(self.attributes()).await?;

        if let Some(id) = &id {
            self.id = Some(id.clone());
            if self.subaccount_code.is_none() {
                self.subaccount_code = provider
                    .last_response_value(&["data", "subaccount_code"])
                    .and_then(Value::as_str)
                    .map(str::to_string);
            }
        }

        Ok(id)
    }

    /// List sub-accounts, optionally filtered by `query`
    pub async fn list<P>(provider: &mut P, query: AttributeSet) -> Result<Vec<SubAccount>>
    where
        P: PaymentProvider + ?Sized,
    {
        provider
            .list_sub_accounts(query)
            .await?
            .into_iter()
            .map(SubAccount::from_attributes)
            .collect()
    }

    /// Fetch a sub-account by id or subaccount code
    pub async fn fetch<P>(provider: &mut P, sub_account_id: &str) -> Result<SubAccount>
    where
        P: PaymentProvider + ?Sized,
    {
        let record = provider.fetch_sub_account(sub_account_id).await?;
        SubAccount::from_attributes(record)
    }
}
