//! Recurring payment plans

use crate::attributes::{AttributeSet, Attributes, ResourceId};
use crate::provider::PaymentProvider;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recurring billing plan
///
/// Amounts may be given in naira through `naira_amount`; the provider converts
/// them to its own unit. Records fetched from the gateway carry `amount` in kobo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naira_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Attributes without a typed field
    #[serde(flatten)]
    pub extra: AttributeSet,
}

impl Attributes for Plan {}

impl Plan {
    /// Create a new plan
    pub fn new(name: impl Into<String>, naira_amount: f64, interval: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            naira_amount: Some(naira_amount),
            interval: Some(interval.into()),
            ..Self::default()
        }
    }

    /// Create the plan, or update it when it already has an id or plan code
    ///
    /// On success the identifier is stored on the plan, and a freshly created plan
    /// also picks up the gateway's plan code.
    pub async fn save<P>(&mut self, provider: &mut P) -> Result<Option<ResourceId>>
    where
        P: PaymentProvider + ?Sized,
    {
        let id = provider.save_plan(self.attributes()).await?;

        if let Some(id) = &id {
            self.id = Some(id.clone());
            if self.plan_code.is_none() {
                self.plan_code = provider
                    .last_response_value(&["data", "plan_code"])
                    .and_then(Value::as_str)
                    .map(str::to_string);
            }
        }

        Ok(id)
    }

    /// List plans, optionally filtered by `query`
    pub async fn fetch_all<P>(provider: &mut P, query: AttributeSet) -> Result<Vec<Plan>>
    where
        P: PaymentProvider + ?Sized,
    {
        provider
            .list_plans(query)
            .await?
            .into_iter()
            .map(Plan::from_attributes)
            .collect()
    }

    /// Fetch a plan by id or plan code
    pub async fn fetch<P>(provider: &mut P, plan_id: &str) -> Result<Plan>
    where
        P: PaymentProvider + ?Sized,
    {
        let record = provider.fetch_plan(plan_id).await?;
        Plan::from_attributes(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_plan_attributes() {
        let plan = Plan::new("Test Plan", 4000.0, "daily");
        assert_eq!(
            Value::Object(plan.attributes()),
            json!({"name": "Test Plan", "naira_amount": 4000.0, "interval": "daily"})
        );
    }

    #[test]
    fn test_plan_from_gateway_record() {
        let record = json!({
            "id": 37425,
            "name": "Monthly retainer",
            "plan_code": "PLN_gx2wn530m0i3w3m",
            "description": null,
            "amount": 50000,
            "interval": "monthly",
            "send_invoices": true,
            "currency": "NGN"
        });
        let plan = Plan::from_attributes(record.as_object().cloned().unwrap()).unwrap();

        assert_eq!(plan.id, Some(ResourceId::Id(37425)));
        assert_eq!(plan.amount, Some(50000));
        assert_eq!(plan.naira_amount, None);
        assert_eq!(plan.extra["currency"], "NGN");
        assert_eq!(plan.get("send_invoices"), Some(json!(true)));
    }

    #[test]
    fn test_empty_record_is_default_plan() {
        let plan = Plan::from_attributes(AttributeSet::new()).unwrap();
        assert_eq!(plan, Plan::default());
    }
}
