//! Attribute storage shared by the domain objects
//!
//! Domain objects keep their well-known attributes in typed fields and everything
//! else in a flattened side-map, so records fetched from a gateway round-trip
//! without losing fields the library does not model.

use crate::{NgPaymentsError, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Generic attribute set sent to, and received from, a payment provider
pub type AttributeSet = Map<String, Value>;

/// Identifier of a gateway resource: numeric id or string code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Id(i64),
    Code(String),
}

impl ResourceId {
    /// Read an identifier out of a JSON value
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Id),
            Value::String(code) if !code.is_empty() => Some(Self::Code(code.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Code(code) => f.write_str(code),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ResourceId {
    fn from(code: &str) -> Self {
        Self::Code(code.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(code: String) -> Self {
        Self::Code(code)
    }
}

impl From<ResourceId> for Value {
    fn from(id: ResourceId) -> Self {
        match id {
            ResourceId::Id(id) => Value::from(id),
            ResourceId::Code(code) => Value::from(code),
        }
    }
}

/// Dynamic access to the attributes of a typed domain object
///
/// Implementors serialize their present fields plus their side-map into one flat
/// [`AttributeSet`]. Absent fields are omitted rather than sent as null.
pub trait Attributes: Serialize + DeserializeOwned + Sized {
    /// Snapshot of every present attribute
    fn attributes(&self) -> AttributeSet {
        match serde_json::to_value(self) {
            Ok(Value::Object(attributes)) => attributes,
            _ => AttributeSet::new(),
        }
    }

    /// Rebuild an object from a raw attribute mapping
    fn from_attributes(attributes: AttributeSet) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(attributes))?)
    }

    /// Value of a single attribute, known or not
    fn get(&self, key: &str) -> Option<Value> {
        self.attributes()
            .remove(key)
            .filter(|value| !value.is_null())
    }

    /// Set a single attribute, known or not
    fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut attributes = self.attributes();
        attributes.insert(key.to_string(), value.into());
        *self = Self::from_attributes(attributes)
            .map_err(|e| NgPaymentsError::invalid_attribute(key, e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Sample {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<i64>,
        #[serde(flatten)]
        extra: AttributeSet,
    }

    impl Attributes for Sample {}

    #[test]
    fn test_absent_fields_are_omitted() {
        let sample = Sample {
            name: Some("plan".to_string()),
            ..Default::default()
        };
        let attributes = sample.attributes();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["name"], "plan");
    }

    #[test]
    fn test_unknown_fields_land_in_extra() {
        let raw = json!({"name": "plan", "currency": "NGN", "send_invoices": true});
        let sample = Sample::from_attributes(raw.as_object().unwrap().clone()).unwrap();
        assert_eq!(sample.name.as_deref(), Some("plan"));
        assert_eq!(sample.extra["currency"], "NGN");
        assert_eq!(Value::Object(sample.attributes()), raw);
    }

    #[test]
    fn test_get_and_set() {
        let mut sample = Sample::default();
        sample.set("count", 3).unwrap();
        sample.set("colour", "blue").unwrap();
        assert_eq!(sample.count, Some(3));
        assert_eq!(sample.get("colour"), Some(json!("blue")));
        assert_eq!(sample.get("name"), None);

        sample.set("count", Value::Null).unwrap();
        assert_eq!(sample.count, None);
    }

    #[test]
    fn test_set_rejects_mistyped_value() {
        let mut sample = Sample::default();
        let error = sample.set("count", "three").unwrap_err();
        assert!(matches!(
            error,
            NgPaymentsError::InvalidAttribute { ref key, .. } if key == "count"
        ));
    }

    #[test]
    fn test_resource_id_from_value() {
        assert_eq!(ResourceId::from_value(&json!(37425)), Some(ResourceId::Id(37425)));
        assert_eq!(
            ResourceId::from_value(&json!("PLN_gx2wn530m0i3w3m")),
            Some(ResourceId::from("PLN_gx2wn530m0i3w3m"))
        );
        assert_eq!(ResourceId::from_value(&json!("")), None);
        assert_eq!(ResourceId::from_value(&Value::Null), None);
        assert_eq!(ResourceId::Id(55).to_string(), "55");
    }
}
