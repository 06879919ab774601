//! Required-field checks run before mutating gateway calls

use crate::attributes::AttributeSet;
use crate::{NgPaymentsError, Result};

/// Fail with [`NgPaymentsError::InvalidRequestBody`] when any of `required` is
/// absent or null in `params`
pub fn require_fields(params: &AttributeSet, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field| params.get(*field).map_or(true, |value| value.is_null()))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(NgPaymentsError::invalid_request_body(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_fields_present() {
        let params = json!({"email": "a@b.com", "amount": 0});
        assert!(require_fields(params.as_object().unwrap(), &["email", "amount"]).is_ok());
    }

    #[test]
    fn test_missing_and_null_fields_are_reported_in_order() {
        let params = json!({"name": "Mock Plan", "amount": null});
        let error = require_fields(params.as_object().unwrap(), &["name", "amount", "interval"])
            .unwrap_err();

        match error {
            NgPaymentsError::InvalidRequestBody { missing } => {
                assert_eq!(missing, vec!["amount", "interval"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_required_fields() {
        assert!(require_fields(&AttributeSet::new(), &[]).is_ok());
    }
}
