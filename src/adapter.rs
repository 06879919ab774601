//! Request parameter adaptation
//!
//! Translates provider-agnostic attribute names and units into the ones a
//! specific gateway expects. Nothing here validates; see [`crate::validation`].

use crate::attributes::AttributeSet;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Static mapping from generic attribute names to provider field names
pub type RenameTable = &'static [(&'static str, &'static str)];

/// Rename every key found in `table`, passing the rest through unchanged
///
/// A provider key the caller already set (non-null) is kept over the renamed
/// generic one.
pub fn adapt(params: &AttributeSet, table: RenameTable) -> AttributeSet {
    let provider_key = |key: &str| -> Option<&'static str> {
        table
            .iter()
            .find(|(generic, _)| *generic == key)
            .map(|(_, provider)| *provider)
    };

    let mut adapted: AttributeSet = params
        .iter()
        .filter(|(key, _)| provider_key(key.as_str()).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, value) in params {
        let Some(provider) = provider_key(key.as_str()) else {
            continue;
        };
        match adapted.get(provider) {
            Some(existing) if !existing.is_null() => {}
            _ => {
                adapted.insert(provider.to_string(), value.clone());
            }
        }
    }
    adapted
}

/// Replace a major-unit amount with its minor-unit equivalent
///
/// An explicit minor-unit value always wins; the major-unit field is dropped
/// either way.
pub fn convert_major_units(params: &mut AttributeSet, major_key: &str, minor_key: &str) {
    let Some(major) = params.remove(major_key) else {
        return;
    };

    let has_minor = params.get(minor_key).is_some_and(|value| !value.is_null());
    if has_minor {
        return;
    }

    if let Some(minor) = to_minor_units(&major) {
        params.insert(minor_key.to_string(), Value::from(minor));
    }
}

/// Convert an amount in major units (naira) to minor units (kobo)
pub fn to_minor_units(major: &Value) -> Option<i64> {
    let amount = match major {
        Value::Number(number) => parse_decimal(&number.to_string())?,
        Value::String(text) => parse_decimal(text.trim())?,
        _ => return None,
    };

    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
