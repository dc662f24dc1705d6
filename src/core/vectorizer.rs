use crate::domain::model::FeatureSchema;
use crate::utils::error::{Result, ServiceError};
use serde_json::Value;
use std::collections::HashMap;

/// Value used for schema features the caller did not supply.
pub const MISSING_FEATURE_VALUE: f64 = 0.0;

/// Orders `input` by `schema`. Missing keys become zero, unknown keys are ignored.
pub fn vectorize(schema: &FeatureSchema, input: &HashMap<String, Value>) -> Result<Vec<f64>> {
    schema
        .iter()
        .map(|name| match input.get(name) {
            Some(value) => numeric_value(name, value),
            None => Ok(MISSING_FEATURE_VALUE),
        })
        .collect()
}

fn numeric_value(name: &str, value: &Value) -> Result<f64> {
    let invalid = |reason: String| ServiceError::InvalidFeatureValue {
        feature: name.to_string(),
        reason,
    };

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{} is not representable as a float", n))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("could not convert string to float: '{}'", s))),
        Value::Null => Err(invalid("value is null".to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(invalid("expected a number, got a nested structure".to_string()))
        }
    }
}
