use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::StyleError;

/// Legacy comparison filter over feature properties: `["==", key, value]` or `["!=", key, value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Filter {
    /// Property equals the value.
    Eq(String, Value),
    /// Property is absent or differs from the value.
    Ne(String, Value),
}

impl Filter {
    /// Checks whether a feature with the given properties passes the filter.
    pub fn matches(&self, properties: &Map<String, Value>) -> bool {
        match self {
            Self::Eq(key, expected) => properties
                .get(key)
                .is_some_and(|actual| values_equal(actual, expected)),
            Self::Ne(key, expected) => !properties
                .get(key)
                .is_some_and(|actual| values_equal(actual, expected)),
        }
    }
}

// `8` and `8.0` are different JSON numbers but the same value for a filter.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

impl TryFrom<Value> for Filter {
    type Error = StyleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let parsed = match value.as_array().map(Vec::as_slice) {
            Some([Value::String(op), Value::String(key), operand]) => match op.as_str() {
                "==" => Some(Self::Eq(key.clone(), operand.clone())),
                "!=" => Some(Self::Ne(key.clone(), operand.clone())),
                _ => None,
            },
            _ => None,
        };

        parsed.ok_or_else(|| StyleError::InvalidExpression(format!("unsupported filter: {value}")))
    }
}

impl From<Filter> for Value {
    fn from(value: Filter) -> Self {
        match value {
            Filter::Eq(key, operand) => json!(["==", key, operand]),
            Filter::Ne(key, operand) => json!(["!=", key, operand]),
        }
    }
}
