//! Validation results and payload construction.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use surveycast_common::Domain;

use crate::field::FieldSpec;
use crate::records::Flag;

/// Raw form input keyed by field key, exactly as submitted.
pub type FormValues = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub key: &'static str,
    pub message: String,
}

/// Per-field violation messages, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn push(&mut self, key: &'static str, message: impl Into<String>) {
        self.violations.push(Violation { key, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn message_for(&self, key: &str) -> Option<&str> {
        self.violations
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// `{ key: message }` object, in schema order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .violations
            .iter()
            .map(|v| (v.key.to_string(), Value::String(v.message.clone())))
            .collect();
        Value::Object(map)
    }
}

/// A record whose every field passed its check. Values are held in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    domain: Domain,
    values: Vec<(FieldSpec, i64)>,
}

impl ValidatedRecord {
    pub(crate) fn new(domain: Domain, values: Vec<(FieldSpec, i64)>) -> Self {
        Self { domain, values }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.iter().find(|(f, _)| f.key == key).map(|(_, v)| *v)
    }

    /// JSON object with keys in schema order and values in their wire types.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::with_capacity(self.values.len());
        for (field, v) in &self.values {
            map.insert(field.key.to_string(), field.wire_value(*v));
        }
        Value::Object(map)
    }
}

/// Flatten a JSON object into raw form values.
///
/// Strings pass through, numbers are printed, booleans become "1"/"0".
/// Nulls, arrays and objects are dropped so the schema reports them as missing.
pub fn values_from_json(map: &Map<String, Value>) -> FormValues {
    map.iter()
        .filter_map(|(k, v)| {
            let s = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b)   => Flag::from(*b).code().to_string(),
                _ => return None,
            };
            Some((k.clone(), s))
        })
        .collect()
}
