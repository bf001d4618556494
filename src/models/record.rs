//! Canonical shape for values decoded from contract reads.
//!
//! The node may hand back a contract `dict` either as a JSON object or as a
//! list of `[key, value]` pairs (how JS `Map`s serialize), and integers may be
//! plain numbers or big-integer strings. Everything is folded into [`Record`]
//! right after decoding so no caller ever branches on shape.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
            }),
            Value::Array(items) => {
                let mut fields = BTreeMap::new();
                for item in items {
                    let (key, value) = into_pair(item)?;
                    fields.insert(key, value);
                }
                Ok(Self { fields })
            }
            other => Err(AppError::Decode(format!(
                "expected a record, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Decodes a list result; `null` is treated as an empty list and entries
    /// that are not records are skipped.
    pub fn list_from_value(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match Self::from_value(item) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        tracing::warn!(index, "skipping undecodable list entry: {}", err);
                        None
                    }
                })
                .collect()),
            other => Err(AppError::Decode(format!(
                "expected a list of records, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// First non-empty string among `aliases`.
    pub fn str_any(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|key| match self.fields.get(*key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn str_or(&self, aliases: &[&str], default: &str) -> String {
        self.str_any(aliases).unwrap_or_else(|| default.to_string())
    }

    /// First alias holding an unsigned integer, accepting numeric strings and
    /// `123n` big-integer strings.
    pub fn u64_any(&self, aliases: &[&str]) -> Option<u64> {
        aliases
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(value_as_u64))
    }

    pub fn u64_or_zero(&self, aliases: &[&str]) -> u64 {
        self.u64_any(aliases).unwrap_or(0)
    }

    pub fn bool_any(&self, aliases: &[&str]) -> Option<bool> {
        aliases.iter().find_map(|key| match self.fields.get(*key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_u64().map(|v| v != 0),
            _ => None,
        })
    }
}

fn into_pair(item: Value) -> Result<(String, Value)> {
    if let Value::Array(mut pair) = item {
        if pair.len() == 2 {
            let value = pair.pop().unwrap_or(Value::Null);
            if let Some(Value::String(key)) = pair.pop() {
                return Ok((key, value));
            }
        }
    }
    Err(AppError::Decode(
        "map entries must be [key, value] pairs with string keys".to_string(),
    ))
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().trim_end_matches('n').parse().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
