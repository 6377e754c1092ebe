//! Value normalization applied before equality comparison.
//!
//! Real values, dehydrated values and defaults all pass through [`sanitize`]
//! so that "appeared" and "changed" comparisons see the same shapes.

use crate::metamodel::types::PropertyType;
use crate::metamodel::value::Value;
use std::collections::BTreeMap;

/// Normalize `value` for its classified property type
///
/// - null list/set/map becomes the empty container
/// - set elements are deduplicated, first occurrence wins
/// - `-0.0` becomes `0.0` and every `NaN` becomes the canonical `f64::NAN`
/// - container elements are sanitized recursively
pub fn sanitize(value: Value, property_type: &PropertyType<'_>) -> Value {
    match property_type {
        PropertyType::Optional(inner) => {
            if value.is_null() {
                Value::Null
            } else {
                sanitize(value, inner)
            }
        }
        PropertyType::List(element) => match value {
            Value::Null => Value::List(Vec::new()),
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| sanitize(item, element))
                    .collect(),
            ),
            other => other,
        },
        PropertyType::Set(element) => match value {
            Value::Null => Value::List(Vec::new()),
            Value::List(items) => {
                let mut unique: Vec<Value> = Vec::with_capacity(items.len());
                for item in items {
                    let item = sanitize(item, element);
                    if !unique.contains(&item) {
                        unique.push(item);
                    }
                }
                Value::List(unique)
            }
            other => other,
        },
        PropertyType::Map(element) => match value {
            Value::Null => Value::Map(BTreeMap::new()),
            Value::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, sanitize(item, element)))
                    .collect(),
            ),
            other => other,
        },
        PropertyType::PrimitiveOrValue(_) => match value {
            Value::Float(x) if x == 0.0 => Value::Float(0.0),
            Value::Float(x) if x.is_nan() => Value::Float(f64::NAN),
            other => other,
        },
        PropertyType::Entity(_) | PropertyType::ValueObject(_) => value,
    }
}
