// Conversion between Bolt values and JSON
use neo4rs::BoltType;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// Convert a Bolt value returned by the server into JSON.
///
/// Temporal, spatial and structural values have no JSON counterpart and are
/// rendered with their debug representation.
pub fn bolt_to_json(value: BoltType) -> Value {
    match value {
        BoltType::Null(_) => Value::Null,
        BoltType::Boolean(b) => Value::Bool(b.value),
        BoltType::Integer(i) => Value::Number(i.value.into()),
        BoltType::Float(f) => Number::from_f64(f.value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        BoltType::String(s) => Value::String(s.value),
        BoltType::List(list) => Value::Array(list.value.into_iter().map(bolt_to_json).collect()),
        BoltType::Map(map) => Value::Object(
            map.value
                .into_iter()
                .map(|(key, value)| (key.value, bolt_to_json(value)))
                .collect::<Map<String, Value>>(),
        ),
        other => Value::String(format!("{:?}", other)),
    }
}

/// Convert a JSON query parameter into a Bolt value.
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => Option::<String>::None.into(),
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or(f64::NAN).into(),
        },
        Value::String(s) => s.clone().into(),
        Value::Array(items) => items.iter().map(json_to_bolt).collect::<Vec<BoltType>>().into(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), json_to_bolt(value)))
            .collect::<HashMap<String, BoltType>>()
            .into(),
    }
}
