//! JSON input
//!
//! Objects keep document key order (`serde_json/preserve_order`).

use super::Value;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_order_is_preserved() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": [true, null], "m": "text"}"#)
                .expect("valid json");
        let value = Value::from(json);

        let Value::Object(object) = value else {
            panic!("expected object");
        };
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(
            object["a"],
            Value::List(vec![Value::Bool(true), Value::Null])
        );
    }
}
