//! Heterogeneous values accepted by open-type dispatch
//!
//! [`DynValue`] is produced at the boundary where loosely typed input comes
//! in (literals in code, JSON from files or the command line). Everything
//! downstream switches on its tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::entity::{Animal, Bird, Dog, Entity, Mammal};
use crate::error::{DispatchError, Result};

/// A value of one of the shapes the dispatcher knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DynValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Entity(Entity),
    /// Input that matched none of the known shapes; carries a short description
    Other(String),
}

impl DynValue {
    /// Convert a JSON value into a tagged value
    ///
    /// Integers that fit in `i64` become [`DynValue::Integer`], every other
    /// number becomes [`DynValue::Real`]. Objects are tried as tagged
    /// entities; anything unrecognised lands in [`DynValue::Other`].
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(text) => DynValue::Text(text),
            Value::Number(number) => match number.as_i64() {
                Some(int) => DynValue::Integer(int),
                // as_f64 only fails for arbitrary-precision numbers
                None => DynValue::Real(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::Object(map) => {
                let object = Value::Object(map);
                match serde_json::from_value::<Entity>(object.clone()) {
                    Ok(entity) => DynValue::Entity(entity),
                    Err(e) => {
                        tracing::warn!("object is not a known entity ({}), treating as other", e);
                        DynValue::Other(format!("object {}", object))
                    }
                }
            }
            Value::Null => DynValue::Other("null".to_string()),
            Value::Bool(flag) => DynValue::Other(format!("bool {}", flag)),
            Value::Array(items) => DynValue::Other(format!("array of {} items", items.len())),
        }
    }

    /// Parse a command-line argument: JSON when it parses, plain text otherwise
    pub fn from_arg(arg: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(arg) {
            Ok(json) => Self::from_json(json),
            Err(_) => DynValue::Text(arg.to_string()),
        }
    }

    /// Name of the tag, for logs and reports
    pub fn tag(&self) -> &'static str {
        match self {
            DynValue::Text(_) => "text",
            DynValue::Integer(_) => "integer",
            DynValue::Real(_) => "real",
            DynValue::Entity(_) => "entity",
            DynValue::Other(_) => "other",
        }
    }
}

impl fmt::Display for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynValue::Text(text) => write!(f, "{:?}", text),
            DynValue::Integer(int) => write!(f, "{}", int),
            DynValue::Real(real) => write!(f, "{}", format_real(*real)),
            DynValue::Entity(entity) => write!(f, "{}({})", entity.kind(), entity.name()),
            DynValue::Other(description) => write!(f, "<{}>", description),
        }
    }
}

/// Load a JSON array of loosely typed values from a file
pub fn load_values(path: &Path) -> Result<Vec<DynValue>> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<serde_json::Value>(&content)? {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(DynValue::from_json).collect()),
        other => Err(DispatchError::InvalidValue(format!(
            "{}: expected a JSON array, found {}",
            path.display(),
            DynValue::from_json(other)
        ))),
    }
}

/// Render a real with a fractional part even when it is integral (`5.0`)
pub(crate) fn format_real(real: f64) -> String {
    if real.is_finite() && real.fract() == 0.0 {
        format!("{:.1}", real)
    } else {
        format!("{}", real)
    }
}

impl From<&str> for DynValue {
    fn from(text: &str) -> Self {
        DynValue::Text(text.to_string())
    }
}

impl From<String> for DynValue {
    fn from(text: String) -> Self {
        DynValue::Text(text)
    }
}

impl From<i64> for DynValue {
    fn from(int: i64) -> Self {
        DynValue::Integer(int)
    }
}

impl From<i32> for DynValue {
    fn from(int: i32) -> Self {
        DynValue::Integer(int.into())
    }
}

impl From<f64> for DynValue {
    fn from(real: f64) -> Self {
        DynValue::Real(real)
    }
}

impl From<Entity> for DynValue {
    fn from(entity: Entity) -> Self {
        DynValue::Entity(entity)
    }
}

impl From<Animal> for DynValue {
    fn from(animal: Animal) -> Self {
        DynValue::Entity(animal.into())
    }
}

impl From<Mammal> for DynValue {
    fn from(mammal: Mammal) -> Self {
        DynValue::Entity(mammal.into())
    }
}

impl From<Bird> for DynValue {
    fn from(bird: Bird) -> Self {
        DynValue::Entity(bird.into())
    }
}

impl From<Dog> for DynValue {
    fn from(dog: Dog) -> Self {
        DynValue::Entity(dog.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_split_int_and_real() {
        assert_eq!(DynValue::from_json(json!(5)), DynValue::Integer(5));
        assert_eq!(DynValue::from_json(json!(5.0)), DynValue::Real(5.0));
        assert_eq!(DynValue::from_json(json!(-2.5)), DynValue::Real(-2.5));
    }

    #[test]
    fn test_json_object_becomes_entity() {
        let value = DynValue::from_json(json!({"kind": "dog", "name": "Johny", "breed": "Bull"}));
        assert_eq!(value, DynValue::from(Dog::new("Johny", "Bull")));
    }

    #[test]
    fn test_unrecognised_json_is_other() {
        assert_eq!(DynValue::from_json(json!(null)).tag(), "other");
        assert_eq!(DynValue::from_json(json!(true)).tag(), "other");
        assert_eq!(DynValue::from_json(json!([1, 2])), DynValue::Other("array of 2 items".into()));
        assert_eq!(DynValue::from_json(json!({"kind": "cat", "name": "Tom"})).tag(), "other");
    }

    #[test]
    fn test_arg_falls_back_to_text() {
        assert_eq!(DynValue::from_arg("Object"), DynValue::Text("Object".into()));
        assert_eq!(DynValue::from_arg("\"Object\""), DynValue::Text("Object".into()));
        assert_eq!(DynValue::from_arg("42"), DynValue::Integer(42));
    }

    #[test]
    fn test_load_values_requires_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");

        std::fs::write(&path, r#"["x", 5, 5.0]"#).unwrap();
        let values = load_values(&path).unwrap();
        assert_eq!(values, vec![DynValue::from("x"), DynValue::from(5i64), DynValue::from(5.0)]);

        std::fs::write(&path, r#"{"kind": "mammal", "name": "Lion"}"#).unwrap();
        assert!(matches!(load_values(&path), Err(DispatchError::InvalidValue(_))));
    }

    #[test]
    fn test_real_keeps_fraction() {
        assert_eq!(format_real(5.0), "5.0");
        assert_eq!(format_real(2.25), "2.25");
        assert_eq!(DynValue::from(5.0).to_string(), "5.0");
    }
}
