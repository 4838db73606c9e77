use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::Value;

/// Fully reduced output tree: nothing in it requires further reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
	/// Absent value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// Floating-point scalar.
	F64(f64),
	/// String scalar.
	String(Box<str>),
	/// Ordered sequence.
	Seq(Vec<Native>),
	/// Key-to-value mapping in insertion order.
	Map(Vec<(Box<str>, Native)>),
}

impl Serialize for Native {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Native::Null => serializer.serialize_unit(),
			Native::Bool(v) => serializer.serialize_bool(*v),
			Native::I64(v) => serializer.serialize_i64(*v),
			Native::U64(v) => serializer.serialize_u64(*v),
			Native::F64(v) => serializer.serialize_f64(*v),
			Native::String(v) => serializer.serialize_str(v),
			Native::Seq(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Native::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(&**key, value)?;
				}
				map.end()
			}
		}
	}
}

impl From<Native> for serde_json::Value {
	fn from(value: Native) -> Self {
		match value {
			Native::Null => serde_json::Value::Null,
			Native::Bool(v) => serde_json::Value::Bool(v),
			Native::I64(v) => serde_json::Value::Number(v.into()),
			Native::U64(v) => serde_json::Value::Number(v.into()),
			// Non-finite floats have no JSON representation; match serde_json
			// and emit null.
			Native::F64(v) => serde_json::Number::from_f64(v).map_or(serde_json::Value::Null, serde_json::Value::Number),
			Native::String(v) => serde_json::Value::String(v.into_string()),
			Native::Seq(items) => serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect()),
			Native::Map(entries) => serde_json::Value::Object(
				entries
					.into_iter()
					.map(|(key, value)| (key.into_string(), serde_json::Value::from(value)))
					.collect(),
			),
		}
	}
}

impl From<Native> for Value {
	fn from(value: Native) -> Self {
		match value {
			Native::Null => Value::Null,
			Native::Bool(v) => Value::Bool(v),
			Native::I64(v) => Value::I64(v),
			Native::U64(v) => Value::U64(v),
			Native::F64(v) => Value::F64(v),
			Native::String(v) => Value::String(v),
			Native::Seq(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
			Native::Map(entries) => Value::Map(entries.into_iter().map(|(key, value)| (key, Value::from(value))).collect()),
		}
	}
}
