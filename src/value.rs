use std::any::Any;
use std::fmt;

/// Placeholder label used for types without a stable printable name.
pub const ANONYMOUS_LABEL: &str = "{class}";

/// Capability implemented by objects that can describe their own reducible form.
///
/// The unboxer invokes [`Unbox::unbox`] exactly once per encountered instance and
/// then keeps reducing the returned value, so the result may itself contain
/// further boxed objects, records, or containers.
pub trait Unbox {
	/// Produce this object's own representation for further reduction.
	fn unbox(&self) -> Value;
}

impl<F> Unbox for F
where
	F: Fn() -> Value,
{
	fn unbox(&self) -> Value {
		self()
	}
}

/// Declared name of an input object's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
	/// Stable fully-qualified type path.
	Named(Box<str>),
	/// Synthetic type with no stable printable name (e.g. a closure).
	Anonymous,
}

impl TypeName {
	/// Capture the name of `T` via the compiler's type introspection.
	pub fn of<T: ?Sized>() -> Self {
		let name = std::any::type_name::<T>();
		if name.contains("{{closure}}") { TypeName::Anonymous } else { TypeName::Named(name.into()) }
	}

	/// Full type path, or [`ANONYMOUS_LABEL`] when the type has no stable name.
	pub fn qualified(&self) -> &str {
		match self {
			TypeName::Named(name) => name,
			TypeName::Anonymous => ANONYMOUS_LABEL,
		}
	}

	/// Unqualified last path segment with generic arguments stripped, or
	/// [`ANONYMOUS_LABEL`] when the type has no stable name.
	pub fn label(&self) -> &str {
		match self {
			TypeName::Named(name) => {
				let base = name.split('<').next().unwrap_or(name);
				base.rsplit("::").next().unwrap_or(base)
			}
			TypeName::Anonymous => ANONYMOUS_LABEL,
		}
	}
}

/// Input value model: a closed union over everything the unboxer accepts.
#[derive(Debug)]
pub enum Value {
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
	/// Ordered sequence of values.
	Seq(Vec<Value>),
	/// Key-to-value mapping in insertion order.
	Map(Vec<(Box<str>, Value)>),
	/// Plain structured record: named fields, no behavior.
	Record(RecordValue),
	/// Object exposing the [`Unbox`] capability.
	Boxed(BoxedValue),
	/// Any other object; irreducible.
	Opaque(OpaqueValue),
}

impl Value {
	/// Wrap an object exposing the [`Unbox`] capability, capturing its type name.
	pub fn boxed<T: Unbox + 'static>(value: T) -> Self {
		Value::Boxed(BoxedValue {
			type_name: TypeName::of::<T>(),
			inner: Box::new(value),
		})
	}

	/// Wrap an arbitrary object with no reducible form, capturing its type name.
	pub fn opaque<T: Any>(value: T) -> Self {
		Value::Opaque(OpaqueValue {
			type_name: TypeName::of::<T>(),
			inner: Box::new(value),
		})
	}

	/// Build a named record from ordered `(field, value)` pairs.
	pub fn record<N, K>(type_name: N, fields: impl IntoIterator<Item = (K, Value)>) -> Self
	where
		N: Into<Box<str>>,
		K: Into<Box<str>>,
	{
		Value::Record(RecordValue {
			type_name: TypeName::Named(type_name.into()),
			fields: fields
				.into_iter()
				.map(|(name, value)| FieldValue { name: name.into(), value })
				.collect(),
		})
	}

	/// Human-readable label describing this value's type, as reported by
	/// conversion failures: the qualified object name for records, boxed, and
	/// opaque objects, or a primitive kind name otherwise.
	pub fn type_label(&self) -> String {
		match self {
			Value::Null => "null".to_owned(),
			Value::Bool(_) => "boolean".to_owned(),
			Value::I64(_) | Value::U64(_) => "integer".to_owned(),
			Value::F64(_) => "double".to_owned(),
			Value::String(_) => "string".to_owned(),
			Value::Seq(_) => "sequence".to_owned(),
			Value::Map(_) => "mapping".to_owned(),
			Value::Record(record) => record.type_name.qualified().to_owned(),
			Value::Boxed(boxed) => boxed.type_name.qualified().to_owned(),
			Value::Opaque(opaque) => opaque.type_name.qualified().to_owned(),
		}
	}
}

/// Plain structured record value: a type name plus ordered named fields.
#[derive(Debug)]
pub struct RecordValue {
	/// Declared record type name.
	pub type_name: TypeName,
	/// Ordered fields.
	pub fields: Vec<FieldValue>,
}

impl RecordValue {
	/// Build a named record from ordered fields.
	pub fn new(type_name: impl Into<Box<str>>, fields: Vec<FieldValue>) -> Self {
		Self {
			type_name: TypeName::Named(type_name.into()),
			fields,
		}
	}

	/// Build a record whose type has no stable name.
	pub fn anonymous(fields: Vec<FieldValue>) -> Self {
		Self {
			type_name: TypeName::Anonymous,
			fields,
		}
	}
}

/// One named field of a record.
#[derive(Debug)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}

impl FieldValue {
	/// Build a field from a name and value.
	pub fn new(name: impl Into<Box<str>>, value: Value) -> Self {
		Self { name: name.into(), value }
	}
}

/// Object exposing the [`Unbox`] capability, paired with its captured type name.
pub struct BoxedValue {
	pub(crate) type_name: TypeName,
	pub(crate) inner: Box<dyn Unbox>,
}

impl BoxedValue {
	/// Captured type name of the wrapped object.
	pub fn type_name(&self) -> &TypeName {
		&self.type_name
	}

	pub(crate) fn unbox_value(&self) -> Value {
		self.inner.unbox()
	}
}

impl fmt::Debug for BoxedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BoxedValue").field("type_name", &self.type_name).finish_non_exhaustive()
	}
}

/// Arbitrary object with no reducible form, kept for failure diagnostics.
pub struct OpaqueValue {
	pub(crate) type_name: TypeName,
	pub(crate) inner: Box<dyn Any>,
}

impl OpaqueValue {
	/// Captured type name of the wrapped object.
	pub fn type_name(&self) -> &TypeName {
		&self.type_name
	}

	/// Borrow the wrapped object if it is a `T`.
	pub fn get<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref()
	}
}

impl fmt::Debug for OpaqueValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OpaqueValue").field("type_name", &self.type_name).finish_non_exhaustive()
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::I64(i64::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Value::U64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value.into())
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Seq(value)
	}
}

impl From<Vec<(Box<str>, Value)>> for Value {
	fn from(value: Vec<(Box<str>, Value)>) -> Self {
		Value::Map(value)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(v) => Value::Bool(v),
			serde_json::Value::Number(n) => {
				if let Some(v) = n.as_i64() {
					Value::I64(v)
				} else if let Some(v) = n.as_u64() {
					Value::U64(v)
				} else {
					Value::F64(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(v) => Value::String(v.into()),
			serde_json::Value::Array(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
			serde_json::Value::Object(entries) => {
				Value::Map(entries.into_iter().map(|(key, value)| (key.into(), Value::from(value))).collect())
			}
		}
	}
}
