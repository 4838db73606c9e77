use crate::error::{Irreducible, Result, UnboxError};
use crate::native::Native;
use crate::path::PathSegment;
use crate::value::{FieldValue, Value};

/// Runtime limits for recursive reduction.
#[derive(Debug, Clone, Default)]
pub struct UnboxOptions {
	/// Maximum recursion depth; `None` leaves recursion unbounded, in which
	/// case the caller is responsible for bounding input nesting.
	pub max_depth: Option<u32>,
}

/// Reduce `value` to a tree of native primitive and container types.
///
/// Fails with [`UnboxError::Irreducible`] on the first value that is none of
/// null, scalar, unboxable object, plain record, or container. Behavior is
/// fixed; recursion is unbounded, so input depth (and absence of reference
/// cycles) is the caller's responsibility.
pub fn unbox(value: Value) -> Result<Native> {
	convert(value, Vec::new(), 0, &UnboxOptions::default())
}

/// Reduce `value` like [`unbox`], honoring the given limits.
///
/// With `max_depth` set, recursion past the limit fails with
/// [`UnboxError::DepthExceeded`] instead of exhausting the stack.
pub fn unbox_with(value: Value, opt: &UnboxOptions) -> Result<Native> {
	convert(value, Vec::new(), 0, opt)
}

fn convert(value: Value, path: Vec<PathSegment>, depth: u32, opt: &UnboxOptions) -> Result<Native> {
	if let Some(max_depth) = opt.max_depth {
		if depth > max_depth {
			return Err(UnboxError::DepthExceeded { max_depth });
		}
	}

	match value {
		Value::Null => Ok(Native::Null),
		Value::Bool(v) => Ok(Native::Bool(v)),
		Value::I64(v) => Ok(Native::I64(v)),
		Value::U64(v) => Ok(Native::U64(v)),
		Value::F64(v) => Ok(Native::F64(v)),
		Value::String(v) => Ok(Native::String(v)),
		Value::Boxed(boxed) => {
			let mut path = path;
			path.push(PathSegment::Key(boxed.type_name().label().into()));
			let inner = boxed.unbox_value();
			convert(inner, path, depth + 1, opt)
		}
		Value::Record(record) => {
			// A record is a mapping with a type label on the path.
			let mut path = path;
			path.push(PathSegment::Key(record.type_name.label().into()));
			let entries = record
				.fields
				.into_iter()
				.map(|FieldValue { name, value }| (name, value))
				.collect();
			convert(Value::Map(entries), path, depth + 1, opt)
		}
		Value::Seq(items) => Ok(Native::Seq(convert_seq(items, &path, depth, opt)?)),
		Value::Map(entries) => Ok(Native::Map(convert_map(entries, &path, depth, opt)?)),
		Value::Opaque(opaque) => Err(UnboxError::Irreducible(Irreducible::new(Value::Opaque(opaque), path))),
	}
}

fn convert_seq(items: Vec<Value>, path: &[PathSegment], depth: u32, opt: &UnboxOptions) -> Result<Vec<Native>> {
	let mut out = Vec::with_capacity(items.len());
	for (index, item) in items.into_iter().enumerate() {
		let mut entry_path = path.to_vec();
		entry_path.push(PathSegment::Index(index));
		out.push(convert(item, entry_path, depth + 1, opt)?);
	}
	Ok(out)
}

fn convert_map(
	entries: Vec<(Box<str>, Value)>,
	path: &[PathSegment],
	depth: u32,
	opt: &UnboxOptions,
) -> Result<Vec<(Box<str>, Native)>> {
	let mut out = Vec::with_capacity(entries.len());
	for (key, value) in entries {
		let mut entry_path = path.to_vec();
		entry_path.push(PathSegment::Key(key.clone()));
		out.push((key, convert(value, entry_path, depth + 1, opt)?));
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::{UnboxOptions, unbox, unbox_with};
	use crate::error::UnboxError;
	use crate::native::Native;
	use crate::value::{Unbox, Value};

	struct Point {
		x: i64,
		y: i64,
	}

	impl Unbox for Point {
		fn unbox(&self) -> Value {
			Value::record("Point", [("x", Value::from(self.x)), ("y", Value::from(self.y))])
		}
	}

	struct Handle;

	#[test]
	fn scalars_are_identity() {
		assert_eq!(unbox(Value::Null).unwrap(), Native::Null);
		assert_eq!(unbox(Value::from(true)).unwrap(), Native::Bool(true));
		assert_eq!(unbox(Value::from(-3_i64)).unwrap(), Native::I64(-3));
		assert_eq!(unbox(Value::from(3_u64)).unwrap(), Native::U64(3));
		assert_eq!(unbox(Value::from(1.25)).unwrap(), Native::F64(1.25));
		assert_eq!(unbox(Value::from("hi")).unwrap(), Native::String("hi".into()));
	}

	#[test]
	fn sequences_preserve_length_and_order() {
		let out = unbox(Value::Seq(vec![Value::from(1_i64), Value::from("two"), Value::Null])).unwrap();
		assert_eq!(
			out,
			Native::Seq(vec![Native::I64(1), Native::String("two".into()), Native::Null])
		);
	}

	#[test]
	fn mappings_preserve_keys_and_insertion_order() {
		let out = unbox(Value::Map(vec![
			("b".into(), Value::from(2_i64)),
			("a".into(), Value::from(1_i64)),
		]))
		.unwrap();
		assert_eq!(
			out,
			Native::Map(vec![("b".into(), Native::I64(2)), ("a".into(), Native::I64(1))])
		);
	}

	#[test]
	fn records_reduce_to_field_mappings() {
		let out = unbox(Value::record("Pair", [("a", Value::from(1_i64)), ("b", Value::from("x"))])).unwrap();
		assert_eq!(
			out,
			Native::Map(vec![("a".into(), Native::I64(1)), ("b".into(), Native::String("x".into()))])
		);
	}

	#[test]
	fn boxed_objects_delegate_transparently() {
		let direct = unbox(Point { x: 1, y: 2 }.unbox()).unwrap();
		let boxed = unbox(Value::boxed(Point { x: 1, y: 2 })).unwrap();
		assert_eq!(direct, boxed);
	}

	#[test]
	fn chained_unboxables_keep_reducing() {
		struct Outer;
		impl Unbox for Outer {
			fn unbox(&self) -> Value {
				Value::boxed(Point { x: 9, y: 9 })
			}
		}
		let out = unbox(Value::boxed(Outer)).unwrap();
		assert_eq!(
			out,
			Native::Map(vec![("x".into(), Native::I64(9)), ("y".into(), Native::I64(9))])
		);
	}

	#[test]
	fn closures_unbox_with_anonymous_label() {
		let out = unbox(Value::boxed(|| Value::from(42_i64))).unwrap();
		assert_eq!(out, Native::I64(42));

		let err = unbox(Value::Map(vec![("k".into(), Value::boxed(|| Value::opaque(Handle)))])).unwrap_err();
		let UnboxError::Irreducible(failure) = err else {
			panic!("expected irreducible failure");
		};
		assert_eq!(failure.path(), "k.{class}");
	}

	#[test]
	fn first_failing_entry_aborts_the_traversal() {
		let err = unbox(Value::Seq(vec![
			Value::from(1_i64),
			Value::opaque(Handle),
			Value::from(3_i64),
		]))
		.unwrap_err();
		let UnboxError::Irreducible(failure) = err else {
			panic!("expected irreducible failure");
		};
		assert_eq!(failure.path(), "1");
		assert!(failure.type_label().ends_with("Handle"));
	}

	#[test]
	fn sibling_paths_do_not_leak_segments() {
		let err = unbox(Value::Map(vec![
			("ok".into(), Value::Seq(vec![Value::from(1_i64), Value::from(2_i64)])),
			("bad".into(), Value::opaque(Handle)),
		]))
		.unwrap_err();
		let UnboxError::Irreducible(failure) = err else {
			panic!("expected irreducible failure");
		};
		assert_eq!(failure.path(), "bad");
	}

	#[test]
	fn top_level_opaque_fails_with_empty_path() {
		let err = unbox(Value::opaque(Handle)).unwrap_err();
		let UnboxError::Irreducible(failure) = err else {
			panic!("expected irreducible failure");
		};
		assert_eq!(failure.path(), "");
		assert!(failure.value().type_label().ends_with("Handle"));
	}

	#[test]
	fn depth_limit_fails_with_distinct_error() {
		let deep = Value::Seq(vec![Value::Seq(vec![Value::Seq(vec![Value::from(1_i64)])])]);
		let err = unbox_with(deep, &UnboxOptions { max_depth: Some(2) }).unwrap_err();
		assert!(matches!(err, UnboxError::DepthExceeded { max_depth: 2 }));

		let shallow = Value::Seq(vec![Value::from(1_i64)]);
		let out = unbox_with(shallow, &UnboxOptions { max_depth: Some(2) }).unwrap();
		assert_eq!(out, Native::Seq(vec![Native::I64(1)]));
	}

	#[test]
	fn default_options_leave_depth_unbounded() {
		let mut value = Value::from(0_i64);
		for _ in 0..200 {
			value = Value::Seq(vec![value]);
		}
		assert!(unbox(value).is_ok());
	}
}
