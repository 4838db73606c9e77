use thiserror::Error;

use crate::path::{self, PathSegment};
use crate::value::Value;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, UnboxError>;

/// Errors produced while reducing values to native data trees.
#[derive(Debug, Error)]
pub enum UnboxError {
	/// Traversal reached a value that cannot be reduced to native types.
	#[error("could not unbox to native data types, encountered type \"{}\" at path \"{}\"", .0.type_label(), .0.path())]
	Irreducible(Irreducible),
	/// Recursion exceeded the configured depth limit.
	#[error("unbox depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}

/// Diagnostic payload of an irreducible-value failure.
///
/// The type label and rendered path are computed once at construction; the
/// offending value is held untouched for inspection only.
#[derive(Debug)]
pub struct Irreducible {
	value: Value,
	type_label: Box<str>,
	path: Box<str>,
	segments: Vec<PathSegment>,
}

impl Irreducible {
	pub(crate) fn new(value: Value, segments: Vec<PathSegment>) -> Self {
		let type_label = value.type_label().into();
		let path = path::render_path(&segments).into();
		Self {
			value,
			type_label,
			path,
			segments,
		}
	}

	/// The offending value exactly as traversal encountered it.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Computed type label of the offending value.
	pub fn type_label(&self) -> &str {
		&self.type_label
	}

	/// Location of the failure, rendered with `.` between segments.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Raw path segments accumulated up to the failure.
	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}
}
