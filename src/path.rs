use std::fmt;

/// One step of the location at which a value was found during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
	/// Mapping key, record field name, or object type label.
	Key(Box<str>),
	/// Zero-based sequence index.
	Index(usize),
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PathSegment::Key(key) => f.write_str(key),
			PathSegment::Index(index) => write!(f, "{index}"),
		}
	}
}

/// Render a path as its segments joined with `.`.
pub fn render_path(segments: &[PathSegment]) -> String {
	segments.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
}
