//! Recursive reduction of domain values to native data trees.
//!
//! [`unbox`] converts an arbitrary [`Value`] (scalars, null, sequences,
//! mappings, plain records, and objects implementing the [`Unbox`]
//! capability) into a [`Native`] tree built only from null, scalars, ordered
//! sequences, and insertion-ordered mappings, suitable for handing straight to
//! a serializer. The first value that cannot be reduced aborts the conversion
//! with an [`UnboxError::Irreducible`] carrying the offending value, its type
//! label, and the dotted path at which it was found.
//!
//! ```
//! use unboxer::{Unbox, Value, unbox};
//!
//! struct Point {
//! 	x: i64,
//! 	y: i64,
//! }
//!
//! impl Unbox for Point {
//! 	fn unbox(&self) -> Value {
//! 		Value::record("Point", [("x", Value::from(self.x)), ("y", Value::from(self.y))])
//! 	}
//! }
//!
//! let native = unbox(Value::boxed(Point { x: 1, y: 2 })).unwrap();
//! assert_eq!(serde_json::to_string(&native).unwrap(), r#"{"x":1,"y":2}"#);
//! ```

mod convert;
mod error;
mod native;
mod path;
mod value;

/// Conversion entry points and recursion limits.
pub use convert::{UnboxOptions, unbox, unbox_with};
/// Error and result aliases.
pub use error::{Irreducible, Result, UnboxError};
/// Fully reduced output tree.
pub use native::Native;
/// Failure-path segment type and rendering.
pub use path::{PathSegment, render_path};
/// Input value model and the unbox capability.
pub use value::{ANONYMOUS_LABEL, BoxedValue, FieldValue, OpaqueValue, RecordValue, TypeName, Unbox, Value};
