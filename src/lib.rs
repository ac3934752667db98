//! # dent
//!
//! An encoder/decoder for a deliberately tiny, indentation-delimited notation
//! — a strict subset of block-style YAML — aimed at embedding small
//! configuration and data records in human-editable text.
//!
//! ## What the notation looks like
//!
//! ```text
//! id: 1
//! name: a
//! tags:
//!     - x
//!     - y
//! ```
//!
//! One marker character (tab by default) per nesting level, `name: value`
//! field lines, `- value` element lines, `~` for null. No quoting, no
//! escaping, no comments, no type tags: the text is not self-describing, so
//! decoding always takes the target type. See [`format`] for the full
//! reference.
//!
//! ## Quick start
//!
//! Register a struct with [`reflect!`] and use [`to_string`]/[`from_str`]:
//!
//! ```rust
//! use dent::{from_str, reflect, to_string};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! reflect! {
//!     User {
//!         id: u32,
//!         name: String,
//!         active: bool,
//!     }
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true\n");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(back, user);
//! ```
//!
//! Supported field types: the builtin scalars (`bool`, integers of every
//! width, `f32`/`f64`, [`rust_decimal::Decimal`], `char`, `String`),
//! `Option<T>`, `Vec<T>`, `[T; N]`, `IndexMap<K, V>` with scalar keys and
//! values, and any other registered struct.
//!
//! ## Dynamic values
//!
//! The engine itself works on [`Value`] trees, built with the [`dent!`] macro
//! or by hand, and driven through [`Serializer`] and [`Decoder`] with an
//! explicit [`Schema`]:
//!
//! ```rust
//! use dent::{dent, Options, Serializer};
//!
//! let value = dent!({"id": 1, "tags": ["x"]});
//! let mut serializer = Serializer::new(Options::default());
//! serializer.serialize(&value).unwrap();
//! assert_eq!(serializer.into_inner(), "id: 1\ntags: \n\t- x\n");
//! ```
//!
//! ## Errors
//!
//! Every failure aborts the whole call with a single [`Error`]: unsupported
//! constructs (rectangular sequences, nested mapping values), conversion
//! failures naming the token and its declared kind, schema mismatches
//! (unknown fields, wrong fixed lengths), and malformed documents. Nothing is
//! partially written and nothing is partially materialized.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod schema;
pub mod ser;
pub mod shape;
pub mod value;

mod convert;
mod extract;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::FieldMap;
pub use options::{Indent, Options};
pub use schema::{
    FieldSchema, Grid, RecordSchema, Reflect, ScalarKind, ScalarReflect, Schema,
};
pub use ser::Serializer;
pub use shape::Shape;
pub use value::{Scalar, Value};

use std::io;

/// Encodes any registered value as notation text.
///
/// # Examples
///
/// ```rust
/// let tags = vec!["x".to_string(), "y".to_string()];
/// assert_eq!(dent::to_string(&tags).unwrap(), "\n\t- x\n\t- y\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value contains an unsupported shape; no text is
/// returned in that case.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: Reflect,
{
    to_string_with_options(value, Options::default())
}

/// Encodes with explicit [`Options`].
///
/// # Examples
///
/// ```rust
/// use dent::{Indent, Options};
///
/// let tags = vec!["x".to_string()];
/// let options = Options::new().with_indent(Indent::Space);
/// assert_eq!(dent::to_string_with_options(&tags, options).unwrap(), "\n - x\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value contains an unsupported shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: Options) -> Result<String>
where
    T: Reflect,
{
    let tree = value.to_value()?;
    let mut serializer = Serializer::new(options);
    serializer.serialize(&tree)?;
    Ok(serializer.into_inner())
}

/// Encodes into a writer.
///
/// The document is fully serialized before the first byte is written, so a
/// failed encode writes nothing.
///
/// # Errors
///
/// Returns an error if encoding fails or the writer does.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Reflect,
{
    to_writer_with_options(writer, value, Options::default())
}

/// Encodes into a writer with explicit [`Options`].
///
/// # Errors
///
/// Returns an error if encoding fails or the writer does.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: Options) -> Result<()>
where
    W: io::Write,
    T: Reflect,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes()).map_err(Error::io)
}

/// Reads a value graph into a dynamic [`Value`] tree.
///
/// # Errors
///
/// Returns an error if the value contains an unsupported shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: Reflect,
{
    value.to_value()
}

/// Materializes a registered type from a dynamic [`Value`] tree.
///
/// # Errors
///
/// Returns an error if the tree does not fit the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: Reflect,
{
    T::from_value(value)
}

/// Decodes notation text into a registered type.
///
/// The target type supplies the schema; the text carries none.
///
/// # Examples
///
/// ```rust
/// let tags: Vec<String> = dent::from_str("\n\t- x\n\t- y\n").unwrap();
/// assert_eq!(tags, vec!["x".to_string(), "y".to_string()]);
/// ```
///
/// # Errors
///
/// Returns an error for malformed documents, unknown fields, wrong fixed
/// lengths, or unparsable tokens; the error names the offending line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: Reflect,
{
    from_str_with_options(s, Options::default())
}

/// Decodes with explicit [`Options`]. A document must be decoded with the
/// same indent marker it was encoded with.
///
/// # Errors
///
/// Returns an error if the text does not decode against the target schema.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: Options) -> Result<T>
where
    T: Reflect,
{
    let schema = T::schema();
    let tree = Decoder::with_options(s, options).decode(&schema)?;
    T::from_value(tree)
}

/// Decodes from a reader.
///
/// # Errors
///
/// Returns an error if reading fails or the text does not decode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Reflect,
{
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(Error::io)?;
    from_str(&text)
}

/// Decodes from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8 or the text does not decode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: Reflect,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::message(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    reflect! {
        Point {
            x: i32,
            y: i32,
        }
    }

    #[derive(Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    reflect! {
        User {
            id: u32,
            name: String,
            active: bool,
            tags: Vec<String>,
        }
    }

    #[test]
    fn point_roundtrip() {
        let point = Point { x: 1, y: -2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x: 1\ny: -2\n");
        let back: Point = from_str(&text).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn user_roundtrip() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };
        let back: User = from_str(&to_string(&user).unwrap()).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn null_law() {
        assert_eq!(to_string(&None::<u32>).unwrap(), "~\n");
        assert_eq!(from_str::<Option<u32>>("~\n").unwrap(), None);
        assert_eq!(from_str::<Option<Point>>("~").unwrap(), None);
        assert_eq!(from_str::<u32>("~\n").unwrap(), 0);
    }

    #[test]
    fn to_value_reads_the_graph() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();
        let fields = value.as_record().unwrap();
        assert_eq!(fields.get("x"), Some(&Value::from(1)));
        assert_eq!(fields.get("y"), Some(&Value::from(2)));
        assert_eq!(from_value::<Point>(value).unwrap(), point);
    }

    #[test]
    fn writer_and_reader_adapters() {
        let user = User {
            id: 1,
            name: "a".to_string(),
            active: false,
            tags: vec![],
        };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &user).unwrap();
        let back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, user);
        let again: User = from_slice(&buffer).unwrap();
        assert_eq!(again, user);
    }

    #[test]
    fn options_roundtrip_with_spaces() {
        let point = Point { x: 3, y: 4 };
        let options = Options::new().with_indent(Indent::Space);
        let text = to_string_with_options(&point, options).unwrap();
        let back: Point = from_str_with_options(&text, options).unwrap();
        assert_eq!(back, point);
    }
}
