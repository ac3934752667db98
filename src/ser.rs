//! Text emission.
//!
//! [`Serializer`] walks a value tree and appends indented text to an owned
//! buffer. The shape of each node picks the emission rule; the declared
//! schema is not consulted, because a value's own structure is the structure
//! the text must carry.
//!
//! ## Usage
//!
//! Most callers use [`to_string`](crate::to_string) on a [`Reflect`] type.
//! The serializer itself works on dynamic values:
//!
//! ```rust
//! use dent::{dent, Options, Serializer};
//!
//! let value = dent!({"id": 1, "name": "a"});
//! let mut serializer = Serializer::new(Options::default());
//! serializer.serialize(&value).unwrap();
//! assert_eq!(serializer.into_inner(), "id: 1\nname: a\n");
//! ```
//!
//! [`Reflect`]: crate::Reflect

use crate::convert::NULL_TOKEN;
use crate::{Error, Options, Result, Shape, Value};

/// Writes value trees as indented text.
pub struct Serializer {
    out: String,
    options: Options,
}

impl Serializer {
    pub fn new(options: Options) -> Self {
        Serializer {
            // enough for a typical small record without reallocating
            out: String::with_capacity(256),
            options,
        }
    }

    /// Appends the encoding of `value` as a whole document.
    pub fn serialize(&mut self, value: &Value) -> Result<()> {
        self.encode(value, 0)
    }

    /// Consumes the serializer, returning the emitted text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.out
    }

    fn push_indent(&mut self, level: usize) {
        let marker = self.options.indent.as_char();
        for _ in 0..level {
            self.out.push(marker);
        }
    }

    fn encode(&mut self, value: &Value, indent: usize) -> Result<()> {
        match value {
            Value::Null => {
                self.out.push_str(NULL_TOKEN);
                self.out.push('\n');
            }
            Value::Scalar(scalar) => {
                self.out.push_str(&scalar.to_string());
                self.out.push('\n');
            }
            Value::Seq(items) => {
                // the header line ends here; elements sit one level deeper
                self.out.push('\n');
                for item in items {
                    self.push_indent(indent + 1);
                    self.out.push_str("- ");
                    if item.is_record() {
                        self.out.push('\n');
                        self.encode(item, indent + 2)?;
                    } else {
                        self.encode(item, indent + 1)?;
                    }
                }
            }
            Value::Map(entries) => {
                self.out.push('\n');
                for (key, entry) in entries {
                    self.push_indent(indent + 1);
                    self.out.push_str(&key.to_string());
                    self.out.push_str(": ");
                    match entry {
                        Value::Null | Value::Scalar(_) => self.encode(entry, indent + 1)?,
                        nested => {
                            return Err(Error::unsupported(format!(
                                "mapping values must be scalars, found a {}",
                                Shape::of_value(nested).name()
                            )))
                        }
                    }
                }
            }
            Value::Record(fields) => {
                for (name, field) in fields.iter() {
                    self.push_indent(indent);
                    self.out.push_str(name);
                    self.out.push_str(": ");
                    if field.is_record() {
                        self.out.push('\n');
                        self.encode(field, indent + 1)?;
                    } else {
                        self.encode(field, indent)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dent, Indent, Scalar};

    fn encode(value: &Value) -> String {
        let mut serializer = Serializer::new(Options::default());
        serializer.serialize(value).unwrap();
        serializer.into_inner()
    }

    #[test]
    fn null_is_one_tilde_line() {
        assert_eq!(encode(&Value::Null), "~\n");
    }

    #[test]
    fn scalars_are_one_token_line() {
        assert_eq!(encode(&Value::from(42)), "42\n");
        assert_eq!(encode(&Value::from(true)), "true\n");
        assert_eq!(encode(&Value::from("a b")), "a b\n");
    }

    #[test]
    fn record_with_scalar_and_sequence_fields() {
        let value = dent!({"id": 1, "name": "a", "tags": ["x", "y"]});
        assert_eq!(encode(&value), "id: 1\nname: a\ntags: \n\t- x\n\t- y\n");
    }

    #[test]
    fn nested_records_indent_one_level() {
        let value = dent!({"pos": {"x": 1, "y": 2}});
        assert_eq!(encode(&value), "pos: \n\tx: 1\n\ty: 2\n");
    }

    #[test]
    fn record_elements_get_a_bare_marker_line() {
        let value = dent!({"points": [{"x": 1}, {"x": 2}]});
        assert_eq!(
            encode(&value),
            "points: \n\t- \n\t\tx: 1\n\t- \n\t\tx: 2\n"
        );
    }

    #[test]
    fn nested_sequences_share_the_marker_line_rule() {
        let value = dent!({"grid": [[1, 2], [3]]});
        assert_eq!(
            encode(&value),
            "grid: \n\t- \n\t\t- 1\n\t\t- 2\n\t- \n\t\t- 3\n"
        );
    }

    #[test]
    fn mappings_emit_entries_in_order() {
        let value = Value::Map(vec![
            (Scalar::Int(1), Value::from("One")),
            (Scalar::Int(2), Value::from("Two")),
        ]);
        assert_eq!(encode(&value), "\n\t1: One\n\t2: Two\n");
    }

    #[test]
    fn mapping_values_must_be_scalar() {
        let value = Value::Map(vec![(Scalar::Int(1), dent!(["x"]))]);
        let mut serializer = Serializer::new(Options::default());
        assert!(matches!(
            serializer.serialize(&value),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn null_fields_stay_inline() {
        let value = dent!({"gone": null, "kept": 3});
        assert_eq!(encode(&value), "gone: ~\nkept: 3\n");
    }

    #[test]
    fn space_indentation() {
        let value = dent!({"tags": ["x"]});
        let mut serializer = Serializer::new(Options::new().with_indent(Indent::Space));
        serializer.serialize(&value).unwrap();
        assert_eq!(serializer.into_inner(), "tags: \n - x\n");
    }
}
