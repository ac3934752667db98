//! Schema-directed reconstruction.
//!
//! The text form carries no type information, so [`Decoder::decode`] takes
//! the target [`Schema`] and lets it pick every branch: which lines are
//! fields, how sequence bodies split into elements, and which kind each
//! token parses as. The result is an immutable [`Value`] tree;
//! materialization into a concrete type happens afterwards through
//! [`Reflect::from_value`](crate::Reflect::from_value), so no partially
//! built target is ever observable.
//!
//! ```rust
//! use dent::{Decoder, ScalarKind, Schema};
//!
//! let schema = Schema::seq(Schema::Scalar(ScalarKind::I32));
//! let value = Decoder::from_str("\n\t- 1\n\t- 2\n").decode(&schema).unwrap();
//! assert_eq!(value.as_seq().map(<[_]>::len), Some(2));
//! ```

use crate::convert;
use crate::extract::{extract_contexts, is_header, split_document, split_jagged, Line};
use crate::{Error, FieldMap, Options, RecordSchema, Result, ScalarKind, Schema, Shape, Value};

/// Reconstructs value trees from indented text.
pub struct Decoder<'de> {
    input: &'de str,
    options: Options,
}

impl<'de> Decoder<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Decoder {
            input,
            options: Options::default(),
        }
    }

    pub fn with_options(input: &'de str, options: Options) -> Self {
        Decoder { input, options }
    }

    /// Decodes the whole document against `schema`.
    pub fn decode(&self, schema: &Schema) -> Result<Value> {
        let lines = split_document(self.input, self.options.indent.as_char());

        // a lone null token is null for any target shape
        let mut populated = lines.iter().filter(|l| !l.content.is_empty());
        if let (Some(first), None) = (populated.next(), populated.next()) {
            if first.indent == 0 && convert::is_null_token(first.content) {
                return Ok(Value::Null);
            }
        }

        match schema {
            Schema::Scalar(kind) => match lines.iter().find(|l| !l.content.is_empty()) {
                Some(line) => convert::parse_token(line.content, *kind, line.number),
                None => Ok(Value::Null),
            },
            Schema::Seq(elem) => self.decode_seq(&root_body(&lines), 0, elem, None),
            Schema::FixedSeq { elem, len } => {
                self.decode_seq(&root_body(&lines), 0, elem, Some(*len))
            }
            Schema::Map { key, value } => self.decode_map(&root_body(&lines), *key, value),
            Schema::Record(record) => self.decode_record(&lines, 0, record),
            Schema::Grid { .. } => Err(grid_error()),
        }
    }

    /// Decodes a field/entry block at `base` indent. The nested value's own
    /// lines all sit strictly deeper than `base`.
    fn decode_nested(&self, body: &[Line<'de>], base: usize, schema: &Schema) -> Result<Value> {
        match schema {
            // a block under a scalar field carries nothing the field can hold
            Schema::Scalar(_) => Ok(Value::Null),
            Schema::Seq(elem) => self.decode_seq(body, base, elem, None),
            Schema::FixedSeq { elem, len } => self.decode_seq(body, base, elem, Some(*len)),
            Schema::Map { key, value } => self.decode_map(body, *key, value),
            Schema::Record(record) => self.decode_record(body, base + 1, record),
            Schema::Grid { .. } => Err(grid_error()),
        }
    }

    fn decode_seq(
        &self,
        body: &[Line<'de>],
        base: usize,
        elem: &Schema,
        fixed: Option<usize>,
    ) -> Result<Value> {
        let items = match elem {
            Schema::Scalar(kind) => body
                .iter()
                .map(|line| {
                    let token = element_token(line)?;
                    convert::parse_token(token, *kind, line.number)
                })
                .collect::<Result<Vec<_>>>()?,
            Schema::Grid { .. } => return Err(grid_error()),
            nested => {
                let blocks = split_jagged(body, base)?;
                blocks
                    .iter()
                    .map(|block| self.decode_element(block, base, nested))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        if let Some(expected) = fixed {
            if items.len() != expected {
                let line = body.first().map_or(0, |l| l.number);
                return Err(Error::mismatch(
                    line,
                    format!(
                        "fixed-length sequence declares {} elements, found {}",
                        expected,
                        items.len()
                    ),
                ));
            }
        }
        Ok(Value::Seq(items))
    }

    /// Decodes one jagged sub-block. `block[0]` is the element-marker line at
    /// `base + 1`; the element's own lines follow it.
    fn decode_element(&self, block: &[Line<'de>], base: usize, elem: &Schema) -> Result<Value> {
        let marker = &block[0];
        let token = element_token(marker)?;
        if !token.is_empty() {
            return self.decode_inline(token, elem, marker.number);
        }
        match elem {
            Schema::Scalar(kind) => convert::parse_token(token, *kind, marker.number),
            Schema::Seq(inner) => self.decode_seq(&block[1..], base + 1, inner, None),
            Schema::FixedSeq { elem: inner, len } => {
                self.decode_seq(&block[1..], base + 1, inner, Some(*len))
            }
            Schema::Map { key, value } => self.decode_map(&block[1..], *key, value),
            Schema::Record(record) => self.decode_record(&block[1..], base + 2, record),
            Schema::Grid { .. } => Err(grid_error()),
        }
    }

    fn decode_map(
        &self,
        body: &[Line<'de>],
        key_kind: ScalarKind,
        value_schema: &Schema,
    ) -> Result<Value> {
        let value_kind = match value_schema {
            Schema::Scalar(kind) => *kind,
            nested => {
                return Err(Error::unsupported(format!(
                    "mapping values must be scalars, declared a {}",
                    Shape::of_schema(nested).name()
                )))
            }
        };

        let mut entries = Vec::with_capacity(body.len());
        for line in body {
            let (key_text, rest) = line.content.split_once(':').ok_or_else(|| {
                Error::document(line.number, "mapping entry without a key separator")
            })?;
            let key = match convert::parse_token(key_text, key_kind, line.number)? {
                Value::Scalar(scalar) => scalar,
                _ => {
                    return Err(Error::conversion(
                        line.number,
                        key_text,
                        key_kind,
                        "mapping keys cannot be null",
                    ))
                }
            };
            let token = rest.strip_prefix(' ').unwrap_or(rest);
            entries.push((key, convert::parse_token(token, value_kind, line.number)?));
        }
        Ok(Value::Map(entries))
    }

    fn decode_record(
        &self,
        body: &[Line<'de>],
        base: usize,
        record: &RecordSchema,
    ) -> Result<Value> {
        let contexts = extract_contexts(body, base);

        // every declared field, in declared order; the text fills them in
        let mut fields = FieldMap::with_capacity(record.fields().len());
        for field in record.fields() {
            fields.insert(field.name().to_string(), Value::Null);
        }

        for (position, line) in body.iter().enumerate() {
            if !is_header(line, base) {
                continue;
            }
            let Some((name, rest)) = line.content.split_once(':') else {
                continue;
            };
            let field = record.field_named(name).ok_or_else(|| {
                Error::mismatch(
                    line.number,
                    format!("{} has no field named `{}`", record.name(), name),
                )
            })?;

            let token = rest.strip_prefix(' ').unwrap_or(rest);
            let value = if !token.is_empty() {
                self.decode_inline(token, field.schema(), line.number)?
            } else if let Some(context) = contexts.get(&position) {
                self.decode_nested(context, base, field.schema())?
            } else {
                Value::Null
            };
            fields.insert(name.to_string(), value);
        }
        Ok(Value::Record(fields))
    }

    /// Decodes an inline token. The null tokens are null for every declared
    /// shape; any other token requires a scalar declaration.
    fn decode_inline(&self, token: &str, schema: &Schema, line: usize) -> Result<Value> {
        if convert::is_null_token(token) {
            return Ok(Value::Null);
        }
        match schema {
            Schema::Scalar(kind) => convert::parse_token(token, *kind, line),
            nested => Err(Error::mismatch(
                line,
                format!(
                    "inline value where a {} was declared",
                    Shape::of_schema(nested).name()
                ),
            )),
        }
    }
}

fn grid_error() -> Error {
    Error::unsupported("rectangular sequences have no text form")
}

/// Strips the element marker from a sequence body line.
fn element_token<'a>(line: &Line<'a>) -> Result<&'a str> {
    let rest = line
        .content
        .strip_prefix('-')
        .ok_or_else(|| Error::document(line.number, "sequence element without a `- ` marker"))?;
    Ok(rest.strip_prefix(' ').unwrap_or(rest))
}

/// The body of a root-level sequence or mapping: everything indented under
/// the (empty) first line of the document.
fn root_body<'a>(lines: &[Line<'a>]) -> Vec<Line<'a>> {
    lines
        .iter()
        .skip_while(|l| l.content.is_empty())
        .take_while(|l| l.indent > 0)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scalar, ScalarKind};

    fn decode(text: &str, schema: &Schema) -> Result<Value> {
        Decoder::from_str(text).decode(schema)
    }

    #[test]
    fn scalar_roots() {
        let schema = Schema::Scalar(ScalarKind::I32);
        assert_eq!(decode("42\n", &schema).unwrap(), Value::from(42));
        assert_eq!(decode("~\n", &schema).unwrap(), Value::Null);
        assert_eq!(decode("", &schema).unwrap(), Value::Null);
    }

    #[test]
    fn scalar_sequence_root() {
        let schema = Schema::seq(Schema::Scalar(ScalarKind::I32));
        let value = decode("\n\t- 1\n\t- 2\n\t- 3\n", &schema).unwrap();
        assert_eq!(
            value,
            Value::Seq(vec![Value::from(1), Value::from(2), Value::from(3)])
        );
    }

    #[test]
    fn record_fields_fill_in_declared_order() {
        let record = RecordSchema::new("Player")
            .field("id", Schema::Scalar(ScalarKind::U32))
            .field("name", Schema::Scalar(ScalarKind::Str));
        let schema = Schema::Record(record);
        // text order differs from declared order
        let value = decode("name: a\nid: 1\n", &schema).unwrap();
        let fields = value.as_record().unwrap();
        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(fields.get("id"), Some(&Value::from(1u32)));
        assert_eq!(fields.get("name"), Some(&Value::from("a")));
    }

    #[test]
    fn absent_fields_are_null() {
        let record = RecordSchema::new("Player")
            .field("id", Schema::Scalar(ScalarKind::U32))
            .field("name", Schema::Scalar(ScalarKind::Str));
        let value = decode("id: 1\n", &Schema::Record(record)).unwrap();
        assert_eq!(value.as_record().unwrap().get("name"), Some(&Value::Null));
    }

    #[test]
    fn unknown_field_is_a_mismatch() {
        let record = RecordSchema::new("Player").field("id", Schema::Scalar(ScalarKind::U32));
        let err = decode("id: 1\nbogus: 2\n", &Schema::Record(record)).unwrap_err();
        match err {
            Error::Mismatch { line, msg } => {
                assert_eq!(line, 2);
                assert!(msg.contains("bogus"));
                assert!(msg.contains("Player"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_record_elements() {
        let point = RecordSchema::new("Point")
            .field("x", Schema::Scalar(ScalarKind::I32))
            .field("y", Schema::Scalar(ScalarKind::I32));
        let record =
            RecordSchema::new("Path").field("points", Schema::seq(Schema::Record(point)));
        let text = "points: \n\t- \n\t\tx: 1\n\t\ty: 2\n\t- \n\t\tx: 3\n\t\ty: 4\n";
        let value = decode(text, &Schema::Record(record)).unwrap();
        let points = value.as_record().unwrap().get("points").unwrap();
        let items = points.as_seq().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1].as_record().unwrap().get("x"),
            Some(&Value::from(3))
        );
    }

    #[test]
    fn jagged_nested_sequences() {
        let record = RecordSchema::new("Board").field(
            "rows",
            Schema::seq(Schema::seq(Schema::Scalar(ScalarKind::I32))),
        );
        let text = "rows: \n\t- \n\t\t- 1\n\t\t- 2\n\t- \n\t\t- 3\n";
        let value = decode(text, &Schema::Record(record)).unwrap();
        let rows = value.as_record().unwrap().get("rows").unwrap();
        assert_eq!(
            rows,
            &Value::Seq(vec![
                Value::Seq(vec![Value::from(1), Value::from(2)]),
                Value::Seq(vec![Value::from(3)]),
            ])
        );
    }

    #[test]
    fn fixed_length_count_is_enforced() {
        let schema = Schema::fixed_seq(Schema::Scalar(ScalarKind::I32), 3);
        assert!(decode("\n\t- 1\n\t- 2\n\t- 3\n", &schema).is_ok());
        let err = decode("\n\t- 1\n\t- 2\n", &schema).unwrap_err();
        assert!(matches!(err, Error::Mismatch { .. }));
    }

    #[test]
    fn mapping_entries_keep_encounter_order() {
        let schema = Schema::map(ScalarKind::I32, Schema::Scalar(ScalarKind::Str));
        let value = decode("\n\t2: Two\n\t1: One\n", &schema).unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (Scalar::Int(2), Value::from("Two")),
                (Scalar::Int(1), Value::from("One")),
            ])
        );
    }

    #[test]
    fn mapping_with_nested_value_schema_is_unsupported() {
        let schema = Schema::map(
            ScalarKind::Str,
            Schema::seq(Schema::Scalar(ScalarKind::I32)),
        );
        let err = decode("\n\tk: \n", &schema).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn null_mapping_key_is_rejected() {
        let schema = Schema::map(ScalarKind::I32, Schema::Scalar(ScalarKind::Str));
        let err = decode("\n\t~: x\n", &schema).unwrap_err();
        assert!(matches!(err, Error::Conversion { .. }));
    }

    #[test]
    fn inline_token_against_nested_shape_is_a_mismatch() {
        let record = RecordSchema::new("R").field(
            "tags",
            Schema::seq(Schema::Scalar(ScalarKind::Str)),
        );
        let err = decode("tags: x\n", &Schema::Record(record)).unwrap_err();
        assert!(matches!(err, Error::Mismatch { line: 1, .. }));
    }

    #[test]
    fn null_token_fits_any_declared_shape() {
        let record = RecordSchema::new("R").field(
            "tags",
            Schema::seq(Schema::Scalar(ScalarKind::Str)),
        );
        let value = decode("tags: ~\n", &Schema::Record(record)).unwrap();
        assert_eq!(value.as_record().unwrap().get("tags"), Some(&Value::Null));
    }

    #[test]
    fn null_sequence_elements() {
        let point = RecordSchema::new("Point").field("x", Schema::Scalar(ScalarKind::I32));
        let schema = Schema::seq(Schema::Record(point));
        let value = decode("\n\t- ~\n", &schema).unwrap();
        assert_eq!(value, Value::Seq(vec![Value::Null]));
    }

    #[test]
    fn element_without_marker_is_malformed() {
        let schema = Schema::seq(Schema::Scalar(ScalarKind::I32));
        let err = decode("\n\t1\n", &schema).unwrap_err();
        assert!(matches!(err, Error::Document { line: 2, .. }));
    }

    #[test]
    fn grid_schema_never_decodes() {
        let schema = Schema::grid(Schema::Scalar(ScalarKind::I32), 2);
        assert!(matches!(
            decode("\n\t- 1\n", &schema),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn lone_null_token_is_null_for_records_too() {
        let record = RecordSchema::new("R").field("id", Schema::Scalar(ScalarKind::U32));
        assert_eq!(decode("~\n", &Schema::Record(record)).unwrap(), Value::Null);
    }
}
