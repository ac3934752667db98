//! Type descriptions and the reflection boundary.
//!
//! The text form carries no type information, so decoding needs a [`Schema`]
//! describing the target's shape. Schemas come from the [`Reflect`] trait:
//! the crate implements it for the builtin scalar kinds, `Option<T>`,
//! `Vec<T>`, `[T; N]`, and `IndexMap<K, V>`, and the [`reflect!`] macro
//! implements it for user records. Composite schemas are built once per type
//! and cached behind a `OnceLock`, so repeated calls share one immutable
//! description.
//!
//! [`reflect!`]: crate::reflect
//!
//! ```rust
//! use dent::{reflect, Reflect, Schema, ScalarKind};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! reflect! {
//!     Point {
//!         x: i32,
//!         y: i32,
//!     }
//! }
//!
//! assert_eq!(i32::schema(), Schema::Scalar(ScalarKind::I32));
//! assert!(matches!(Point::schema(), Schema::Record(_)));
//! ```

use crate::{Error, Result, Scalar, Value};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::fmt;
use std::hash::Hash;

/// The closed set of builtin scalar kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    Char,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Str => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Char => "char",
        };
        f.write_str(name)
    }
}

/// The shape of a type, as the decoder needs to see it.
#[derive(Clone, Debug, PartialEq)]
pub enum Schema {
    /// A single token.
    Scalar(ScalarKind),
    /// A homogeneous sequence with a declared element count.
    FixedSeq { elem: Box<Schema>, len: usize },
    /// A homogeneous sequence of any length.
    Seq(Box<Schema>),
    /// A rectangular (rank ≥ 2) sequence. Declarable, never codable: every
    /// encode or decode that reaches this shape fails.
    Grid { elem: Box<Schema>, rank: usize },
    /// An ordered mapping. Only scalar value schemas are codable.
    Map { key: ScalarKind, value: Box<Schema> },
    /// A composite with named, ordered fields.
    Record(RecordSchema),
}

impl Schema {
    /// A variable-length sequence of `elem`.
    #[must_use]
    pub fn seq(elem: Schema) -> Self {
        Schema::Seq(Box::new(elem))
    }

    /// A sequence of exactly `len` elements of `elem`.
    #[must_use]
    pub fn fixed_seq(elem: Schema, len: usize) -> Self {
        Schema::FixedSeq {
            elem: Box::new(elem),
            len,
        }
    }

    /// A rectangular sequence of the given rank.
    #[must_use]
    pub fn grid(elem: Schema, rank: usize) -> Self {
        Schema::Grid {
            elem: Box::new(elem),
            rank,
        }
    }

    /// An ordered mapping from `key` tokens to `value`.
    #[must_use]
    pub fn map(key: ScalarKind, value: Schema) -> Self {
        Schema::Map {
            key,
            value: Box::new(value),
        }
    }
}

/// Description of one record field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    name: String,
    schema: Schema,
    transient: bool,
}

impl FieldSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Transient fields are declared (so documents naming them still parse)
    /// but never serialized; they materialize from their type's default.
    pub fn is_transient(&self) -> bool {
        self.transient
    }
}

/// Description of a composite type: its name and ordered field list.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldSchema>,
}

impl RecordSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        RecordSchema {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a serialized field. Declaration order is emission order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
            transient: false,
        });
        self
    }

    /// Appends a transient field.
    #[must_use]
    pub fn transient_field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
            transient: true,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The reflection boundary: how a Rust type describes and exchanges its data.
///
/// `from_value` materializes through the type's own constructor, in declared
/// field order; a failed materialization never exposes a partially built
/// value. Null materializes as the type's natural default (`None`, zero,
/// empty) for every implementation in this crate.
pub trait Reflect: Sized {
    /// The type's shape description.
    fn schema() -> Schema;

    /// Reads the value graph out of `self`.
    fn to_value(&self) -> Result<Value>;

    /// Builds `Self` from a decoded value tree.
    fn from_value(value: Value) -> Result<Self>;
}

/// Types usable as mapping keys and entry values: exactly the builtin scalar
/// kinds (and `Option` of them, for nullable entry values).
pub trait ScalarReflect: Reflect {
    fn kind() -> ScalarKind;
}

macro_rules! reflect_signed {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Reflect for $ty {
            fn schema() -> Schema {
                Schema::Scalar(ScalarKind::$kind)
            }

            fn to_value(&self) -> Result<Value> {
                Ok(Value::from(*self))
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Null => Ok(0),
                    Value::Scalar(Scalar::Int(i)) => <$ty>::try_from(i).map_err(|_| {
                        Error::message(format!("{} does not fit in {}", i, ScalarKind::$kind))
                    }),
                    Value::Scalar(Scalar::UInt(u)) => <$ty>::try_from(u).map_err(|_| {
                        Error::message(format!("{} does not fit in {}", u, ScalarKind::$kind))
                    }),
                    other => Err(Error::message(format!(
                        "expected {}, found {:?}",
                        ScalarKind::$kind,
                        other
                    ))),
                }
            }
        }

        impl ScalarReflect for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::$kind
            }
        }
    )*};
}

reflect_signed! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
}

macro_rules! reflect_unsigned {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Reflect for $ty {
            fn schema() -> Schema {
                Schema::Scalar(ScalarKind::$kind)
            }

            fn to_value(&self) -> Result<Value> {
                Ok(Value::from(*self))
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Null => Ok(0),
                    Value::Scalar(Scalar::UInt(u)) => <$ty>::try_from(u).map_err(|_| {
                        Error::message(format!("{} does not fit in {}", u, ScalarKind::$kind))
                    }),
                    Value::Scalar(Scalar::Int(i)) => u64::try_from(i)
                        .ok()
                        .and_then(|u| <$ty>::try_from(u).ok())
                        .ok_or_else(|| {
                            Error::message(format!("{} does not fit in {}", i, ScalarKind::$kind))
                        }),
                    other => Err(Error::message(format!(
                        "expected {}, found {:?}",
                        ScalarKind::$kind,
                        other
                    ))),
                }
            }
        }

        impl ScalarReflect for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::$kind
            }
        }
    )*};
}

reflect_unsigned! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl Reflect for bool {
    fn schema() -> Schema {
        Schema::Scalar(ScalarKind::Bool)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(false),
            Value::Scalar(Scalar::Bool(b)) => Ok(b),
            other => Err(Error::message(format!("expected bool, found {:?}", other))),
        }
    }
}

impl ScalarReflect for bool {
    fn kind() -> ScalarKind {
        ScalarKind::Bool
    }
}

impl Reflect for f32 {
    fn schema() -> Schema {
        Schema::Scalar(ScalarKind::F32)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(0.0),
            Value::Scalar(Scalar::F32(x)) => Ok(x),
            Value::Scalar(Scalar::F64(x)) => Ok(x as f32),
            Value::Scalar(Scalar::Int(i)) => Ok(i as f32),
            Value::Scalar(Scalar::UInt(u)) => Ok(u as f32),
            other => Err(Error::message(format!("expected f32, found {:?}", other))),
        }
    }
}

impl ScalarReflect for f32 {
    fn kind() -> ScalarKind {
        ScalarKind::F32
    }
}

impl Reflect for f64 {
    fn schema() -> Schema {
        Schema::Scalar(ScalarKind::F64)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(0.0),
            Value::Scalar(Scalar::F64(x)) => Ok(x),
            Value::Scalar(Scalar::F32(x)) => Ok(f64::from(x)),
            Value::Scalar(Scalar::Int(i)) => Ok(i as f64),
            Value::Scalar(Scalar::UInt(u)) => Ok(u as f64),
            other => Err(Error::message(format!("expected f64, found {:?}", other))),
        }
    }
}

impl ScalarReflect for f64 {
    fn kind() -> ScalarKind {
        ScalarKind::F64
    }
}

impl Reflect for Decimal {
    fn schema() -> Schema {
        Schema::Scalar(ScalarKind::Decimal)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Decimal::ZERO),
            Value::Scalar(Scalar::Decimal(d)) => Ok(d),
            Value::Scalar(Scalar::Int(i)) => Ok(Decimal::from(i)),
            Value::Scalar(Scalar::UInt(u)) => Ok(Decimal::from(u)),
            other => Err(Error::message(format!(
                "expected decimal, found {:?}",
                other
            ))),
        }
    }
}

impl ScalarReflect for Decimal {
    fn kind() -> ScalarKind {
        ScalarKind::Decimal
    }
}

impl Reflect for char {
    fn schema() -> Schema {
        Schema::Scalar(ScalarKind::Char)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok('\0'),
            Value::Scalar(Scalar::Char(c)) => Ok(c),
            Value::Scalar(Scalar::Str(s)) => Ok(s.chars().next().unwrap_or('\0')),
            other => Err(Error::message(format!("expected char, found {:?}", other))),
        }
    }
}

impl ScalarReflect for char {
    fn kind() -> ScalarKind {
        ScalarKind::Char
    }
}

impl Reflect for String {
    fn schema() -> Schema {
        Schema::Scalar(ScalarKind::Str)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::from(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Scalar(Scalar::Str(s)) => Ok(s),
            other => Err(Error::message(format!(
                "expected string, found {:?}",
                other
            ))),
        }
    }
}

impl ScalarReflect for String {
    fn kind() -> ScalarKind {
        ScalarKind::Str
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn schema() -> Schema {
        T::schema()
    }

    fn to_value(&self) -> Result<Value> {
        match self {
            Some(inner) => inner.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ScalarReflect> ScalarReflect for Option<T> {
    fn kind() -> ScalarKind {
        T::kind()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn schema() -> Schema {
        Schema::seq(T::schema())
    }

    fn to_value(&self) -> Result<Value> {
        let items = self.iter().map(Reflect::to_value).collect::<Result<_>>()?;
        Ok(Value::Seq(items))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(Error::message(format!(
                "expected sequence, found {:?}",
                other
            ))),
        }
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn schema() -> Schema {
        Schema::fixed_seq(T::schema(), N)
    }

    fn to_value(&self) -> Result<Value> {
        let items = self.iter().map(Reflect::to_value).collect::<Result<_>>()?;
        Ok(Value::Seq(items))
    }

    fn from_value(value: Value) -> Result<Self> {
        let items: Vec<T> = match value {
            Value::Null => (0..N)
                .map(|_| T::from_value(Value::Null))
                .collect::<Result<_>>()?,
            Value::Seq(items) => {
                if items.len() != N {
                    return Err(Error::message(format!(
                        "fixed sequence of {} cannot hold {} elements",
                        N,
                        items.len()
                    )));
                }
                items
                    .into_iter()
                    .map(T::from_value)
                    .collect::<Result<_>>()?
            }
            other => {
                return Err(Error::message(format!(
                    "expected sequence, found {:?}",
                    other
                )))
            }
        };
        items
            .try_into()
            .map_err(|_| Error::message("fixed sequence length changed during materialization"))
    }
}

impl<K, V> Reflect for IndexMap<K, V>
where
    K: ScalarReflect + Eq + Hash,
    V: ScalarReflect,
{
    fn schema() -> Schema {
        Schema::map(K::kind(), Schema::Scalar(V::kind()))
    }

    fn to_value(&self) -> Result<Value> {
        let mut entries = Vec::with_capacity(self.len());
        for (key, value) in self {
            let key = match key.to_value()? {
                Value::Scalar(s) => s,
                other => {
                    return Err(Error::message(format!(
                        "mapping key must be a scalar, found {:?}",
                        other
                    )))
                }
            };
            entries.push((key, value.to_value()?));
        }
        Ok(Value::Map(entries))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(IndexMap::new()),
            Value::Map(entries) => {
                let mut map = IndexMap::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(K::from_value(Value::Scalar(key))?, V::from_value(value)?);
                }
                Ok(map)
            }
            other => Err(Error::message(format!(
                "expected mapping, found {:?}",
                other
            ))),
        }
    }
}

/// A rectangular, row-major two-dimensional array.
///
/// This is the one shape the notation refuses to carry: both codec directions
/// fail with [`Error::Unsupported`] before producing any output. The type
/// exists so rank-2 data has a declared shape and the failure is typed and
/// immediate rather than a mangled document.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from rows, which must all have the same width.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(Error::message("grid rows must all have the same width"));
        }
        Ok(Grid {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }
}

impl<T: Reflect> Reflect for Grid<T> {
    fn schema() -> Schema {
        Schema::grid(T::schema(), 2)
    }

    fn to_value(&self) -> Result<Value> {
        Err(Error::unsupported(
            "rectangular sequences have no text form",
        ))
    }

    fn from_value(_: Value) -> Result<Self> {
        Err(Error::unsupported(
            "rectangular sequences have no text form",
        ))
    }
}
