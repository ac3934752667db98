//! Structural classification of values and schemas.
//!
//! Every value and every declared type falls into exactly one shape, and both
//! codec directions dispatch on it with exhaustive matches — there are no
//! is-a probe chains, so adding a shape fails to compile until every consumer
//! handles it.

use crate::{Schema, Value};

/// The closed set of structural shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Null,
    Scalar,
    /// Homogeneous sequence with a declared length.
    FixedSeq,
    /// Rectangular sequence: classified, never coded. Reaching it in either
    /// codec direction is the unsupported-feature error.
    Grid,
    /// Homogeneous sequence of any length.
    VarSeq,
    /// Ordered scalar-keyed mapping.
    Map,
    /// Composite with named fields.
    Record,
}

impl Shape {
    /// Classifies a value by its own structure. Fixedness is a property of
    /// declared types, not of values, so every sequence value is [`VarSeq`].
    ///
    /// [`VarSeq`]: Shape::VarSeq
    #[must_use]
    pub fn of_value(value: &Value) -> Shape {
        match value {
            Value::Null => Shape::Null,
            Value::Scalar(_) => Shape::Scalar,
            Value::Seq(_) => Shape::VarSeq,
            Value::Map(_) => Shape::Map,
            Value::Record(_) => Shape::Record,
        }
    }

    /// Classifies a declared type.
    #[must_use]
    pub fn of_schema(schema: &Schema) -> Shape {
        match schema {
            Schema::Scalar(_) => Shape::Scalar,
            Schema::FixedSeq { .. } => Shape::FixedSeq,
            Schema::Seq(_) => Shape::VarSeq,
            Schema::Grid { .. } => Shape::Grid,
            Schema::Map { .. } => Shape::Map,
            Schema::Record(_) => Shape::Record,
        }
    }

    /// Short name for error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Scalar => "scalar",
            Shape::FixedSeq => "fixed-length sequence",
            Shape::Grid => "rectangular sequence",
            Shape::VarSeq => "sequence",
            Shape::Map => "mapping",
            Shape::Record => "record",
        }
    }
}
