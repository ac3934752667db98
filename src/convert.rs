//! Token conversion for the builtin scalar kinds.
//!
//! Decoding is directed by the declared kind: the same token text parses
//! differently under different schemas. The encoding direction is the
//! `Display` impl on [`Scalar`]; this module owns the parse direction.
//!
//! Two asymmetries are part of the format. The null tokens (`~`, `null`)
//! decode to null for every kind. Booleans parse leniently: anything other
//! than a case-insensitive `true`/`false` is absent rather than an error,
//! while malformed numeric tokens fail with a conversion error.

use crate::{Error, Result, Scalar, ScalarKind, Value};
use rust_decimal::Decimal;
use std::num::ParseIntError;
use std::str::FromStr;

/// The token every null encodes to.
pub(crate) const NULL_TOKEN: &str = "~";

pub(crate) fn is_null_token(token: &str) -> bool {
    token == NULL_TOKEN || token == "null"
}

fn parse_signed<T>(token: &str, kind: ScalarKind, line: usize) -> Result<Scalar>
where
    T: FromStr<Err = ParseIntError> + Into<i64>,
{
    token
        .parse::<T>()
        .map(|v| Scalar::Int(v.into()))
        .map_err(|e| Error::conversion(line, token, kind, e))
}

fn parse_unsigned<T>(token: &str, kind: ScalarKind, line: usize) -> Result<Scalar>
where
    T: FromStr<Err = ParseIntError> + Into<u64>,
{
    token
        .parse::<T>()
        .map(|v| Scalar::UInt(v.into()))
        .map_err(|e| Error::conversion(line, token, kind, e))
}

/// Parses one token against its declared kind.
///
/// Returns [`Value::Null`] for the null tokens and for unparsable booleans;
/// any other malformed token is a conversion error naming the token, the
/// kind, and the line.
pub(crate) fn parse_token(token: &str, kind: ScalarKind, line: usize) -> Result<Value> {
    if is_null_token(token) {
        return Ok(Value::Null);
    }

    let scalar = match kind {
        ScalarKind::Str => Scalar::Str(token.to_string()),
        ScalarKind::Bool => {
            if token.eq_ignore_ascii_case("true") {
                Scalar::Bool(true)
            } else if token.eq_ignore_ascii_case("false") {
                Scalar::Bool(false)
            } else {
                return Ok(Value::Null);
            }
        }
        ScalarKind::I8 => parse_signed::<i8>(token, kind, line)?,
        ScalarKind::I16 => parse_signed::<i16>(token, kind, line)?,
        ScalarKind::I32 => parse_signed::<i32>(token, kind, line)?,
        ScalarKind::I64 => parse_signed::<i64>(token, kind, line)?,
        ScalarKind::U8 => parse_unsigned::<u8>(token, kind, line)?,
        ScalarKind::U16 => parse_unsigned::<u16>(token, kind, line)?,
        ScalarKind::U32 => parse_unsigned::<u32>(token, kind, line)?,
        ScalarKind::U64 => parse_unsigned::<u64>(token, kind, line)?,
        ScalarKind::F32 => token
            .parse::<f32>()
            .map(Scalar::F32)
            .map_err(|e| Error::conversion(line, token, kind, e))?,
        ScalarKind::F64 => token
            .parse::<f64>()
            .map(Scalar::F64)
            .map_err(|e| Error::conversion(line, token, kind, e))?,
        ScalarKind::Decimal => token
            .parse::<Decimal>()
            .map(Scalar::Decimal)
            .map_err(|e| Error::conversion(line, token, kind, e))?,
        ScalarKind::Char => Scalar::Char(token.chars().next().unwrap_or('\0')),
    };
    Ok(Value::Scalar(scalar))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(token: &str, kind: ScalarKind) -> Result<Value> {
        parse_token(token, kind, 1)
    }

    #[test]
    fn null_tokens_are_null_for_every_kind() {
        for kind in [
            ScalarKind::Str,
            ScalarKind::Bool,
            ScalarKind::I32,
            ScalarKind::U64,
            ScalarKind::F64,
            ScalarKind::Decimal,
            ScalarKind::Char,
        ] {
            assert_eq!(parse("~", kind).unwrap(), Value::Null);
            assert_eq!(parse("null", kind).unwrap(), Value::Null);
        }
    }

    #[test]
    fn integers_parse_within_their_width() {
        assert_eq!(
            parse("127", ScalarKind::I8).unwrap(),
            Value::Scalar(Scalar::Int(127))
        );
        assert_eq!(
            parse("255", ScalarKind::U8).unwrap(),
            Value::Scalar(Scalar::UInt(255))
        );
        assert_eq!(
            parse("-9223372036854775808", ScalarKind::I64).unwrap(),
            Value::Scalar(Scalar::Int(i64::MIN))
        );
    }

    #[test]
    fn integers_fail_outside_their_width() {
        assert!(parse("128", ScalarKind::I8).is_err());
        assert!(parse("-1", ScalarKind::U32).is_err());
        assert!(parse("1x", ScalarKind::I32).is_err());
    }

    #[test]
    fn booleans_are_lenient() {
        assert_eq!(
            parse("TRUE", ScalarKind::Bool).unwrap(),
            Value::Scalar(Scalar::Bool(true))
        );
        assert_eq!(
            parse("False", ScalarKind::Bool).unwrap(),
            Value::Scalar(Scalar::Bool(false))
        );
        assert_eq!(parse("yes", ScalarKind::Bool).unwrap(), Value::Null);
    }

    #[test]
    fn floats_and_decimals() {
        assert_eq!(
            parse("1.5", ScalarKind::F32).unwrap(),
            Value::Scalar(Scalar::F32(1.5))
        );
        assert_eq!(
            parse("1.5", ScalarKind::F64).unwrap(),
            Value::Scalar(Scalar::F64(1.5))
        );
        assert_eq!(
            parse("79228162514264337593543.95033", ScalarKind::Decimal).unwrap(),
            Value::Scalar(Scalar::Decimal(
                "79228162514264337593543.95033".parse().unwrap()
            ))
        );
        assert!(parse("1.5.5", ScalarKind::F64).is_err());
    }

    #[test]
    fn chars_take_the_first_character() {
        assert_eq!(
            parse("A", ScalarKind::Char).unwrap(),
            Value::Scalar(Scalar::Char('A'))
        );
        assert_eq!(
            parse("AB", ScalarKind::Char).unwrap(),
            Value::Scalar(Scalar::Char('A'))
        );
        assert_eq!(
            parse("", ScalarKind::Char).unwrap(),
            Value::Scalar(Scalar::Char('\0'))
        );
    }

    #[test]
    fn strings_take_the_raw_token() {
        assert_eq!(
            parse("hello world", ScalarKind::Str).unwrap(),
            Value::Scalar(Scalar::Str("hello world".into()))
        );
        assert_eq!(
            parse("123", ScalarKind::Str).unwrap(),
            Value::Scalar(Scalar::Str("123".into()))
        );
    }

    #[test]
    fn conversion_error_carries_context() {
        let err = parse("abc", ScalarKind::U16).unwrap_err();
        match err {
            Error::Conversion { token, kind, .. } => {
                assert_eq!(token, "abc");
                assert_eq!(kind, ScalarKind::U16);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
