//! Format reference.
//!
//! This module documents the notation as this crate reads and writes it. It
//! contains no code.
//!
//! # Overview
//!
//! The notation is a deliberately tiny, line-oriented subset of block-style
//! YAML. A document is a flat run of lines; all structure lives in the
//! indentation, which is one fixed marker character (tab by default, see
//! [`Options`](crate::Options)) repeated once per nesting level. Nothing in
//! the text names a type: decoding always needs a caller-supplied
//! [`Schema`](crate::Schema).
//!
//! # Grammar
//!
//! ```text
//! document     := line*
//! line         := INDENT* (field-line | element-line)
//! field-line   := name ":" (" " scalar)? LINE-BREAK
//! element-line := "-" " " scalar LINE-BREAK      (only inside a sequence context)
//! scalar       := "~" | literal-text
//! ```
//!
//! # Documents by example
//!
//! A record with scalar fields, a nested record, a sequence, and a mapping:
//!
//! ```text
//! id: 1
//! name: a
//! pos:
//!     x: 4
//!     y: 5
//! tags:
//!     - x
//!     - y
//! scores:
//!     1: One
//!     2: Two
//! ```
//!
//! (Shown with spaces for readability; the default marker is a tab, one per
//! level.)
//!
//! A field holding a nested value ends its own line after the separator; the
//! nested lines follow, one level deeper. Sequence elements whose values are
//! themselves records, mappings, or sequences put the `- ` marker on a line
//! of its own and nest their content one further level:
//!
//! ```text
//! points:
//!     -
//!         x: 1
//!         y: 2
//!     -
//!         x: 3
//!         y: 4
//! ```
//!
//! # Tokens
//!
//! Scalar tokens are written raw, with no quoting or escaping:
//!
//! | Kind | Encoding | Decoding |
//! |------|----------|----------|
//! | null | `~` | `~` or `null`, for any declared kind |
//! | bool | `true` / `false` | case-insensitive `true`/`false`; anything else is absent, not an error |
//! | integers (8–64 bit) | decimal digits | parsed at the declared width; overflow is a conversion error |
//! | f32 / f64 | shortest `Display` form | `FromStr`, including `inf` and `NaN` |
//! | decimal | `Display` form | `FromStr`; malformed input is a conversion error |
//! | char | the character itself | first character of the token; `'\0'` if empty |
//! | string | the raw text | the raw token |
//!
//! Because strings are raw, a string containing a line break, a leading
//! indent marker, or a token that looks like `~` will not survive a round
//! trip. That is by construction: quoting and escaping are outside this
//! notation.
//!
//! # Out of format
//!
//! The following are rejected, not merely unimplemented:
//!
//! - rectangular (rank ≥ 2) sequences — [`Error::Unsupported`](crate::Error)
//!   on either codec direction;
//! - mapping entries with non-scalar values;
//! - comments, multi-line scalars, character escaping, document headers, and
//!   type tags.
