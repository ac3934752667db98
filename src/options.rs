//! Configuration for encoding and decoding.
//!
//! The notation indents with one fixed marker character repeated once per
//! nesting level. [`Options`] selects that marker; both directions of the
//! codec honor it, so a document must be decoded with the same options it was
//! encoded with.

/// The indentation marker character.
///
/// # Examples
///
/// ```rust
/// use dent::Indent;
///
/// assert_eq!(Indent::Tab.as_char(), '\t');
/// assert_eq!(Indent::Space.as_char(), ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Space,
}

impl Indent {
    /// Returns the marker character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Indent::Tab => '\t',
            Indent::Space => ' ',
        }
    }
}

/// Codec options.
///
/// # Examples
///
/// ```rust
/// use dent::{Indent, Options};
///
/// let options = Options::new().with_indent(Indent::Space);
/// assert_eq!(options.indent, Indent::Space);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub indent: Indent,
}

impl Options {
    /// Creates the default options (tab indentation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation marker.
    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
