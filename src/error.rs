//! Error types.

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected character that is not allowed by the URI syntax.
    ///
    /// The error index points to the character.
    UnexpectedChar,
    /// The input ended where more input was expected.
    ///
    /// The error index equals the input length.
    UnexpectedEnd,
    /// Port subcomponent that is not a decimal number fitting in `u16`.
    ///
    /// The error index points to the first offending character.
    InvalidPort,
}

/// An error occurred when parsing a URI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index where the error occurred in the input string.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// An error occurred when rendering a URI from a [`UriBuilder`].
///
/// [`UriBuilder`]: crate::UriBuilder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A field required at render time is not set.
    MissingField(&'static str),
    /// A password is set while the user is not.
    PasswordWithoutUser,
    /// The rendered string does not parse back into a [`Uri`].
    ///
    /// This can only happen when a field value breaks out of its place
    /// in the URI syntax, such as a host containing `'/'`.
    ///
    /// [`Uri`]: crate::Uri
    Malformed(ParseError),
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}
