#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! A fluent URI builder and parser for a practical subset of the URI
//! syntax:
//!
//! ```text
//! [scheme ":"] "//" [user [":" password] "@"] host [":" port]
//!     ["/" path] ["?" query] ["#" fragment]
//! ```
//!
//! Component contents are taken verbatim: percent-encoding, IP literal
//! addresses, normalization, and relative-reference resolution are out
//! of scope. Only the structure above is validated.
//!
//! # Building
//!
//! [`UriBuilder`] accumulates components and renders them on demand:
//!
//! ```
//! use uri_forge::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .with_scheme("https")
//!     .with_host("example.com")
//!     .add_path("search")
//!     .add_query_parameter(("q", "ferris"))
//!     .build_string()?;
//!
//! assert_eq!(uri, "https://example.com/search?q=ferris");
//! # Ok::<_, uri_forge::error::BuildError>(())
//! ```
//!
//! # Parsing
//!
//! [`Uri`] parses a string once and exposes its components, and a
//! parsed URI converts back into a builder for modification:
//!
//! ```
//! use uri_forge::{Uri, UriBuilder};
//!
//! let uri = Uri::parse("https://example.com/search?q=ferris")?;
//! assert_eq!(uri.authority().host(), "example.com");
//!
//! let uri = UriBuilder::from_uri(&uri)
//!     .with_fragment("results")
//!     .build_string()
//!     .unwrap();
//! assert_eq!(uri, "https://example.com/search?q=ferris#results");
//! # Ok::<_, uri_forge::error::ParseError>(())
//! ```
//!
//! # Feature flags
//!
//! - `std` (default): `Error` implementations for the error types.
//! - `serde`: `Serialize` and `Deserialize` implementations for [`Uri`].

extern crate alloc;

pub mod component;
pub mod error;

mod builder;
mod fmt;
mod internal;
mod parser;

pub use builder::UriBuilder;
pub use component::QueryParameter;

use crate::{
    component::{Authority, Path, Scheme},
    error::ParseError,
    internal::Meta,
};
use alloc::string::String;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A parsed URI in the supported subset syntax.
///
/// A `Uri` is created with [`parse`](Self::parse) or
/// [`UriBuilder::build_uri`]; its accessors borrow from the single
/// string it stores.
///
/// # Comparison
///
/// `Uri`s are compared lexicographically by their string values.
///
/// # Examples
///
/// ```
/// use uri_forge::Uri;
///
/// let uri = Uri::parse("foo://user@example.com:8042/over/there?name=ferret#nose")?;
///
/// assert_eq!(uri.scheme().unwrap().as_str(), "foo");
/// let auth = uri.authority();
/// assert_eq!(auth.userinfo(), Some("user"));
/// assert_eq!(auth.host(), "example.com");
/// assert_eq!(auth.port(), Some(8042));
/// assert_eq!(uri.path().as_str(), "/over/there");
/// assert_eq!(uri.query(), Some("name=ferret"));
/// assert_eq!(uri.fragment(), Some("nose"));
/// # Ok::<_, uri_forge::error::ParseError>(())
/// ```
#[derive(Clone)]
pub struct Uri {
    val: String,
    meta: Meta,
}

impl Uri {
    /// Parses a URI from a string.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the input does not match the supported
    /// syntax; [`ParseError::index`] points into the input.
    pub fn parse<S: Into<String>>(s: S) -> Result<Uri, ParseError> {
        let val = s.into();
        let meta = parser::parse(&val)?;
        Ok(Uri { val, meta })
    }

    /// Creates an empty [`UriBuilder`].
    #[inline]
    #[must_use]
    pub fn builder() -> UriBuilder {
        UriBuilder::new()
    }

    /// Returns the URI as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.val
    }

    /// Consumes this `Uri` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }

    /// Returns the scheme component.
    #[inline]
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        self.meta
            .scheme_end
            .map(|i| Scheme::new_validated(&self.val[..i.get()]))
    }

    /// Returns the authority component.
    #[must_use]
    pub fn authority(&self) -> Authority<'_> {
        let auth = self.meta.auth;
        let val = &self.val[auth.start..self.meta.path_bounds.0];
        let host_bounds = (
            auth.host_bounds.0 - auth.start,
            auth.host_bounds.1 - auth.start,
        );
        Authority::new(val, host_bounds, auth.port)
    }

    /// Returns the path component.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        let (start, end) = self.meta.path_bounds;
        Path::new_validated(&self.val[start..end])
    }

    /// Returns the query component, without its leading `'?'`.
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.meta
            .query_end
            .map(|i| &self.val[self.meta.path_bounds.1 + 1..i.get()])
    }

    /// Returns the fragment component, without its leading `'#'`.
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.meta.fragment_start.map(|i| &self.val[i..])
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    /// Equivalent to [`Uri::parse`].
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl PartialEq for Uri {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl Eq for Uri {}

impl PartialEq<str> for Uri {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.val == other
    }
}

impl PartialEq<&str> for Uri {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.val == *other
    }
}

impl PartialOrd for Uri {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.val.cmp(&other.val)
    }
}

impl core::hash::Hash for Uri {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

#[cfg(feature = "serde")]
impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(|e| de::Error::custom(format_args!("failed to parse URI: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_uri() {
        let u = Uri::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(u, u.clone());
        let v = Uri::parse("http://127.0.0.1:8081/").unwrap();
        assert_ne!(u, v);
        assert_eq!(u, "http://127.0.0.1:8080/");
    }

    #[test]
    fn hashes_uri() {
        use core::hash::{Hash, Hasher};
        use std::collections::hash_map::DefaultHasher;

        let str_a = "http://127.0.0.1:8080/";
        let str_b = "http://127.0.0.1:8081/";
        assert_eq!(
            calculate_hash(str_a),
            calculate_hash(&Uri::parse(str_a).unwrap())
        );
        assert_ne!(
            calculate_hash(str_a),
            calculate_hash(&Uri::parse(str_b).unwrap())
        );

        fn calculate_hash<T: Hash + ?Sized>(t: &T) -> u64 {
            let mut s = DefaultHasher::new();
            t.hash(&mut s);
            s.finish()
        }
    }
}
