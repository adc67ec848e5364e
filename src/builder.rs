//! The fluent URI builder.

use crate::{component::QueryParameter, error::BuildError, Uri};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::Write;

/// A fluent builder for [`Uri`]s.
///
/// A builder is either created empty with [`new`](Self::new) (or
/// [`Uri::builder`]) and filled in through its `with_*`/`add_*` methods,
/// or initialized from the components of an existing [`Uri`] with
/// [`from_uri`](Self::from_uri). [`build_string`](Self::build_string)
/// renders the accumulated fields into the canonical string form, and
/// [`build_uri`](Self::build_uri) additionally parses that string back
/// into a [`Uri`].
///
/// The host is the only field required at render time; everything else
/// is optional. Setters perform no validation and may be chained in any
/// order. Rendering does not consume or mutate the builder.
///
/// # Examples
///
/// ```
/// use uri_forge::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .with_scheme("foo")
///     .with_user("user")
///     .with_host("example.com")
///     .with_port(8042)
///     .add_path("over")
///     .add_path("there")
///     .add_query_parameter(("name", "ferret"))
///     .with_fragment("nose")
///     .build_string()?;
///
/// assert_eq!(uri, "foo://user@example.com:8042/over/there?name=ferret#nose");
/// # Ok::<_, uri_forge::error::BuildError>(())
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct UriBuilder {
    scheme: Option<String>,
    user: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    paths: Vec<String>,
    query_parameters: Vec<QueryParameter>,
    fragment: Option<String>,
    parameter_delimiter: String,
}

impl UriBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            scheme: None,
            user: None,
            password: None,
            host: None,
            port: None,
            paths: Vec::new(),
            query_parameters: Vec::new(),
            fragment: None,
            parameter_delimiter: String::from("&"),
        }
    }

    /// Initializes a builder from the components of an existing URI.
    ///
    /// Empty path segments are discarded; the query is split into
    /// parameters on `'&'` and each token on its first `'='` (a token
    /// with no `'='` yields an empty value); a nonempty userinfo is
    /// split into user and password on its first `':'`; the fragment is
    /// taken without its leading `'#'`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_forge::{Uri, UriBuilder};
    ///
    /// let uri = Uri::parse("http://abcd/path?param1=a&param2=b")?;
    /// let builder = UriBuilder::from_uri(&uri);
    /// assert_eq!(builder.scheme(), Some("http"));
    /// assert_eq!(builder.host(), Some("abcd"));
    /// assert_eq!(builder.paths(), ["path"]);
    /// # Ok::<_, uri_forge::error::ParseError>(())
    /// ```
    pub fn from_uri(uri: &Uri) -> Self {
        let auth = uri.authority();
        let mut builder = Self::new();
        builder.scheme = uri.scheme().map(|s| String::from(s.as_str()));
        builder.host = Some(String::from(auth.host()));
        builder.port = auth.port();
        if let Some(userinfo) = auth.userinfo().filter(|ui| !ui.is_empty()) {
            match userinfo.split_once(':') {
                Some((user, password)) => {
                    builder.user = Some(String::from(user));
                    builder.password = Some(String::from(password));
                }
                None => builder.user = Some(String::from(userinfo)),
            }
        }
        builder.paths = uri
            .path()
            .segments()
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();
        builder.query_parameters = uri.query().map(parse_parameters).unwrap_or_default();
        builder.fragment = uri.fragment().map(String::from);
        builder
    }

    /// Sets the scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the user of the userinfo.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password of the userinfo.
    ///
    /// A password without a user fails
    /// [`build_string`](Self::build_string).
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Appends one path segment.
    pub fn add_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Appends one query parameter.
    ///
    /// Takes anything that converts into a [`QueryParameter`], which
    /// covers both a prebuilt parameter and a `(key, value)` pair.
    pub fn add_query_parameter(mut self, parameter: impl Into<QueryParameter>) -> Self {
        self.query_parameters.push(parameter.into());
        self
    }

    /// Sets the string placed between successive query parameters.
    ///
    /// The default is `"&"`.
    pub fn with_parameter_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.parameter_delimiter = delimiter.into();
        self
    }

    /// Sets the fragment, without its leading `'#'`.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Returns the scheme, if set.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the user, if set.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the password, if set.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the host, if set.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if set.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path segments in insertion order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query_parameters(&self) -> &[QueryParameter] {
        &self.query_parameters
    }

    /// Returns the fragment, if set.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the query parameter delimiter.
    #[must_use]
    pub fn parameter_delimiter(&self) -> &str {
        &self.parameter_delimiter
    }

    /// Renders the canonical string form.
    ///
    /// Rendering is pure: it never mutates the builder, and repeated
    /// calls yield identical output.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no host is set, or if a password is set while
    /// the user is not.
    pub fn build_string(&self) -> Result<String, BuildError> {
        require(self.host.as_deref(), "host")?;
        if self.user.is_none() && self.password.is_some() {
            return Err(BuildError::PasswordWithoutUser);
        }
        Ok(self.to_string())
    }

    /// Renders the canonical string form and parses it back into a
    /// [`Uri`].
    ///
    /// # Errors
    ///
    /// Propagates any [`build_string`](Self::build_string) failure, and
    /// returns [`BuildError::Malformed`] if the rendered string does not
    /// parse back.
    pub fn build_uri(&self) -> Result<Uri, BuildError> {
        let s = self.build_string()?;
        Uri::parse(s).map_err(BuildError::Malformed)
    }

    // The render behind both `build_string` and `Display`. An unset
    // host comes out empty here; `build_string` rejects that upfront.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        if let Some(scheme) = &self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        out.push_str("//");
        self.push_userinfo(&mut out);
        if let Some(host) = &self.host {
            out.push_str(host);
        }
        if let Some(port) = self.port {
            write!(out, ":{port}").unwrap();
        }
        self.push_paths(&mut out);
        self.push_parameters(&mut out);
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    // userinfo = user [ ":" password ], followed by '@'
    fn push_userinfo(&self, out: &mut String) {
        if self.user.is_none() && self.password.is_none() {
            return;
        }
        if let Some(user) = &self.user {
            out.push_str(user);
        }
        if let Some(password) = &self.password {
            out.push(':');
            out.push_str(password);
        }
        out.push('@');
    }

    // The slash after the authority doubles as the path root; it is
    // emitted whenever anything follows the authority, even with zero
    // path segments.
    fn push_paths(&self, out: &mut String) {
        if !self.paths.is_empty() || !self.query_parameters.is_empty() || self.fragment.is_some() {
            out.push('/');
        }
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                out.push('/');
            }
            out.push_str(path);
        }
    }

    fn push_parameters(&self, out: &mut String) {
        if self.query_parameters.is_empty() {
            return;
        }
        out.push('?');
        for (i, parameter) in self.query_parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.parameter_delimiter);
            }
            out.push_str(parameter.key());
            out.push('=');
            out.push_str(parameter.value());
        }
    }
}

impl Default for UriBuilder {
    /// Equivalent to [`UriBuilder::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// query = param *( "&" param ), param = key [ "=" value ]
fn parse_parameters(query: &str) -> Vec<QueryParameter> {
    if query.is_empty() {
        return Vec::new();
    }
    query
        .split('&')
        .map(|token| match token.split_once('=') {
            Some((key, value)) => QueryParameter::new(key, value),
            None => QueryParameter::new(token, ""),
        })
        .collect()
}

/// Checks that a field required at render time is present.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, BuildError> {
    value.ok_or(BuildError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_value() {
        assert_eq!(require(Some(1), "port"), Ok(1));
        assert_eq!(
            require(None::<u16>, "port"),
            Err(BuildError::MissingField("port"))
        );
    }

    #[test]
    fn parses_parameters() {
        assert!(parse_parameters("").is_empty());
        assert_eq!(
            parse_parameters("a=1&b=2"),
            [QueryParameter::new("a", "1"), QueryParameter::new("b", "2")]
        );
        // Only the first '=' splits a token.
        assert_eq!(parse_parameters("k=a=b"), [QueryParameter::new("k", "a=b")]);
        assert_eq!(parse_parameters("flag"), [QueryParameter::new("flag", "")]);
    }
}
