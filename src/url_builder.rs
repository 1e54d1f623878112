//! URL construction for resource endpoints.
//!
//! [`UrlBuilder`] composes an optional base, ordered path segments, and
//! ordered query parameters into a correctly percent-encoded URL. It is the
//! single place in the crate where dynamic text meets a URL, so encoding
//! rules live here and nowhere else.
//!
//! # Encoding
//!
//! Path segments and query keys/values are form-encoded independently
//! (UTF-8, space as `+`), so `"big people"` renders as `"big+people"` and
//! `"=hi"` as `"%3Dhi"`. Rendering has no side effects and is idempotent.
//!
//! # Example
//!
//! ```rust
//! use active_resource::UrlBuilder;
//!
//! let url = UrlBuilder::new()
//!     .add("people")
//!     .add("1")
//!     .add("promote.xml")
//!     .add_query("position", "manager");
//! assert_eq!(url.render(), "/people/1/promote.xml?position=manager");
//! ```

use url::Url;

use crate::error::ResourceError;

/// A single query parameter value.
///
/// A value may be absent (renders as `key=` with nothing after the `=`), a
/// scalar, or a sequence (each element becomes a repeated `key=value` pair
/// in order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// No value; renders as `key=`.
    Absent,
    /// A single scalar value.
    One(String),
    /// A sequence of values, rendered as repeated pairs under the same key.
    Many(Vec<String>),
}

macro_rules! scalar_query_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::One(value.to_string())
                }
            }
        )*
    };
}

scalar_query_value!(&str, String, &String, bool, i32, i64, u16, u32, u64, usize);

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for QueryValue {
    fn from(values: &[T]) -> Self {
        Self::Many(values.iter().map(ToString::to_string).collect())
    }
}

/// Builds URLs from a base, path segments, and query parameters.
///
/// Create one per logical request, chain `add`/`add_query` calls, then
/// consume it with [`render`](Self::render) or [`to_uri`](Self::to_uri).
///
/// # Example
///
/// ```rust
/// use active_resource::UrlBuilder;
///
/// assert_eq!(UrlBuilder::new().render(), "");
/// assert_eq!(UrlBuilder::with_path("people.xml").render(), "/people.xml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    base: Option<String>,
    path: Vec<String>,
    query: Vec<(String, QueryValue)>,
    fragment: Option<String>,
}

impl UrlBuilder {
    /// Creates an empty builder with no base, path, or query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with an initial path segment.
    ///
    /// `UrlBuilder::with_path("people.xml")` is equivalent to
    /// `UrlBuilder::new().add("people.xml")`.
    #[must_use]
    pub fn with_path(segment: impl AsRef<str>) -> Self {
        Self::new().add(segment)
    }

    /// Creates a builder rooted at a base URL.
    #[must_use]
    pub fn from_base(base: &Url) -> Self {
        Self::new().set_base(base)
    }

    /// Replaces the base with the scheme, authority, and path of `base`,
    /// discarding any query string or fragment it carries.
    #[must_use]
    pub fn set_base(mut self, base: &Url) -> Self {
        let mut stripped = base.clone();
        stripped.set_query(None);
        stripped.set_fragment(None);
        self.base = Some(stripped.to_string());
        self
    }

    /// Appends path segments.
    ///
    /// Input containing `/` is split into multiple segments before encoding,
    /// so `add("people/managers.xml")` behaves like
    /// `add("people").add("managers.xml")`. A literal slash therefore cannot
    /// survive inside a single segment; everything else in each piece is
    /// percent-encoded independently on render.
    #[must_use]
    pub fn add(mut self, segment: impl AsRef<str>) -> Self {
        for piece in segment.as_ref().split('/') {
            if !piece.is_empty() {
                self.path.push(piece.to_string());
            }
        }
        self
    }

    /// Appends one query parameter.
    ///
    /// The value may be a scalar, a sequence (repeated pairs, order
    /// preserved), or [`QueryValue::Absent`]. Duplicate keys are allowed and
    /// keep insertion order.
    #[must_use]
    pub fn add_query(mut self, key: impl ToString, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Appends one query parameter per entry of `pairs`, in iteration order.
    ///
    /// Callers needing a deterministic query string must supply an
    /// order-preserving collection (a `Vec` of pairs, a `BTreeMap`, ...).
    #[must_use]
    pub fn add_query_pairs<K, V, I>(mut self, pairs: I) -> Self
    where
        K: ToString,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.query.push((key.to_string(), value.into()));
        }
        self
    }

    /// Copies the query pairs of `other` onto this builder.
    ///
    /// Only query pairs are copied; `other`'s base and path are ignored.
    #[must_use]
    pub fn add_query_from(mut self, other: &Self) -> Self {
        self.query.extend(other.query.iter().cloned());
        self
    }

    /// Sets the URI fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidFragment`] when `text` contains `/`
    /// or `?`.
    pub fn set_fragment(mut self, text: impl Into<String>) -> Result<Self, ResourceError> {
        let text = text.into();
        if text.contains('/') || text.contains('?') {
            return Err(ResourceError::InvalidFragment { fragment: text });
        }
        self.fragment = Some(text);
        Ok(self)
    }

    /// Removes a previously set fragment.
    #[must_use]
    pub fn clear_fragment(mut self) -> Self {
        self.fragment = None;
        self
    }

    /// Renders the builder to a percent-encoded URL string.
    ///
    /// The output is `base + "/" + segments + "?" + query + "#" + fragment`,
    /// with each part omitted when empty. When no base is set but segments
    /// exist, the path starts with `/`. An entirely empty builder renders to
    /// the empty string. Rendering is idempotent.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(base) = &self.base {
            out.push_str(base);
        }
        if !self.path.is_empty() {
            if !out.ends_with('/') {
                out.push('/');
            }
            let segments: Vec<String> = self.path.iter().map(|s| form_encode(s)).collect();
            out.push_str(&segments.join("/"));
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| render_pair(key, value))
            .filter(|pair| !pair.is_empty())
            .collect();
        if !pairs.is_empty() {
            out.push('?');
            out.push_str(&pairs.join("&"));
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    /// Parses the rendered string into a structured [`Url`].
    ///
    /// Requires an absolute render (a base must be set); a relative path
    /// cannot be represented as a `Url`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedUrl`] when the render is not a
    /// valid absolute URI.
    pub fn to_uri(&self) -> Result<Url, ResourceError> {
        let rendered = self.render();
        Url::parse(&rendered).map_err(|source| ResourceError::MalformedUrl {
            url: rendered,
            source,
        })
    }
}

/// Renders one `key=value` pair (or repeated pairs for sequences).
fn render_pair(key: &str, value: &QueryValue) -> String {
    let key = form_encode(key);
    match value {
        QueryValue::Absent => format!("{key}="),
        QueryValue::One(v) => format!("{key}={}", form_encode(v)),
        QueryValue::Many(vs) => vs
            .iter()
            .map(|v| format!("{key}={}", form_encode(v)))
            .collect::<Vec<_>>()
            .join("&"),
    }
}

/// Form-style percent-encoding: UTF-8, with space encoded as `+`.
fn form_encode(text: &str) -> String {
    urlencoding::encode(text).replace("%20", "+")
}
