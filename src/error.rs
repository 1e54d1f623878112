//! Error types for ActiveResource operations.
//!
//! The taxonomy is deliberately fine-grained: callers are expected to match
//! on the specific kind they care about (for example distinguishing
//! [`ResourceError::ResourceNotFound`] from [`ResourceError::ResourceConflict`])
//! rather than catching a single generic error.
//!
//! # Status mapping
//!
//! HTTP status codes map to variants as follows:
//!
//! - **400**: [`ResourceError::BadRequest`]
//! - **401**: [`ResourceError::UnauthorizedAccess`]
//! - **403**: [`ResourceError::ForbiddenAccess`]
//! - **404**: [`ResourceError::ResourceNotFound`]
//! - **405**: [`ResourceError::MethodNotAllowed`]
//! - **409**: [`ResourceError::ResourceConflict`]
//! - **422**: [`ResourceError::ResourceInvalid`]
//! - **other 4xx**: [`ResourceError::ClientError`]
//! - **5xx**: [`ResourceError::ServerError`]
//!
//! No layer of this crate retries a failed request; every failure is either
//! surfaced to the caller or collapsed into a documented boolean (see
//! `ResourceFactory::exists`, `create`, `update` and `save`).

use thiserror::Error;

/// Errors produced by URL building, serialization, and HTTP operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server rejected the request as malformed (HTTP 400).
    #[error("bad request (HTTP 400)")]
    BadRequest,

    /// Authentication is required or the supplied credentials were rejected
    /// (HTTP 401).
    #[error("unauthorized access (HTTP 401)")]
    UnauthorizedAccess,

    /// The authenticated principal may not perform this operation (HTTP 403).
    #[error("forbidden access (HTTP 403)")]
    ForbiddenAccess,

    /// No resource exists at the requested URL (HTTP 404).
    #[error("resource not found (HTTP 404)")]
    ResourceNotFound,

    /// The HTTP verb is not supported at this URL (HTTP 405).
    #[error("method not allowed (HTTP 405)")]
    MethodNotAllowed,

    /// The request conflicts with the current server-side state (HTTP 409).
    #[error("resource conflict (HTTP 409)")]
    ResourceConflict,

    /// The server understood the resource but rejected its contents
    /// (HTTP 422, Rails validation failure).
    #[error("resource invalid (HTTP 422)")]
    ResourceInvalid,

    /// Any other 4xx status.
    #[error("client error (HTTP {status})")]
    ClientError {
        /// The HTTP status code that was returned.
        status: u16,
    },

    /// Any 5xx status.
    #[error("server error (HTTP {status})")]
    ServerError {
        /// The HTTP status code that was returned.
        status: u16,
    },

    /// A fragment passed to `UrlBuilder::set_fragment` contained `/` or `?`.
    #[error("invalid fragment '{fragment}': fragments may not contain '/' or '?'")]
    InvalidFragment {
        /// The rejected fragment text.
        fragment: String,
    },

    /// A rendered URL could not be parsed into a URI.
    #[error("malformed URL '{url}'")]
    MalformedUrl {
        /// The string that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// No registered converter can handle the given wire type hint.
    ///
    /// This is a configuration error, not a runtime data error; callers
    /// should not catch it.
    #[error("no converter registered for type '{type_hint}'")]
    NoConverter {
        /// The `type="..."` hint that had no matching converter.
        type_hint: String,
    },

    /// A scalar value could not be coerced to its declared wire type.
    #[error("cannot decode '{value}' as {type_hint}")]
    InvalidValue {
        /// The raw text that failed to decode.
        value: String,
        /// The declared wire type.
        type_hint: String,
    },

    /// An id-scoped operation was attempted on a resource with no id.
    ///
    /// Callers must guard against missing identifiers before calling
    /// `update`, `reload`, or `delete`.
    #[error("resource has no id; cannot {operation}")]
    MissingId {
        /// The operation that required an id.
        operation: &'static str,
    },

    /// An opaque transport-level failure from the underlying HTTP client.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    /// The response body was not well-formed XML.
    #[error("malformed XML payload")]
    Xml(#[from] quick_xml::Error),

    /// The decoded value tree did not match the resource's shape.
    #[error("failed to decode resource payload")]
    Decode(#[from] serde_json::Error),
}

impl ResourceError {
    /// Maps an HTTP status code to an error, or `None` for success statuses.
    ///
    /// # Example
    ///
    /// ```rust
    /// use active_resource::ResourceError;
    ///
    /// assert!(ResourceError::from_status(200).is_none());
    /// assert!(matches!(
    ///     ResourceError::from_status(404),
    ///     Some(ResourceError::ResourceNotFound)
    /// ));
    /// ```
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::BadRequest),
            401 => Some(Self::UnauthorizedAccess),
            403 => Some(Self::ForbiddenAccess),
            404 => Some(Self::ResourceNotFound),
            405 => Some(Self::MethodNotAllowed),
            409 => Some(Self::ResourceConflict),
            422 => Some(Self::ResourceInvalid),
            402..=499 => Some(Self::ClientError { status }),
            500..=599 => Some(Self::ServerError { status }),
            _ => None,
        }
    }
}
