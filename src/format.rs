//! Wire format selection for resource payloads.

/// The serialization format used on the wire.
///
/// Each format carries the URL extension appended to collection and member
/// paths and the content type sent on PUT/POST requests. Values are
/// process-wide constants.
///
/// # Example
///
/// ```rust
/// use active_resource::ResourceFormat;
///
/// assert_eq!(ResourceFormat::Xml.extension(), ".xml");
/// assert_eq!(ResourceFormat::Json.content_type(), "application/json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFormat {
    /// Rails XML: dasherized field elements, `nil="true"` markers.
    Xml,
    /// Rails JSON: underscored keys wrapped under a singular root key.
    Json,
}

impl ResourceFormat {
    /// Returns the URL extension for this format, including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xml => ".xml",
            Self::Json => ".json",
        }
    }

    /// Returns the MIME content type sent with request bodies.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Xml => "application/xml",
            Self::Json => "application/json",
        }
    }
}
