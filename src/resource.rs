//! The [`Resource`] trait implemented by types persisted through a factory.
//!
//! A resource is a passive record: it owns no network state and carries no
//! reference to the factory that loaded it. Persistence is always invoked
//! explicitly through a `ResourceFactory`, which reads the type's declared
//! metadata (name, fields, optional collection override) to derive wire
//! names and URLs.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives; the identifier is an
//!    `Option<String>` (absent until the server assigns one).
//! 2. Implement `Resource` with the type name and the declared field list.
//! 3. Use [`Field::aliased`] for fields whose wire name does not follow the
//!    underscore/dasherize convention.
//!
//! # Example
//!
//! ```rust
//! use active_resource::{Field, Resource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Person {
//!     id: Option<String>,
//!     name: Option<String>,
//! }
//!
//! impl Resource for Person {
//!     const TYPE_NAME: &'static str = "Person";
//!     const FIELDS: &'static [Field] = &[Field::new("id"), Field::new("name")];
//!
//!     fn id(&self) -> Option<String> {
//!         self.id.clone()
//!     }
//! }
//!
//! assert!(Person::default().is_new());
//! ```

use serde::{de::DeserializeOwned, Serialize};

/// One declared field of a resource type.
///
/// The local name is the struct field's identifier (underscored). The wire
/// name is normally derived by convention (dasherized for XML, underscored
/// for JSON); an explicit alias overrides it in both formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// The local (struct) field name.
    pub name: &'static str,
    /// Explicit wire-name override, or `None` to derive by convention.
    pub wire: Option<&'static str>,
}

impl Field {
    /// A field whose wire name follows the naming convention.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, wire: None }
    }

    /// A field with an explicit wire-name override.
    #[must_use]
    pub const fn aliased(name: &'static str, wire: &'static str) -> Self {
        Self { name, wire: Some(wire) }
    }
}

/// A record persisted through a `ResourceFactory`.
///
/// Implementors declare their type name and field list statically; the
/// factory derives collection names, root elements, and per-field wire
/// names from this metadata once at construction time. No runtime
/// reflection is involved.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + Sized {
    /// The CamelCase simple type name (e.g. `"Person"`).
    ///
    /// Collection and root-element names are derived from this via the
    /// inflector unless [`COLLECTION_NAME`](Self::COLLECTION_NAME)
    /// overrides the former.
    const TYPE_NAME: &'static str;

    /// Explicit collection-name override.
    ///
    /// When `None`, the collection name is
    /// `pluralize(underscore(TYPE_NAME))`.
    const COLLECTION_NAME: Option<&'static str> = None;

    /// The declared fields of this type, in wire order.
    const FIELDS: &'static [Field];

    /// Returns the resource's identifier, if the server has assigned one.
    fn id(&self) -> Option<String>;

    /// A resource is new until it has an identifier.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
