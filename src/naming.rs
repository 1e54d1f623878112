//! Wire-name derivation for resource types.
//!
//! [`FieldMap`] is the bidirectional alias table between a type's local
//! field names and the names used on the wire. It is built once per
//! resource type and format at factory-construction time, then used
//! read-only for every (de)serialization; concurrent reads need no
//! coordination.
//!
//! # Conventions
//!
//! - XML root element: `singularize(dasherize(underscore(TYPE_NAME)))`
//! - JSON root key: `singularize(underscore(TYPE_NAME))`
//! - XML field names are dasherized (`created_at` → `created-at`)
//! - JSON field names stay underscored (a dash would read as a minus sign
//!   in script contexts consuming the JSON)
//! - Collection name: the type's explicit override, else
//!   `pluralize(underscore(TYPE_NAME))`

use std::collections::HashMap;

use crate::format::ResourceFormat;
use crate::inflector::{dasherize, pluralize, singularize, underscore};
use crate::resource::Resource;

/// Per-type, per-format table of local ⇄ wire field names.
///
/// # Example
///
/// ```rust
/// use active_resource::{Field, FieldMap, Resource, ResourceFormat};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Person {
///     id: Option<String>,
///     created_at: Option<String>,
/// }
///
/// impl Resource for Person {
///     const TYPE_NAME: &'static str = "Person";
///     const FIELDS: &'static [Field] = &[Field::new("id"), Field::new("created_at")];
///
///     fn id(&self) -> Option<String> {
///         self.id.clone()
///     }
/// }
///
/// let map = FieldMap::for_resource::<Person>(ResourceFormat::Xml);
/// assert_eq!(map.root(), "person");
/// assert_eq!(map.collection_name(), "people");
/// assert_eq!(map.wire_name("created_at"), "created-at");
/// ```
#[derive(Debug, Clone)]
pub struct FieldMap {
    format: ResourceFormat,
    root: String,
    collection: String,
    local_to_wire: HashMap<&'static str, String>,
    wire_to_local: HashMap<String, &'static str>,
}

impl FieldMap {
    /// Builds the alias table for resource type `T` in the given format.
    #[must_use]
    pub fn for_resource<T: Resource>(format: ResourceFormat) -> Self {
        let underscored = underscore(T::TYPE_NAME);
        let root = match format {
            ResourceFormat::Xml => singularize(&dasherize(&underscored)),
            ResourceFormat::Json => singularize(&underscored),
        };
        let collection =
            T::COLLECTION_NAME.map_or_else(|| pluralize(&underscored), ToString::to_string);

        let mut local_to_wire = HashMap::with_capacity(T::FIELDS.len());
        let mut wire_to_local = HashMap::with_capacity(T::FIELDS.len());
        for field in T::FIELDS {
            let wire = field
                .wire
                .map_or_else(|| derive_wire_name(field.name, format), ToString::to_string);
            local_to_wire.insert(field.name, wire.clone());
            wire_to_local.insert(wire, field.name);
        }

        Self {
            format,
            root,
            collection,
            local_to_wire,
            wire_to_local,
        }
    }

    /// The wire root name: XML root element or JSON wrapper key.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The collection name used in URL paths.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// The format this table was built for.
    #[must_use]
    pub const fn format(&self) -> ResourceFormat {
        self.format
    }

    /// Translates a local field name to its wire name.
    ///
    /// Undeclared fields fall back to the convention-derived name, so
    /// payload keys the type never registered still translate predictably.
    #[must_use]
    pub fn wire_name(&self, local: &str) -> String {
        self.local_to_wire
            .get(local)
            .cloned()
            .unwrap_or_else(|| derive_wire_name(local, self.format))
    }

    /// Translates a wire field name back to its local name.
    ///
    /// Undeclared wire names fall back to dash-to-underscore translation.
    #[must_use]
    pub fn local_name(&self, wire: &str) -> String {
        self.wire_to_local
            .get(wire)
            .map_or_else(|| wire.replace('-', "_"), ToString::to_string)
    }
}

/// Applies the format's naming convention to one local field name.
fn derive_wire_name(local: &str, format: ResourceFormat) -> String {
    let underscored = underscore(local);
    match format {
        ResourceFormat::Xml => dasherize(&underscored),
        ResourceFormat::Json => underscored,
    }
}
