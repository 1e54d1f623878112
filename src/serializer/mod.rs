//! Resource (de)serialization.
//!
//! [`ResourceSerializer`] is the facade the factory uses to move typed
//! resources across the wire. Both formats go through a
//! [`serde_json::Value`] interchange tree: the XML and JSON codecs
//! translate wire documents to trees keyed by local field names, and serde
//! maps trees onto resource structs. Scalar decoding (type hints, the nil
//! marker) is delegated to the [`ConverterRegistry`].
//!
//! # Example
//!
//! ```rust
//! use active_resource::{Field, Resource, ResourceFormat, ResourceSerializer};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Person {
//!     id: Option<i64>,
//!     name: Option<String>,
//! }
//!
//! impl Resource for Person {
//!     const TYPE_NAME: &'static str = "Person";
//!     const FIELDS: &'static [Field] = &[Field::new("id"), Field::new("name")];
//!
//!     fn id(&self) -> Option<String> {
//!         self.id.map(|id| id.to_string())
//!     }
//! }
//!
//! let serializer = ResourceSerializer::new::<Person>(ResourceFormat::Xml);
//! let person: Person = serializer
//!     .decode_one("<person><id type=\"integer\">1</id><name>Ace</name></person>")
//!     .unwrap();
//! assert_eq!(person.id, Some(1));
//! ```

mod converters;
mod json;
mod xml;

use std::sync::Arc;

use serde_json::Value;

pub use converters::{Converter, ConverterRegistry};

use crate::error::ResourceError;
use crate::format::ResourceFormat;
use crate::naming::FieldMap;
use crate::resource::Resource;

/// Encodes and decodes one resource type in one wire format.
///
/// Built once per factory; the field map and converter registry are then
/// used read-only (plus the registry's internal lookup cache), so a
/// serializer can be shared across concurrent operations.
#[derive(Debug)]
pub struct ResourceSerializer {
    format: ResourceFormat,
    map: FieldMap,
    registry: Arc<ConverterRegistry>,
}

impl ResourceSerializer {
    /// Creates a serializer for resource type `T` with the built-in
    /// converters.
    #[must_use]
    pub fn new<T: Resource>(format: ResourceFormat) -> Self {
        Self::with_registry::<T>(format, Arc::new(ConverterRegistry::new()))
    }

    /// Creates a serializer sharing an existing converter registry.
    #[must_use]
    pub fn with_registry<T: Resource>(
        format: ResourceFormat,
        registry: Arc<ConverterRegistry>,
    ) -> Self {
        Self {
            format,
            map: FieldMap::for_resource::<T>(format),
            registry,
        }
    }

    /// The wire format this serializer produces and consumes.
    #[must_use]
    pub const fn format(&self) -> ResourceFormat {
        self.format
    }

    /// The field-name table built for the resource type.
    #[must_use]
    pub const fn field_map(&self) -> &FieldMap {
        &self.map
    }

    /// Registers an additional scalar converter, ahead of the built-ins.
    pub fn register_converter(&self, converter: Arc<dyn Converter>) {
        self.registry.register(converter);
    }

    /// Encodes a resource as a wire document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the resource fails to
    /// serialize, or [`ResourceError::Xml`] if XML writing fails.
    pub fn encode<T: Resource>(&self, resource: &T) -> Result<String, ResourceError> {
        let value = serde_json::to_value(resource)?;
        match self.format {
            ResourceFormat::Xml => xml::encode_document(self.map.root(), &value, &self.map),
            ResourceFormat::Json => json::encode_document(self.map.root(), &value, &self.map),
        }
    }

    /// Decodes a single-resource document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Xml`]/[`ResourceError::Decode`] for
    /// malformed payloads, [`ResourceError::NoConverter`] for unhandled
    /// type hints, and [`ResourceError::InvalidValue`] for uncoercible
    /// scalars.
    pub fn decode_one<T: Resource>(&self, payload: &str) -> Result<T, ResourceError> {
        let value = self.decode_value(payload)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Decodes a collection document into an ordered list.
    ///
    /// Server response order is preserved.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`decode_one`](Self::decode_one).
    pub fn decode_many<T: Resource>(&self, payload: &str) -> Result<Vec<T>, ResourceError> {
        let value = match self.format {
            ResourceFormat::Xml => {
                let (_, value) = xml::decode_document(payload, &self.map, &self.registry)?;
                value
            }
            ResourceFormat::Json => json::decode_many(payload, &self.map)?,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Decodes a single-resource document into an existing resource.
    ///
    /// Merge semantics: fields present in the response overwrite the
    /// target's fields (including explicit nils); fields the response
    /// omits keep their current values. The target is left untouched when
    /// decoding fails.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`decode_one`](Self::decode_one).
    pub fn decode_into<T: Resource>(
        &self,
        payload: &str,
        target: &mut T,
    ) -> Result<(), ResourceError> {
        let overlay = self.decode_value(payload)?;
        let mut current = serde_json::to_value(&*target)?;
        merge(&mut current, overlay);
        *target = serde_json::from_value(current)?;
        Ok(())
    }

    fn decode_value(&self, payload: &str) -> Result<Value, ResourceError> {
        match self.format {
            ResourceFormat::Xml => {
                let (_, value) = xml::decode_document(payload, &self.map, &self.registry)?;
                Ok(value)
            }
            ResourceFormat::Json => json::decode_one(payload, &self.map),
        }
    }
}

/// Field-level overlay merge: response fields win, absent fields persist.
fn merge(current: &mut Value, overlay: Value) {
    match (current, overlay) {
        (Value::Object(current_fields), Value::Object(overlay_fields)) => {
            for (key, value) in overlay_fields {
                current_fields.insert(key, value);
            }
        }
        (current, overlay) => *current = overlay,
    }
}
