//! Resource factory: the CRUD orchestration layer.
//!
//! A [`ResourceFactory`] ties one resource type to one connection and one
//! wire format. It derives URLs from the type's collection name, issues
//! the HTTP call through the [`ResourceConnection`], and moves payloads
//! through the [`ResourceSerializer`].
//!
//! Error folding at this boundary follows a fixed policy:
//!
//! - [`exists`](ResourceFactory::exists) folds every failure (not-found,
//!   protocol, transport) into `false`
//! - [`create`](ResourceFactory::create), [`update`](ResourceFactory::update)
//!   and [`save`](ResourceFactory::save) fold only a 422 validation
//!   rejection into `false`; everything else propagates
//! - all other operations propagate their errors
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use active_resource::{
//!     Field, Resource, ResourceConnection, ResourceFactory, ResourceFormat,
//! };
//! use serde::{Deserialize, Serialize};
//! use url::Url;
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
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
//! # async fn run() -> Result<(), active_resource::ResourceError> {
//! let site = Url::parse("http://localhost:3000").unwrap();
//! let connection = Arc::new(ResourceConnection::new(site)?);
//! let factory = ResourceFactory::<Person>::new(connection, ResourceFormat::Xml);
//!
//! let person = factory.find("5").await?; // GET /people/5.xml
//! let everyone = factory.find_all().await?;
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::connection::ResourceConnection;
use crate::error::ResourceError;
use crate::format::ResourceFormat;
use crate::resource::Resource;
use crate::serializer::{Converter, ResourceSerializer};
use crate::url_builder::{QueryValue, UrlBuilder};

/// CRUD operations for one resource type against one site.
#[derive(Debug)]
pub struct ResourceFactory<T: Resource> {
    connection: Arc<ResourceConnection>,
    format: ResourceFormat,
    serializer: ResourceSerializer,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceFactory<T> {
    /// Creates a factory for resource type `T`.
    ///
    /// The field alias table and serializer configuration are built here,
    /// once, and used read-only afterwards.
    #[must_use]
    pub fn new(connection: Arc<ResourceConnection>, format: ResourceFormat) -> Self {
        Self {
            connection,
            format,
            serializer: ResourceSerializer::new::<T>(format),
            _resource: PhantomData,
        }
    }

    /// The derived (or overridden) collection name for `T`.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        self.serializer.field_map().collection_name()
    }

    /// The wire format this factory speaks.
    #[must_use]
    pub const fn format(&self) -> ResourceFormat {
        self.format
    }

    /// Registers an additional scalar converter with the serializer.
    pub fn register_converter(&self, converter: Arc<dyn Converter>) {
        self.serializer.register_converter(converter);
    }

    /// The collection path, e.g. `/people.xml`.
    #[must_use]
    pub fn url_for_collection(&self) -> String {
        self.collection_builder().render()
    }

    /// The member path for `id`, e.g. `/people/5.xml`, or `None` when the
    /// id is absent.
    ///
    /// Callers must guard missing identifiers before id-scoped operations
    /// rather than let a malformed URL be built.
    #[must_use]
    pub fn url_for_one(&self, id: Option<&str>) -> Option<String> {
        let id = id?;
        Some(
            UrlBuilder::with_path(self.collection_name())
                .add(format!("{id}{}", self.format.extension()))
                .render(),
        )
    }

    /// Fetches the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ResourceNotFound`] for a 404, other mapped
    /// status errors, or serialization failures.
    pub async fn find(&self, id: &str) -> Result<T, ResourceError> {
        debug!(collection = self.collection_name(), id, "find");
        let path = UrlBuilder::with_path(self.collection_name())
            .add(format!("{id}{}", self.format.extension()))
            .render();
        let body = self.connection.get(&path).await?;
        self.serializer.decode_one(&body)
    }

    /// Fetches every resource in the collection, in server response order.
    ///
    /// # Errors
    ///
    /// Returns mapped status errors or serialization failures.
    pub async fn find_all(&self) -> Result<Vec<T>, ResourceError> {
        self.fetch_collection(self.collection_builder()).await
    }

    /// Fetches the collection through a custom path segment, e.g.
    /// `find_all_from("geeks")` for `GET /people/geeks.xml`.
    ///
    /// # Errors
    ///
    /// Returns mapped status errors or serialization failures.
    pub async fn find_all_from(&self, from: &str) -> Result<Vec<T>, ResourceError> {
        let builder = UrlBuilder::with_path(self.collection_name())
            .add(format!("{from}{}", self.format.extension()));
        self.fetch_collection(builder).await
    }

    /// Fetches the collection with query parameters.
    ///
    /// # Errors
    ///
    /// Returns mapped status errors or serialization failures.
    pub async fn find_all_with<K, V, I>(&self, params: I) -> Result<Vec<T>, ResourceError>
    where
        K: ToString,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.fetch_collection(self.collection_builder().add_query_pairs(params))
            .await
    }

    /// Fetches a custom collection path with query parameters.
    ///
    /// # Errors
    ///
    /// Returns mapped status errors or serialization failures.
    pub async fn find_all_from_with<K, V, I>(
        &self,
        from: &str,
        params: I,
    ) -> Result<Vec<T>, ResourceError>
    where
        K: ToString,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let builder = UrlBuilder::with_path(self.collection_name())
            .add(format!("{from}{}", self.format.extension()))
            .add_query_pairs(params);
        self.fetch_collection(builder).await
    }

    /// Whether a resource with the given id exists.
    ///
    /// Performs `find`'s GET and folds every failure — not-found, other
    /// protocol errors, transport errors — into `false`.
    pub async fn exists(&self, id: &str) -> bool {
        let path = UrlBuilder::with_path(self.collection_name())
            .add(format!("{id}{}", self.format.extension()))
            .render();
        self.connection.get(&path).await.is_ok()
    }

    /// Creates the resource server-side via POST.
    ///
    /// On success the resource is re-populated from the response body to
    /// pick up the server-assigned id and timestamps, and `true` is
    /// returned. A 422 validation rejection returns `false` without
    /// touching the resource.
    ///
    /// # Errors
    ///
    /// All failures other than a 422 propagate.
    pub async fn create(&self, resource: &mut T) -> Result<bool, ResourceError> {
        debug!(collection = self.collection_name(), "create");
        let body = self.serializer.encode(&*resource)?;
        let response = self
            .connection
            .post(&self.url_for_collection(), body, self.format.content_type())
            .await?;
        match ResourceError::from_status(response.status().as_u16()) {
            Some(ResourceError::ResourceInvalid) => Ok(false),
            Some(error) => Err(error),
            None => {
                let echoed = response.text().await?;
                self.serializer.decode_into(&echoed, resource)?;
                Ok(true)
            }
        }
    }

    /// Updates the resource server-side via PUT.
    ///
    /// The response body is ignored. A 422 validation rejection returns
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] when the resource has no id;
    /// all failures other than a 422 propagate.
    pub async fn update(&self, resource: &T) -> Result<bool, ResourceError> {
        let path = self
            .url_for_one(resource.id().as_deref())
            .ok_or(ResourceError::MissingId { operation: "update" })?;
        debug!(collection = self.collection_name(), path, "update");
        let body = self.serializer.encode(resource)?;
        let response = self
            .connection
            .put(&path, body, self.format.content_type())
            .await?;
        match ResourceError::from_status(response.status().as_u16()) {
            Some(ResourceError::ResourceInvalid) => Ok(false),
            Some(error) => Err(error),
            None => Ok(true),
        }
    }

    /// Creates the resource when it is new, updates it otherwise.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`create`](Self::create) and
    /// [`update`](Self::update).
    pub async fn save(&self, resource: &mut T) -> Result<bool, ResourceError> {
        if resource.is_new() {
            self.create(resource).await
        } else {
            self.update(resource).await
        }
    }

    /// Re-fetches the resource and merges the response into it in place.
    ///
    /// Fields present in the response overwrite the resource's fields;
    /// fields the response omits keep their current values. The resource's
    /// identity is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] when the resource has no id,
    /// mapped status errors, or serialization failures.
    pub async fn reload(&self, resource: &mut T) -> Result<(), ResourceError> {
        let path = self
            .url_for_one(resource.id().as_deref())
            .ok_or(ResourceError::MissingId { operation: "reload" })?;
        debug!(collection = self.collection_name(), path, "reload");
        let body = self.connection.get(&path).await?;
        self.serializer.decode_into(&body, resource)
    }

    /// Deletes the resource server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] when the resource has no id,
    /// or the mapped status error for a failed DELETE.
    pub async fn delete(&self, resource: &T) -> Result<(), ResourceError> {
        let path = self
            .url_for_one(resource.id().as_deref())
            .ok_or(ResourceError::MissingId { operation: "delete" })?;
        debug!(collection = self.collection_name(), path, "delete");
        self.connection.delete(&path).await
    }

    fn collection_builder(&self) -> UrlBuilder {
        UrlBuilder::with_path(format!(
            "{}{}",
            self.collection_name(),
            self.format.extension()
        ))
    }

    /// Collections arrive through the streaming GET and are decoded once
    /// fully read.
    async fn fetch_collection(&self, builder: UrlBuilder) -> Result<Vec<T>, ResourceError> {
        let path = builder.render();
        debug!(collection = self.collection_name(), path, "find_all");
        let response = self.connection.get_stream(&path).await?;
        let body = response.text().await?;
        self.serializer.decode_many(&body)
    }
}
