//! # ActiveResource client for Rust
//!
//! A client-side access layer for REST services that follow the
//! Ruby-on-Rails ActiveResource conventions: resource collections live at
//! predictable URLs built from pluralized type names, find/create/update/
//! delete map onto GET/POST/PUT/DELETE, and payloads travel as Rails XML
//! or JSON with convention-derived field names.
//!
//! ## Overview
//!
//! This crate provides:
//! - Rails-style string inflection (pluralize/singularize/camelize/
//!   underscore/dasherize) via [`inflector`]
//! - Encoded URL construction with ordered path segments and query
//!   parameters via [`UrlBuilder`]
//! - Convention-driven wire naming per resource type via [`FieldMap`]
//! - XML/JSON (de)serialization honoring Rails `type="..."` hints and the
//!   `nil="true"` marker via [`ResourceSerializer`]
//! - An HTTP Basic transport with a typed status-to-error mapping via
//!   [`ResourceConnection`]
//! - CRUD orchestration (find/find_all/create/update/save/reload/delete/
//!   exists) via [`ResourceFactory`]
//!
//! ## Quick Start
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
//! let mut connection = ResourceConnection::new(site)?;
//! connection.set_username("ace");
//! connection.set_password("secret");
//!
//! let factory = ResourceFactory::<Person>::new(Arc::new(connection), ResourceFormat::Xml);
//!
//! // GET /people/5.xml
//! let mut person = factory.find("5").await?;
//!
//! person.name = Some("Alexander".to_string());
//! factory.save(&mut person).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: transport configuration is instance-based and
//!   passed explicitly
//! - **Convention with overrides**: names are derived by inflection, with
//!   per-type ([`Resource::COLLECTION_NAME`]) and per-field
//!   ([`Field::aliased`]) escape hatches
//! - **No runtime reflection**: resource types declare their field lists
//!   statically
//! - **Fine-grained errors**: callers match the [`ResourceError`] kind they
//!   care about; nothing is collapsed into a generic failure except where
//!   an operation's contract documents a boolean fold
//! - **Async-first**: designed for the Tokio runtime; every operation is a
//!   single awaited round trip

pub mod connection;
pub mod error;
pub mod factory;
pub mod format;
pub mod inflector;
pub mod naming;
pub mod resource;
pub mod serializer;
pub mod url_builder;

// Re-export public types at crate root for convenience
pub use connection::{ConnectionConfig, ResourceConnection};
pub use error::ResourceError;
pub use factory::ResourceFactory;
pub use format::ResourceFormat;
pub use naming::FieldMap;
pub use resource::{Field, Resource};
pub use serializer::{Converter, ConverterRegistry, ResourceSerializer};
pub use url_builder::{QueryValue, UrlBuilder};

// Re-export the inflector transforms for direct use
pub use inflector::{camelize, dasherize, pluralize, singularize, underscore};
