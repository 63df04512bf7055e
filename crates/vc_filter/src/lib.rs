//! Filtering layer for object-to-document serialization.
//!
//! The crate decides *which* key/value pairs of a container reach the output
//! document and *how* they are written, during a single serialization pass.
//! Output itself is produced by any [`serde`](serde_core) serializer.
//!
//! # Overview
//!
//! - [`Content`]: object-safe view of a value, see [`ContentRef`] for the shapes.
//! - [`Inclusion`]: declarative policy deciding whether a value is "present".
//! - [`schema`]: pre-computed [`PropertyDescriptor`] tables for bean-like types
//!   and type-level metadata for map-like types.
//! - [`filter`]: named, pluggable [`PropertyFilter`]s stored in a [`FilterRegistry`].
//! - [`ser`]: the serializers and the [`PropertyWriter`] / [`Sink`] pair handed to filters.
//! - [`Mapper`]: entry point tying schema, filters and configuration together.
//!
//! # Example
//!
//! ```
//! use vc_filter::{LinkedMap, Mapper};
//! use vc_filter::filter::{FilterRegistry, SimplePropertyFilter};
//! use vc_filter::schema::{MapInfo, SchemaRegistry};
//!
//! let mut schema = SchemaRegistry::new();
//! schema.register_map::<LinkedMap<i32>>(MapInfo::new().with_filter("maps"));
//!
//! let mut filters = FilterRegistry::new();
//! filters.register("maps", SimplePropertyFilter::filter_out_all_except(["b"]));
//!
//! let mapper = Mapper::new(schema).with_filters(filters);
//!
//! let map: LinkedMap<i32> = [("a", 1), ("b", 5), ("c", 9)].into_iter().collect();
//! let json = serde_json::to_string(&mapper.writer().document(&map).unwrap()).unwrap();
//! assert_eq!(json, r#"{"b":5}"#);
//! ```
//!
//! [`PropertyDescriptor`]: crate::schema::PropertyDescriptor
//! [`PropertyFilter`]: crate::filter::PropertyFilter
//! [`FilterRegistry`]: crate::filter::FilterRegistry
//! [`PropertyWriter`]: crate::ser::PropertyWriter
//! [`Sink`]: crate::ser::Sink
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod config;
mod content;
mod error;
mod hash;
mod inclusion;
mod mapper;

pub mod filter;
pub mod schema;
pub mod ser;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use attributes::CustomAttributes;
pub use config::{SerializeConfig, include_null_map_values, set_include_null_map_values};
pub use content::{Content, ContentRef, LinkedMap, MapContent, MapKey, SeqContent};
pub use error::{ConfigError, Error};
pub use inclusion::{Inclusion, should_include};
pub use mapper::{Document, Mapper, ObjectWriter};
