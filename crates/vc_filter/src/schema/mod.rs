//! Pre-computed metadata for the containers a document is built from.
//!
//! ## Menu
//!
//! - [`PropertyDescriptor`]: name, filter id, inclusion overrides and custom
//!   attributes of one bean property.
//! - [`BeanInfo`]: the ordered property table of a bean type, with a typed
//!   accessor per property. Built once through [`BeanInfo::builder`].
//! - [`MapInfo`]: type-level filter id and inclusion for a map type.
//! - [`SchemaRegistry`]: `TypeId` indexed store of both, consulted while
//!   serializing.
//!
//! Nothing here is discovered at serialization time. A bean whose property
//! has no accessor is rejected by [`BeanInfoBuilder::build`].

// -----------------------------------------------------------------------------
// Modules

mod bean_info;
mod map_info;
mod property;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use bean_info::{BeanInfo, BeanInfoBuilder, BeanSchema, Shape};
pub use map_info::MapInfo;
pub use property::PropertyDescriptor;
pub use registry::SchemaRegistry;
