//! The filtering serializers.
//!
//! [`Document`](crate::Document) hands the root value to a driver that
//! dispatches on its [`ContentRef`](crate::ContentRef) shape. Maps and beans
//! build a [`PropertyWriter`] per entry and either delegate to the bound
//! [`PropertyFilter`](crate::filter::PropertyFilter) or apply the writer's
//! inclusion policy, writing through a [`Sink`] over the `serde` serializer.

// -----------------------------------------------------------------------------
// Modules

mod context;
mod driver;
mod error_utils;
mod sink;
mod writer;

mod bean_serializer;
mod map_serializer;
mod seq_serializer;

// -----------------------------------------------------------------------------
// Exports

pub use sink::Sink;
pub use writer::{BeanPropertyWriter, MapEntryWriter, PropertyWriter};

pub(crate) use context::SerializeContext;
pub(crate) use driver::ContentSerializer;
pub(crate) use error_utils::{PathScope, make_custom_error};
