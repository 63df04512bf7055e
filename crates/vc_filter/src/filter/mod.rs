//! Named, pluggable property filters.
//!
//! A [`PropertyFilter`] is bound by id to a container, either at the type
//! level ([`BeanInfo`], [`MapInfo`]) or on the property owning the container
//! ([`PropertyDescriptor`]). For every property or entry the serializer hands
//! the filter the value, a [`Sink`] and a [`PropertyWriter`], and the filter
//! decides what, if anything, is written.
//!
//! Ids are resolved through a [`FilterRegistry`] before any output is
//! produced, so an unknown id never leaves a half-written document.
//!
//! [`BeanInfo`]: crate::schema::BeanInfo
//! [`MapInfo`]: crate::schema::MapInfo
//! [`PropertyDescriptor`]: crate::schema::PropertyDescriptor

// -----------------------------------------------------------------------------
// Modules

mod registry;
mod simple;

// -----------------------------------------------------------------------------
// Exports

pub use registry::FilterRegistry;
pub use simple::SimplePropertyFilter;

use crate::content::Content;
use crate::error::Error;
use crate::ser::{PropertyWriter, Sink};

// -----------------------------------------------------------------------------
// PropertyFilter

/// Decides whether, and how, a property or map entry is written.
///
/// Once a filter is bound, the serializer delegates to it completely: the
/// inclusion policy of the writer is *not* applied on top. A filter that
/// wants it calls `writer.includes(value)` itself, as [`SimplePropertyFilter`]
/// does.
///
/// Returning an error aborts the whole document.
///
/// # Examples
///
/// A filter that keeps `a` and shifts its value by a custom attribute:
///
/// ```
/// use vc_filter::{Content, Error};
/// use vc_filter::filter::PropertyFilter;
/// use vc_filter::ser::{PropertyWriter, Sink};
///
/// struct Offset(i32);
///
/// struct ShiftA;
///
/// impl PropertyFilter for ShiftA {
///     fn serialize_as_field(
///         &self,
///         value: &dyn Content,
///         sink: &mut dyn Sink,
///         writer: &dyn PropertyWriter,
///     ) -> Result<(), Error> {
///         if writer.name() != "a" {
///             return Ok(());
///         }
///         let offset = writer.get_attribute::<Offset>().map_or(0, |o| o.0);
///         match value.downcast_ref::<i32>() {
///             Some(v) => {
///                 sink.write_field_name(writer.name())?;
///                 sink.write_value(&(v + offset))
///             }
///             None => Err(Error::filter(writer.name(), "expected an i32")),
///         }
///     }
/// }
/// ```
pub trait PropertyFilter: Send + Sync {
    /// Handles a property of an object-shaped container.
    fn serialize_as_field(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error>;

    /// Handles a property of an array-shaped bean.
    ///
    /// Something must be written to keep later positions stable; the default
    /// writes the value as-is.
    fn serialize_as_element(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error> {
        writer.serialize_as_element(value, sink)
    }
}
