use core::any::Any;

use crate::attributes::CustomAttributes;
use crate::content::Content;
use crate::error::Error;
use crate::filter::PropertyFilter;
use crate::inclusion::Inclusion;
use crate::schema::PropertyDescriptor;
use crate::ser::Sink;

// -----------------------------------------------------------------------------
// PropertyWriter

/// The view of one property or map entry handed to a [`PropertyFilter`].
///
/// A writer knows the name to write, the effective inclusion policy and the
/// custom attributes of the property, and how to write a value for it.
pub trait PropertyWriter {
    /// The field name, or the key of a map entry.
    fn name(&self) -> &str;

    /// The effective policy, after property, content and container levels
    /// have been resolved.
    fn inclusion(&self) -> Inclusion;

    fn attributes(&self) -> &CustomAttributes;

    /// The descriptor of a bean property, `None` for map entries.
    fn descriptor(&self) -> Option<&PropertyDescriptor>;

    /// Writes the field name, then `value`.
    fn serialize_as_field(&self, value: &dyn Content, sink: &mut dyn Sink) -> Result<(), Error>;

    /// Writes `value` alone, as an array element.
    fn serialize_as_element(&self, value: &dyn Content, sink: &mut dyn Sink) -> Result<(), Error>;

    /// Writes what stands in for a filtered-out array element.
    fn serialize_as_placeholder(&self, sink: &mut dyn Sink) -> Result<(), Error> {
        sink.write_null()
    }
}

impl dyn PropertyWriter + '_ {
    /// Returns the custom attribute of type `T`, if present.
    #[inline]
    pub fn get_attribute<T: Any>(&self) -> Option<&T> {
        self.attributes().get::<T>()
    }

    /// Returns `true` if `value` passes this writer's inclusion policy.
    #[inline]
    pub fn includes(&self, value: &dyn Content) -> bool {
        self.inclusion().includes(value)
    }

    /// Writes `value` as a field.
    ///
    /// With a filter the decision is entirely the filter's. Without one, the
    /// inclusion policy decides and excluded values leave no trace.
    pub fn emit(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        filter: Option<&dyn PropertyFilter>,
    ) -> Result<(), Error> {
        match filter {
            Some(filter) => filter.serialize_as_field(value, sink, self),
            None if self.includes(value) => self.serialize_as_field(value, sink),
            None => Ok(()),
        }
    }

    /// Writes `value` as an array element.
    ///
    /// Excluded values are replaced by the placeholder.
    pub fn emit_element(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        filter: Option<&dyn PropertyFilter>,
    ) -> Result<(), Error> {
        match filter {
            Some(filter) => filter.serialize_as_element(value, sink, self),
            None if self.includes(value) => self.serialize_as_element(value, sink),
            None => self.serialize_as_placeholder(sink),
        }
    }
}

// -----------------------------------------------------------------------------
// BeanPropertyWriter

/// Writer of a bean property.
///
/// Values are written with the descriptor in effect, so its filter and
/// content policy reach the value's own entries.
#[derive(Debug, Clone, Copy)]
pub struct BeanPropertyWriter<'a> {
    descriptor: &'a PropertyDescriptor,
    inclusion: Inclusion,
}

impl<'a> BeanPropertyWriter<'a> {
    #[inline]
    pub(crate) fn new(descriptor: &'a PropertyDescriptor, inclusion: Inclusion) -> Self {
        Self {
            descriptor,
            inclusion,
        }
    }
}

impl PropertyWriter for BeanPropertyWriter<'_> {
    #[inline]
    fn name(&self) -> &str {
        self.descriptor.name()
    }

    #[inline]
    fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    #[inline]
    fn attributes(&self) -> &CustomAttributes {
        self.descriptor.custom_attributes()
    }

    #[inline]
    fn descriptor(&self) -> Option<&PropertyDescriptor> {
        Some(self.descriptor)
    }

    fn serialize_as_field(&self, value: &dyn Content, sink: &mut dyn Sink) -> Result<(), Error> {
        sink.write_field_name(self.descriptor.name())?;
        sink.write_property_value(value, self.descriptor)
    }

    fn serialize_as_element(&self, value: &dyn Content, sink: &mut dyn Sink) -> Result<(), Error> {
        sink.write_property_value(value, self.descriptor)
    }
}

// -----------------------------------------------------------------------------
// MapEntryWriter

/// Writer of one map entry, created per entry.
///
/// Exposes the attributes of the property owning the map, or else those of
/// the map type.
#[derive(Debug, Clone, Copy)]
pub struct MapEntryWriter<'a> {
    key: &'a str,
    inclusion: Inclusion,
    attributes: &'a CustomAttributes,
}

impl<'a> MapEntryWriter<'a> {
    #[inline]
    pub(crate) fn new(key: &'a str, inclusion: Inclusion, attributes: &'a CustomAttributes) -> Self {
        Self {
            key,
            inclusion,
            attributes,
        }
    }
}

impl PropertyWriter for MapEntryWriter<'_> {
    #[inline]
    fn name(&self) -> &str {
        self.key
    }

    #[inline]
    fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    #[inline]
    fn attributes(&self) -> &CustomAttributes {
        self.attributes
    }

    #[inline]
    fn descriptor(&self) -> Option<&PropertyDescriptor> {
        None
    }

    fn serialize_as_field(&self, value: &dyn Content, sink: &mut dyn Sink) -> Result<(), Error> {
        sink.write_field_name(self.key)?;
        sink.write_value(value)
    }

    fn serialize_as_element(&self, value: &dyn Content, sink: &mut dyn Sink) -> Result<(), Error> {
        sink.write_value(value)
    }
}
