use alloc::string::ToString;
use alloc::sync::Arc;
use core::any::Any;

use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use super::error_utils::{PathScope, make_custom_error};
use super::sink::{ArraySink, ObjectSink};

use crate::content::{Content, ContentRef};
use crate::error::ConfigError;
use crate::filter::PropertyFilter;
use crate::schema::{BeanInfo, PropertyDescriptor, Shape};
use crate::ser::{BeanPropertyWriter, PropertyWriter, SerializeContext};

/// A serializer for bean values, described by a registered [`BeanInfo`].
///
/// The bean's filter (the owning property's, or else the bean type's)
/// decides on every property, except for properties declaring a filter of
/// their own whose value is not a map or bean: that filter decides instead.
/// On map and bean values a property filter binds to the value's entries.
///
/// The policy of each property is resolved from the property itself, the
/// owning property's content policy, the bean type and finally the mapper's
/// default.
pub(super) struct BeanSerializer<'a, 'c> {
    pub bean: &'a dyn Any,
    pub type_name: &'static str,
    pub ctx: &'a SerializeContext<'c>,
    pub property: Option<&'a PropertyDescriptor>,
}

impl Serialize for BeanSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(info) = self.ctx.schema().get_bean_by_id(self.bean.type_id()) else {
            return Err(make_custom_error(ConfigError::UnknownBean {
                type_name: self.type_name.to_string(),
            }));
        };

        let filter_id = self
            .property
            .and_then(PropertyDescriptor::filter_id)
            .or_else(|| info.filter_id());
        let filter = match filter_id.map(|id| self.ctx.filter(id)).transpose() {
            Ok(filter) => filter,
            Err(err) => return Err(make_custom_error(err)),
        };

        match info.shape() {
            Shape::Object => self.serialize_object(info, filter, serializer),
            Shape::Array => self.serialize_array(info, filter, serializer),
        }
    }
}

// Maps and beans, looked through references, take a property filter for
// their own entries.
fn filters_own_entries(value: &dyn Content) -> bool {
    match value.content_ref() {
        ContentRef::Map(_) | ContentRef::Bean(..) => true,
        ContentRef::Reference(Some(inner)) => filters_own_entries(inner),
        _ => false,
    }
}

impl BeanSerializer<'_, '_> {
    /// The filter deciding on `descriptor` itself.
    fn property_filter(
        &self,
        descriptor: &PropertyDescriptor,
        value: &dyn Content,
        container: Option<&Arc<dyn PropertyFilter>>,
    ) -> Result<Option<Arc<dyn PropertyFilter>>, ConfigError> {
        match descriptor.filter_id() {
            Some(id) if !filters_own_entries(value) => self.ctx.filter(id).map(Some),
            _ => Ok(container.cloned()),
        }
    }

    fn serialize_object<S: Serializer>(
        &self,
        info: &BeanInfo,
        filter: Option<Arc<dyn PropertyFilter>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        let mut sink = ObjectSink::new(&mut state, self.ctx);

        for entry in info.values(self.bean) {
            let (descriptor, value) = match entry {
                Ok(entry) => entry,
                Err(err) => return Err(sink.into_error(err.into())),
            };
            let _scope = PathScope::enter(descriptor.name());
            let decider = match self.property_filter(descriptor, value, filter.as_ref()) {
                Ok(decider) => decider,
                Err(err) => return Err(sink.into_error(err.into())),
            };
            let inclusion = self.ctx.property_inclusion(descriptor, self.property, info);
            let writer = BeanPropertyWriter::new(descriptor, inclusion);
            let writer: &dyn PropertyWriter = &writer;
            if let Err(err) = writer.emit(value, &mut sink, decider.as_deref()) {
                return Err(sink.into_error(err));
            }
        }

        drop(sink);
        state.end()
    }

    fn serialize_array<S: Serializer>(
        &self,
        info: &BeanInfo,
        filter: Option<Arc<dyn PropertyFilter>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(info.len()))?;
        let mut sink = ArraySink::new(&mut state, self.ctx);

        for entry in info.values(self.bean) {
            let (descriptor, value) = match entry {
                Ok(entry) => entry,
                Err(err) => return Err(sink.into_error(err.into())),
            };
            let _scope = PathScope::enter(descriptor.name());
            let decider = match self.property_filter(descriptor, value, filter.as_ref()) {
                Ok(decider) => decider,
                Err(err) => return Err(sink.into_error(err.into())),
            };
            let inclusion = self.ctx.property_inclusion(descriptor, self.property, info);
            let writer = BeanPropertyWriter::new(descriptor, inclusion);
            let writer: &dyn PropertyWriter = &writer;
            if let Err(err) = writer.emit_element(value, &mut sink, decider.as_deref()) {
                return Err(sink.into_error(err));
            }
        }

        drop(sink);
        state.end()
    }
}
