use core::any::Any;

use serde_core::{Serialize, Serializer, ser::SerializeMap};

use super::error_utils::{PathScope, make_custom_error};
use super::sink::ObjectSink;

use crate::attributes::CustomAttributes;
use crate::content::MapContent;
use crate::inclusion::Inclusion;
use crate::schema::{MapInfo, PropertyDescriptor};
use crate::ser::{MapEntryWriter, PropertyWriter, SerializeContext};

/// A serializer for [`MapContent`] values.
///
/// # Resolution
///
/// - Entry policy: the owning property's content policy, then the map type's
///   content and container policies, then the null map value setting.
/// - Filter: the owning property's filter id, then the map type's.
///
/// The object is always opened and closed, so a map whose entries are all
/// filtered out is still written as `{}`.
pub(super) struct MapSerializer<'a, 'c> {
    pub map: &'a dyn MapContent,
    pub ctx: &'a SerializeContext<'c>,
    pub property: Option<&'a PropertyDescriptor>,
}

// The owning property's attributes, or else the map type's.
fn entry_attributes<'a>(
    property: Option<&'a PropertyDescriptor>,
    info: Option<&'a MapInfo>,
) -> &'a CustomAttributes {
    match (property, info) {
        (Some(property), _) if !property.custom_attributes().is_empty() => {
            property.custom_attributes()
        }
        (_, Some(info)) => info.custom_attributes(),
        _ => CustomAttributes::EMPTY,
    }
}

impl Serialize for MapSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: &dyn Any = self.map;
        let info = self.ctx.schema().get_map_by_id(map.type_id());

        let inclusion = self.ctx.map_inclusion(self.property, info);
        let filter_id = self
            .property
            .and_then(PropertyDescriptor::filter_id)
            .or_else(|| info.and_then(MapInfo::filter_id));
        let filter = match filter_id.map(|id| self.ctx.filter(id)).transpose() {
            Ok(filter) => filter,
            Err(err) => return Err(make_custom_error(err)),
        };
        let attributes = entry_attributes(self.property, info);

        let len = match (&filter, inclusion) {
            (None, Inclusion::Always) => Some(self.map.len()),
            _ => None,
        };
        let mut state = serializer.serialize_map(len)?;
        let mut sink = ObjectSink::new(&mut state, self.ctx);

        for (key, value) in self.map.entries() {
            let _scope = PathScope::enter(&key);
            let writer = MapEntryWriter::new(&key, inclusion, attributes);
            let writer: &dyn PropertyWriter = &writer;
            if let Err(err) = writer.emit(value, &mut sink, filter.as_deref()) {
                return Err(sink.into_error(err));
            }
        }

        drop(sink);
        state.end()
    }
}
