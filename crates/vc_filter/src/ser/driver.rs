use serde_core::{Serialize, Serializer};

use super::bean_serializer::BeanSerializer;
use super::map_serializer::MapSerializer;
use super::seq_serializer::SeqSerializer;

use crate::content::{Content, ContentRef};
use crate::schema::PropertyDescriptor;
use crate::ser::SerializeContext;

// -----------------------------------------------------------------------------
// ContentSerializer

/// Serializes a [`Content`] by dispatching on its shape.
///
/// # Serialization Rules
///
/// - `Null` and absent references are written as `None`, the format's null.
/// - A present reference is looked through; the property context is kept,
///   so `OnceCell<LinkedMap<_>>` is filtered like the map itself.
/// - Scalars and strings use their own `serde` implementation.
/// - Sequences, maps and beans go to their dedicated serializers.
///
/// `property` is the bean property owning the value, if any. Its filter id
/// and content policy shadow the bindings of the value's type.
pub(crate) struct ContentSerializer<'a, 'c> {
    value: &'a dyn Content,
    ctx: &'a SerializeContext<'c>,
    property: Option<&'a PropertyDescriptor>,
}

impl<'a, 'c> ContentSerializer<'a, 'c> {
    #[inline]
    pub(crate) const fn new(
        value: &'a dyn Content,
        ctx: &'a SerializeContext<'c>,
        property: Option<&'a PropertyDescriptor>,
    ) -> Self {
        Self {
            value,
            ctx,
            property,
        }
    }
}

impl Serialize for ContentSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.content_ref() {
            ContentRef::Null | ContentRef::Reference(None) => serializer.serialize_none(),
            ContentRef::Reference(Some(inner)) => {
                ContentSerializer::new(inner, self.ctx, self.property).serialize(serializer)
            }
            ContentRef::Scalar(value, _) => value.serialize(serializer),
            ContentRef::Str(value) => serializer.serialize_str(value),
            ContentRef::Seq(seq) => SeqSerializer { seq, ctx: self.ctx }.serialize(serializer),
            ContentRef::Map(map) => MapSerializer {
                map,
                ctx: self.ctx,
                property: self.property,
            }
            .serialize(serializer),
            ContentRef::Bean(bean, type_name) => BeanSerializer {
                bean,
                type_name,
                ctx: self.ctx,
                property: self.property,
            }
            .serialize(serializer),
        }
    }
}
