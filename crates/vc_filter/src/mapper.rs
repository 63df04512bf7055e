use core::any::Any;
use core::fmt;

use serde_core::{Serialize, Serializer};

use crate::config::SerializeConfig;
use crate::content::{Content, ContentRef};
use crate::error::{ConfigError, Error};
use crate::filter::FilterRegistry;
use crate::schema::{PropertyDescriptor, SchemaRegistry};
use crate::ser::{ContentSerializer, PathScope, SerializeContext, make_custom_error};

// -----------------------------------------------------------------------------
// Mapper

/// Ties a [`SchemaRegistry`], a [`FilterRegistry`] and a [`SerializeConfig`]
/// together.
///
/// Configure it, then create an [`ObjectWriter`] per use. Writers borrow the
/// mapper, so the configuration cannot change while a document is written.
///
/// # Examples
///
/// ```
/// use vc_filter::{LinkedMap, Mapper, SerializeConfig};
/// use vc_filter::schema::SchemaRegistry;
///
/// let mapper = Mapper::new(SchemaRegistry::new())
///     .with_config(SerializeConfig::new().with_null_map_values(false));
///
/// let map: LinkedMap<Option<&str>> = [("a", Some("x")), ("b", None)].into_iter().collect();
/// let doc = mapper.writer().document(&map).unwrap();
/// assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":"x"}"#);
/// ```
#[derive(Debug, Default)]
pub struct Mapper {
    schema: SchemaRegistry,
    filters: FilterRegistry,
    config: SerializeConfig,
}

impl Mapper {
    /// Creates a mapper with no filters and the default configuration.
    #[inline]
    pub fn new(schema: SchemaRegistry) -> Self {
        Self {
            schema,
            filters: FilterRegistry::new(),
            config: SerializeConfig::new(),
        }
    }

    #[inline]
    pub fn with_filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    #[inline]
    pub fn with_config(mut self, config: SerializeConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    #[inline]
    pub fn schema_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.schema
    }

    #[inline]
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    #[inline]
    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    #[inline]
    pub fn config(&self) -> &SerializeConfig {
        &self.config
    }

    /// Creates a writer using the mapper's filters.
    #[inline]
    pub fn writer(&self) -> ObjectWriter<'_> {
        self.writer_with_filters(&self.filters)
    }

    /// Creates a writer using `filters` instead of the mapper's own.
    #[inline]
    pub fn writer_with_filters<'a>(&'a self, filters: &'a FilterRegistry) -> ObjectWriter<'a> {
        ObjectWriter {
            schema: &self.schema,
            filters,
            config: self.config,
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectWriter

/// Produces [`Document`]s from values.
#[derive(Debug, Clone, Copy)]
pub struct ObjectWriter<'a> {
    schema: &'a SchemaRegistry,
    filters: &'a FilterRegistry,
    config: SerializeConfig,
}

impl<'a> ObjectWriter<'a> {
    /// Replaces the configuration for documents of this writer.
    #[inline]
    pub fn with_config(mut self, config: SerializeConfig) -> Self {
        self.config = config;
        self
    }

    /// Prepares `value` for serialization.
    ///
    /// Every filter id reachable from `value` is resolved here, and every bean
    /// is checked for a registered [`BeanInfo`](crate::schema::BeanInfo), so
    /// configuration errors surface before any output is produced.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] with [`ConfigError::UnknownFilter`] or
    /// [`ConfigError::UnknownBean`].
    pub fn document<'v>(&self, value: &'v dyn Content) -> Result<Document<'v>, Error>
    where
        'a: 'v,
    {
        let mut ctx = SerializeContext::new(self.schema, self.filters, self.config);
        preflight(&mut ctx, value, None)?;
        Ok(Document { value, ctx })
    }

    /// Prepares and writes `value` in one go.
    ///
    /// Configuration errors are reported through the serializer's error type.
    pub fn serialize<S: Serializer>(&self, value: &dyn Content, serializer: S) -> Result<S::Ok, S::Error> {
        match self.document(value) {
            Ok(document) => document.serialize(serializer),
            Err(err) => Err(make_custom_error(err)),
        }
    }
}

// Resolves filter ids and checks beans, following the same property context
// as the serializers.
fn preflight(
    ctx: &mut SerializeContext<'_>,
    value: &dyn Content,
    property: Option<&PropertyDescriptor>,
) -> Result<(), Error> {
    match value.content_ref() {
        ContentRef::Null | ContentRef::Scalar(..) | ContentRef::Str(_) | ContentRef::Reference(None) => {
            Ok(())
        }
        ContentRef::Reference(Some(inner)) => preflight(ctx, inner, property),
        ContentRef::Seq(seq) => {
            for item in seq.iter() {
                preflight(ctx, item, None)?;
            }
            Ok(())
        }
        ContentRef::Map(map) => {
            let any: &dyn Any = map;
            let info = ctx.schema().get_map_by_id(any.type_id());
            let filter_id = property
                .and_then(PropertyDescriptor::filter_id)
                .or_else(|| info.and_then(|info| info.filter_id()));
            if let Some(id) = filter_id {
                ctx.resolve(id)?;
            }
            for (_, item) in map.entries() {
                preflight(ctx, item, None)?;
            }
            Ok(())
        }
        ContentRef::Bean(bean, type_name) => {
            let info = ctx
                .schema()
                .get_bean_by_id(bean.type_id())
                .ok_or_else(|| ConfigError::UnknownBean {
                    type_name: type_name.into(),
                })?;
            let filter_id = property
                .and_then(PropertyDescriptor::filter_id)
                .or_else(|| info.filter_id());
            if let Some(id) = filter_id {
                ctx.resolve(id)?;
            }
            for entry in info.values(bean) {
                let (descriptor, item) = entry?;
                if let Some(id) = descriptor.filter_id() {
                    ctx.resolve(id)?;
                }
                preflight(ctx, item, Some(descriptor))?;
            }
            Ok(())
        }
    }
}

// -----------------------------------------------------------------------------
// Document

/// A value ready to be written by any `serde` serializer.
///
/// Created by [`ObjectWriter::document`]. Filter ids stay resolved to the
/// filters found at creation. The null map value setting is read again by
/// every call to `serialize`.
pub struct Document<'a> {
    value: &'a dyn Content,
    ctx: SerializeContext<'a>,
}

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PathScope::reset();
        self.ctx.refresh_null_map_values();
        ContentSerializer::new(self.value, &self.ctx, None).serialize(serializer)
    }
}

impl fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
