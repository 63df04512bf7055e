use alloc::string::String;
use alloc::sync::Arc;
use core::cell::Cell;

use crate::config::SerializeConfig;
use crate::error::ConfigError;
use crate::filter::{FilterRegistry, PropertyFilter};
use crate::hash::{HashMap, new_map};
use crate::inclusion::Inclusion;
use crate::schema::{BeanInfo, MapInfo, PropertyDescriptor, SchemaRegistry};

// -----------------------------------------------------------------------------
// SerializeContext

/// Everything a single document pass reads.
///
/// Created per document. The resolved filters are fixed for the lifetime of
/// the context; the null map value setting is re-read by every serialization
/// call.
pub(crate) struct SerializeContext<'a> {
    schema: &'a SchemaRegistry,
    filters: &'a FilterRegistry,
    resolved: HashMap<String, Arc<dyn PropertyFilter>>,
    config: SerializeConfig,
    null_map_values: Cell<bool>,
}

impl<'a> SerializeContext<'a> {
    pub(crate) fn new(
        schema: &'a SchemaRegistry,
        filters: &'a FilterRegistry,
        config: SerializeConfig,
    ) -> Self {
        Self {
            schema,
            filters,
            resolved: new_map(),
            config,
            null_map_values: Cell::new(config.snapshot_null_map_values()),
        }
    }

    /// Reads the null map value setting for the serialization call about to
    /// start.
    #[inline]
    pub(crate) fn refresh_null_map_values(&self) {
        self.null_map_values.set(self.config.snapshot_null_map_values());
    }

    #[inline]
    pub(crate) fn schema(&self) -> &'a SchemaRegistry {
        self.schema
    }

    /// Resolves `id` once for this document.
    pub(crate) fn resolve(&mut self, id: &str) -> Result<(), ConfigError> {
        if self.resolved.contains_key(id) {
            return Ok(());
        }
        let filter = self.filters.resolve(id)?;
        log::trace!("resolved filter `{id}`");
        self.resolved.insert(id.into(), filter);
        Ok(())
    }

    /// Returns the filter of `id`.
    ///
    /// Ids met during preflight come from the resolved table. Others, such as
    /// ids on values produced by a custom filter, go to the registry.
    pub(crate) fn filter(&self, id: &str) -> Result<Arc<dyn PropertyFilter>, ConfigError> {
        match self.resolved.get(id) {
            Some(filter) => Ok(filter.clone()),
            None => self.filters.resolve(id),
        }
    }

    /// Policy of a map's entries.
    ///
    /// Owning property content policy, then the map type's content and
    /// container policies, then the null map value setting.
    pub(crate) fn map_inclusion(
        &self,
        property: Option<&PropertyDescriptor>,
        info: Option<&MapInfo>,
    ) -> Inclusion {
        Inclusion::resolve(
            [
                property.and_then(PropertyDescriptor::content_inclusion),
                info.and_then(MapInfo::content_inclusion),
                info.and_then(MapInfo::inclusion),
            ],
            Inclusion::for_null_map_values(self.null_map_values.get()),
        )
    }

    /// Policy of a bean property.
    ///
    /// `owner` is the property holding the bean, if any.
    pub(crate) fn property_inclusion(
        &self,
        descriptor: &PropertyDescriptor,
        owner: Option<&PropertyDescriptor>,
        info: &BeanInfo,
    ) -> Inclusion {
        Inclusion::resolve(
            [
                descriptor.inclusion(),
                owner.and_then(PropertyDescriptor::content_inclusion),
                info.inclusion(),
            ],
            self.config.default_inclusion(),
        )
    }
}
