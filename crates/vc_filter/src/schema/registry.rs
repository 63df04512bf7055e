use core::any::{Any, TypeId};

use crate::content::MapContent;
use crate::error::ConfigError;
use crate::hash::{TypeIdMap, new_type_id_map};
use crate::schema::{BeanInfo, BeanSchema, MapInfo};

// -----------------------------------------------------------------------------
// SchemaRegistry

/// The central store of [`BeanInfo`] and [`MapInfo`], keyed by [`TypeId`].
///
/// Configure it once, then hand it to a [`Mapper`](crate::Mapper). Beans
/// must be registered before they are serialized; maps work without any
/// registration and only need a [`MapInfo`] to carry type-level bindings.
///
/// # Examples
///
/// ```
/// use vc_filter::LinkedMap;
/// use vc_filter::schema::{BeanInfo, MapInfo, PropertyDescriptor, SchemaRegistry};
///
/// struct Flag { on: bool }
/// vc_filter::impl_bean_content!(Flag);
///
/// let mut schema = SchemaRegistry::new();
/// schema.insert_bean(
///     BeanInfo::builder::<Flag>()
///         .property(PropertyDescriptor::new("on"), |f| &f.on)
///         .build()
///         .unwrap(),
/// );
/// schema.register_map::<LinkedMap<bool>>(MapInfo::new().with_filter("flags"));
///
/// assert!(schema.contains_bean::<Flag>());
/// assert_eq!(schema.get_map::<LinkedMap<bool>>().and_then(|m| m.filter_id()), Some("flags"));
/// assert!(schema.get_map::<LinkedMap<u8>>().is_none());
/// ```
#[derive(Debug)]
pub struct SchemaRegistry {
    beans: TypeIdMap<BeanInfo>,
    maps: TypeIdMap<MapInfo>,
}

impl Default for SchemaRegistry {
    /// See [`SchemaRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Creates an empty [`SchemaRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            beans: new_type_id_map(),
            maps: new_type_id_map(),
        }
    }

    /// Builds and registers the [`BeanInfo`] of `T`.
    ///
    /// Overwrites a previous registration of `T`.
    pub fn register<T: BeanSchema>(&mut self) -> Result<&mut Self, ConfigError> {
        let info = T::bean_info()?;
        self.insert_bean(info);
        Ok(self)
    }

    /// Inserts or **overwrites** a bean table, returning the previous one.
    pub fn insert_bean(&mut self, info: BeanInfo) -> Option<BeanInfo> {
        log::debug!(
            "registering bean `{}` with {} properties",
            info.type_name(),
            info.len()
        );
        self.beans.insert(info.type_id(), info)
    }

    /// Inserts or **overwrites** the type-level bindings of the map type `T`.
    pub fn register_map<T: MapContent>(&mut self, info: MapInfo) -> Option<MapInfo> {
        log::debug!(
            "registering map `{}` (filter: {:?}, inclusion: {:?})",
            core::any::type_name::<T>(),
            info.filter_id(),
            info.entry_inclusion(),
        );
        self.maps.insert(TypeId::of::<T>(), info)
    }

    /// Returns the bean table of `T`, if registered.
    #[inline]
    pub fn get_bean<T: Any>(&self) -> Option<&BeanInfo> {
        self.beans.get(&TypeId::of::<T>())
    }

    /// Returns the bean table registered for `type_id`, if present.
    #[inline]
    pub fn get_bean_by_id(&self, type_id: TypeId) -> Option<&BeanInfo> {
        self.beans.get(&type_id)
    }

    #[inline]
    pub fn contains_bean<T: Any>(&self) -> bool {
        self.beans.contains_key(&TypeId::of::<T>())
    }

    /// Returns the type-level bindings of the map type `T`, if registered.
    #[inline]
    pub fn get_map<T: Any>(&self) -> Option<&MapInfo> {
        self.maps.get(&TypeId::of::<T>())
    }

    /// Returns the bindings registered for the map type `type_id`, if present.
    #[inline]
    pub fn get_map_by_id(&self, type_id: TypeId) -> Option<&MapInfo> {
        self.maps.get(&type_id)
    }

    /// Removes the bean table of `T`.
    #[inline]
    pub fn remove_bean<T: Any>(&mut self) -> Option<BeanInfo> {
        self.beans.remove(&TypeId::of::<T>())
    }

    /// Removes the bindings of the map type `T`.
    #[inline]
    pub fn remove_map<T: Any>(&mut self) -> Option<MapInfo> {
        self.maps.remove(&TypeId::of::<T>())
    }

    /// Returns every filter id referenced by a registered table.
    ///
    /// Property-level ids are included. The order is unspecified.
    pub fn filter_ids(&self) -> impl Iterator<Item = &str> {
        let beans = self.beans.values().flat_map(|bean| {
            bean.filter_id()
                .into_iter()
                .chain(bean.properties().filter_map(|p| p.filter_id()))
        });
        let maps = self.maps.values().filter_map(MapInfo::filter_id);
        beans.chain(maps)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::SchemaRegistry;
    use crate::ConfigError;
    use crate::LinkedMap;
    use crate::schema::{BeanInfo, BeanSchema, MapInfo, PropertyDescriptor};

    struct Holder {
        values: LinkedMap<i32>,
    }

    crate::impl_bean_content!(Holder);

    impl BeanSchema for Holder {
        fn bean_info() -> Result<BeanInfo, ConfigError> {
            BeanInfo::builder::<Self>()
                .with_filter("holder")
                .property(
                    PropertyDescriptor::new("values").with_filter("values"),
                    |h| &h.values,
                )
                .build()
        }
    }

    #[test]
    fn filter_ids_cover_all_levels() {
        let mut schema = SchemaRegistry::new();
        schema.register::<Holder>().unwrap();
        schema.register_map::<BTreeMap<String, i32>>(MapInfo::new().with_filter("tree"));

        let mut ids: Vec<_> = schema.filter_ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, ["holder", "tree", "values"]);
    }

    #[test]
    fn registration_overwrites() {
        let mut schema = SchemaRegistry::new();
        assert!(schema.register_map::<LinkedMap<i32>>(MapInfo::new()).is_none());
        let previous = schema.register_map::<LinkedMap<i32>>(MapInfo::new().with_filter("x"));
        assert!(previous.is_some_and(|m| m.filter_id().is_none()));
        assert_eq!(schema.get_map::<LinkedMap<i32>>().and_then(MapInfo::filter_id), Some("x"));

        assert!(schema.remove_map::<LinkedMap<i32>>().is_some());
        assert!(schema.get_map::<LinkedMap<i32>>().is_none());
        assert!(schema.get_bean::<Holder>().is_none());
    }
}
