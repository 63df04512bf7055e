use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::error::ConfigError;
use crate::filter::{PropertyFilter, SimplePropertyFilter};
use crate::hash::{HashMap, new_map};

// -----------------------------------------------------------------------------
// FilterRegistry

/// Named [`PropertyFilter`]s.
///
/// Ids are case-sensitive, the last registration for an id wins.
///
/// An unknown id is a configuration error by default. It can instead fall
/// back to a default filter ([`with_default_filter`]) or, with
/// [`fail_on_unknown_id(false)`], to [`SimplePropertyFilter::SerializeAll`].
///
/// [`with_default_filter`]: Self::with_default_filter
/// [`fail_on_unknown_id(false)`]: Self::fail_on_unknown_id
///
/// # Examples
///
/// ```
/// use vc_filter::ConfigError;
/// use vc_filter::filter::{FilterRegistry, SimplePropertyFilter};
///
/// let mut filters = FilterRegistry::new();
/// filters.register("only_b", SimplePropertyFilter::filter_out_all_except(["b"]));
///
/// assert!(filters.resolve("only_b").is_ok());
/// assert!(matches!(
///     filters.resolve("Only_b"),
///     Err(ConfigError::UnknownFilter { .. }),
/// ));
///
/// let lenient = FilterRegistry::new().fail_on_unknown_id(false);
/// assert!(lenient.resolve("anything").is_ok());
/// ```
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn PropertyFilter>>,
    default_filter: Option<Arc<dyn PropertyFilter>>,
    fail_on_unknown_id: bool,
}

impl Default for FilterRegistry {
    /// See [`FilterRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRegistry {
    /// Creates an empty registry that rejects unknown ids.
    #[inline]
    pub const fn new() -> Self {
        Self {
            filters: new_map(),
            default_filter: None,
            fail_on_unknown_id: true,
        }
    }

    /// Sets the filter used for ids that are not registered.
    pub fn with_default_filter(mut self, filter: impl PropertyFilter + 'static) -> Self {
        self.default_filter = Some(Arc::new(filter));
        self
    }

    /// Sets whether an unknown id without default filter is an error.
    ///
    /// When `false`, such ids resolve to
    /// [`SimplePropertyFilter::SerializeAll`].
    #[inline]
    pub fn fail_on_unknown_id(mut self, fail: bool) -> Self {
        self.fail_on_unknown_id = fail;
        self
    }

    /// Binds `filter` to `id`, replacing any earlier binding.
    pub fn register(&mut self, id: impl Into<String>, filter: impl PropertyFilter + 'static) -> &mut Self {
        self.register_arc(id, Arc::new(filter))
    }

    /// Binds a shared filter to `id`, replacing any earlier binding.
    pub fn register_arc(&mut self, id: impl Into<String>, filter: Arc<dyn PropertyFilter>) -> &mut Self {
        let id = id.into();
        if self.filters.contains_key(&id) {
            log::debug!("filter `{id}` is registered again, the previous one is replaced");
        }
        self.filters.insert(id, filter);
        self
    }

    /// Finds the filter of `id`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownFilter`] if `id` is not registered, there is no
    /// default filter and unknown ids are not tolerated.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn PropertyFilter>, ConfigError> {
        if let Some(filter) = self.filters.get(id) {
            return Ok(filter.clone());
        }
        if let Some(filter) = &self.default_filter {
            log::warn!("no filter with id `{id}`, using the default filter");
            return Ok(filter.clone());
        }
        if !self.fail_on_unknown_id {
            log::warn!("no filter with id `{id}`, serializing all properties");
            return Ok(Arc::new(SimplePropertyFilter::SerializeAll));
        }
        Err(ConfigError::UnknownFilter { id: id.into() })
    }

    /// Removes the binding of `id`, returning the filter.
    #[inline]
    pub fn remove(&mut self, id: &str) -> Option<Arc<dyn PropertyFilter>> {
        self.filters.remove(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// Returns the number of registered ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("ids", &self.filters.keys().collect::<alloc::vec::Vec<_>>())
            .field("default_filter", &self.default_filter.is_some())
            .field("fail_on_unknown_id", &self.fail_on_unknown_id)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
