use alloc::borrow::Cow;
use core::any::Any;

use crate::attributes::CustomAttributes;
use crate::inclusion::Inclusion;

// -----------------------------------------------------------------------------
// MapInfo

/// Type-level bindings of a map-like type.
///
/// A property owning the map may override any of them, see
/// [`PropertyDescriptor`](crate::schema::PropertyDescriptor).
///
/// # Examples
///
/// ```
/// use vc_filter::Inclusion;
/// use vc_filter::schema::MapInfo;
///
/// let info = MapInfo::new()
///     .with_filter("filterX")
///     .with_content_inclusion(Inclusion::NonEmpty);
///
/// assert_eq!(info.filter_id(), Some("filterX"));
/// assert_eq!(info.entry_inclusion(), Some(Inclusion::NonEmpty));
/// ```
#[derive(Debug, Default)]
pub struct MapInfo {
    filter_id: Option<Cow<'static, str>>,
    inclusion: Option<Inclusion>,
    content_inclusion: Option<Inclusion>,
    attributes: CustomAttributes,
}

impl MapInfo {
    #[inline]
    pub const fn new() -> Self {
        Self {
            filter_id: None,
            inclusion: None,
            content_inclusion: None,
            attributes: CustomAttributes::new(),
        }
    }

    /// Binds a filter to every entry of the map.
    #[inline]
    pub fn with_filter(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.filter_id = Some(id.into());
        self
    }

    /// Sets the container-level policy.
    ///
    /// Used for entries when no content policy is set.
    #[inline]
    pub fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = Some(inclusion);
        self
    }

    /// Sets the policy applied to each entry value.
    #[inline]
    pub fn with_content_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.content_inclusion = Some(inclusion);
        self
    }

    #[inline]
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.attributes.insert(value);
        self
    }

    #[inline]
    pub fn filter_id(&self) -> Option<&str> {
        self.filter_id.as_deref()
    }

    #[inline]
    pub fn inclusion(&self) -> Option<Inclusion> {
        self.inclusion
    }

    #[inline]
    pub fn content_inclusion(&self) -> Option<Inclusion> {
        self.content_inclusion
    }

    /// The content policy, falling back to the container policy.
    #[inline]
    pub fn entry_inclusion(&self) -> Option<Inclusion> {
        self.content_inclusion.or(self.inclusion)
    }

    #[inline]
    pub fn custom_attributes(&self) -> &CustomAttributes {
        &self.attributes
    }
}
