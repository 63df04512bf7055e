use alloc::borrow::Cow;
use core::any::Any;

use crate::attributes::CustomAttributes;
use crate::inclusion::Inclusion;

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// Metadata of one bean property.
///
/// - [`inclusion`](Self::inclusion) decides whether the property itself is
///   written, shadowing the bean-level policy.
/// - [`filter_id`](Self::filter_id) and
///   [`content_inclusion`](Self::content_inclusion) bind to the property's
///   *value*: the entries of a map, or the properties of a nested bean. They
///   take precedence over the bindings of the value's own type.
///
/// # Examples
///
/// ```
/// use vc_filter::Inclusion;
/// use vc_filter::schema::PropertyDescriptor;
///
/// struct Offset(i32);
///
/// let desc = PropertyDescriptor::new("values")
///     .with_filter("filterX")
///     .with_content_inclusion(Inclusion::NonNull)
///     .with_attribute(Offset(1));
///
/// assert_eq!(desc.name(), "values");
/// assert_eq!(desc.filter_id(), Some("filterX"));
/// assert_eq!(desc.inclusion(), None);
/// assert_eq!(desc.get_attribute::<Offset>().map(|o| o.0), Some(1));
/// ```
#[derive(Debug)]
pub struct PropertyDescriptor {
    name: Cow<'static, str>,
    filter_id: Option<Cow<'static, str>>,
    inclusion: Option<Inclusion>,
    content_inclusion: Option<Inclusion>,
    attributes: CustomAttributes,
}

impl PropertyDescriptor {
    /// Creates a descriptor with no overrides.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            filter_id: None,
            inclusion: None,
            content_inclusion: None,
            attributes: CustomAttributes::new(),
        }
    }

    /// Binds the filter registered under `id` to this property's value.
    #[inline]
    pub fn with_filter(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.filter_id = Some(id.into());
        self
    }

    /// Sets the policy deciding whether this property is written.
    #[inline]
    pub fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = Some(inclusion);
        self
    }

    /// Sets the policy applied to the entries of this property's map value.
    #[inline]
    pub fn with_content_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.content_inclusion = Some(inclusion);
        self
    }

    /// Adds a custom attribute, overwriting one of the same type.
    #[inline]
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.attributes.insert(value);
        self
    }

    /// Replaces all custom attributes.
    #[inline]
    pub fn with_custom_attributes(mut self, attributes: CustomAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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

    #[inline]
    pub fn custom_attributes(&self) -> &CustomAttributes {
        &self.attributes
    }

    /// Returns the attribute of type `T`, if present.
    #[inline]
    pub fn get_attribute<T: Any>(&self) -> Option<&T> {
        self.attributes.get::<T>()
    }

    /// Returns `true` if it contains the given attribute type.
    #[inline]
    pub fn has_attribute<T: Any>(&self) -> bool {
        self.attributes.contains::<T>()
    }
}
