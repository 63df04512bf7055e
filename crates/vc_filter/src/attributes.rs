use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::hash::{TypeIdMap, new_type_id_map};

// -----------------------------------------------------------------------------
// CustomAttributes

/// Custom metadata attached to a property or container.
///
/// Attributes are stored by their [`TypeId`], so there can only be one
/// attribute per type. Filters read them through
/// [`PropertyWriter`](crate::ser::PropertyWriter) to adjust what they write.
///
/// # Example
///
/// ```
/// use vc_filter::CustomAttributes;
///
/// struct Offset(i32);
///
/// let attrs = CustomAttributes::new().with_attribute(Offset(1));
/// assert!(attrs.contains::<Offset>());
/// assert_eq!(attrs.get::<Offset>().map(|o| o.0), Some(1));
/// assert!(attrs.get::<u8>().is_none());
/// ```
#[derive(Default)]
pub struct CustomAttributes {
    attributes: TypeIdMap<Box<dyn Any + Send + Sync>>,
}

impl CustomAttributes {
    /// A static reference to an empty [`CustomAttributes`].
    ///
    /// Returned where a writer or descriptor carries no attributes.
    pub(crate) const EMPTY: &'static Self = &Self::new();

    /// Creates an empty [`CustomAttributes`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            attributes: new_type_id_map(),
        }
    }

    /// Adds an attribute.
    ///
    /// Later insertions for the same type overwrite earlier values.
    #[inline]
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Inserts an attribute, returning `true` if it replaced one of the same type.
    #[inline]
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> bool {
        self.attributes
            .insert(TypeId::of::<T>(), Box::new(value))
            .is_some()
    }

    /// Returns `true` if an attribute of type `T` is present.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.attributes.contains_key(&TypeId::of::<T>())
    }

    /// Returns the attribute of type `T`, if present.
    #[inline]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.attributes
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns the number of stored attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attributes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Debug for CustomAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAttributes")
            .field("len", &self.attributes.len())
            .finish()
    }
}
