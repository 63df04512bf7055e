//! Object-safe view over the values a document is built from.
//!
//! Every serializable value implements [`Content`], which exposes its shape
//! through [`ContentRef`]. The serializers dispatch on that shape, and the
//! inclusion policies decide presence from it:
//!
//! | Shape         | null | empty          | absent          |
//! |---------------|------|----------------|-----------------|
//! | `Null`        | yes  | yes            | yes             |
//! | `Str`         | no   | if `""`        | no              |
//! | `Seq` / `Map` | no   | if no items    | no              |
//! | `Reference`   | no   | payload empty  | no payload      |
//! | `Scalar`      | no   | no             | no              |
//! | `Bean`        | no   | no             | no              |

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod linked_map;

// -----------------------------------------------------------------------------
// Exports

pub use linked_map::LinkedMap;

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

// -----------------------------------------------------------------------------
// Content

/// A value that can be written by the filtering serializers.
///
/// Implemented for primitives, strings, `Option` (where `None` is null),
/// smart pointers, common collections and reference wrappers such as
/// [`OnceCell`](core::cell::OnceCell).
///
/// Bean-like types return [`ContentRef::Bean`] and must be registered in the
/// [`SchemaRegistry`](crate::schema::SchemaRegistry), see [`impl_bean_content`].
///
/// [`impl_bean_content`]: crate::impl_bean_content
pub trait Content {
    /// Returns the shape of this value.
    fn content_ref(&self) -> ContentRef<'_>;
}

impl dyn Content + '_ {
    /// Returns the payload as `T` if this value is a [`ContentRef::Scalar`] or
    /// [`ContentRef::Bean`] of that type.
    ///
    /// References are looked through, so a `OnceCell<i32>` holding `1`
    /// downcasts to `1_i32`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self.content_ref() {
            ContentRef::Scalar(_, any) | ContentRef::Bean(any, _) => any.downcast_ref::<T>(),
            ContentRef::Reference(Some(inner)) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns `true` if this value is the null literal.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.content_ref(), ContentRef::Null)
    }
}

impl fmt::Debug for dyn Content + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.content_ref(), f)
    }
}

// -----------------------------------------------------------------------------
// ContentRef

/// The shape of a [`Content`] value.
#[derive(Clone, Copy)]
pub enum ContentRef<'a> {
    /// The null literal.
    Null,
    /// A leaf written through its own `serde` implementation.
    ///
    /// The second field gives access to the concrete value, used by filters
    /// that transform values.
    Scalar(&'a dyn erased_serde::Serialize, &'a dyn Any),
    /// A string.
    Str(&'a str),
    /// An ordered sequence of values.
    Seq(&'a dyn SeqContent),
    /// A map-like container of key/value pairs.
    Map(&'a dyn MapContent),
    /// A record-like container described by a registered `BeanInfo`, with
    /// its type name for error messages.
    Bean(&'a dyn Any, &'static str),
    /// A wrapper holding zero or one payload.
    ///
    /// `None` is *absent*, which is different from [`Null`](Self::Null).
    Reference(Option<&'a dyn Content>),
}

impl fmt::Debug for ContentRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Scalar(..) => f.write_str("Scalar"),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Seq(seq) => f.debug_struct("Seq").field("len", &seq.len()).finish(),
            Self::Map(map) => f.debug_struct("Map").field("len", &map.len()).finish(),
            Self::Bean(_, name) => f.debug_tuple("Bean").field(name).finish(),
            Self::Reference(inner) => f.debug_tuple("Reference").field(inner).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// SeqContent

/// A sequence of [`Content`] values.
pub trait SeqContent {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Content> + '_>;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// MapContent

/// A map-like container producing key/value pairs.
///
/// The `Any` bound lets the serializer find type-level [`MapInfo`] for the
/// concrete map type.
///
/// [`MapInfo`]: crate::schema::MapInfo
pub trait MapContent: Any {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns the entries in the container's natural iteration order.
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_>;

    /// Returns `true` if there are no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// MapKey

/// A map key that can be written as a field name.
pub trait MapKey {
    fn as_field_name(&self) -> Cow<'_, str>;
}

// -----------------------------------------------------------------------------
// Bean support

/// Implements [`Content`] for bean types, returning [`ContentRef::Bean`].
///
/// The bean must still be registered in the
/// [`SchemaRegistry`](crate::schema::SchemaRegistry).
///
/// ```
/// struct Point { x: i32, y: i32 }
/// vc_filter::impl_bean_content!(Point);
/// ```
#[macro_export]
macro_rules! impl_bean_content {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Content for $ty {
                #[inline]
                fn content_ref(&self) -> $crate::ContentRef<'_> {
                    $crate::ContentRef::Bean(self, ::core::any::type_name::<Self>())
                }
            }
        )+
    };
}
