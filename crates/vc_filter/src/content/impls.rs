use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::OnceCell;

use super::{Content, ContentRef, MapContent, MapKey, SeqContent};

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar_content {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Content for $ty {
                #[inline]
                fn content_ref(&self) -> ContentRef<'_> {
                    ContentRef::Scalar(self, self)
                }
            }

            impl MapKey for $ty {
                #[inline]
                fn as_field_name(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_scalar_content!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);

impl Content for f32 {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Scalar(self, self)
    }
}

impl Content for f64 {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Scalar(self, self)
    }
}

// -----------------------------------------------------------------------------
// Strings

impl Content for str {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Str(self)
    }
}

impl Content for String {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Str(self)
    }
}

impl Content for Cow<'_, str> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Str(self)
    }
}

impl MapKey for str {
    #[inline]
    fn as_field_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl MapKey for String {
    #[inline]
    fn as_field_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl MapKey for Cow<'_, str> {
    #[inline]
    fn as_field_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: MapKey + ?Sized> MapKey for &T {
    #[inline]
    fn as_field_name(&self) -> Cow<'_, str> {
        (**self).as_field_name()
    }
}

// -----------------------------------------------------------------------------
// Pointers

impl<T: Content + ?Sized> Content for &T {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        (**self).content_ref()
    }
}

impl<T: Content + ?Sized> Content for Box<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        (**self).content_ref()
    }
}

impl<T: Content + ?Sized> Content for Rc<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        (**self).content_ref()
    }
}

impl<T: Content + ?Sized> Content for Arc<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        (**self).content_ref()
    }
}

// -----------------------------------------------------------------------------
// Nullable and references

/// `None` is the null literal, not an absent reference.
impl<T: Content> Content for Option<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        match self {
            Some(value) => value.content_ref(),
            None => ContentRef::Null,
        }
    }
}

impl<T: Content> Content for OnceCell<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Reference(self.get().map(|value| value as &dyn Content))
    }
}

#[cfg(feature = "std")]
impl<T: Content> Content for std::sync::OnceLock<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Reference(self.get().map(|value| value as &dyn Content))
    }
}

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_seq_content {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Content> Content for $ty<T> {
                #[inline]
                fn content_ref(&self) -> ContentRef<'_> {
                    ContentRef::Seq(self)
                }
            }

            impl<T: Content> SeqContent for $ty<T> {
                #[inline]
                fn len(&self) -> usize {
                    $ty::len(self)
                }

                fn iter(&self) -> Box<dyn Iterator<Item = &dyn Content> + '_> {
                    Box::new($ty::iter(self).map(|value| value as &dyn Content))
                }
            }
        )*
    };
}

impl_seq_content!(VecDeque, BTreeSet);

impl<T: Content> Content for Vec<T> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Seq(self)
    }
}

impl<T: Content> SeqContent for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Content> + '_> {
        Box::new(self.as_slice().iter().map(|value| value as &dyn Content))
    }
}

impl<T: Content, const N: usize> Content for [T; N] {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Seq(self)
    }
}

impl<T: Content, const N: usize> SeqContent for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Content> + '_> {
        Box::new(self.as_slice().iter().map(|value| value as &dyn Content))
    }
}

// -----------------------------------------------------------------------------
// Maps

impl<K, V> Content for BTreeMap<K, V>
where
    K: MapKey + 'static,
    V: Content + 'static,
{
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Map(self)
    }
}

impl<K, V> MapContent for BTreeMap<K, V>
where
    K: MapKey + 'static,
    V: Content + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_> {
        Box::new(
            BTreeMap::iter(self).map(|(key, value)| (key.as_field_name(), value as &dyn Content)),
        )
    }
}

impl<K, V, S> Content for hashbrown::HashMap<K, V, S>
where
    K: MapKey + 'static,
    V: Content + 'static,
    S: 'static,
{
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Map(self)
    }
}

impl<K, V, S> MapContent for hashbrown::HashMap<K, V, S>
where
    K: MapKey + 'static,
    V: Content + 'static,
    S: 'static,
{
    #[inline]
    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_> {
        Box::new(
            hashbrown::HashMap::iter(self)
                .map(|(key, value)| (key.as_field_name(), value as &dyn Content)),
        )
    }
}

#[cfg(feature = "std")]
impl<K, V, S> Content for std::collections::HashMap<K, V, S>
where
    K: MapKey + 'static,
    V: Content + 'static,
    S: 'static,
{
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Map(self)
    }
}

#[cfg(feature = "std")]
impl<K, V, S> MapContent for std::collections::HashMap<K, V, S>
where
    K: MapKey + 'static,
    V: Content + 'static,
    S: 'static,
{
    #[inline]
    fn len(&self) -> usize {
        std::collections::HashMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_> {
        Box::new(
            std::collections::HashMap::iter(self)
                .map(|(key, value)| (key.as_field_name(), value as &dyn Content)),
        )
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::OnceCell;

    use crate::{Content, ContentRef};

    #[test]
    fn option_none_is_null() {
        let value: Option<String> = None;
        assert!(matches!(value.content_ref(), ContentRef::Null));
        assert!((&value as &dyn Content).is_null());
    }

    #[test]
    fn once_cell_is_reference() {
        let empty = OnceCell::<String>::new();
        assert!(matches!(empty.content_ref(), ContentRef::Reference(None)));

        let full = OnceCell::from(3_i32);
        let value: &dyn Content = &full;
        assert_eq!(value.downcast_ref::<i32>(), Some(&3));
    }

    #[test]
    fn map_keys_become_field_names() {
        let map: BTreeMap<u32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
        let ContentRef::Map(map) = map.content_ref() else {
            panic!("expected a map");
        };
        let keys = map.entries().map(|(k, _)| k.into_owned()).collect::<vec::Vec<_>>();
        assert_eq!(keys, ["1", "2"]);
    }
}
