use core::fmt;

use crate::content::{Content, ContentRef};

// -----------------------------------------------------------------------------
// Inclusion

/// Policy deciding whether a value is written to the document.
///
/// Ordered from the most to the least permissive for null/empty values:
/// anything excluded by [`NonNull`](Self::NonNull) or
/// [`NonAbsent`](Self::NonAbsent) is also excluded by
/// [`NonEmpty`](Self::NonEmpty).
///
/// # Examples
///
/// ```
/// use core::cell::OnceCell;
/// use vc_filter::Inclusion;
///
/// let absent = OnceCell::<String>::new();
/// let blank = OnceCell::from(String::new());
///
/// // An absent reference is not null ...
/// assert!(Inclusion::NonNull.includes(&absent));
/// assert!(!Inclusion::NonAbsent.includes(&absent));
///
/// // ... and a reference to "" is present but empty.
/// assert!(Inclusion::NonAbsent.includes(&blank));
/// assert!(!Inclusion::NonEmpty.includes(&blank));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inclusion {
    /// Every value is written.
    #[default]
    Always,
    /// Null values are skipped.
    NonNull,
    /// Null values and absent references are skipped.
    NonAbsent,
    /// Null, absent, empty strings, empty collections and references to
    /// empty payloads are skipped.
    NonEmpty,
}

impl Inclusion {
    /// All policies, from the most permissive.
    pub const ALL: [Inclusion; 4] = [Self::Always, Self::NonNull, Self::NonAbsent, Self::NonEmpty];

    /// Returns `true` if `value` is written under this policy.
    ///
    /// Pure function of the value's shape and the policy.
    pub fn includes(self, value: &dyn Content) -> bool {
        let shape = value.content_ref();
        match self {
            Self::Always => true,
            Self::NonNull => !matches!(shape, ContentRef::Null),
            Self::NonAbsent => !is_absent(shape),
            Self::NonEmpty => !is_empty(shape),
        }
    }

    /// Picks the first configured policy, falling back to `default`.
    ///
    /// `levels` goes from the most specific (property, content) to the least
    /// specific (container).
    #[inline]
    pub fn resolve<const N: usize>(levels: [Option<Inclusion>; N], default: Inclusion) -> Self {
        levels.into_iter().flatten().next().unwrap_or(default)
    }

    /// Returns the policy used for plain maps when nothing else is configured.
    #[inline]
    pub const fn for_null_map_values(include_nulls: bool) -> Self {
        if include_nulls {
            Self::Always
        } else {
            Self::NonNull
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Always => "ALWAYS",
            Self::NonNull => "NON_NULL",
            Self::NonAbsent => "NON_ABSENT",
            Self::NonEmpty => "NON_EMPTY",
        })
    }
}

/// Returns `true` if `value` is written under `policy`.
///
/// Same as [`Inclusion::includes`].
#[inline]
pub fn should_include(value: &dyn Content, policy: Inclusion) -> bool {
    policy.includes(value)
}

// -----------------------------------------------------------------------------
// Absence checks

// A reference holding a null payload is as absent as an empty one.
fn is_absent(shape: ContentRef<'_>) -> bool {
    match shape {
        ContentRef::Null | ContentRef::Reference(None) => true,
        ContentRef::Reference(Some(inner)) => inner.is_null(),
        _ => false,
    }
}

// Shapes without a notion of emptiness (scalars, beans) are always present.
fn is_empty(shape: ContentRef<'_>) -> bool {
    match shape {
        ContentRef::Null | ContentRef::Reference(None) => true,
        ContentRef::Str(s) => s.is_empty(),
        ContentRef::Seq(seq) => seq.is_empty(),
        ContentRef::Map(map) => map.is_empty(),
        ContentRef::Reference(Some(inner)) => is_empty(inner.content_ref()),
        ContentRef::Scalar(..) | ContentRef::Bean(..) => false,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::OnceCell;

    use super::Inclusion;
    use crate::{Content, LinkedMap};

    fn samples() -> Vec<Box<dyn Content>> {
        vec![
            Box::new(Option::<i32>::None),
            Box::new(String::new()),
            Box::new(String::from("foo")),
            Box::new(0_i32),
            Box::new(Vec::<i32>::new()),
            Box::new(vec![1, 2]),
            Box::new(LinkedMap::<i32>::new()),
            Box::new(LinkedMap::new().with("a", 1)),
            Box::new(OnceCell::<String>::new()),
            Box::new(OnceCell::from(String::new())),
            Box::new(OnceCell::from(String::from("foo"))),
            Box::new(OnceCell::from(Option::<i32>::None)),
        ]
    }

    #[test]
    fn non_null_keeps_empty_values() {
        assert!(!Inclusion::NonNull.includes(&Option::<String>::None));
        assert!(Inclusion::NonNull.includes(&String::new()));
        assert!(Inclusion::NonNull.includes(&Vec::<i32>::new()));
        assert!(Inclusion::NonNull.includes(&OnceCell::<i32>::new()));
    }

    #[test]
    fn non_empty_drops_empty_values() {
        assert!(!Inclusion::NonEmpty.includes(&String::new()));
        assert!(!Inclusion::NonEmpty.includes(&Vec::<i32>::new()));
        assert!(!Inclusion::NonEmpty.includes(&LinkedMap::<i32>::new()));
        assert!(Inclusion::NonEmpty.includes(&0_i32));
        assert!(Inclusion::NonEmpty.includes(&"bar"));
    }

    #[test]
    fn non_absent_only_drops_missing_payloads() {
        assert!(!Inclusion::NonAbsent.includes(&OnceCell::<String>::new()));
        assert!(!Inclusion::NonAbsent.includes(&OnceCell::from(Option::<i32>::None)));
        assert!(!Inclusion::NonAbsent.includes(&Option::<i32>::None));
        assert!(Inclusion::NonAbsent.includes(&OnceCell::from(String::new())));
        assert!(Inclusion::NonAbsent.includes(&String::new()));
    }

    #[test]
    fn strictness_is_monotonic() {
        for value in samples() {
            let value = &*value;
            assert!(Inclusion::Always.includes(value));
            if !Inclusion::NonNull.includes(value) {
                assert!(!Inclusion::NonAbsent.includes(value), "{value:?}");
            }
            if !Inclusion::NonAbsent.includes(value) {
                assert!(!Inclusion::NonEmpty.includes(value), "{value:?}");
            }
        }
    }

    #[test]
    fn evaluation_is_pure() {
        let values = samples();
        let first: Vec<_> = Inclusion::ALL
            .iter()
            .flat_map(|policy| values.iter().map(move |v| policy.includes(&**v)))
            .collect();
        let second: Vec<_> = Inclusion::ALL
            .iter()
            .rev()
            .flat_map(|policy| values.iter().rev().map(move |v| policy.includes(&**v)))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_prefers_specific_levels() {
        let resolved = Inclusion::resolve([None, Some(Inclusion::NonEmpty)], Inclusion::Always);
        assert_eq!(resolved, Inclusion::NonEmpty);
        let resolved = Inclusion::resolve([Some(Inclusion::NonNull), Some(Inclusion::NonEmpty)], Inclusion::Always);
        assert_eq!(resolved, Inclusion::NonNull);
        assert_eq!(Inclusion::resolve([None, None], Inclusion::NonAbsent), Inclusion::NonAbsent);
    }
}
