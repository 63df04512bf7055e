use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::content::Content;
use crate::error::Error;
use crate::filter::PropertyFilter;
use crate::ser::{PropertyWriter, Sink};

// -----------------------------------------------------------------------------
// SimplePropertyFilter

/// A filter deciding on property names alone.
///
/// After the name test the writer's inclusion policy is honoured, so a
/// property that passes the filter but is, e.g., null under `NonNull` is
/// still skipped. Names are case-sensitive.
///
/// # Examples
///
/// ```
/// use vc_filter::filter::SimplePropertyFilter;
///
/// let only_b = SimplePropertyFilter::filter_out_all_except(["b"]);
/// assert!(only_b.accepts("b"));
/// assert!(!only_b.accepts("a"));
///
/// let not_b = SimplePropertyFilter::serialize_all_except(["b"]);
/// assert!(not_b.accepts("a"));
/// assert!(!not_b.accepts("b"));
///
/// assert!(SimplePropertyFilter::serialize_all().accepts("B"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimplePropertyFilter {
    /// Every property passes the name test.
    SerializeAll,
    /// Only the listed properties pass.
    IncludeOnly(BTreeSet<String>),
    /// Every property except the listed ones passes.
    IncludeAllExcept(BTreeSet<String>),
}

impl SimplePropertyFilter {
    #[inline]
    pub const fn serialize_all() -> Self {
        Self::SerializeAll
    }

    /// Keeps only the named properties.
    pub fn filter_out_all_except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::IncludeOnly(names.into_iter().map(Into::into).collect())
    }

    /// Drops the named properties.
    pub fn serialize_all_except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::IncludeAllExcept(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if a property called `name` passes the name test.
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::SerializeAll => true,
            Self::IncludeOnly(names) => names.contains(name),
            Self::IncludeAllExcept(names) => !names.contains(name),
        }
    }
}

impl PropertyFilter for SimplePropertyFilter {
    fn serialize_as_field(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error> {
        if self.accepts(writer.name()) && writer.includes(value) {
            writer.serialize_as_field(value, sink)
        } else {
            Ok(())
        }
    }

    fn serialize_as_element(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error> {
        if self.accepts(writer.name()) && writer.includes(value) {
            writer.serialize_as_element(value, sink)
        } else {
            writer.serialize_as_placeholder(sink)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
