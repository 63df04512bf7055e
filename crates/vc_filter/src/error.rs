use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ConfigError

/// Errors caused by missing or inconsistent configuration.
///
/// These are reported before any output is produced for the affected
/// document, either when a [`BeanInfo`] is built or during the preflight
/// pass of [`ObjectWriter::document`].
///
/// [`BeanInfo`]: crate::schema::BeanInfo
/// [`ObjectWriter::document`]: crate::ObjectWriter::document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no filter with id `{id}` is registered")]
    UnknownFilter { id: String },

    #[error("type `{type_name}` is not registered as a bean")]
    UnknownBean { type_name: String },

    #[error("property `{property}` of `{bean}` has no accessor")]
    MissingAccessor { bean: &'static str, property: String },

    #[error("accessor `{property}` of `{bean}` does not match a declared property")]
    UndeclaredAccessor { bean: &'static str, property: String },

    #[error("property `{property}` of `{bean}` is declared twice")]
    DuplicateProperty { bean: &'static str, property: String },

    #[error("accessor of `{bean}` was called with a value of another type")]
    BeanTypeMismatch { bean: &'static str },
}

// -----------------------------------------------------------------------------
// Error

/// Error raised while producing a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A filter failed while deciding on or transforming a property.
    #[error("filter failed on property `{property}`: {source}")]
    Filter {
        property: String,
        #[source]
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// The underlying serializer rejected a write.
    #[error("{0}")]
    Sink(String),
}

impl Error {
    /// Creates a [`Error::Filter`] for `property`.
    ///
    /// Custom [`PropertyFilter`](crate::filter::PropertyFilter)s use this to
    /// abort the document.
    pub fn filter(
        property: impl Into<String>,
        source: impl Into<Box<dyn core::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Filter {
            property: property.into(),
            source: source.into(),
        }
    }

    #[inline]
    pub(crate) fn sink(msg: impl Display) -> Self {
        Self::Sink(msg.to_string())
    }
}
