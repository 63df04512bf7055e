use core::sync::atomic::{AtomicBool, Ordering};

use crate::inclusion::Inclusion;

// -----------------------------------------------------------------------------
// Global null policy

static INCLUDE_NULL_MAP_VALUES: AtomicBool = AtomicBool::new(true);

/// Sets whether null map values are written when no inclusion policy is
/// configured for the map.
///
/// The setting is process-wide and read at the start of every serialization
/// call, so it also applies to documents created before the change. Beans
/// are never affected.
///
/// Defaults to `true`.
pub fn set_include_null_map_values(include: bool) {
    let previous = INCLUDE_NULL_MAP_VALUES.swap(include, Ordering::Relaxed);
    if previous != include {
        log::debug!("null map values are now {}", if include { "written" } else { "skipped" });
    }
}

/// Returns the current process-wide null map value setting.
///
/// See [`set_include_null_map_values`].
#[inline]
pub fn include_null_map_values() -> bool {
    INCLUDE_NULL_MAP_VALUES.load(Ordering::Relaxed)
}

// -----------------------------------------------------------------------------
// SerializeConfig

/// Per-[`Mapper`](crate::Mapper) settings.
///
/// # Examples
///
/// ```
/// use vc_filter::{Inclusion, SerializeConfig};
///
/// let config = SerializeConfig::new()
///     .with_null_map_values(false)
///     .with_default_inclusion(Inclusion::NonNull);
///
/// assert_eq!(config.null_map_values(), Some(false));
/// assert_eq!(config.default_inclusion(), Inclusion::NonNull);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SerializeConfig {
    null_map_values: Option<bool>,
    default_inclusion: Inclusion,
}

impl SerializeConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            null_map_values: None,
            default_inclusion: Inclusion::Always,
        }
    }

    /// Overrides the process-wide null map value setting for this mapper.
    #[inline]
    pub const fn with_null_map_values(mut self, include: bool) -> Self {
        self.null_map_values = Some(include);
        self
    }

    /// Sets the policy of bean properties when neither the property nor the
    /// bean declares one.
    #[inline]
    pub const fn with_default_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.default_inclusion = inclusion;
        self
    }

    #[inline]
    pub const fn null_map_values(&self) -> Option<bool> {
        self.null_map_values
    }

    #[inline]
    pub const fn default_inclusion(&self) -> Inclusion {
        self.default_inclusion
    }

    /// Reads the null map value setting for one serialization call.
    #[inline]
    pub(crate) fn snapshot_null_map_values(&self) -> bool {
        match self.null_map_values {
            Some(include) => include,
            None => include_null_map_values(),
        }
    }
}
