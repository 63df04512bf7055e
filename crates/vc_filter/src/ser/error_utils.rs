use core::fmt::Display;
use serde_core::ser::Error;

#[cfg(all(debug_assertions, feature = "debug"))]
use {alloc::string::String, alloc::vec::Vec, core::cell::RefCell, core::fmt};

#[cfg(all(debug_assertions, feature = "debug"))]
std::thread_local! {
    static PROPERTY_PATH: RefCell<PropertyPath> = const { RefCell::new(PropertyPath::new()) };
}

/// The names of the properties and entries being written, outermost first.
#[cfg(all(debug_assertions, feature = "debug"))]
struct PropertyPath {
    names: Vec<String>,
}

#[cfg(all(debug_assertions, feature = "debug"))]
impl PropertyPath {
    const fn new() -> Self {
        Self { names: Vec::new() }
    }
}

#[cfg(all(debug_assertions, feature = "debug"))]
impl Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.names.iter();
        if let Some(first) = iter.next() {
            f.write_str(first)?;
        }
        for name in iter {
            write!(f, ".{name}")?;
        }
        Ok(())
    }
}

/// Keeps `name` on the property path until dropped.
///
/// Does nothing unless the `debug` feature is enabled in a debug build.
pub(crate) struct PathScope(());

impl PathScope {
    #[inline]
    pub(crate) fn enter(name: &str) -> Self {
        #[cfg(all(debug_assertions, feature = "debug"))]
        PROPERTY_PATH.with_borrow_mut(|path| path.names.push(name.into()));
        #[cfg(not(all(debug_assertions, feature = "debug")))]
        let _ = name;
        Self(())
    }

    /// Clears what an aborted document may have left behind.
    #[inline]
    pub(crate) fn reset() {
        #[cfg(all(debug_assertions, feature = "debug"))]
        PROPERTY_PATH.with_borrow_mut(|path| path.names.clear());
    }
}

impl Drop for PathScope {
    #[inline]
    fn drop(&mut self) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        PROPERTY_PATH.with_borrow_mut(|path| path.names.pop());
    }
}

/// A helper function for generating a custom serialization error message.
///
/// This function should be preferred over [`Error::custom`] as it will include
/// the path of the property being written when available.
#[inline]
pub(crate) fn make_custom_error<E: Error>(msg: impl Display) -> E {
    #[cfg(all(debug_assertions, feature = "debug"))]
    {
        PROPERTY_PATH.with_borrow(|path| {
            if path.names.is_empty() {
                E::custom(msg)
            } else {
                E::custom(format_args!("{msg} (at `{path}`)"))
            }
        })
    }
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    {
        E::custom(msg)
    }
}
