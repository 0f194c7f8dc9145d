//! Client-local persistence of the chosen color mode.
//!
//! A [`ModeStore`] is a small string key-value store, the moral equivalent
//! of a browser's `localStorage`. The chosen mode is written under the
//! theme's `storageKey` whenever the user switches modes and read back when
//! state is initialized.
//!
//! Two stores ship with the crate:
//!
//! - [`MemoryStore`]: in-process, for tests and server-side rendering
//! - [`FileStore`]: a JSON file under the user's config directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::ColorModeError;

/// String key-value storage for the persisted mode.
pub trait ModeStore {
    /// Reads a value. Missing or unreadable entries read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ColorModeError>;

    /// Deletes a value. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), ColorModeError>;
}

impl<S: ModeStore + ?Sized> ModeStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ColorModeError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), ColorModeError> {
        (**self).remove(key)
    }
}

impl<S: ModeStore + ?Sized> ModeStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ColorModeError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), ColorModeError> {
        (**self).remove(key)
    }
}
