//! OS colour-scheme signal port

use std::fmt;

use folio_domain::ThemePreference;

/// Callback invoked with the new OS preference.
pub type SchemeListener = Box<dyn Fn(ThemePreference) + Send + Sync>;

/// Port for the OS-level `prefers-color-scheme` signal.
pub trait ColorSchemeSource: Send + Sync {
    /// Returns the current OS preference.
    fn current(&self) -> ThemePreference;

    /// Registers a listener for OS preference changes.
    ///
    /// The listener stays registered until the returned guard is dropped.
    fn watch(&self, listener: SchemeListener) -> SchemeWatch;
}

/// Registration guard returned by [`ColorSchemeSource::watch`].
///
/// Dropping the guard unregisters the listener.
#[must_use = "dropping the guard unregisters the listener"]
pub struct SchemeWatch {
    unregister: Option<Box<dyn FnOnce() + Send>>,
}

impl SchemeWatch {
    /// Creates a guard that runs `unregister` when dropped.
    pub fn new(unregister: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }

    /// Creates a guard for a source that never changes.
    pub const fn detached() -> Self {
        Self { unregister: None }
    }

    /// Unregisters the listener now.
    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for SchemeWatch {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for SchemeWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeWatch")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}
