//! Host colour-scheme source.
//!
//! A terminal process has no `prefers-color-scheme` media query, so the
//! initial value comes from `FOLIO_COLOR_SCHEME` and later changes are
//! pushed by the host through [`SystemColorScheme::set`].

use std::sync::{Arc, Weak};

use folio_application::ports::{ColorSchemeSource, SchemeListener, SchemeWatch};
use folio_domain::ThemePreference;
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Environment variable holding the OS preference (`light` or `dark`).
pub const COLOR_SCHEME_VAR: &str = "FOLIO_COLOR_SCHEME";

type SharedListener = Arc<dyn Fn(ThemePreference) + Send + Sync>;

#[derive(Default)]
struct Registry {
    current: ThemePreference,
    listeners: Vec<(u64, SharedListener)>,
    next_id: u64,
}

/// OS colour-scheme signal with a listener registry.
#[derive(Clone, Default)]
pub struct SystemColorScheme {
    registry: Arc<Mutex<Registry>>,
}

impl SystemColorScheme {
    /// Creates a source reporting `current`.
    #[must_use]
    pub fn new(current: ThemePreference) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                current,
                ..Registry::default()
            })),
        }
    }

    /// Reads the initial preference from `FOLIO_COLOR_SCHEME`.
    ///
    /// Unset or unrecognised values fall back to light.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Self::parse(std::env::var(COLOR_SCHEME_VAR).ok().as_deref()))
    }

    fn parse(value: Option<&str>) -> ThemePreference {
        match value.map(str::parse::<ThemePreference>) {
            Some(Ok(preference)) => preference,
            Some(Err(e)) => {
                warn!(error = %e, var = COLOR_SCHEME_VAR, "ignoring invalid colour scheme");
                ThemePreference::default()
            }
            None => ThemePreference::default(),
        }
    }

    /// Reports a new OS preference and notifies listeners if it changed.
    pub fn set(&self, preference: ThemePreference) {
        let listeners: Vec<SharedListener> = {
            let mut registry = self.registry.lock();
            if registry.current == preference {
                return;
            }
            registry.current = preference;
            registry.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        debug!(%preference, listeners = listeners.len(), "os colour scheme changed");
        for listener in listeners {
            listener(preference);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

impl ColorSchemeSource for SystemColorScheme {
    fn current(&self) -> ThemePreference {
        self.registry.lock().current
    }

    fn watch(&self, listener: SchemeListener) -> SchemeWatch {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Arc::from(listener)));
            id
        };

        let registry: Weak<Mutex<Registry>> = Arc::downgrade(&self.registry);
        SchemeWatch::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.lock().listeners.retain(|(other, _)| *other != id);
            }
        })
    }
}
