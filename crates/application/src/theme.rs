//! Process-wide light/dark preference.
//!
//! The [`ThemeStore`] is built once at start-up and shared behind an `Arc`.
//! It resolves the preference from durable storage, falling back to the OS
//! colour scheme, follows OS changes until the user picks a theme, and
//! notifies subscribers synchronously on every change.
//!
//! Storage failures never reach the user: they are logged and the store
//! keeps the choice in memory for the rest of the session.

use std::sync::{Arc, Weak};

use folio_domain::{THEME_STORAGE_KEY, ThemePreference, ThemeTokens};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::ports::{ColorSchemeSource, PreferenceStorage, SchemeWatch};

type Listener = Arc<dyn Fn(ThemePreference) + Send + Sync>;

struct ThemeState {
    preference: ThemePreference,
    /// Explicit choice that could not be persisted.
    unsaved_choice: bool,
    subscribers: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Single source of truth for the active colour scheme.
pub struct ThemeStore {
    storage: Arc<dyn PreferenceStorage>,
    system: Arc<dyn ColorSchemeSource>,
    state: Mutex<ThemeState>,
    system_watch: Mutex<Option<SchemeWatch>>,
}

impl ThemeStore {
    /// Reads the persisted preference, or the OS preference when none is stored.
    #[must_use]
    pub fn resolve(
        storage: &dyn PreferenceStorage,
        system: &dyn ColorSchemeSource,
    ) -> ThemePreference {
        stored_preference(storage).unwrap_or_else(|| system.current())
    }

    /// Builds the store and starts following OS colour-scheme changes.
    #[must_use]
    pub fn initialize(
        storage: Arc<dyn PreferenceStorage>,
        system: Arc<dyn ColorSchemeSource>,
    ) -> Arc<Self> {
        let preference = Self::resolve(storage.as_ref(), system.as_ref());
        debug!(%preference, "theme initialized");

        let store = Arc::new(Self {
            storage,
            system,
            state: Mutex::new(ThemeState {
                preference,
                unsaved_choice: false,
                subscribers: Vec::new(),
                next_id: 0,
            }),
            system_watch: Mutex::new(None),
        });

        let weak = Arc::downgrade(&store);
        let watch = store.system.watch(Box::new(move |os| {
            if let Some(store) = weak.upgrade() {
                store.on_system_change(os);
            }
        }));
        *store.system_watch.lock() = Some(watch);

        store
    }

    /// The active preference.
    #[must_use]
    pub fn preference(&self) -> ThemePreference {
        self.state.lock().preference
    }

    /// Returns true when the dark scheme is active.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.preference().is_dark()
    }

    /// Colour tokens of the active preference.
    #[must_use]
    pub fn tokens(&self) -> &'static ThemeTokens {
        self.preference().tokens()
    }

    /// Returns true once the user has chosen a theme, persisted or not.
    #[must_use]
    pub fn has_explicit_preference(&self) -> bool {
        self.state.lock().unsaved_choice || stored_preference(self.storage.as_ref()).is_some()
    }

    /// Flips the preference, persists it and notifies every subscriber
    /// before returning.
    pub fn toggle(&self) -> ThemePreference {
        // Flip and persist under one guard so storage never lags memory.
        let next = {
            let mut state = self.state.lock();
            let next = state.preference.toggled();
            state.preference = next;
            if let Err(error) = self.storage.set(THEME_STORAGE_KEY, next.as_str()) {
                warn!(%error, "could not persist theme, keeping it for this session only");
                state.unsaved_choice = true;
            }
            next
        };

        debug!(preference = %next, "theme toggled");
        self.notify(next);
        next
    }

    /// Forgets the explicit choice and follows the OS preference again.
    pub fn clear(&self) -> ThemePreference {
        let (os, changed) = {
            let mut state = self.state.lock();
            if let Err(error) = self.storage.remove(THEME_STORAGE_KEY) {
                warn!(%error, "could not remove stored theme");
            }
            state.unsaved_choice = false;
            let os = self.system.current();
            let changed = state.preference != os;
            state.preference = os;
            (os, changed)
        };

        debug!(preference = %os, "theme preference cleared");
        if changed {
            self.notify(os);
        }
        os
    }

    /// Registers a callback invoked on every preference change.
    ///
    /// The callback stays registered until the returned [`Subscription`] is dropped.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(ThemePreference) + Send + Sync + 'static,
    ) -> Subscription {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, Arc::new(callback)));
        Subscription {
            store: Arc::downgrade(self),
            id,
        }
    }

    /// Registers a callback for raw OS colour-scheme changes.
    ///
    /// The callback receives the new OS value only while no explicit
    /// preference exists. Dropping the returned guard unregisters it from
    /// the OS source.
    pub fn subscribe_to_system_change(
        self: &Arc<Self>,
        callback: impl Fn(ThemePreference) + Send + Sync + 'static,
    ) -> SchemeWatch {
        let weak = Arc::downgrade(self);
        self.system.watch(Box::new(move |os| {
            let Some(store) = weak.upgrade() else {
                return;
            };
            if !store.has_explicit_preference() {
                callback(os);
            }
        }))
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    /// Stops following the OS signal and drops every subscriber.
    ///
    /// Runs automatically when the store is dropped.
    pub fn teardown(&self) {
        if let Some(watch) = self.system_watch.lock().take() {
            watch.cancel();
        }
        self.state.lock().subscribers.clear();
    }

    fn on_system_change(&self, os: ThemePreference) {
        if self.has_explicit_preference() {
            debug!(%os, "ignoring OS theme change, explicit preference set");
            return;
        }

        let changed = {
            let mut state = self.state.lock();
            let changed = state.preference != os;
            state.preference = os;
            changed
        };

        if changed {
            debug!(preference = %os, "theme follows OS");
            self.notify(os);
        }
    }

    fn notify(&self, preference: ThemePreference) {
        let listeners: Vec<Listener> = self
            .state
            .lock()
            .subscribers
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(preference);
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.state.lock().subscribers.retain(|(sid, _)| *sid != id);
    }
}

impl Drop for ThemeStore {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Handle returned by [`ThemeStore::subscribe`]; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    store: Weak<ThemeStore>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(self.id);
        }
    }
}

fn stored_preference(storage: &dyn PreferenceStorage) -> Option<ThemePreference> {
    match storage.get(THEME_STORAGE_KEY) {
        Ok(Some(value)) => match value.parse() {
            Ok(preference) => Some(preference),
            Err(error) => {
                warn!(%error, "ignoring stored theme");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            warn!(%error, "theme storage unreadable, using OS preference");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{SchemeListener, StorageError};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct MemoryStorage {
        entries: Mutex<HashMap<String, String>>,
    }

    impl PreferenceStorage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.lock().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries.lock().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().remove(key);
            Ok(())
        }
    }

    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    /// Storage whose writes of `dark` take a while to land.
    #[derive(Default)]
    struct SlowDarkStorage {
        inner: MemoryStorage,
    }

    impl PreferenceStorage for SlowDarkStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if value == "dark" {
                thread::sleep(Duration::from_millis(200));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    type Listeners = Arc<Mutex<Vec<(u64, Arc<dyn Fn(ThemePreference) + Send + Sync>)>>>;

    struct FakeScheme {
        current: Mutex<ThemePreference>,
        listeners: Listeners,
        next_id: AtomicU64,
    }

    impl FakeScheme {
        fn new(current: ThemePreference) -> Arc<Self> {
            Arc::new(Self {
                current: Mutex::new(current),
                listeners: Arc::default(),
                next_id: AtomicU64::new(0),
            })
        }

        fn emit(&self, preference: ThemePreference) {
            *self.current.lock() = preference;
            let listeners: Vec<_> = self
                .listeners
                .lock()
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect();
            for listener in listeners {
                listener(preference);
            }
        }

        fn listener_count(&self) -> usize {
            self.listeners.lock().len()
        }
    }

    impl ColorSchemeSource for FakeScheme {
        fn current(&self) -> ThemePreference {
            *self.current.lock()
        }

        fn watch(&self, listener: SchemeListener) -> SchemeWatch {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.listeners.lock().push((id, Arc::from(listener)));
            let listeners = Arc::clone(&self.listeners);
            SchemeWatch::new(move || listeners.lock().retain(|(lid, _)| *lid != id))
        }
    }

    #[test]
    fn stored_value_wins_over_os() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(THEME_STORAGE_KEY, "light").ok();
        let store = ThemeStore::initialize(storage, FakeScheme::new(ThemePreference::Dark));
        assert_eq!(store.preference(), ThemePreference::Light);
    }

    #[test]
    fn os_value_used_when_nothing_stored() {
        let store = ThemeStore::initialize(
            Arc::new(MemoryStorage::default()),
            FakeScheme::new(ThemePreference::Dark),
        );
        assert_eq!(store.preference(), ThemePreference::Dark);
        assert!(!store.has_explicit_preference());
    }

    #[test]
    fn toggle_persists_negation_and_round_trips() {
        let storage = Arc::new(MemoryStorage::default());
        let scheme = FakeScheme::new(ThemePreference::Light);
        let store = ThemeStore::initialize(storage.clone(), scheme.clone());

        for _ in 0..3 {
            let before = store.preference();
            let after = store.toggle();
            assert_eq!(after, before.toggled());
            assert_eq!(
                storage.get(THEME_STORAGE_KEY).ok().flatten().as_deref(),
                Some(after.as_str())
            );
            assert_eq!(ThemeStore::resolve(storage.as_ref(), scheme.as_ref()), after);
        }
    }

    #[test]
    fn concurrent_toggles_leave_storage_matching_memory() {
        let storage = Arc::new(SlowDarkStorage::default());
        let scheme = FakeScheme::new(ThemePreference::Light);
        let store = ThemeStore::initialize(storage.clone(), scheme.clone());

        let first = thread::spawn({
            let store = Arc::clone(&store);
            move || store.toggle()
        });
        thread::sleep(Duration::from_millis(50));
        let second = thread::spawn({
            let store = Arc::clone(&store);
            move || store.toggle()
        });

        let results = [first.join().unwrap(), second.join().unwrap()];
        assert!(results.contains(&ThemePreference::Dark));
        assert!(results.contains(&ThemePreference::Light));

        let persisted = storage.get(THEME_STORAGE_KEY).unwrap();
        assert_eq!(persisted.as_deref(), Some(store.preference().as_str()));
        assert_eq!(
            ThemeStore::resolve(storage.as_ref(), scheme.as_ref()),
            store.preference()
        );
    }

    #[test]
    fn clear_resumes_following_os() {
        let storage = Arc::new(MemoryStorage::default());
        let scheme = FakeScheme::new(ThemePreference::Light);
        let store = ThemeStore::initialize(storage.clone(), scheme.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |p| sink.lock().push(p));

        store.toggle();
        scheme.emit(ThemePreference::Light);
        assert_eq!(store.preference(), ThemePreference::Dark);

        assert_eq!(store.clear(), ThemePreference::Light);
        assert!(!store.has_explicit_preference());
        assert_eq!(storage.get(THEME_STORAGE_KEY).unwrap(), None);

        scheme.emit(ThemePreference::Dark);
        assert_eq!(store.preference(), ThemePreference::Dark);
        assert_eq!(
            *seen.lock(),
            vec![
                ThemePreference::Dark,
                ThemePreference::Light,
                ThemePreference::Dark
            ]
        );
    }

    #[test]
    fn clear_forgets_unsaved_choice() {
        let scheme = FakeScheme::new(ThemePreference::Dark);
        let store = ThemeStore::initialize(Arc::new(BrokenStorage), scheme.clone());
        store.toggle();
        assert!(store.has_explicit_preference());

        assert_eq!(store.clear(), ThemePreference::Dark);
        assert!(!store.has_explicit_preference());
        scheme.emit(ThemePreference::Light);
        assert_eq!(store.preference(), ThemePreference::Light);
    }

    #[test]
    fn tracks_os_until_user_toggles() {
        let scheme = FakeScheme::new(ThemePreference::Light);
        let store = ThemeStore::initialize(Arc::new(MemoryStorage::default()), scheme.clone());

        scheme.emit(ThemePreference::Dark);
        assert_eq!(store.preference(), ThemePreference::Dark);

        store.toggle();
        assert_eq!(store.preference(), ThemePreference::Light);

        scheme.emit(ThemePreference::Dark);
        assert_eq!(store.preference(), ThemePreference::Light);
    }

    #[test]
    fn subscribers_notified_synchronously() {
        let store = ThemeStore::initialize(
            Arc::new(MemoryStorage::default()),
            FakeScheme::new(ThemePreference::Light),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |p| sink.lock().push(p));

        store.toggle();
        store.toggle();
        assert_eq!(
            *seen.lock(),
            vec![ThemePreference::Dark, ThemePreference::Light]
        );

        drop(subscription);
        store.toggle();
        assert_eq!(seen.lock().len(), 2);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn system_subscription_stops_after_explicit_choice() {
        let scheme = FakeScheme::new(ThemePreference::Light);
        let store = ThemeStore::initialize(Arc::new(MemoryStorage::default()), scheme.clone());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let watch = store.subscribe_to_system_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        scheme.emit(ThemePreference::Dark);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.toggle();
        scheme.emit(ThemePreference::Light);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(scheme.listener_count(), 2);
        drop(watch);
        assert_eq!(scheme.listener_count(), 1);
    }

    #[test]
    fn storage_failure_falls_back_to_memory() {
        let scheme = FakeScheme::new(ThemePreference::Dark);
        let store = ThemeStore::initialize(Arc::new(BrokenStorage), scheme.clone());
        assert_eq!(store.preference(), ThemePreference::Dark);

        assert_eq!(store.toggle(), ThemePreference::Light);
        assert!(store.has_explicit_preference());

        scheme.emit(ThemePreference::Dark);
        assert_eq!(store.preference(), ThemePreference::Light);
    }

    #[test]
    fn corrupt_stored_value_is_ignored() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(THEME_STORAGE_KEY, "purple").ok();
        let store = ThemeStore::initialize(storage, FakeScheme::new(ThemePreference::Dark));
        assert_eq!(store.preference(), ThemePreference::Dark);
    }

    #[test]
    fn teardown_releases_os_listener() {
        let scheme = FakeScheme::new(ThemePreference::Light);
        let store = ThemeStore::initialize(Arc::new(MemoryStorage::default()), scheme.clone());
        assert_eq!(scheme.listener_count(), 1);

        drop(store);
        assert_eq!(scheme.listener_count(), 0);
    }
}
