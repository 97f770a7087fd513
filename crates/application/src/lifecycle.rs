//! Fetch-on-mount lifecycle shared by the data-bound pages.
//!
//! Each mount walks `Idle -> Loading -> Success | Error` exactly once and
//! issues a single request. Every mount bumps a generation counter; a
//! response is applied only if it carries the generation of the live
//! mount, so a page that was left (or remounted) before its request
//! resolved never sees the stale payload.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use folio_domain::{MainInfo, ProfileInfo, ProjectEntry, RequestState};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::{ApiError, PortfolioApi};
use crate::render::Rendered;

/// Identifies the mount a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountToken {
    generation: u64,
}

impl MountToken {
    /// The mount generation this token belongs to.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

struct SlotState<T> {
    state: RequestState<T>,
    generation: u64,
    mounted: bool,
}

/// Request state of one view, guarded against stale responses.
pub struct ViewSlot<T> {
    inner: Arc<Mutex<SlotState<T>>>,
}

impl<T> Clone for ViewSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewSlot<T> {
    /// Creates an unmounted slot in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotState {
                state: RequestState::Idle,
                generation: 0,
                mounted: false,
            })),
        }
    }

    /// Starts a new mount and moves to `Loading`.
    ///
    /// Any request issued for an earlier mount becomes stale.
    pub fn mount(&self) -> MountToken {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.mounted = true;
        inner.state = RequestState::loading();
        MountToken {
            generation: inner.generation,
        }
    }

    /// Ends the current mount and resets to `Idle`.
    pub fn unmount(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.mounted = false;
        inner.state = RequestState::Idle;
    }

    /// Applies the outcome of the request issued for `token`.
    ///
    /// Returns false, leaving the state untouched, when the token is stale
    /// or the mount already settled.
    pub fn resolve(&self, token: MountToken, result: Result<T, ApiError>) -> bool {
        let mut inner = self.inner.lock();
        if !inner.mounted || inner.generation != token.generation {
            debug!(
                generation = token.generation,
                current = inner.generation,
                "discarding stale response"
            );
            return false;
        }
        if !inner.state.is_loading() {
            debug!(generation = token.generation, "mount already settled");
            return false;
        }

        inner.state = match result {
            Ok(data) => RequestState::Success(data),
            Err(error) => {
                warn!(%error, "load failed");
                RequestState::failed(error.kind())
            }
        };
        true
    }

    /// Runs `f` against the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&RequestState<T>) -> R) -> R {
        f(&self.inner.lock().state)
    }
}

impl<T: Clone> ViewSlot<T> {
    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> RequestState<T> {
        self.with_state(Clone::clone)
    }
}

/// Boxed future returned by a [`Loader`].
pub type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// Issues the request backing a view.
pub type Loader<T> = Arc<dyn Fn(Arc<dyn PortfolioApi>) -> LoadFuture<T> + Send + Sync>;

/// A page whose content is fetched once per mount.
pub struct DataView<T> {
    name: &'static str,
    slot: ViewSlot<T>,
    loader: Loader<T>,
}

impl<T: Send + 'static> DataView<T> {
    /// Creates a view that loads its content with `loader`.
    pub fn new(
        name: &'static str,
        loader: impl Fn(Arc<dyn PortfolioApi>) -> LoadFuture<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            slot: ViewSlot::new(),
            loader: Arc::new(loader),
        }
    }

    /// Mounts the view and issues its single request on a background task.
    ///
    /// The task resolves to true if its response was applied. Must be
    /// called from within a tokio runtime.
    pub fn mount(&self, api: Arc<dyn PortfolioApi>) -> JoinHandle<bool> {
        let token = self.slot.mount();
        debug!(view = self.name, generation = token.generation, "mounted");

        let slot = self.slot.clone();
        let request = (self.loader)(api);
        tokio::spawn(async move { slot.resolve(token, request.await) })
    }

    /// Mounts the view and waits for its request in place.
    pub async fn load(&self, api: Arc<dyn PortfolioApi>) -> bool {
        let token = self.slot.mount();
        let result = (self.loader)(api).await;
        self.slot.resolve(token, result)
    }

    /// Unmounts the view; a pending response will be discarded.
    pub fn unmount(&self) {
        debug!(view = self.name, "unmounted");
        self.slot.unmount();
    }

    /// View name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying state slot.
    #[must_use]
    pub const fn slot(&self) -> &ViewSlot<T> {
        &self.slot
    }

    /// Maps the current state onto the render contract, building content
    /// with `content` once loaded.
    pub fn render(&self, content: impl FnOnce(&T) -> Rendered) -> Rendered {
        self.slot.with_state(|state| match state {
            RequestState::Idle | RequestState::Loading => Rendered::Loading,
            RequestState::Error { message, .. } => Rendered::Error(message.clone()),
            RequestState::Success(data) => content(data),
        })
    }
}

impl DataView<ProfileInfo> {
    /// The About page, backed by `GET /about`.
    #[must_use]
    pub fn about() -> Self {
        Self::new("about", |api| {
            Box::pin(async move { api.fetch_about().await })
        })
    }
}

impl DataView<MainInfo> {
    /// The main-info block, backed by `GET /main-info`.
    #[must_use]
    pub fn main_info() -> Self {
        Self::new("main-info", |api| {
            Box::pin(async move { api.fetch_main_info().await })
        })
    }
}

impl DataView<Vec<ProjectEntry>> {
    /// The Projects page, backed by `GET /projects`.
    #[must_use]
    pub fn projects() -> Self {
        Self::new("projects", |api| {
            Box::pin(async move { api.fetch_projects().await })
        })
    }
}
