//! Navigation shell: header, routed page and footer.

use std::sync::Arc;

use chrono::Datelike;
use folio_domain::{
    ContactLinks, MainInfo, NavigationState, ProfileInfo, ProjectEntry, RequestState, Route,
    ThemePreference,
};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::contact::ContactForm;
use crate::lifecycle::DataView;
use crate::ports::{Clock, PortfolioApi};
use crate::render::{self, Block, HeaderView, Page, Rendered};
use crate::theme::ThemeStore;

/// Top-level layout owning the routed pages and transient header state.
///
/// Leaving a page unmounts it, so a response still in flight for that
/// page is discarded. The About page is backed by two views, `/about`
/// and `/main-info`, mounted and unmounted together. The footer keeps
/// the last contact links loaded by About.
pub struct Shell {
    title: String,
    api: Arc<dyn PortfolioApi>,
    theme: Arc<ThemeStore>,
    clock: Arc<dyn Clock>,
    navigation: Mutex<NavigationState>,
    route: Mutex<Option<Route>>,
    about: DataView<ProfileInfo>,
    main_info: DataView<MainInfo>,
    links: Mutex<Option<ContactLinks>>,
    projects: DataView<Vec<ProjectEntry>>,
    contact: ContactForm,
}

impl Shell {
    /// Creates the shell; no page is mounted until [`Shell::navigate`].
    pub fn new(
        title: impl Into<String>,
        api: Arc<dyn PortfolioApi>,
        theme: Arc<ThemeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let contact = ContactForm::new(Arc::clone(&api), Arc::clone(&clock));
        Self {
            title: title.into(),
            api,
            theme,
            clock,
            navigation: Mutex::new(NavigationState::default()),
            route: Mutex::new(None),
            about: DataView::about(),
            main_info: DataView::main_info(),
            links: Mutex::new(None),
            projects: DataView::projects(),
            contact,
        }
    }

    /// Switches to `route`.
    ///
    /// Closes the mobile menu, unmounts the previous page and mounts the
    /// new one. Returns the tasks loading the new page's content; empty
    /// for pages without remote content.
    pub fn navigate(&self, route: Route) -> Vec<JoinHandle<bool>> {
        self.navigation.lock().close_menu();
        self.remember_links();

        let previous = self.route.lock().replace(route);
        if let Some(previous) = previous {
            self.unmount(previous);
        }
        debug!(%route, "navigating");

        match route {
            Route::About => vec![
                self.about.mount(Arc::clone(&self.api)),
                self.main_info.mount(Arc::clone(&self.api)),
            ],
            Route::Projects => vec![self.projects.mount(Arc::clone(&self.api))],
            Route::Contact => Vec::new(),
        }
    }

    /// The active route, if any page is mounted.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        *self.route.lock()
    }

    /// Opens or closes the mobile menu.
    pub fn toggle_menu(&self) {
        self.navigation.lock().toggle_menu();
    }

    /// Feeds the window scroll offset.
    pub fn on_scroll(&self, offset: f64) {
        self.navigation.lock().on_scroll(offset);
    }

    /// Current header state.
    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        *self.navigation.lock()
    }

    /// Flips the theme through the shared store.
    pub fn toggle_theme(&self) -> ThemePreference {
        self.theme.toggle()
    }

    /// The shared theme store.
    #[must_use]
    pub const fn theme(&self) -> &Arc<ThemeStore> {
        &self.theme
    }

    /// The About page.
    #[must_use]
    pub const fn about(&self) -> &DataView<ProfileInfo> {
        &self.about
    }

    /// The main-info block shown on the About page.
    #[must_use]
    pub const fn main_info(&self) -> &DataView<MainInfo> {
        &self.main_info
    }

    /// The Projects page.
    #[must_use]
    pub const fn projects(&self) -> &DataView<Vec<ProjectEntry>> {
        &self.projects
    }

    /// The contact form.
    #[must_use]
    pub const fn contact(&self) -> &ContactForm {
        &self.contact
    }

    /// Renders header, routed page and footer.
    #[must_use]
    pub fn render(&self) -> Page {
        let route = self.route();
        let header = HeaderView {
            title: self.title.clone(),
            links: Route::ALL
                .iter()
                .map(|r| (*r, route == Some(*r)))
                .collect(),
            navigation: self.navigation(),
            theme: self.theme.preference(),
        };

        let body = match route {
            Some(Route::About) | None => self.render_about(),
            Some(Route::Projects) => self
                .projects
                .render(|projects| Rendered::Content(render::project_blocks(projects))),
            Some(Route::Contact) => Rendered::Content(self.contact.render()),
        };

        let links = self.remember_links();
        let footer = render::footer_blocks(&self.title, self.clock.now().year(), links.as_ref());

        Page {
            header,
            body,
            footer,
        }
    }

    /// The profile drives loading and error; the main-info card is
    /// prepended once loaded, or replaced by its error message.
    fn render_about(&self) -> Rendered {
        let card = self.main_info.slot().with_state(|state| match state {
            RequestState::Success(info) => render::main_info_blocks(info),
            RequestState::Error { message, .. } => vec![Block::Paragraph(message.clone())],
            RequestState::Idle | RequestState::Loading => Vec::new(),
        });
        self.about.render(|profile| {
            let mut blocks = card;
            blocks.extend(render::about_blocks(profile));
            Rendered::Content(blocks)
        })
    }

    /// Stores the links of a loaded profile and returns the latest known.
    fn remember_links(&self) -> Option<ContactLinks> {
        let loaded = self
            .about
            .slot()
            .with_state(|state| state.data().map(|profile| profile.links.clone()));
        let mut links = self.links.lock();
        if loaded.is_some() {
            *links = loaded;
        }
        links.clone()
    }

    fn unmount(&self, route: Route) {
        match route {
            Route::About => {
                self.about.unmount();
                self.main_info.unmount();
            }
            Route::Projects => self.projects.unmount(),
            Route::Contact => {}
        }
    }
}
