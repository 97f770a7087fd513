//! Routes and transient navigation state.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Scroll offset, in pixels, past which the header switches to its
/// scrolled style.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Biography, tech stack and links. Also served at `/`.
    #[default]
    About,
    /// Project cards.
    Projects,
    /// Contact form.
    Contact,
}

impl Route {
    /// Routes in navigation-bar order.
    pub const ALL: [Self; 3] = [Self::About, Self::Projects, Self::Contact];

    /// Canonical path for the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::About => "/about",
            Self::Projects => "/projects",
            Self::Contact => "/contact",
        }
    }

    /// Link label in the navigation bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        match normalized {
            "" | "/about" => Ok(Self::About),
            "/projects" => Ok(Self::Projects),
            "/contact" => Ok(Self::Contact),
            _ => Err(DomainError::UnknownRoute(trimmed.to_string())),
        }
    }
}

/// Header state owned by the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavigationState {
    /// Whether the mobile menu is expanded.
    pub menu_open: bool,
    /// Whether the page is scrolled past [`SCROLL_THRESHOLD`].
    pub scrolled: bool,
}

impl NavigationState {
    /// Flips the mobile menu.
    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Collapses the mobile menu.
    pub const fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Updates the scrolled flag from the window scroll offset.
    pub fn on_scroll(&mut self, offset: f64) {
        self.scrolled = offset > SCROLL_THRESHOLD;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_and_about_share_a_page() {
        assert_eq!("/".parse::<Route>(), Ok(Route::About));
        assert_eq!("/about".parse::<Route>(), Ok(Route::About));
        assert_eq!("/projects/".parse::<Route>(), Ok(Route::Projects));
        assert_eq!("/contact".parse::<Route>(), Ok(Route::Contact));
    }

    #[test]
    fn unknown_path_is_rejected() {
        assert_eq!(
            "/blog".parse::<Route>(),
            Err(DomainError::UnknownRoute("/blog".to_string()))
        );
    }

    #[test]
    fn scroll_threshold_is_exclusive() {
        let mut nav = NavigationState::default();
        nav.on_scroll(50.0);
        assert!(!nav.scrolled);
        nav.on_scroll(50.5);
        assert!(nav.scrolled);
        nav.on_scroll(0.0);
        assert!(!nav.scrolled);
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut nav = NavigationState::default();
        nav.toggle_menu();
        assert!(nav.menu_open);
        nav.close_menu();
        assert!(!nav.menu_open);
    }
}
