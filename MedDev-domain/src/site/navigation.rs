//! Mobile navigation toggle and logo link
//!
//! Handlers are only bound when the page actually contains the elements they
//! act on; clicks on a missing element do nothing.

use tracing::debug;

/// Where a logo click takes the visitor
pub const HOME_PAGE: &str = "index.html";

/// Class toggled on the navigation menu
pub const ACTIVE_CLASS: &str = "active";

/// Which of the navigation elements a page contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageElements {
    pub burger: bool,
    pub nav_menu: bool,
    pub logo: bool,
}

impl PageElements {
    /// Burger, menu and logo all present
    pub fn complete() -> Self {
        Self {
            burger: true,
            nav_menu: true,
            logo: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    toggle_bound: bool,
    logo_bound: bool,
    menu_active: bool,
}

impl NavigationController {
    /// Bind handlers for the elements present on the page
    pub fn bind(elements: PageElements) -> Self {
        let toggle_bound = elements.burger && elements.nav_menu;
        debug!(
            "Navigation bound (menu toggle: {}, logo link: {})",
            toggle_bound, elements.logo
        );
        Self {
            toggle_bound,
            logo_bound: elements.logo,
            menu_active: false,
        }
    }

    /// Toggle the menu's active class; `None` when no toggle is bound
    pub fn on_burger_click(&mut self) -> Option<bool> {
        if !self.toggle_bound {
            return None;
        }
        self.menu_active = !self.menu_active;
        Some(self.menu_active)
    }

    /// Navigation target of a logo click, if the logo is bound
    pub fn on_logo_click(&self) -> Option<&'static str> {
        self.logo_bound.then_some(HOME_PAGE)
    }

    pub fn is_menu_active(&self) -> bool {
        self.menu_active
    }

    /// Classes currently on the menu element
    pub fn menu_classes(&self) -> Vec<&'static str> {
        if self.menu_active {
            vec![ACTIVE_CLASS]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burger_toggles_active_class() {
        let mut nav = NavigationController::bind(PageElements::complete());
        assert!(nav.menu_classes().is_empty());

        assert_eq!(nav.on_burger_click(), Some(true));
        assert_eq!(nav.menu_classes(), vec!["active"]);

        assert_eq!(nav.on_burger_click(), Some(false));
        assert!(!nav.is_menu_active());
    }

    #[test]
    fn test_toggle_needs_both_burger_and_menu() {
        let mut nav = NavigationController::bind(PageElements {
            burger: true,
            nav_menu: false,
            logo: true,
        });
        assert_eq!(nav.on_burger_click(), None);
        assert!(!nav.is_menu_active());
    }

    #[test]
    fn test_logo_navigates_home() {
        let nav = NavigationController::bind(PageElements::complete());
        assert_eq!(nav.on_logo_click(), Some("index.html"));

        let bare = NavigationController::bind(PageElements::default());
        assert_eq!(bare.on_logo_click(), None);
    }
}
