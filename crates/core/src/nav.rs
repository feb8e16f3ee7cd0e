//! Navigation menu state.
//!
//! On narrow screens the navigation collapses into a burger menu. The only
//! state is whether that menu is open; while it is, the page body must not
//! scroll. Widening the window past [`NavMenu::DESKTOP_BREAKPOINT`] closes it.

use serde::Serialize;

/// Home page route.
pub const MAIN_ROUTE: &str = "/";
/// Login page route.
pub const LOGIN_ROUTE: &str = "/login";
/// Registration page route.
pub const REGISTRATION_ROUTE: &str = "/registration";

/// A link shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub route: &'static str,
    pub title: &'static str,
}

const LINKS: [NavLink; 3] = [
    NavLink {
        label: "Home",
        route: MAIN_ROUTE,
        title: "Go to Home",
    },
    NavLink {
        label: "Log In",
        route: LOGIN_ROUTE,
        title: "Log In",
    },
    NavLink {
        label: "Sign Up",
        route: REGISTRATION_ROUTE,
        title: "Sign Up",
    },
];

/// Burger menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Window width (px) at and above which the full navigation is shown.
    pub const DESKTOP_BREAKPOINT: u32 = 900;

    /// A closed menu.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Whether the burger menu is open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Open a closed menu, close an open one.
    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the menu.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// React to a window resize. Returns `true` if the menu was closed.
    pub const fn handle_resize(&mut self, width: u32) -> bool {
        if self.open && width >= Self::DESKTOP_BREAKPOINT {
            self.open = false;
            return true;
        }
        false
    }

    /// Follow a navigation link. Navigating always closes the menu.
    pub const fn select(&mut self, link: &NavLink) -> &'static str {
        self.open = false;
        link.route
    }

    /// CSS `overflow-y` value for the page body.
    #[must_use]
    pub const fn body_overflow(self) -> &'static str {
        if self.open { "hidden" } else { "auto" }
    }

    /// Links shown in the navigation bar, in display order.
    #[must_use]
    pub const fn links() -> &'static [NavLink] {
        &LINKS
    }
}
