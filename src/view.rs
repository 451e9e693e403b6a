//! What the portal currently shows: one section, some dialogs on top of it, and the user dropdown

use serde::Serialize;

use bitflags::bitflags;

/// A full-page view of the portal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Section {
    Home,
    Doctors,
    Appointments,
    Dashboard,
}

impl Section {
    /// Whether this section can only be seen by logged in users
    pub fn members_only(&self) -> bool {
        match self {
            Section::Appointments | Section::Dashboard => true,
            _ => false,
        }
    }
}

impl Default for Section {
    fn default() -> Self {
        Section::Home
    }
}

bitflags! {
    /// Modal dialogs. Several of them can be open at once
    #[derive(Default)]
    pub struct Modals: u8 {
        const LOGIN = 1;
        const REGISTER = 2;
        const BOOKING = 4;
        const VIDEO_CALL = 8;

        /// Dialogs that only logged in users may open
        const MEMBERS_ONLY = Self::BOOKING.bits | Self::VIDEO_CALL.bits;
    }
}


/// The result of a navigation request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The requested section or dialog is now shown
    Shown,
    /// The user must log in first. The login dialog has been opened instead
    LoginRequired,
}


#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    section: Section,
    modals: Modals,
    user_dropdown_open: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section       { self.section }
    pub fn open_modals(&self) -> Modals    { self.modals }
    pub fn is_open(&self, modal: Modals) -> bool { self.modals.contains(modal) }
    pub fn user_dropdown_open(&self) -> bool { self.user_dropdown_open }

    /// Switch to another section. This also closes the user dropdown.
    ///
    /// Members-only sections are not shown to anonymous users, who get the login dialog instead.
    pub fn show_section(&mut self, section: Section, authenticated: bool) -> Navigation {
        if section.members_only() && authenticated == false {
            log::debug!("{:?} requires a login", section);
            return self.require_login();
        }
        self.section = section;
        self.user_dropdown_open = false;
        Navigation::Shown
    }

    /// Open a dialog. Members-only dialogs are replaced by the login dialog for anonymous users
    pub fn open_modal(&mut self, modal: Modals, authenticated: bool) -> Navigation {
        if modal.intersects(Modals::MEMBERS_ONLY) && authenticated == false {
            log::debug!("{:?} requires a login", modal);
            return self.require_login();
        }
        self.modals.insert(modal);
        Navigation::Shown
    }

    fn require_login(&mut self) -> Navigation {
        self.modals.insert(Modals::LOGIN);
        Navigation::LoginRequired
    }

    pub fn close_modal(&mut self, modal: Modals) {
        self.modals.remove(modal);
    }

    pub fn close_all_modals(&mut self) {
        self.modals = Modals::empty();
    }

    pub fn toggle_user_dropdown(&mut self) {
        self.user_dropdown_open = !self.user_dropdown_open;
    }

    pub fn close_user_dropdown(&mut self) {
        self.user_dropdown_open = false;
    }

    /// Handle a click anywhere in the page.
    ///
    /// A click on a dialog backdrop closes every dialog, a click outside of the user menu closes the dropdown.
    pub fn click(&mut self, on_modal_backdrop: bool, inside_user_menu: bool) {
        if on_modal_backdrop {
            self.close_all_modals();
        }
        if inside_user_menu == false {
            self.close_user_dropdown();
        }
    }
}


/// Returns the index of the first doctor option whose label contains `name`
pub fn select_doctor<S: AsRef<str>>(options: &[S], name: &str) -> Option<usize> {
    options.iter()
        .position(|label| label.as_ref().contains(name))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_are_redirected_to_login() {
        let mut view = ViewState::new();
        assert_eq!(view.show_section(Section::Dashboard, false), Navigation::LoginRequired);
        assert_eq!(view.section(), Section::Home);
        assert!(view.is_open(Modals::LOGIN));

        view.close_all_modals();
        assert_eq!(view.open_modal(Modals::VIDEO_CALL, false), Navigation::LoginRequired);
        assert_eq!(view.open_modals(), Modals::LOGIN);

        assert_eq!(view.show_section(Section::Doctors, false), Navigation::Shown);
        assert_eq!(view.section(), Section::Doctors);
        assert_eq!(view.open_modal(Modals::REGISTER, false), Navigation::Shown);
        assert!(view.is_open(Modals::REGISTER | Modals::LOGIN));
    }

    #[test]
    fn members_see_everything() {
        let mut view = ViewState::new();
        assert_eq!(view.open_modal(Modals::BOOKING, true), Navigation::Shown);
        assert_eq!(view.show_section(Section::Appointments, true), Navigation::Shown);
        assert_eq!(view.section(), Section::Appointments);
        assert_eq!(view.open_modals(), Modals::BOOKING);
    }

    #[test]
    fn dropdown() {
        let mut view = ViewState::new();
        view.toggle_user_dropdown();
        assert!(view.user_dropdown_open());
        view.click(false, true);
        assert!(view.user_dropdown_open());

        view.show_section(Section::Doctors, true);
        assert_eq!(view.user_dropdown_open(), false);

        view.toggle_user_dropdown();
        view.open_modal(Modals::BOOKING, true);
        view.click(true, false);
        assert_eq!(view.user_dropdown_open(), false);
        assert_eq!(view.open_modals(), Modals::empty());
    }

    #[test]
    fn doctor_selection() {
        let options = ["Select a doctor", "Dr. Sarah Johnson - Cardiology", "Dr. Michael Chen - Dermatology"];
        assert_eq!(select_doctor(&options, "Michael Chen"), Some(2));
        assert_eq!(select_doctor(&options, "Dr."), Some(1));
        assert_eq!(select_doctor(&options, "House"), None);
    }
}
