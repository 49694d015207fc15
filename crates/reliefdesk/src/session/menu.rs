//! Menu definitions.
//!
//! Each menu is a numbered list of actions. Which menu a logged-in session
//! sees is a plain function of the user's [`Role`].

use crate::record::Role;

/// Something a menu entry can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a new account.
    Register,
    /// Authenticate and enter a role menu.
    Login,
    /// Flush all records and end the session.
    Exit,
    /// Record a new disaster event.
    RecordDisaster,
    /// List every registered user.
    ViewUsers,
    /// List every disaster event.
    ViewEvents,
    /// Respond to a disaster. Not implemented yet.
    Respond,
    /// Return to the top menu.
    Logout,
}

/// A numbered list of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    entries: &'static [(Action, &'static str)],
}

/// Menu shown before anyone is logged in.
pub const MAIN_MENU: Menu = Menu {
    entries: &[
        (Action::Register, "Register"),
        (Action::Login, "Login"),
        (Action::Exit, "Exit"),
    ],
};

const ADMIN_MENU: Menu = Menu {
    entries: &[
        (Action::RecordDisaster, "Add Disaster Information"),
        (Action::ViewUsers, "View Registered Users"),
        (Action::ViewEvents, "View Disaster Events"),
        (Action::Logout, "Logout"),
    ],
};

const VOLUNTEER_MENU: Menu = Menu {
    entries: &[
        (Action::ViewEvents, "View Disaster Events"),
        (Action::Respond, "Respond to a Disaster"),
        (Action::Logout, "Logout"),
    ],
};

const VICTIM_MENU: Menu = Menu {
    entries: &[
        (Action::RecordDisaster, "Report a Disaster"),
        (Action::ViewEvents, "View Disaster Events"),
        (Action::Logout, "Logout"),
    ],
};

/// The menu a user with `role` works in after login.
#[must_use]
pub fn menu_for(role: Role) -> Menu {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Volunteer => VOLUNTEER_MENU,
        Role::Victim => VICTIM_MENU,
    }
}

impl Menu {
    /// Whether the menu offers `action`.
    #[must_use]
    pub fn offers(&self, action: Action) -> bool {
        self.entries.iter().any(|(offered, _)| *offered == action)
    }

    /// The numbered entry lines, one per entry.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (_, label))| format!("{}. {label}", index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Resolve a typed selection to an action.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a number in
    /// the displayed range yields `None`.
    #[must_use]
    pub fn choose(&self, input: &str) -> Option<Action> {
        let number: usize = input.trim().parse().ok()?;
        let index = number.checked_sub(1)?;
        self.entries.get(index).map(|(action, _)| *action)
    }
}
