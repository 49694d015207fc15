//! The interactive session.
//!
//! A [`Session`] owns the [`RecordStore`] for the lifetime of the program and
//! drives a console through two states: unauthenticated (top menu) and
//! logged in with a role (that role's menu). Choosing Exit from the top menu,
//! or closing the input stream anywhere, flushes both collections to disk and
//! ends the session.
//!
//! Mistakes at the console (duplicate ids, bad credentials, an out-of-range
//! choice) are answered with a message and the current menu is shown again.
//! Only console I/O failures end a session with an error.

mod console;
pub mod menu;

use std::io::{BufRead, Write};

use tracing::{debug, error, info};

use crate::error::Result;
use crate::record::{Role, User};
use crate::storage::{FileReport, LoadReport, RecordStore};

pub use console::Console;
pub use menu::{menu_for, Action, Menu, MAIN_MENU};

const WELCOME: &str = "Welcome to the Disaster Management System!";
const FAREWELL: &str = "Thank you for using the system!";
const INVALID_CHOICE: &str = "Invalid choice. Try again.";
const EVENT_SEPARATOR: &str = "----------------------------";

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in; the top menu is shown.
    Unauthenticated,
    /// A user is logged in; their role's menu is shown.
    Authenticated {
        /// Id of the logged-in user.
        user_id: String,
        /// Role of the logged-in user.
        role: Role,
    },
}

/// What the main loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
    InputClosed,
}

/// An interactive session over a record store.
#[derive(Debug)]
pub struct Session<R, W> {
    store: RecordStore,
    console: Console<R, W>,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Start an unauthenticated session.
    pub fn new(store: RecordStore, console: Console<R, W>) -> Self {
        Self {
            store,
            console,
            state: SessionState::Unauthenticated,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Tell the operator about files that could not be read and lines that
    /// were skipped when the store was opened.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the console fails.
    pub fn announce_load(&mut self, report: &LoadReport) -> Result<()> {
        self.announce_file("users", &report.users)?;
        self.announce_file("disasters", &report.events)
    }

    fn announce_file(&mut self, what: &str, report: &FileReport) -> Result<()> {
        if let Some(failure) = &report.failure {
            self.console.say(format!("Error loading {what}: {failure}"))?;
        }
        if report.is_unreadable() {
            self.console.say(format!(
                "{} will be left unchanged on exit.",
                report.path.display()
            ))?;
        }
        for skipped in &report.skipped {
            self.console.say(format!(
                "Skipped line {} of {}: {}",
                skipped.line_number,
                report.path.display(),
                skipped.reason
            ))?;
        }
        Ok(())
    }

    /// Run the session until Exit or end of input, then hand back the store.
    ///
    /// Both record files are flushed before this returns. A failed flush is
    /// reported on the console but does not make this an error.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the console fails.
    pub fn run(mut self) -> Result<(RecordStore, Console<R, W>)> {
        self.console.say(WELCOME)?;

        loop {
            let menu = self.current_menu();
            self.console.say(format!("\n{}", menu.render()))?;

            let flow = match self.console.prompt("Enter your choice: ")? {
                None => Flow::InputClosed,
                Some(input) => match menu.choose(&input) {
                    Some(action) => self.perform(action)?,
                    None => {
                        debug!("Rejected menu input {:?}", input);
                        self.console.say(INVALID_CHOICE)?;
                        Flow::Continue
                    }
                },
            };

            match flow {
                Flow::Continue => {}
                Flow::Exit => break,
                Flow::InputClosed => {
                    info!("Input closed; saving and exiting");
                    self.console.say("")?;
                    self.exit()?;
                    break;
                }
            }
        }

        Ok((self.store, self.console))
    }

    fn current_menu(&self) -> Menu {
        match &self.state {
            SessionState::Unauthenticated => MAIN_MENU,
            SessionState::Authenticated { role, .. } => menu_for(*role),
        }
    }

    fn perform(&mut self, action: Action) -> Result<Flow> {
        debug_assert!(
            self.current_menu().offers(action),
            "{action:?} is not on the current menu"
        );
        match action {
            Action::Register => self.register(),
            Action::Login => self.login(),
            Action::Exit => {
                self.exit()?;
                Ok(Flow::Exit)
            }
            Action::RecordDisaster => self.record_disaster(),
            Action::ViewUsers => {
                self.view_users()?;
                Ok(Flow::Continue)
            }
            Action::ViewEvents => {
                self.view_events()?;
                Ok(Flow::Continue)
            }
            Action::Respond => {
                self.console
                    .say("Responding feature is under development.")?;
                Ok(Flow::Continue)
            }
            Action::Logout => {
                if let SessionState::Authenticated { user_id, .. } = &self.state {
                    info!("User {} logged out", user_id);
                }
                self.state = SessionState::Unauthenticated;
                self.console.say("Logged out.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn register(&mut self) -> Result<Flow> {
        let Some(user_id) = self.console.prompt("Enter User ID: ")? else {
            return Ok(Flow::InputClosed);
        };
        if self.store.find_user(&user_id).is_some() {
            self.console
                .say("Error: User ID is already registered. Try logging in.")?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.console.prompt("Enter Name: ")? else {
            return Ok(Flow::InputClosed);
        };
        let Some(email) = self.console.prompt("Enter Email: ")? else {
            return Ok(Flow::InputClosed);
        };
        if self.store.email_registered(&email) {
            self.console
                .say("Error: Email is already registered. Try logging in.")?;
            return Ok(Flow::Continue);
        }

        let Some(password) = self.console.prompt("Enter Password: ")? else {
            return Ok(Flow::InputClosed);
        };
        let Some(role_input) = self.console.prompt("Enter Role (Admin, Volunteer, Victim): ")? else {
            return Ok(Flow::InputClosed);
        };
        let Ok(role) = role_input.parse::<Role>() else {
            self.console.say("Invalid role. Registration failed.")?;
            return Ok(Flow::Continue);
        };

        match self
            .store
            .register(User::new(user_id, name, email, password, role))
        {
            Ok(()) => self.console.say("Registration successful!")?,
            Err(err) => self
                .console
                .say(format!("Error: {err}. Registration failed."))?,
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> Result<Flow> {
        let Some(user_id) = self.console.prompt("Enter User ID: ")? else {
            return Ok(Flow::InputClosed);
        };
        let Some(password) = self.console.prompt("Enter Password: ")? else {
            return Ok(Flow::InputClosed);
        };

        let Some(user) = self.store.authenticate(&user_id, &password) else {
            info!("Failed login for {}", user_id);
            self.console.say("Invalid credentials. Try again.")?;
            return Ok(Flow::Continue);
        };

        let welcome = format!("Login successful! Welcome, {} ({})", user.name, user.role);
        let state = SessionState::Authenticated {
            user_id: user.user_id.clone(),
            role: user.role,
        };
        info!("User {} logged in as {}", user.user_id, user.role);

        self.state = state;
        self.console.say(welcome)?;
        Ok(Flow::Continue)
    }

    fn record_disaster(&mut self) -> Result<Flow> {
        let Some(disaster_type) = self.console.prompt("Enter Disaster Type: ")? else {
            return Ok(Flow::InputClosed);
        };
        let Some(location) = self.console.prompt("Enter Location: ")? else {
            return Ok(Flow::InputClosed);
        };
        let Some(description) = self.console.prompt("Enter Description: ")? else {
            return Ok(Flow::InputClosed);
        };

        match self
            .store
            .add_event(&disaster_type, &location, &description)
        {
            Ok(_) => self.console.say("Disaster event added successfully!")?,
            Err(err) => self
                .console
                .say(format!("Error: {err}. Disaster event not added."))?,
        }
        Ok(Flow::Continue)
    }

    fn view_users(&mut self) -> Result<()> {
        self.console.say("\nRegistered Users:")?;
        for user in self.store.users() {
            self.console.say(user)?;
        }
        Ok(())
    }

    fn view_events(&mut self) -> Result<()> {
        if self.store.events().is_empty() {
            self.console.say("No disaster events recorded.")?;
            return Ok(());
        }

        self.console.say("\nDisaster Events:")?;
        for event in self.store.events() {
            self.console.say(event.details())?;
            self.console.say(EVENT_SEPARATOR)?;
        }
        Ok(())
    }

    /// Flush both collections and say goodbye.
    fn exit(&mut self) -> Result<()> {
        if let Err(err) = self.store.save_users() {
            error!("{}", err);
            self.console.say(format!("Error saving users: {err}"))?;
        }
        if let Err(err) = self.store.save_events() {
            error!("{}", err);
            self.console.say(format!("Error saving disasters: {err}"))?;
        }
        self.state = SessionState::Unauthenticated;
        self.console.say(FAREWELL)?;
        Ok(())
    }
}
