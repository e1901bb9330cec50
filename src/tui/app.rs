// TUI application state
//
// Wraps the controller with everything that only matters on screen: form
// buffers, list selection, toasts, the logs panel toggle and the theme.
// Effects the controller asks for are queued here and drained by the event
// loop into the dispatcher, so the app itself never touches the network.

use super::clipboard;
use super::components::toast::Toast;
use super::form::{Form, TextField};
use super::theme::{Theme, ThemeKind};
use crate::api::Product;
use crate::controller::tracker::CardDeck;
use crate::controller::{Controller, Effect, Mode, Outcome};
use crate::logging::LogBuffer;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main application state for the TUI
pub struct App {
    pub controller: Controller,

    /// Effects waiting for the dispatcher
    pending: Vec<Effect>,

    pub login_form: Form,
    pub register_form: Form,

    /// Search box buffer, mirrored into the controller on every edit
    pub search: TextField,
    pub editing_search: bool,

    /// Index into the displayed deck
    pub selected: usize,

    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,
    pub show_logs: bool,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    pub should_quit: bool,
    spinner_frame: usize,

    /// Mode seen after the last update, for transition housekeeping
    last_mode: Mode,
}

impl App {
    pub fn new(controller: Controller, log_buffer: LogBuffer, theme_kind: ThemeKind) -> Self {
        let last_mode = controller.state().mode;
        Self {
            controller,
            pending: Vec::new(),
            login_form: Form::login(),
            register_form: Form::register(),
            search: TextField::new("Search"),
            editing_search: false,
            selected: 0,
            toast: None,
            log_buffer,
            show_logs: false,
            theme_kind,
            theme: theme_kind.theme(),
            should_quit: false,
            spinner_frame: 0,
            last_mode,
        }
    }

    /// Kick off the fetches for a restored session
    pub fn start(&mut self) {
        let effects = self.controller.start();
        self.queue(effects);
    }

    /// Hand queued effects to the caller (the event loop)
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    /// Queue effects from a controller call and tidy up after it
    pub fn queue(&mut self, effects: Vec<Effect>) {
        self.pending.extend(effects);
        self.after_update();
    }

    pub fn apply(&mut self, outcome: Outcome) {
        let effects = self.controller.apply(outcome);
        self.queue(effects);
    }

    pub fn mode(&self) -> Mode {
        self.controller.state().mode
    }

    /// The list on screen, if any
    pub fn deck(&self) -> Option<&CardDeck> {
        self.controller.state().displayed()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.deck().and_then(|deck| deck.get(self.selected))
    }

    pub fn select_next(&mut self) {
        let len = self.deck().map_or(0, CardDeck::len);
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn submit_form(&mut self) {
        let effects = match self.mode() {
            Mode::Login => {
                let email = self.login_form.value(0).to_string();
                let password = self.login_form.value(1).to_string();
                self.controller.submit_login(&email, &password)
            }
            Mode::Register => {
                let registration = self.register_form.registration();
                self.controller.submit_register(registration)
            }
            _ => return,
        };
        self.queue(effects);
    }

    /// Mirror the search buffer into the controller
    pub fn sync_search(&mut self) {
        self.controller.set_search_term(self.search.value());
    }

    pub fn like_selected(&mut self) {
        let Some(id) = self.selected_product().map(|p| p.id.clone()) else {
            return;
        };
        let effects = self.controller.like(&id);
        self.queue(effects);
    }

    pub fn copy_selected(&mut self) {
        let Some(product) = self.selected_product() else {
            return;
        };
        let message = match clipboard::copy_product(product) {
            Ok(()) => format!("Copied {}", product.name),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                "Clipboard unavailable".to_string()
            }
        };
        self.toast = Some(Toast::new(message));
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme_kind.name())));
    }

    /// Advance the spinner and expire the toast
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.spinner_frame]
    }

    /// Something is in flight that the user is waiting on
    pub fn is_busy(&self) -> bool {
        let state = self.controller.state();
        state.loading || state.submitting
    }

    // ─────────────────────────────────────────────────────────────────────
    // Housekeeping
    // ─────────────────────────────────────────────────────────────────────

    fn after_update(&mut self) {
        let mode = self.mode();
        if mode != self.last_mode {
            self.on_mode_change(self.last_mode, mode);
            self.last_mode = mode;
        }

        let len = self.deck().map_or(0, CardDeck::len);
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn on_mode_change(&mut self, from: Mode, to: Mode) {
        tracing::debug!("Mode {:?} -> {:?}", from, to);
        self.selected = 0;
        match (from, to) {
            (Mode::Login, Mode::Browsing) => {
                self.login_form.clear_secrets();
            }
            (Mode::Register, Mode::Login) => {
                // Registration succeeded: carry the email over
                if self.controller.state().notice.is_some() {
                    let email = self.register_form.value(1).to_string();
                    self.login_form.reset();
                    self.login_form.fields[0].set(email);
                    self.login_form.focus_next();
                    self.register_form.reset();
                }
            }
            (from, Mode::Login) if from.is_authenticated() => {
                self.login_form.reset();
                self.register_form.reset();
                self.search.clear();
                self.editing_search = false;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Identity, RegisterReceipt};
    use crate::session::{Session, SessionStore};

    fn logged_out_app(dir: &tempfile::TempDir) -> App {
        let session = Session::open(SessionStore::new(dir.path().join("session.json")));
        App::new(Controller::new(session, 8), LogBuffer::new(), ThemeKind::Dark)
    }

    fn alice() -> Identity {
        Identity {
            user_id: "u001".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn login_clears_password_and_queues_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_out_app(&dir);
        app.login_form.fields[0].set("alice@example.com");
        app.login_form.fields[1].set("password123");

        app.submit_form();
        let effects = app.take_effects();
        assert!(matches!(effects.as_slice(), [Effect::Login { .. }]));
        assert!(app.take_effects().is_empty());

        app.apply(Outcome::LoggedIn(Ok(alice())));
        assert_eq!(app.mode(), Mode::Browsing);
        assert_eq!(app.login_form.value(0), "alice@example.com");
        assert_eq!(app.login_form.value(1), "");
        assert!(app.is_busy());

        let names: Vec<_> = app.take_effects().iter().map(Effect::name).collect();
        assert_eq!(names, vec!["categories", "products", "recommendations"]);
    }

    #[test]
    fn registration_prefills_login_email() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_out_app(&dir);
        app.controller.navigate();
        app.queue(Vec::new());

        app.register_form.fields[0].set("erin");
        app.register_form.fields[1].set("erin@example.com");
        app.register_form.fields[2].set("pw");
        app.submit_form();
        assert_eq!(app.take_effects().len(), 1);

        app.apply(Outcome::Registered(Ok(RegisterReceipt {
            message: "User registered successfully".to_string(),
            user_id: Some("u005".to_string()),
        })));
        assert_eq!(app.mode(), Mode::Login);
        assert_eq!(app.login_form.value(0), "erin@example.com");
        assert_eq!(app.login_form.focus(), 1);
        assert_eq!(app.register_form.value(0), "");
    }

    #[test]
    fn selection_is_clamped_to_displayed_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_out_app(&dir);
        app.select_next();
        assert_eq!(app.selected, 0);
        assert!(app.selected_product().is_none());
        app.like_selected();
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn spinner_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_out_app(&dir);
        let first = app.spinner_char();
        for _ in 0..SPINNER.len() {
            app.tick();
        }
        assert_eq!(app.spinner_char(), first);
    }
}
