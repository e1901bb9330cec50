//! View-state controller
//!
//! Owns everything the screen shows and every decision about which backend
//! call to make next. It never performs I/O itself: user actions return a
//! list of [`Effect`]s for the dispatcher to run, and the dispatcher feeds
//! each completion back through [`Controller::apply`] as an [`Outcome`].
//! That keeps every state change on the UI loop and makes the whole flow
//! testable without a network.
//!
//! Mode machine:
//!
//! ```text
//!   Login <--navigate--> Register
//!     |  ^                   |
//!  ok |  +---- ok ----------+
//!     v  |
//!   Browsing <--toggle--> Recommendations
//!     |                       |
//!     +------- logout --------+--> Login
//! ```

pub mod tracker;

#[cfg(test)]
mod tests;

use crate::api::{
    ApiError, Identity, InteractionEvent, InteractionKind, Product, ProductQuery,
    RegisterReceipt, Registration,
};
use crate::session::Session;
use tracker::CardDeck;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful! Please login.";
pub const PRODUCTS_FAILED: &str = "Error loading products";
pub const FIELDS_REQUIRED: &str = "Please fill in all required fields";

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Login,
    Register,
    Browsing,
    Recommendations,
}

impl Mode {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Mode::Browsing | Mode::Recommendations)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Login => "Login",
            Mode::Register => "Register",
            Mode::Browsing => "Products",
            Mode::Recommendations => "Recommended",
        }
    }
}

/// Everything the views read. Only the controller writes it.
#[derive(Debug)]
pub struct ViewState {
    pub mode: Mode,
    pub search_term: String,
    pub selected_category: Option<String>,
    pub categories: Vec<String>,
    pub products: CardDeck,
    pub recommendations: CardDeck,
    /// A products fetch is outstanding
    pub loading: bool,
    /// Auth submission in flight
    pub submitting: bool,
    pub error: Option<String>,
    /// Positive confirmation (registration success)
    pub notice: Option<String>,
}

impl ViewState {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            search_term: String::new(),
            selected_category: None,
            categories: Vec::new(),
            products: CardDeck::new(),
            recommendations: CardDeck::new(),
            loading: false,
            submitting: false,
            error: None,
            notice: None,
        }
    }

    /// The deck currently on screen, if any
    pub fn displayed(&self) -> Option<&CardDeck> {
        match self.mode {
            Mode::Browsing if !self.loading => Some(&self.products),
            Mode::Recommendations => Some(&self.recommendations),
            _ => None,
        }
    }
}

/// Backend work requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Login { email: String, password: String },
    Register(Registration),
    FetchCategories,
    FetchProducts { ticket: u64, query: ProductQuery },
    FetchRecommendations { ticket: u64, user_id: String, count: usize },
    RecordInteraction(InteractionEvent),
}

impl Effect {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Login { .. } => "login",
            Effect::Register(_) => "register",
            Effect::FetchCategories => "categories",
            Effect::FetchProducts { .. } => "products",
            Effect::FetchRecommendations { .. } => "recommendations",
            Effect::RecordInteraction(_) => "interaction",
        }
    }
}

/// Completion of an [`Effect`]
#[derive(Debug, Clone)]
pub enum Outcome {
    LoggedIn(Result<Identity, ApiError>),
    Registered(Result<RegisterReceipt, ApiError>),
    Categories(Result<Vec<String>, ApiError>),
    Products {
        ticket: u64,
        result: Result<Vec<Product>, ApiError>,
    },
    Recommendations {
        ticket: u64,
        result: Result<Vec<Product>, ApiError>,
    },
    InteractionSettled {
        event: InteractionEvent,
        result: Result<(), ApiError>,
    },
}

/// The storefront state machine
#[derive(Debug)]
pub struct Controller {
    session: Session,
    state: ViewState,
    recommendation_count: usize,
    products_ticket: u64,
    recommendations_ticket: u64,
}

impl Controller {
    /// Starts in browsing when the session already holds an identity
    pub fn new(session: Session, recommendation_count: usize) -> Self {
        let mode = if session.is_authenticated() {
            Mode::Browsing
        } else {
            Mode::Login
        };
        Self {
            session,
            state: ViewState::new(mode),
            recommendation_count,
            products_ticket: 0,
            recommendations_ticket: 0,
        }
    }

    /// Initial fetches for a restored session
    pub fn start(&mut self) -> Vec<Effect> {
        if !self.state.mode.is_authenticated() {
            return Vec::new();
        }
        self.prime()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────

    pub fn submit_login(&mut self, email: &str, password: &str) -> Vec<Effect> {
        if self.state.mode != Mode::Login || self.state.submitting {
            return Vec::new();
        }
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.state.error = Some(FIELDS_REQUIRED.to_string());
            return Vec::new();
        }

        self.state.error = None;
        self.state.submitting = true;
        vec![Effect::Login {
            email: email.to_string(),
            password: password.to_string(),
        }]
    }

    pub fn submit_register(&mut self, registration: Registration) -> Vec<Effect> {
        if self.state.mode != Mode::Register || self.state.submitting {
            return Vec::new();
        }
        if registration.username.trim().is_empty()
            || registration.email.trim().is_empty()
            || registration.password.is_empty()
        {
            self.state.error = Some(FIELDS_REQUIRED.to_string());
            return Vec::new();
        }

        self.state.error = None;
        self.state.notice = None;
        self.state.submitting = true;
        vec![Effect::Register(registration)]
    }

    /// Switch between the login and register forms
    pub fn navigate(&mut self) {
        if self.state.submitting {
            return;
        }
        let next = match self.state.mode {
            Mode::Login => Mode::Register,
            Mode::Register => Mode::Login,
            _ => return,
        };
        self.state.mode = next;
        self.state.error = None;
        self.state.notice = None;
    }

    /// Drop the identity and every fetched list, from any authenticated mode
    pub fn logout(&mut self) {
        if !self.state.mode.is_authenticated() {
            return;
        }
        if let Err(e) = self.session.end() {
            tracing::warn!("Failed to clear session: {:#}", e);
        }

        // Anything still in flight belongs to the old identity
        self.products_ticket += 1;
        self.recommendations_ticket += 1;

        self.state = ViewState::new(Mode::Login);
        tracing::info!("Logged out");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation and filters
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_recommendations(&mut self) -> Vec<Effect> {
        if self.state.mode != Mode::Browsing {
            return Vec::new();
        }
        self.state.mode = Mode::Recommendations;
        let mut effects: Vec<Effect> = self.fetch_recommendations().into_iter().collect();
        effects.extend(self.sync_mounts());
        effects
    }

    pub fn show_browsing(&mut self) -> Vec<Effect> {
        if self.state.mode != Mode::Recommendations {
            return Vec::new();
        }
        self.state.mode = Mode::Browsing;
        self.sync_mounts()
    }

    pub fn toggle_view(&mut self) -> Vec<Effect> {
        match self.state.mode {
            Mode::Browsing => self.show_recommendations(),
            Mode::Recommendations => self.show_browsing(),
            _ => Vec::new(),
        }
    }

    /// Edit the search box. Does not fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    /// Submit the current search term and category
    pub fn search(&mut self) -> Vec<Effect> {
        if !self.state.mode.is_authenticated() {
            return Vec::new();
        }
        self.fetch_products()
    }

    /// Change the category filter; fetches immediately
    pub fn set_category(&mut self, category: Option<String>) -> Vec<Effect> {
        if !self.state.mode.is_authenticated() {
            return Vec::new();
        }
        let category = category.filter(|c| !c.is_empty());
        if category == self.state.selected_category {
            return Vec::new();
        }
        self.state.selected_category = category;
        self.fetch_products()
    }

    /// Step through "all categories" followed by each known category
    pub fn cycle_category(&mut self, forward: bool) -> Vec<Effect> {
        let total = self.state.categories.len() + 1;
        let current = self
            .state
            .selected_category
            .as_ref()
            .and_then(|c| self.state.categories.iter().position(|x| x == c))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % total
        } else {
            (current + total - 1) % total
        };
        let category = next
            .checked_sub(1)
            .and_then(|i| self.state.categories.get(i).cloned());
        self.set_category(category)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Interactions
    // ─────────────────────────────────────────────────────────────────────

    /// Toggle the like flag of a card on screen and record a `like`
    pub fn like(&mut self, product_id: &str) -> Vec<Effect> {
        let deck = match self.state.mode {
            Mode::Browsing if !self.state.loading => &mut self.state.products,
            Mode::Recommendations => &mut self.state.recommendations,
            _ => return Vec::new(),
        };
        let Some(liked) = deck.toggle_like(product_id) else {
            return Vec::new();
        };
        tracing::debug!("Card {} liked={}", product_id, liked);

        self.interaction(product_id, InteractionKind::Like)
            .into_iter()
            .collect()
    }

    /// Mount whichever deck is now displayed and unmount the others.
    ///
    /// Returns one `view` per freshly mounted card.
    pub fn sync_mounts(&mut self) -> Vec<Effect> {
        let show_products = self.state.mode == Mode::Browsing && !self.state.loading;
        let show_recommendations = self.state.mode == Mode::Recommendations;

        let mut viewed = Vec::new();
        for (deck, shown) in [
            (&mut self.state.products, show_products),
            (&mut self.state.recommendations, show_recommendations),
        ] {
            if shown {
                viewed.extend(deck.mount());
            } else if deck.is_mounted() {
                deck.unmount();
            }
        }

        viewed
            .iter()
            .filter_map(|id| self.interaction(id, InteractionKind::View))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Outcomes
    // ─────────────────────────────────────────────────────────────────────

    /// Absorb a completed effect; may request follow-up work
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::LoggedIn(result) => self.on_logged_in(result),
            Outcome::Registered(result) => {
                self.on_registered(result);
                Vec::new()
            }
            Outcome::Categories(result) => {
                match result {
                    Ok(categories) if self.state.mode.is_authenticated() => {
                        self.state.categories = categories;
                    }
                    Ok(_) => tracing::debug!("Dropping categories received while logged out"),
                    Err(e) => tracing::warn!("Error loading categories: {}", e),
                }
                Vec::new()
            }
            Outcome::Products { ticket, result } => self.on_products(ticket, result),
            Outcome::Recommendations { ticket, result } => self.on_recommendations(ticket, result),
            Outcome::InteractionSettled { event, result } => {
                if let Err(ref e) = result {
                    tracing::warn!(
                        "Error tracking {} on {}: {}",
                        event.kind,
                        event.product_id,
                        e
                    );
                }
                if event.kind == InteractionKind::Like {
                    return self.fetch_recommendations().into_iter().collect();
                }
                Vec::new()
            }
        }
    }

    fn on_logged_in(&mut self, result: Result<Identity, ApiError>) -> Vec<Effect> {
        self.state.submitting = false;
        if self.state.mode != Mode::Login {
            tracing::debug!("Ignoring login result outside the login form");
            return Vec::new();
        }

        match result {
            Ok(identity) => {
                tracing::info!("Logged in as {} ({})", identity.username, identity.user_id);
                if let Err(e) = self.session.establish(identity) {
                    tracing::warn!("Failed to persist session: {:#}", e);
                }
                self.state.mode = Mode::Browsing;
                self.state.error = None;
                self.state.notice = None;
                self.prime()
            }
            Err(e) => {
                tracing::info!("Login rejected: {}", e);
                self.state.error = Some(e.user_message(LOGIN_FAILED));
                Vec::new()
            }
        }
    }

    fn on_registered(&mut self, result: Result<RegisterReceipt, ApiError>) {
        self.state.submitting = false;
        if self.state.mode != Mode::Register {
            tracing::debug!("Ignoring registration result outside the register form");
            return;
        }

        match result {
            Ok(receipt) => {
                tracing::info!(
                    "Registered {}",
                    receipt.user_id.as_deref().unwrap_or("new user")
                );
                self.state.mode = Mode::Login;
                self.state.error = None;
                self.state.notice = Some(REGISTRATION_SUCCEEDED.to_string());
            }
            Err(e) => {
                tracing::info!("Registration rejected: {}", e);
                self.state.error = Some(e.user_message(REGISTRATION_FAILED));
            }
        }
    }

    fn on_products(&mut self, ticket: u64, result: Result<Vec<Product>, ApiError>) -> Vec<Effect> {
        if ticket != self.products_ticket {
            tracing::debug!(
                "Discarding stale products response (ticket {} < {})",
                ticket,
                self.products_ticket
            );
            return Vec::new();
        }

        self.state.loading = false;
        match result {
            Ok(products) => {
                tracing::debug!("Loaded {} products", products.len());
                self.state.products.replace(products);
            }
            Err(e) => {
                tracing::warn!("Error loading products: {}", e);
                self.state.error = Some(PRODUCTS_FAILED.to_string());
            }
        }
        self.sync_mounts()
    }

    fn on_recommendations(
        &mut self,
        ticket: u64,
        result: Result<Vec<Product>, ApiError>,
    ) -> Vec<Effect> {
        if ticket != self.recommendations_ticket {
            tracing::debug!(
                "Discarding stale recommendations response (ticket {} < {})",
                ticket,
                self.recommendations_ticket
            );
            return Vec::new();
        }

        match result {
            Ok(recommendations) => {
                tracing::debug!("Loaded {} recommendations", recommendations.len());
                self.state.recommendations.replace(recommendations);
                self.sync_mounts()
            }
            Err(e) => {
                tracing::warn!("Error loading recommendations: {}", e);
                Vec::new()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Effect builders
    // ─────────────────────────────────────────────────────────────────────

    /// Everything an identity becoming present triggers
    fn prime(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::FetchCategories];
        effects.extend(self.fetch_products());
        effects.extend(self.fetch_recommendations());
        effects
    }

    fn fetch_products(&mut self) -> Vec<Effect> {
        self.products_ticket += 1;
        self.state.loading = true;
        self.state.error = None;

        let query = ProductQuery::new(
            &self.state.search_term,
            self.state.selected_category.as_deref(),
        );
        let mut effects = vec![Effect::FetchProducts {
            ticket: self.products_ticket,
            query,
        }];
        // Loading hides the product list
        effects.extend(self.sync_mounts());
        effects
    }

    fn fetch_recommendations(&mut self) -> Option<Effect> {
        let user_id = self.session.identity()?.user_id.clone();
        self.recommendations_ticket += 1;
        Some(Effect::FetchRecommendations {
            ticket: self.recommendations_ticket,
            user_id,
            count: self.recommendation_count,
        })
    }

    fn interaction(&self, product_id: &str, kind: InteractionKind) -> Option<Effect> {
        let identity = self.session.identity()?;
        Some(Effect::RecordInteraction(InteractionEvent {
            user_id: identity.user_id.clone(),
            product_id: product_id.to_string(),
            kind,
        }))
    }
}
