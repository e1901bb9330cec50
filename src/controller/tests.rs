// Controller tests: the mode machine, fetch policies and interaction flow

use super::*;
use crate::session::SessionStore;
use tempfile::TempDir;

fn alice() -> Identity {
    Identity {
        user_id: "u001".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

fn product(id: &str, score: Option<f64>) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        description: String::new(),
        category: "Books".to_string(),
        price: 19.99,
        image_url: String::new(),
        recommendation_score: score,
    }
}

fn store(dir: &TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("session.json"))
}

fn logged_out(dir: &TempDir) -> Controller {
    Controller::new(Session::open(store(dir)), 8)
}

/// A restored session with its initial fetches already issued
fn logged_in(dir: &TempDir) -> (Controller, Vec<Effect>) {
    store(dir).save(&alice()).unwrap();
    let mut controller = Controller::new(Session::open(store(dir)), 8);
    let effects = controller.start();
    (controller, effects)
}

fn views(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::RecordInteraction(ev) if ev.kind == InteractionKind::View => {
                Some(ev.product_id.as_str())
            }
            _ => None,
        })
        .collect()
}

fn likes(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::RecordInteraction(ev) if ev.kind == InteractionKind::Like))
        .count()
}

fn products_ticket(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::FetchProducts { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("no products fetch issued")
}

fn recommendations_ticket(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::FetchRecommendations { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("no recommendations fetch issued")
}

fn refetches(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::FetchRecommendations { .. }))
        .count()
}

/// Logged in with products p1, p2 on screen
fn browsing_with_products(dir: &TempDir) -> Controller {
    let (mut controller, effects) = logged_in(dir);
    let ticket = products_ticket(&effects);
    controller.apply(Outcome::Products {
        ticket,
        result: Ok(vec![product("p1", None), product("p2", None)]),
    });
    controller
}

// ─────────────────────────────────────────────────────────────────────────────
// Start and auth
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn starts_at_login_without_identity() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);
    assert_eq!(controller.state().mode, Mode::Login);
    assert!(controller.start().is_empty());
}

#[test]
fn restored_identity_starts_browsing_and_primes_lists() {
    let dir = tempfile::tempdir().unwrap();
    let (controller, effects) = logged_in(&dir);

    assert_eq!(controller.state().mode, Mode::Browsing);
    assert!(controller.state().loading);
    assert_eq!(
        effects,
        vec![
            Effect::FetchCategories,
            Effect::FetchProducts {
                ticket: 1,
                query: ProductQuery::default()
            },
            Effect::FetchRecommendations {
                ticket: 1,
                user_id: "u001".to_string(),
                count: 8
            },
        ]
    );
}

#[test]
fn valid_login_moves_to_browsing_and_persists_identity() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);

    let effects = controller.submit_login("alice@example.com", "password123");
    assert_eq!(
        effects,
        vec![Effect::Login {
            email: "alice@example.com".to_string(),
            password: "password123".to_string()
        }]
    );
    assert!(controller.state().submitting);
    assert!(controller.submit_login("alice@example.com", "password123").is_empty());

    let effects = controller.apply(Outcome::LoggedIn(Ok(alice())));
    assert_eq!(controller.state().mode, Mode::Browsing);
    assert!(!controller.state().submitting);
    assert_eq!(controller.identity(), Some(&alice()));
    assert_eq!(store(&dir).load(), Some(alice()));
    assert!(effects.contains(&Effect::FetchCategories));
    assert_eq!(refetches(&effects), 1);
    products_ticket(&effects);
}

#[test]
fn rejected_login_stays_with_backend_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);

    controller.submit_login("alice@example.com", "wrong");
    let effects = controller.apply(Outcome::LoggedIn(Err(ApiError::Auth(
        "Invalid credentials".to_string(),
    ))));

    assert!(effects.is_empty());
    assert_eq!(controller.state().mode, Mode::Login);
    assert_eq!(controller.state().error.as_deref(), Some("Invalid credentials"));
    assert!(controller.identity().is_none());
    assert_eq!(store(&dir).load(), None);
}

#[test]
fn unreachable_login_shows_generic_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);

    controller.submit_login("alice@example.com", "password123");
    controller.apply(Outcome::LoggedIn(Err(ApiError::Network(
        "connection refused".to_string(),
    ))));
    assert_eq!(controller.state().error.as_deref(), Some(LOGIN_FAILED));
}

#[test]
fn blank_login_is_not_submitted() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);

    assert!(controller.submit_login("  ", "password123").is_empty());
    assert_eq!(controller.state().error.as_deref(), Some(FIELDS_REQUIRED));
    assert!(!controller.state().submitting);
}

#[test]
fn registration_returns_to_login_with_notice() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);
    controller.navigate();
    assert_eq!(controller.state().mode, Mode::Register);

    let registration = Registration {
        username: "erin".to_string(),
        email: "erin@example.com".to_string(),
        password: "secret".to_string(),
        preferences: vec!["Books".to_string()],
    };
    let effects = controller.submit_register(registration.clone());
    assert_eq!(effects, vec![Effect::Register(registration)]);

    controller.apply(Outcome::Registered(Ok(RegisterReceipt {
        message: "User registered successfully".to_string(),
        user_id: Some("u005".to_string()),
    })));
    assert_eq!(controller.state().mode, Mode::Login);
    assert_eq!(controller.state().notice.as_deref(), Some(REGISTRATION_SUCCEEDED));
    assert!(controller.state().error.is_none());
    // Never signs in on its own
    assert!(controller.identity().is_none());
}

#[test]
fn rejected_registration_keeps_the_form() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);
    controller.navigate();

    let registration = Registration {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "x".to_string(),
        preferences: Vec::new(),
    };
    controller.submit_register(registration.clone());
    controller.apply(Outcome::Registered(Err(ApiError::Validation(
        "Email already registered".to_string(),
    ))));
    assert_eq!(controller.state().mode, Mode::Register);
    assert_eq!(
        controller.state().error.as_deref(),
        Some("Email already registered")
    );

    controller.submit_register(registration);
    controller.apply(Outcome::Registered(Err(ApiError::Decode("eof".to_string()))));
    assert_eq!(controller.state().error.as_deref(), Some(REGISTRATION_FAILED));
}

#[test]
fn navigation_clears_messages() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);
    controller.submit_login("", "");
    assert!(controller.state().error.is_some());

    controller.navigate();
    assert_eq!(controller.state().mode, Mode::Register);
    assert!(controller.state().error.is_none());
    controller.navigate();
    assert_eq!(controller.state().mode, Mode::Login);
}

// ─────────────────────────────────────────────────────────────────────────────
// Logout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn logout_clears_everything_from_any_authenticated_mode() {
    for to_recommendations in [false, true] {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = browsing_with_products(&dir);
        if to_recommendations {
            let effects = controller.show_recommendations();
            controller.apply(Outcome::Recommendations {
                ticket: recommendations_ticket(&effects),
                result: Ok(vec![product("p9", Some(4.5))]),
            });
            assert_eq!(controller.state().recommendations.len(), 1);
        }

        controller.logout();

        let state = controller.state();
        assert_eq!(state.mode, Mode::Login);
        assert!(state.products.is_empty());
        assert!(state.recommendations.is_empty());
        assert!(controller.identity().is_none());
        assert_eq!(store(&dir).load(), None);
    }
}

#[test]
fn responses_after_logout_do_not_repopulate() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, effects) = logged_in(&dir);
    controller.logout();

    let late = controller.apply(Outcome::Products {
        ticket: products_ticket(&effects),
        result: Ok(vec![product("p1", None)]),
    });
    controller.apply(Outcome::Recommendations {
        ticket: recommendations_ticket(&effects),
        result: Ok(vec![product("p2", Some(3.0))]),
    });
    controller.apply(Outcome::Categories(Ok(vec!["Books".to_string()])));

    assert!(late.is_empty());
    assert!(controller.state().products.is_empty());
    assert!(controller.state().recommendations.is_empty());
    assert!(controller.state().categories.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Products and filters
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn search_and_category_are_sent_together() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, _) = logged_in(&dir);
    controller.apply(Outcome::Categories(Ok(vec!["Apparel".to_string()])));

    controller.set_search_term("shirt");
    let effects = controller.set_category(Some("Apparel".to_string()));
    let query = effects
        .iter()
        .find_map(|e| match e {
            Effect::FetchProducts { query, .. } => Some(query.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(query.pairs(), vec![("search", "shirt"), ("category", "Apparel")]);

    controller.set_search_term("");
    controller.set_category(None);
    let effects = controller.search();
    assert!(effects.contains(&Effect::FetchProducts {
        ticket: products_ticket(&effects),
        query: ProductQuery::default(),
    }));
}

#[test]
fn editing_the_search_term_alone_does_not_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, effects) = logged_in(&dir);
    let first = products_ticket(&effects);

    controller.set_search_term("lamp");
    assert_eq!(controller.state().search_term, "lamp");

    let effects = controller.search();
    assert_eq!(products_ticket(&effects), first + 1);
}

#[test]
fn superseded_products_response_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, effects) = logged_in(&dir);
    let old = products_ticket(&effects);

    controller.set_search_term("book");
    let new = products_ticket(&controller.search());

    controller.apply(Outcome::Products {
        ticket: new,
        result: Ok(vec![product("new", None)]),
    });
    controller.apply(Outcome::Products {
        ticket: old,
        result: Ok(vec![product("old", None)]),
    });

    let ids: Vec<&str> = controller
        .state()
        .products
        .products()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["new"]);
    assert!(!controller.state().loading);
}

#[test]
fn products_failure_sets_error_and_keeps_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = browsing_with_products(&dir);

    let ticket = products_ticket(&controller.search());
    assert!(controller.state().loading);
    let effects = controller.apply(Outcome::Products {
        ticket,
        result: Err(ApiError::Network("reset".to_string())),
    });

    assert!(!controller.state().loading);
    assert_eq!(controller.state().error.as_deref(), Some(PRODUCTS_FAILED));
    assert_eq!(controller.state().products.len(), 2);

    // The kept list is displayed again under the error, so it remounts
    let displayed = controller.state().displayed().map(CardDeck::len);
    assert_eq!(displayed, Some(2));
    assert_eq!(views(&effects), vec!["p1", "p2"]);
}

#[test]
fn category_cycle_wraps_through_all() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, _) = logged_in(&dir);
    controller.apply(Outcome::Categories(Ok(vec![
        "Books".to_string(),
        "Toys".to_string(),
    ])));

    controller.cycle_category(true);
    assert_eq!(controller.state().selected_category.as_deref(), Some("Books"));
    controller.cycle_category(true);
    assert_eq!(controller.state().selected_category.as_deref(), Some("Toys"));
    controller.cycle_category(true);
    assert_eq!(controller.state().selected_category, None);
    controller.cycle_category(false);
    assert_eq!(controller.state().selected_category.as_deref(), Some("Toys"));
}

#[test]
fn category_and_recommendation_failures_are_silent() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, effects) = logged_in(&dir);
    controller.apply(Outcome::Categories(Ok(vec!["Books".to_string()])));

    controller.apply(Outcome::Categories(Err(ApiError::Network("down".to_string()))));
    controller.apply(Outcome::Recommendations {
        ticket: recommendations_ticket(&effects),
        result: Err(ApiError::Rejected {
            status: 500,
            message: "boom".to_string(),
        }),
    });

    assert_eq!(controller.state().categories, vec!["Books".to_string()]);
    assert!(controller.state().recommendations.is_empty());
    assert!(controller.state().error.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Interaction tracking
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn each_card_is_viewed_once_per_mount() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, effects) = logged_in(&dir);

    let effects = controller.apply(Outcome::Products {
        ticket: products_ticket(&effects),
        result: Ok(vec![product("p1", None), product("p2", None)]),
    });
    assert_eq!(views(&effects), vec!["p1", "p2"]);

    // Re-rendering the mounted list emits nothing
    assert!(controller.sync_mounts().is_empty());
    assert!(controller.sync_mounts().is_empty());
}

#[test]
fn navigation_remounts_and_views_again() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = browsing_with_products(&dir);

    controller.show_recommendations();
    assert!(!controller.state().products.is_mounted());

    let effects = controller.show_browsing();
    assert_eq!(views(&effects), vec!["p1", "p2"]);
}

#[test]
fn refreshed_list_only_views_new_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = browsing_with_products(&dir);
    let effects = controller.show_recommendations();
    let effects = controller.apply(Outcome::Recommendations {
        ticket: recommendations_ticket(&effects),
        result: Ok(vec![product("p3", Some(4.0)), product("p4", Some(3.0))]),
    });
    assert_eq!(views(&effects), vec!["p3", "p4"]);

    let like = controller.like("p3");
    let refresh = controller.apply(Outcome::InteractionSettled {
        event: match &like[0] {
            Effect::RecordInteraction(ev) => ev.clone(),
            other => panic!("unexpected effect {:?}", other),
        },
        result: Ok(()),
    });
    let effects = controller.apply(Outcome::Recommendations {
        ticket: recommendations_ticket(&refresh),
        result: Ok(vec![product("p4", Some(3.5)), product("p5", Some(2.0))]),
    });
    assert_eq!(views(&effects), vec!["p5"]);
}

#[test]
fn like_toggles_flag_and_triggers_exactly_one_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = browsing_with_products(&dir);

    let effects = controller.like("p1");
    assert_eq!(likes(&effects), 1);
    assert_eq!(effects.len(), 1);
    assert!(controller.state().products.is_liked("p1"));

    let Effect::RecordInteraction(event) = effects[0].clone() else {
        panic!("expected an interaction");
    };
    assert_eq!(event.user_id, "u001");

    let follow_up = controller.apply(Outcome::InteractionSettled {
        event: event.clone(),
        result: Ok(()),
    });
    assert_eq!(refetches(&follow_up), 1);
    assert_eq!(follow_up.len(), 1);

    // Unliking records another like and flips the flag back
    let effects = controller.like("p1");
    assert_eq!(likes(&effects), 1);
    assert!(!controller.state().products.is_liked("p1"));

    // A failed like still refreshes once
    let follow_up = controller.apply(Outcome::InteractionSettled {
        event,
        result: Err(ApiError::Network("down".to_string())),
    });
    assert_eq!(refetches(&follow_up), 1);
}

#[test]
fn settled_views_do_not_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = browsing_with_products(&dir);

    let effects = controller.apply(Outcome::InteractionSettled {
        event: InteractionEvent {
            user_id: "u001".to_string(),
            product_id: "p1".to_string(),
            kind: InteractionKind::View,
        },
        result: Ok(()),
    });
    assert!(effects.is_empty());
}

#[test]
fn like_on_hidden_card_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = browsing_with_products(&dir);

    assert!(controller.like("missing").is_empty());

    controller.search();
    // Product list is behind the loading placeholder
    assert!(controller.like("p1").is_empty());
}

#[test]
fn no_identity_means_no_recommendation_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = logged_out(&dir);

    let effects = controller.apply(Outcome::InteractionSettled {
        event: InteractionEvent {
            user_id: "u001".to_string(),
            product_id: "p1".to_string(),
            kind: InteractionKind::Like,
        },
        result: Ok(()),
    });
    assert!(effects.is_empty());
    assert!(controller.show_recommendations().is_empty());
    assert!(controller.state().recommendations.is_empty());
}

#[test]
fn entering_recommendations_fetches_for_current_identity() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, effects) = logged_in(&dir);
    let first = recommendations_ticket(&effects);

    let effects = controller.show_recommendations();
    assert_eq!(controller.state().mode, Mode::Recommendations);
    assert_eq!(
        effects,
        vec![Effect::FetchRecommendations {
            ticket: first + 1,
            user_id: "u001".to_string(),
            count: 8,
        }]
    );
}
