// API client tests against the in-process demo backend

use super::*;
use crate::demo::DemoServer;

async fn start() -> (DemoServer, ApiClient) {
    let server = DemoServer::start("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    let client = ApiClient::new(&server.base_url(), RecommendationMethod::Collaborative).unwrap();
    (server, client)
}

#[tokio::test]
async fn login_returns_identity_with_submitted_email() {
    let (server, client) = start().await;

    let identity = client
        .login("alice@example.com", "password123")
        .await
        .unwrap();
    assert_eq!(identity.user_id, "u001");
    assert_eq!(identity.username, "alice");
    assert_eq!(identity.email, "alice@example.com");

    server.shutdown().await;
}

#[tokio::test]
async fn login_rejection_carries_backend_message() {
    let (server, client) = start().await;

    let err = client
        .login("alice@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Auth("Invalid credentials".to_string()));
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");

    server.shutdown().await;
}

#[tokio::test]
async fn register_then_duplicate_is_a_validation_error() {
    let (server, client) = start().await;

    let registration = Registration {
        username: "erin".to_string(),
        email: "erin@example.com".to_string(),
        password: "secret".to_string(),
        preferences: vec!["Books".to_string()],
    };
    let receipt = client.register(&registration).await.unwrap();
    assert_eq!(receipt.user_id.as_deref(), Some("u005"));

    let err = client.register(&registration).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation("Email already registered".to_string())
    );

    // The new account can log in
    let identity = client.login("erin@example.com", "secret").await.unwrap();
    assert_eq!(identity.username, "erin");

    server.shutdown().await;
}

#[tokio::test]
async fn products_honor_search_and_category() {
    let (server, client) = start().await;

    let all = client.list_products(&ProductQuery::default()).await.unwrap();
    assert_eq!(all.len(), 25);

    let books = client
        .list_products(&ProductQuery::new("", Some("Books")))
        .await
        .unwrap();
    assert_eq!(books.len(), 4);
    assert!(books.iter().all(|p| p.category == "Books"));

    let found = client
        .list_products(&ProductQuery::new("jacket", None))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Winter Jacket");

    let none = client
        .list_products(&ProductQuery::new("jacket", Some("Books")))
        .await
        .unwrap();
    assert!(none.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn categories_in_catalog_order() {
    let (server, client) = start().await;

    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories.first().map(String::as_str), Some("Electronics"));
    assert_eq!(categories.len(), 7);

    server.shutdown().await;
}

#[tokio::test]
async fn recommendations_are_scored_and_sized() {
    let (server, client) = start().await;

    let recs = client.get_recommendations("u001", 8).await.unwrap();
    assert_eq!(recs.len(), 8);
    assert!(recs.iter().all(|p| p.match_label().is_some()));

    server.shutdown().await;
}

#[tokio::test]
async fn interactions_reach_the_backend() {
    let (server, client) = start().await;

    let event = InteractionEvent {
        user_id: "u001".to_string(),
        product_id: "p003".to_string(),
        kind: InteractionKind::Like,
    };
    client.record_interaction(&event).await.unwrap();
    assert_eq!(server.interaction_count(Some("like")), 1);
    assert_eq!(server.interaction_count(Some("view")), 0);

    let unknown = InteractionEvent {
        product_id: "nope".to_string(),
        ..event
    };
    let err = client.record_interaction(&unknown).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 404,
            message: "User or Product not found".to_string()
        }
    );

    server.shutdown().await;
}

#[test]
fn product_url_encodes_filters() {
    let client = ApiClient::new("http://localhost:8000", RecommendationMethod::Collaborative)
        .unwrap();

    let url = client.products_url(&ProductQuery::new("shirt", Some("Apparel")));
    assert_eq!(url.path(), "/api/products");
    assert_eq!(url.query(), Some("search=shirt&category=Apparel"));

    let url = client.products_url(&ProductQuery::new("red shoes", Some("Home & Garden")));
    assert_eq!(
        url.query(),
        Some("search=red+shoes&category=Home+%26+Garden")
    );

    let url = client.products_url(&ProductQuery::default());
    assert_eq!(url.query(), None);
}

#[test]
fn recommendations_url_carries_count_and_method() {
    let client = ApiClient::new("http://localhost:8000/", RecommendationMethod::Content).unwrap();
    let url = client.recommendations_url("u001", 8);
    assert_eq!(url.path(), "/api/recommendations/u001");
    assert_eq!(url.query(), Some("n=8&method=content"));
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(ApiClient::new("not a url", RecommendationMethod::Collaborative).is_err());
    assert!(ApiClient::new("mailto:shop@example.com", RecommendationMethod::Collaborative).is_err());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Bind then drop to find a port nothing listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = ApiClient::new(
        &format!("http://127.0.0.1:{}", port),
        RecommendationMethod::Collaborative,
    )
    .unwrap();

    let err = client.list_categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
}
