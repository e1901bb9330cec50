//! HTTP client for the storefront backend
//!
//! One async method per backend capability. Each call is a single
//! request/response pair: no retries, no timeouts, no deduplication. Non-2xx
//! responses become a typed [`ApiError`] carrying the backend's message;
//! transport failures become [`ApiError::Network`].

mod error;
mod models;

#[cfg(test)]
mod tests;

pub use error::{extract_message, ApiError};
pub use models::{
    Identity, InteractionEvent, InteractionKind, Product, ProductQuery, RecommendationMethod,
    RegisterReceipt, Registration,
};

use models::{CategoriesResponse, LoginResponse, ProductsResponse, RecommendationsResponse};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Client for the storefront REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    method: RecommendationMethod,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: &str, method: RecommendationMethod) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Network(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Network(format!(
                "Invalid API URL '{}': not a base URL",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            method,
        })
    }

    /// POST /api/login
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        let url = self.endpoint(&["api", "login"]);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: LoginResponse = read_json(response, |_, msg| ApiError::Auth(msg)).await?;
        Ok(Identity {
            user_id: body.user_id,
            username: body.username,
            email: body.email.unwrap_or_else(|| email.to_string()),
        })
    }

    /// POST /api/register. Never authenticates.
    pub async fn register(&self, registration: &Registration) -> Result<RegisterReceipt, ApiError> {
        let url = self.endpoint(&["api", "register"]);
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(registration).send().await?;
        read_json(response, |_, msg| ApiError::Validation(msg)).await
    }

    /// GET /api/categories
    pub async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["api", "categories"]);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let body: CategoriesResponse = read_json(response, rejected).await?;
        Ok(body.categories)
    }

    /// GET /api/products with optional `search` / `category`
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let url = self.products_url(query);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let body: ProductsResponse = read_json(response, rejected).await?;
        Ok(body.products)
    }

    /// GET /api/recommendations/{user_id}?n={count}
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        count: usize,
    ) -> Result<Vec<Product>, ApiError> {
        let url = self.recommendations_url(user_id, count);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let body: RecommendationsResponse = read_json(response, rejected).await?;
        Ok(body.recommendations)
    }

    /// POST /api/interactions. The response body is not needed.
    pub async fn record_interaction(&self, event: &InteractionEvent) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "interactions"]);
        tracing::trace!("POST {} ({} {})", url, event.kind, event.product_id);

        let response = self.client.post(url).json(event).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(rejected(status.as_u16(), extract_message(status.as_u16(), &body)))
    }

    pub(crate) fn products_url(&self, query: &ProductQuery) -> Url {
        let mut url = self.endpoint(&["api", "products"]);
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    pub(crate) fn recommendations_url(&self, user_id: &str, count: usize) -> Url {
        let mut url = self.endpoint(&["api", "recommendations", user_id]);
        url.query_pairs_mut()
            .append_pair("n", &count.to_string())
            .append_pair("method", self.method.as_str());
        url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(): the base can always carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn rejected(status: u16, message: String) -> ApiError {
    ApiError::Rejected { status, message }
}

/// Decode a 2xx body, or map a non-2xx response through `on_reject`
async fn read_json<T, F>(response: Response, on_reject: F) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    F: FnOnce(u16, String) -> ApiError,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(status.as_u16(), &body);
        return Err(on_reject(status.as_u16(), message));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
