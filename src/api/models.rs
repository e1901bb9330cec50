//! Wire types for the storefront API
//!
//! These mirror the JSON the backend speaks. Field names follow the wire
//! format (`_id`, `interaction_type`) via serde attributes so the rest of the
//! crate can use plain Rust names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated user held by the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    /// Login responses omit the email, so the client fills it in from the
    /// credentials that were submitted.
    #[serde(default)]
    pub email: String,
}

/// A catalog entry. Owned by the backend, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    /// Only present on products returned by the recommendations endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_score: Option<f64>,
}

impl Product {
    /// Match percentage shown on recommended cards (`score * 20`, rounded).
    ///
    /// A missing or zero score renders no badge at all.
    pub fn match_percent(&self) -> Option<i64> {
        match self.recommendation_score {
            Some(score) if score != 0.0 && score.is_finite() => Some((score * 20.0).round() as i64),
            _ => None,
        }
    }

    /// Label for the match badge, e.g. "Match: 90%"
    pub fn match_label(&self) -> Option<String> {
        self.match_percent().map(|p| format!("Match: {}%", p))
    }

    /// Price formatted the way the catalog shows it
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Kind of interaction recorded against a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Like,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single interaction, sent once and never kept locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub user_id: String,
    pub product_id: String,
    #[serde(rename = "interaction_type")]
    pub kind: InteractionKind,
}

/// Registration form payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Filters for the product listing. Empty strings count as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn new(search: &str, category: Option<&str>) -> Self {
        Self {
            search: non_empty(search),
            category: category.and_then(non_empty),
        }
    }

    /// Query pairs in the order the backend documents them
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(search) = &self.search {
            pairs.push(("search", search.as_str()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.as_str()));
        }
        pairs
    }
}

/// Only the empty string is dropped; anything else is sent as typed
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Recommendation strategy understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationMethod {
    #[default]
    Collaborative,
    Content,
}

impl RecommendationMethod {
    /// Parse from config; unknown values fall back to collaborative
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "content" => Self::Content,
            _ => Self::Collaborative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collaborative => "collaborative",
            Self::Content => "content",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<Product>,
}
