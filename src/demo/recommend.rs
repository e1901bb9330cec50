// Toy recommender for the demo backend
//
// Category affinity, not real collaborative filtering: every view, like and
// stated preference adds weight to a category, and unliked products in the
// heaviest categories come first. Scores are scaled to 0..5 so the client's
// "Match: N%" badge (score * 20) lands in 0..100.

use super::catalog::{DemoStore, DemoUser};
use crate::api::Product;
use std::collections::{HashMap, HashSet};

const VIEW_WEIGHT: f64 = 1.0;
const LIKE_WEIGHT: f64 = 3.0;
const PREFERENCE_WEIGHT: f64 = 2.0;
const MAX_SCORE: f64 = 5.0;

/// Preferences plus interaction history
pub fn collaborative(store: &DemoStore, user: &DemoUser, n: usize) -> Vec<Product> {
    let mut affinity = preference_affinity(user);
    let liked = liked_products(store, &user.id);

    for interaction in store.interactions.iter().filter(|i| i.user_id == user.id) {
        let Some(product) = store.product(&interaction.product_id) else {
            continue;
        };
        let weight = match interaction.kind.as_str() {
            "like" => LIKE_WEIGHT,
            _ => VIEW_WEIGHT,
        };
        *affinity.entry(product.category.clone()).or_default() += weight;
    }

    if affinity.is_empty() {
        return popular(store, n);
    }
    rank(store, &affinity, &liked, n)
}

/// Stated preferences only
pub fn content_based(store: &DemoStore, user: &DemoUser, n: usize) -> Vec<Product> {
    let affinity = preference_affinity(user);
    if affinity.is_empty() {
        return popular(store, n);
    }
    rank(store, &affinity, &liked_products(store, &user.id), n)
}

/// Most interacted-with products, unscored. Falls back to catalog order.
pub fn popular(store: &DemoStore, n: usize) -> Vec<Product> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for interaction in &store.interactions {
        *counts.entry(interaction.product_id.as_str()).or_default() += 1;
    }

    if counts.is_empty() {
        return store.products.iter().take(n).cloned().collect();
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .filter_map(|(id, _)| store.product(id).cloned())
        .take(n)
        .collect()
}

fn preference_affinity(user: &DemoUser) -> HashMap<String, f64> {
    let mut affinity = HashMap::new();
    for pref in &user.preferences {
        *affinity.entry(pref.clone()).or_default() += PREFERENCE_WEIGHT;
    }
    affinity
}

fn liked_products<'a>(store: &'a DemoStore, user_id: &str) -> HashSet<&'a str> {
    store
        .interactions
        .iter()
        .filter(|i| i.user_id == user_id && i.kind == "like")
        .map(|i| i.product_id.as_str())
        .collect()
}

fn rank(
    store: &DemoStore,
    affinity: &HashMap<String, f64>,
    liked: &HashSet<&str>,
    n: usize,
) -> Vec<Product> {
    let top = affinity.values().cloned().fold(0.0_f64, f64::max);
    if top <= 0.0 {
        return Vec::new();
    }

    let mut scored: Vec<Product> = store
        .products
        .iter()
        .filter(|p| !liked.contains(p.id.as_str()))
        .filter_map(|p| {
            let raw = affinity.get(&p.category).copied()?;
            let mut product = p.clone();
            product.recommendation_score = Some(((raw / top) * MAX_SCORE * 100.0).round() / 100.0);
            Some(product)
        })
        .collect();

    scored.sort_by(|a, b| {
        let sa = a.recommendation_score.unwrap_or(0.0);
        let sb = b.recommendation_score.unwrap_or(0.0);
        sb.total_cmp(&sa).then_with(|| a.name.cmp(&b.name))
    });
    scored.truncate(n);
    scored
}
