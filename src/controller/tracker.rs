//! Product card lifecycle and interaction tracking
//!
//! A [`CardDeck`] is one product list together with the local state of the
//! cards rendered from it. Each card carries two flags:
//!
//! - `viewed`: set the first time the card is mounted, after its `view`
//!   interaction has been handed out. A mounted card never emits again.
//! - `liked`: toggled by the user. Purely local; it is not restored from any
//!   earlier session.
//!
//! Card state lives only while the deck is mounted. Unmounting (navigating
//! away, or the list being replaced by a loading placeholder) discards it, so
//! the next mount starts fresh. Replacing the list of a mounted deck keeps the
//! state of cards whose id survives, like keyed reconciliation in a UI
//! toolkit.

use crate::api::Product;
use std::collections::HashMap;

/// Per-card local state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub viewed: bool,
    pub liked: bool,
}

/// A product list plus the state of its mounted cards
#[derive(Debug, Default)]
pub struct CardDeck {
    products: Vec<Product>,
    cards: HashMap<String, CardState>,
    mounted: bool,
}

impl CardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    pub fn card(&self, product_id: &str) -> CardState {
        self.cards.get(product_id).copied().unwrap_or_default()
    }

    pub fn is_liked(&self, product_id: &str) -> bool {
        self.card(product_id).liked
    }

    /// Swap in a freshly fetched list, keeping state for surviving ids
    pub fn replace(&mut self, products: Vec<Product>) {
        self.cards
            .retain(|id, _| products.iter().any(|p| &p.id == id));
        self.products = products;
    }

    /// Mount (or re-render) every card.
    ///
    /// Returns the ids that were not yet viewed, in list order and each at
    /// most once; those cards are marked viewed. Calling this again without
    /// an unmount in between returns nothing for cards already seen.
    pub fn mount(&mut self) -> Vec<String> {
        self.mounted = true;

        let mut fresh = Vec::new();
        for product in &self.products {
            let card = self.cards.entry(product.id.clone()).or_default();
            if !card.viewed {
                card.viewed = true;
                fresh.push(product.id.clone());
            }
        }
        fresh
    }

    /// Tear down every card; their state is gone
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.cards.clear();
    }

    /// Flip the liked flag of a mounted card.
    ///
    /// Returns the new value, or `None` when no such card is on screen.
    pub fn toggle_like(&mut self, product_id: &str) -> Option<bool> {
        if !self.mounted || !self.contains(product_id) {
            return None;
        }
        let card = self.cards.entry(product_id.to_string()).or_default();
        card.liked = !card.liked;
        Some(card.liked)
    }
}
