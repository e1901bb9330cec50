//! Clipboard helper for copying a product to the system clipboard
//!
//! Uses `arboard` for cross-platform support (Windows, macOS, Linux). The
//! clipboard is opened per copy rather than held for the app's lifetime.

use crate::api::Product;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Plain-text summary of a product, as pasted
pub fn product_text(product: &Product) -> String {
    let mut text = format!(
        "{} - {} ({})",
        product.name,
        product.price_label(),
        product.category
    );
    if let Some(label) = product.match_label() {
        text.push_str(&format!(" [{}]", label));
    }
    if !product.description.is_empty() {
        text.push('\n');
        text.push_str(&product.description);
    }
    text
}

/// Copy a product summary. Fails without a display server or clipboard
/// permission.
pub fn copy_product(product: &Product) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(product_text(product))
        .context("Failed to set clipboard text")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_text_includes_badge_and_description() {
        let product = Product {
            id: "p003".to_string(),
            name: "Wireless Headphones".to_string(),
            description: "Noise-cancelling wireless headphones".to_string(),
            category: "Electronics".to_string(),
            price: 249.99,
            image_url: String::new(),
            recommendation_score: Some(4.0),
        };
        assert_eq!(
            product_text(&product),
            "Wireless Headphones - $249.99 (Electronics) [Match: 80%]\nNoise-cancelling wireless headphones"
        );
    }
}
